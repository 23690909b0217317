//! The provisioning reconciler

use tracing::{debug, info, warn};

use tether_api::{NewWebhook, WebhookDirectory, normalize_id};

use crate::{ProvisionConfig, ProvisionError, Result, Sleeper};

/// Drives the webhook directory toward "a webhook for this target URL
/// exists and is active".
///
/// Each reconciliation pass re-lists the directory, classifies the result,
/// and acts once:
///
/// - no webhook matches the target URL → create one, re-list immediately
///   (the next list is expected to observe the new entry);
/// - the first match is active → done;
/// - the first match is not active → request activation, wait for the
///   configured delay, re-list.
///
/// The pass count is bounded by [`ProvisionConfig::max_attempts`]. All
/// directory failures abort the run; retry on top of a failed call is
/// deliberately not this layer's job.
///
/// Duplicate matches can exist because the directory enforces no uniqueness
/// on target URLs. Only the first match in list order is acted on per pass;
/// the rest are logged and ignored.
#[derive(Debug)]
pub struct Provisioner<D, S> {
    directory: D,
    sleeper: S,
    config: ProvisionConfig,
}

impl<D: WebhookDirectory, S: Sleeper> Provisioner<D, S> {
    /// Create a provisioner over a directory and delay scheduler.
    pub fn new(directory: D, sleeper: S, config: ProvisionConfig) -> Self {
        Self {
            directory,
            sleeper,
            config,
        }
    }

    /// Get the configuration.
    pub fn config(&self) -> &ProvisionConfig {
        &self.config
    }

    /// Reconcile until a webhook for `target_url` is active or the attempt
    /// ceiling is reached.
    pub async fn provision(&self, target_url: &str) -> Result<()> {
        let mut attempts = 0;

        loop {
            if attempts == self.config.max_attempts {
                warn!(
                    attempts,
                    target_url, "webhook never became active, giving up"
                );
                return Err(ProvisionError::Exhausted { attempts });
            }
            attempts += 1;

            debug!(attempt = attempts, target_url, "reconciliation pass");
            let webhooks = self.directory.list(&self.config.app_id).await?;
            let mut matches = webhooks.iter().filter(|w| w.target_url == target_url);

            match matches.next() {
                Some(webhook) => {
                    let extra = matches.count();
                    if extra > 0 {
                        warn!(
                            target_url,
                            duplicates = extra,
                            "directory holds duplicate webhooks for this URL, acting on the first"
                        );
                    }

                    if webhook.is_active() {
                        info!(attempt = attempts, target_url, "webhook is active");
                        return Ok(());
                    }

                    let webhook_id = normalize_id(&webhook.id);
                    debug!(webhook_id, "requesting activation");
                    self.directory
                        .activate(&self.config.app_id, webhook_id)
                        .await?;
                    // Activation is asynchronous on the remote side; give it
                    // time to flip before the next list.
                    self.sleeper.sleep(self.config.activation_delay).await;
                }
                None => {
                    debug!(target_url, "no matching webhook, creating one");
                    let payload = NewWebhook {
                        target_url: target_url.to_string(),
                        events: self.config.events.clone(),
                        secret: self.config.secret.clone(),
                    };
                    self.directory.create(&self.config.app_id, &payload).await?;
                    // No delay here: the next pass's list is expected to
                    // already observe the created entry.
                }
            }
        }
    }
}
