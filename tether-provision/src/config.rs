//! Configuration for the provisioner

use std::time::Duration;

/// Configuration for a provisioning run
///
/// The ceiling and delay are injected rather than hard-coded so tests can
/// reconcile without real time. With the defaults, the worst all-pending
/// case costs roughly 30 seconds of backoff before exhaustion.
#[derive(Debug, Clone)]
pub struct ProvisionConfig {
    /// Platform-qualified locator of the application owning the webhooks.
    pub app_id: String,

    /// Signing secret forwarded unchanged into webhook creation.
    pub secret: String,

    /// Events the webhook subscribes to, in manifest order.
    pub events: Vec<String>,

    /// Hard ceiling on reconciliation passes.
    pub max_attempts: u32,

    /// Delay after an activation request, giving the remote side time to
    /// flip status before the next list.
    pub activation_delay: Duration,
}

impl ProvisionConfig {
    /// Create a builder for the given application.
    pub fn builder(app_id: impl Into<String>) -> ProvisionConfigBuilder {
        ProvisionConfigBuilder {
            config: ProvisionConfig {
                app_id: app_id.into(),
                secret: String::new(),
                events: Vec::new(),
                max_attempts: 10,
                activation_delay: Duration::from_millis(3000),
            },
        }
    }
}

/// Builder for [`ProvisionConfig`]
#[derive(Debug, Clone)]
pub struct ProvisionConfigBuilder {
    config: ProvisionConfig,
}

impl ProvisionConfigBuilder {
    /// Set the webhook signing secret.
    pub fn secret(mut self, secret: impl Into<String>) -> Self {
        self.config.secret = secret.into();
        self
    }

    /// Set the subscribed events.
    pub fn events(mut self, events: Vec<String>) -> Self {
        self.config.events = events;
        self
    }

    /// Set the ceiling on reconciliation passes.
    pub fn max_attempts(mut self, max_attempts: u32) -> Self {
        self.config.max_attempts = max_attempts;
        self
    }

    /// Set the post-activation delay.
    pub fn activation_delay(mut self, delay: Duration) -> Self {
        self.config.activation_delay = delay;
        self
    }

    /// Build the configuration.
    pub fn build(self) -> ProvisionConfig {
        self.config
    }
}
