//! Wire types shared by the platform clients

use serde::{Deserialize, Serialize};

/// Activation status of a webhook as reported by the directory.
///
/// The directory is string-valued on the wire; anything it reports beyond
/// the two known states decodes to [`WebhookStatus::Unknown`] and is treated
/// as "not yet ready" by the reconciler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WebhookStatus {
    /// Registered and delivering events.
    Active,
    /// Registered but awaiting activation.
    Pending,
    /// Any other wire value.
    #[serde(other)]
    Unknown,
}

/// A webhook registered with the directory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Webhook {
    /// Platform-qualified webhook locator.
    pub id: String,

    /// The endpoint this webhook delivers to.
    pub target_url: String,

    /// Activation status.
    pub status: WebhookStatus,

    /// Events this webhook is subscribed to.
    #[serde(default)]
    pub events: Vec<String>,
}

impl Webhook {
    /// Whether the directory reports this webhook as active.
    pub fn is_active(&self) -> bool {
        self.status == WebhookStatus::Active
    }
}

/// Payload for registering a new webhook
#[derive(Debug, Clone, Serialize)]
pub struct NewWebhook {
    /// The endpoint to deliver to.
    pub target_url: String,

    /// Events to subscribe to.
    pub events: Vec<String>,

    /// Signing secret forwarded unchanged to the platform.
    pub secret: String,
}

/// An authenticated dashboard session
#[derive(Debug, Clone, Deserialize)]
pub struct Session {
    /// Bearer token for subsequent dashboard calls.
    pub session_token: String,
}

/// An organization the authenticated user belongs to
#[derive(Debug, Clone, Deserialize)]
pub struct Organization {
    pub name: String,
    pub slug: String,

    /// Whether the organization has a billing account. Organizations
    /// without one only have a staging environment.
    #[serde(default)]
    pub has_account: bool,
}

/// An application under an organization
#[derive(Debug, Clone, Deserialize)]
pub struct Application {
    pub name: String,
    pub slug: String,
}

/// A server API token minted for the integration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerToken {
    /// The bearer token used to authenticate against the webhook directory.
    pub api_key: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_decodes_known_values() {
        let active: WebhookStatus = serde_json::from_str("\"active\"").unwrap();
        assert_eq!(active, WebhookStatus::Active);

        let pending: WebhookStatus = serde_json::from_str("\"pending\"").unwrap();
        assert_eq!(pending, WebhookStatus::Pending);
    }

    #[test]
    fn status_tolerates_unrecognized_values() {
        let status: WebhookStatus = serde_json::from_str("\"suspended\"").unwrap();
        assert_eq!(status, WebhookStatus::Unknown);
    }

    #[test]
    fn webhook_decodes_without_events() {
        let webhook: Webhook = serde_json::from_str(
            r#"{
                "id": "tether:///apps/staging/hook-1",
                "target_url": "https://example.com/webhook",
                "status": "pending"
            }"#,
        )
        .unwrap();
        assert!(!webhook.is_active());
        assert!(webhook.events.is_empty());
    }

    #[test]
    fn new_webhook_serializes_all_fields() {
        let payload = NewWebhook {
            target_url: "https://example.com/webhook".into(),
            events: vec!["message.sent".into()],
            secret: "s3cret".into(),
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["target_url"], "https://example.com/webhook");
        assert_eq!(json["events"][0], "message.sent");
        assert_eq!(json["secret"], "s3cret");
    }
}
