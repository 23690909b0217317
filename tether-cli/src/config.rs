//! Manifest and configuration files
//!
//! An integration directory carries two input files and produces one output:
//!
//! - `tether_manifest.yml` — the integration manifest: name, provider,
//!   webhook events, API permissions, and any extra wizard inputs.
//! - `serverless.yml` — the serverless framework config; only the service
//!   name is read.
//! - `src/tether_config.json` — the assembled configuration the deployed
//!   function reads at runtime, written at the end of the wizard.

use std::fmt;
use std::path::Path;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Integration manifest file name.
pub const MANIFEST_FILE: &str = "tether_manifest.yml";

/// Serverless framework config file name.
pub const SERVERLESS_FILE: &str = "serverless.yml";

/// Assembled configuration path, relative to the integration directory.
pub const CONFIG_FILE: &str = "src/tether_config.json";

/// Supported serverless infrastructure providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Aws,
    Azure,
}

impl Provider {
    /// Environment variables that must be set before deploying.
    pub fn required_env(&self) -> &'static [&'static str] {
        match self {
            Provider::Aws => &["AWS_ACCESS_KEY_ID", "AWS_SECRET_ACCESS_KEY"],
            Provider::Azure => &[
                "AZURE_SUBSCRIPTION_ID",
                "AZURE_TENANT_ID",
                "AZURE_CLIENT_ID",
                "AZURE_CLIENT_SECRET",
            ],
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provider::Aws => write!(f, "aws"),
            Provider::Azure => write!(f, "azure"),
        }
    }
}

/// The integration manifest (`tether_manifest.yml`)
#[derive(Debug, Clone, Deserialize)]
pub struct IntegrationManifest {
    pub name: String,
    pub version: String,
    pub provider: Provider,
    pub webhook: WebhookManifest,
    pub api: ApiManifest,

    /// Extra wizard inputs declared by the integration.
    #[serde(default)]
    pub input: Vec<InputSpec>,
}

/// Webhook section of the manifest
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookManifest {
    /// Events the webhook subscribes to; fixed by the manifest, not
    /// user-editable.
    pub events: Vec<String>,
}

/// API section of the manifest
#[derive(Debug, Clone, Deserialize)]
pub struct ApiManifest {
    #[serde(default)]
    pub permissions: Vec<String>,
}

/// One manifest-declared wizard input
#[derive(Debug, Clone, Deserialize)]
pub struct InputSpec {
    /// Key under which the value lands in the assembled config.
    pub key: String,

    /// Prompt label.
    pub name: String,

    /// Validation applied to the entered value.
    #[serde(rename = "type", default)]
    pub kind: InputKind,

    /// Pre-filled default.
    #[serde(default)]
    pub default: Option<String>,

    #[serde(default)]
    pub required: bool,
}

/// Validation kinds for manifest inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
    #[default]
    Text,
    Number,
    Email,
    /// `<number> <unit>` time span, e.g. `12 hours`.
    Duration,
}

/// Serverless framework config (`serverless.yml`), service name only
#[derive(Debug, Clone, Deserialize)]
pub struct ServerlessConfig {
    pub service: String,
}

/// The assembled integration configuration
///
/// Written as pretty JSON to [`CONFIG_FILE`] so the deployed function can
/// read it; reused on later runs after a confirmation prompt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntegrationConfig {
    pub app_id: String,
    pub service_name: String,
    pub provider: Provider,
    pub webhook: WebhookSection,
    pub api: ApiSection,

    /// Manifest-driven wizard inputs, flattened alongside the fixed fields.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookSection {
    pub secret: String,
    pub events: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiSection {
    pub token: String,
    #[serde(default)]
    pub permissions: Vec<String>,
}

impl IntegrationConfig {
    /// Whether an assembled configuration exists under `dir`.
    pub fn exists(dir: &Path) -> bool {
        dir.join(CONFIG_FILE).exists()
    }

    /// Load a previously assembled configuration.
    pub fn load(dir: &Path) -> crate::CliResult<Self> {
        let raw = std::fs::read_to_string(dir.join(CONFIG_FILE))?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Validate and write the configuration as pretty JSON.
    pub fn write(&self, dir: &Path) -> crate::CliResult<()> {
        if self.app_id.is_empty() {
            return Err(crate::CliError::Config("missing app_id".into()));
        }
        if self.api.token.is_empty() {
            return Err(crate::CliError::Config("missing API token".into()));
        }

        let path = dir.join(CONFIG_FILE);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

/// Load the integration manifest from `dir`.
pub fn load_manifest(dir: &Path) -> crate::CliResult<IntegrationManifest> {
    load_yaml(dir, MANIFEST_FILE)
}

/// Load the serverless framework config from `dir`.
pub fn load_serverless(dir: &Path) -> crate::CliResult<ServerlessConfig> {
    load_yaml(dir, SERVERLESS_FILE)
}

fn load_yaml<T: serde::de::DeserializeOwned>(dir: &Path, file: &str) -> crate::CliResult<T> {
    let raw = std::fs::read_to_string(dir.join(file)).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            crate::CliError::Manifest(format!(
                "Manifest file \"{file}\" not found.\n  \
                 Make sure you are running this command inside a Tether integration directory."
            ))
        } else {
            crate::CliError::Io(e)
        }
    })?;
    serde_yaml::from_str(&raw)
        .map_err(|e| crate::CliError::Manifest(format!("YAML error inside \"{file}\": {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const MANIFEST: &str = r#"
name: pagerduty
version: 1.2.0
provider: aws
webhook:
  events:
    - message.sent
    - message.read
api:
  permissions:
    - messages.read
input:
  - key: api_key
    name: PagerDuty API key
    required: true
  - key: retention
    name: Event retention
    type: duration
    default: 12 hours
"#;

    #[test]
    fn manifest_parses() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join(MANIFEST_FILE), MANIFEST).unwrap();

        let manifest = load_manifest(dir.path()).unwrap();
        assert_eq!(manifest.name, "pagerduty");
        assert_eq!(manifest.provider, Provider::Aws);
        assert_eq!(manifest.webhook.events.len(), 2);
        assert_eq!(manifest.input.len(), 2);
        assert_eq!(manifest.input[0].kind, InputKind::Text);
        assert_eq!(manifest.input[1].kind, InputKind::Duration);
        assert_eq!(manifest.input[1].default.as_deref(), Some("12 hours"));
    }

    #[test]
    fn missing_manifest_points_at_the_directory() {
        let dir = tempdir().unwrap();
        let err = load_manifest(dir.path()).unwrap_err();
        assert!(err.to_string().contains("tether_manifest.yml"));
        assert!(err.to_string().contains("integration directory"));
    }

    #[test]
    fn malformed_manifest_reports_yaml_error() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join(MANIFEST_FILE), "provider: [").unwrap();
        let err = load_manifest(dir.path()).unwrap_err();
        assert!(err.to_string().contains("YAML error"));
    }

    #[test]
    fn serverless_config_parses() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join(SERVERLESS_FILE),
            "service: my-integration\nprovider:\n  name: aws\n",
        )
        .unwrap();
        let config = load_serverless(dir.path()).unwrap();
        assert_eq!(config.service, "my-integration");
    }

    fn sample_config() -> IntegrationConfig {
        IntegrationConfig {
            app_id: "tether:///apps/staging/app-uuid".into(),
            service_name: "my-integration".into(),
            provider: Provider::Aws,
            webhook: WebhookSection {
                secret: "s3cret".into(),
                events: vec!["message.sent".into()],
            },
            api: ApiSection {
                token: "sapi-xyz".into(),
                permissions: vec!["messages.read".into()],
            },
            extra: serde_json::Map::new(),
        }
    }

    #[test]
    fn config_round_trips_through_disk() {
        let dir = tempdir().unwrap();
        let mut config = sample_config();
        config
            .extra
            .insert("api_key".into(), serde_json::Value::String("pd-123".into()));

        assert!(!IntegrationConfig::exists(dir.path()));
        config.write(dir.path()).unwrap();
        assert!(IntegrationConfig::exists(dir.path()));

        let loaded = IntegrationConfig::load(dir.path()).unwrap();
        assert_eq!(loaded.app_id, config.app_id);
        assert_eq!(loaded.webhook.secret, "s3cret");
        assert_eq!(loaded.extra["api_key"], "pd-123");
    }

    #[test]
    fn write_rejects_incomplete_config() {
        let dir = tempdir().unwrap();

        let mut config = sample_config();
        config.app_id.clear();
        assert!(config.write(dir.path()).is_err());

        let mut config = sample_config();
        config.api.token.clear();
        assert!(config.write(dir.path()).is_err());
    }

    #[test]
    fn provider_required_env() {
        assert!(
            Provider::Aws
                .required_env()
                .contains(&"AWS_ACCESS_KEY_ID")
        );
        assert_eq!(Provider::Azure.required_env().len(), 4);
        assert_eq!(Provider::Aws.to_string(), "aws");
    }
}
