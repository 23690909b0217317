//! Error types for the Tether CLI

use thiserror::Error;

use crate::config::Provider;

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// CLI error types.
#[derive(Debug, Error)]
pub enum CliError {
    /// IO error (file operations, process spawning).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A manifest file is missing or malformed.
    #[error("{0}")]
    Manifest(String),

    /// Assembled configuration is incomplete or unreadable.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Provider credentials are missing from the environment.
    #[error("Missing {provider} credentials. Set: {}", .vars.join(", "))]
    MissingCredentials {
        provider: Provider,
        vars: Vec<&'static str>,
    },

    /// The deploy command failed or produced unusable output.
    #[error("Deploy error: {0}")]
    Deploy(String),

    /// Integration package download or unpack failed.
    #[error("Install error: {0}")]
    Install(String),

    /// Interactive prompt failed (terminal closed, not a tty).
    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    /// Platform API call failed.
    #[error(transparent)]
    Api(#[from] tether_api::ApiError),

    /// Webhook provisioning failed.
    #[error(transparent)]
    Provision(#[from] tether_provision::ProvisionError),
}

impl From<reqwest::Error> for CliError {
    fn from(e: reqwest::Error) -> Self {
        CliError::Install(e.to_string())
    }
}

impl From<zip::result::ZipError> for CliError {
    fn from(e: zip::result::ZipError) -> Self {
        CliError::Install(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Config(e.to_string())
    }
}
