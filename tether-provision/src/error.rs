//! Error types for provisioning

use thiserror::Error;

use tether_api::ApiError;

/// Errors raised while driving a webhook to the active state
#[derive(Debug, Error)]
pub enum ProvisionError {
    /// A directory call failed. Not retried at this layer; network and
    /// remote failures are treated identically.
    #[error("webhook directory call failed: {0}")]
    Directory(#[from] ApiError),

    /// The attempt ceiling was reached without the webhook becoming active.
    /// The remote side is not converging; operator investigation is more
    /// useful than another automatic retry.
    #[error("unable to provision webhook after {attempts} attempts")]
    Exhausted {
        /// Reconciliation passes consumed.
        attempts: u32,
    },
}
