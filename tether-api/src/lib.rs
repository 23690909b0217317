//! Platform API clients for the Tether onboarding CLI
//!
//! This crate talks to the two services involved in onboarding a serverless
//! integration:
//!
//! - **Dashboard** — session authentication, organization and application
//!   listing, application locators, server API tokens.
//! - **Webhook directory** — the per-application webhook registry with its
//!   three primitives: list, create, activate.
//!
//! Both clients hold their credentials from construction onward and apply a
//! fixed per-request timeout. Neither client retries; convergence over the
//! eventually-consistent webhook directory is the job of the
//! `tether-provision` crate, which consumes the [`WebhookDirectory`] trait
//! defined here.
//!
//! # Example
//!
//! ```rust,no_run
//! use tether_api::{DirectoryClient, WebhookDirectory};
//!
//! # async fn example() -> Result<(), tether_api::ApiError> {
//! let directory = DirectoryClient::from_env("server-api-token")?;
//! let webhooks = directory.list("tether:///apps/staging/abc123").await?;
//! for webhook in webhooks {
//!     println!("{} -> {:?}", webhook.target_url, webhook.status);
//! }
//! # Ok(())
//! # }
//! ```

mod dashboard;
mod directory;
mod error;
mod locator;
mod model;

pub use dashboard::{Credentials, DashboardClient};
pub use directory::{DirectoryClient, WebhookDirectory};
pub use error::ApiError;
pub use locator::{app_locator, normalize_id};
pub use model::{
    Application, NewWebhook, Organization, ServerToken, Session, Webhook, WebhookStatus,
};

/// Result type for API operations
pub type Result<T> = std::result::Result<T, ApiError>;

/// Per-request timeout applied by both clients.
pub(crate) const REQUEST_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(6);
