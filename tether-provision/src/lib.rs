//! Webhook provisioning reconciler
//!
//! The webhook directory exposes only eventually-consistent primitives —
//! list, create, activate — and no atomic "ensure active" operation. This
//! crate drives the directory from "absent or inactive" to "registered and
//! active" for a freshly deployed target URL: each pass re-lists, classifies
//! the result, and acts once (create, activate-then-wait, or succeed), with
//! a hard ceiling on the number of passes.
//!
//! # Example
//!
//! ```rust,no_run
//! use tether_api::DirectoryClient;
//! use tether_provision::{ProvisionConfig, Provisioner, TokioSleeper};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ProvisionConfig::builder("tether:///apps/staging/app-uuid")
//!     .secret("s3cret")
//!     .events(vec!["message.sent".into()])
//!     .build();
//!
//! let directory = DirectoryClient::from_env("server-api-token")?;
//! let provisioner = Provisioner::new(directory, TokioSleeper, config);
//! provisioner.provision("https://abc.execute-api.aws/webhook").await?;
//! # Ok(())
//! # }
//! ```

mod config;
mod error;
mod provisioner;
mod sleeper;

pub use config::{ProvisionConfig, ProvisionConfigBuilder};
pub use error::ProvisionError;
pub use provisioner::Provisioner;
pub use sleeper::{Sleeper, TokioSleeper};

/// Result type for provisioning operations
pub type Result<T> = std::result::Result<T, ProvisionError>;
