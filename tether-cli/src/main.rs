//! Tether CLI entry point
//!
//! `tether` onboards a serverless integration onto the Tether platform:
//!
//! - `tether init` — authenticate, pick an organization / application /
//!   environment, collect integration configuration, deploy the function,
//!   and register its URL as an active webhook.
//! - `tether install <name> --provider <p>` — download an integration
//!   package from its latest GitHub release.
//! - `tether integrations` — list installable integrations.

use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

mod catalog;
mod commands;
mod config;
mod deploy;
mod error;
mod progress;
mod prompts;

use config::Provider;
pub use error::{CliError, CliResult};

/// Tether - connect serverless integrations to the Tether platform
#[derive(Parser)]
#[command(name = "tether")]
#[command(version)]
#[command(about = "Onboarding CLI for Tether serverless integrations")]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Onboard the integration in the current directory
    #[command(alias = "i")]
    Init,

    /// Download an integration package from its latest release
    Install {
        /// Integration name (see `tether integrations`)
        name: String,

        /// Serverless infrastructure provider to install for
        #[arg(long, value_enum)]
        provider: Provider,
    },

    /// List installable integrations
    #[command(visible_alias = "ls")]
    Integrations,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Init => commands::init::run().await,
        Commands::Install { name, provider } => commands::install::run(&name, provider).await,
        Commands::Integrations => {
            commands::integrations::run();
            Ok(())
        }
    };

    if let Err(err) = result {
        eprintln!();
        eprintln!("  {} {}", "✗".red().bold(), err.to_string().red());
        std::process::exit(1);
    }
}
