//! Deploy runner
//!
//! Runs the integration's deploy script and extracts the public endpoint of
//! the deployed function from its output. The endpoint becomes the webhook
//! target URL.

use tokio::process::Command;
use tracing::debug;

use crate::config::Provider;
use crate::{CliError, CliResult};

/// Check that the provider's credentials are present in the environment.
///
/// The deploy script would fail later anyway; failing here gives a pointed
/// message before any remote state is touched.
pub fn preflight(provider: Provider) -> CliResult<()> {
    let missing: Vec<&'static str> = provider
        .required_env()
        .iter()
        .copied()
        .filter(|var| std::env::var(var).is_err())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(CliError::MissingCredentials {
            provider,
            vars: missing,
        })
    }
}

/// Run `npm run deploy` and return the deployed function's public URL.
pub async fn run(service: &str, provider: Provider) -> CliResult<String> {
    debug!(service, %provider, "running deploy script");
    let output = Command::new("npm").args(["run", "deploy"]).output().await?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let stdout = String::from_utf8_lossy(&output.stdout);
        let detail = if stderr.trim().is_empty() {
            stdout
        } else {
            stderr
        };
        return Err(CliError::Deploy(format!(
            "deploy exited with {}: {}",
            output.status,
            detail.trim()
        )));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    target_url(provider, service, &stdout)
        .ok_or_else(|| CliError::Deploy("no endpoint found in deploy output".into()))
}

/// Extract the target URL from deploy output, per provider.
fn target_url(provider: Provider, service: &str, output: &str) -> Option<String> {
    match provider {
        Provider::Aws => parse_aws_endpoint(output),
        // Azure function URLs are deterministic; nothing to parse.
        Provider::Azure => Some(format!("https://{service}.azurewebsites.net/api/webhook")),
    }
}

/// Parse the first endpoint from serverless framework output.
///
/// The framework prints an `endpoints:` block followed by a `functions:`
/// block; the webhook endpoint is the first `https://` line in between.
fn parse_aws_endpoint(output: &str) -> Option<String> {
    let after = output.split("endpoints:").nth(1)?;
    let section = after.split("functions:").next()?;
    let start = section.find("https://")?;
    let rest = &section[start..];
    let end = rest.find('\n').unwrap_or(rest.len());
    let url = rest[..end].trim();
    (!url.is_empty()).then(|| url.to_string())
}
