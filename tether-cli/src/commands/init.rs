//! Onboarding command
//!
//! The full flow: load the manifest, walk the wizard (or reuse an existing
//! configuration), deploy the serverless function, and provision the
//! deployed URL as an active webhook on the platform.

use std::path::Path;

use colored::Colorize;

use tether_api::{DashboardClient, DirectoryClient};
use tether_provision::{ProvisionConfig, Provisioner, TokioSleeper};

use crate::config::{
    self, ApiSection, IntegrationConfig, IntegrationManifest, ServerlessConfig, WebhookSection,
};
use crate::progress::spinner;
use crate::{CliResult, prompts};

/// Run the onboarding flow in the current directory.
pub async fn run() -> CliResult<()> {
    let dir = Path::new(".");
    let manifest = config::load_manifest(dir)?;
    let serverless = config::load_serverless(dir)?;

    println!();
    println!("  Welcome to {}", manifest.name.cyan().bold());
    println!(
        "  Serverless infrastructure provider: {}",
        manifest.provider.to_string().cyan()
    );
    println!();

    let integration_config = if IntegrationConfig::exists(dir) && prompts::use_existing_config()? {
        IntegrationConfig::load(dir)?
    } else {
        assemble_config(dir, &manifest, &serverless).await?
    };

    crate::deploy::preflight(manifest.provider)?;

    let pb = spinner("Packaging and deploying...");
    let deployed = crate::deploy::run(&serverless.service, manifest.provider).await;
    pb.finish_and_clear();
    let target_url = deployed?;

    println!(
        "  {} Serverless integration deployed. Target URL: {}",
        "✓".green(),
        target_url.cyan()
    );

    let directory = DirectoryClient::from_env(&integration_config.api.token)?;
    let provisioner = Provisioner::new(
        directory,
        TokioSleeper,
        ProvisionConfig::builder(&integration_config.app_id)
            .secret(&integration_config.webhook.secret)
            .events(integration_config.webhook.events.clone())
            .build(),
    );

    let pb = spinner("Provisioning webhook...");
    let provisioned = provisioner.provision(&target_url).await;
    pb.finish_and_clear();
    provisioned?;

    println!();
    println!("{}", "  ✓ Webhook registered and active".green().bold());
    println!("  Onboarding complete.");
    Ok(())
}

/// Walk the wizard and write the assembled configuration to disk.
async fn assemble_config(
    dir: &Path,
    manifest: &IntegrationManifest,
    serverless: &ServerlessConfig,
) -> CliResult<IntegrationConfig> {
    let user_agent = format!(
        "tether-cli/{} {}/{} ({})",
        env!("CARGO_PKG_VERSION"),
        serverless.service,
        manifest.version,
        manifest.provider
    );
    let mut dashboard = DashboardClient::from_env(&user_agent)?;

    println!("  Please log in to the Tether dashboard");
    prompts::login(&mut dashboard).await?;

    let orgs = dashboard.organizations().await?;
    let org = prompts::select_organization(&orgs)?;

    let apps = dashboard.applications(&org.slug).await?;
    let app = prompts::select_application(&apps)?;

    let env = prompts::select_environment(org.has_account)?;

    let app_id = dashboard.app_locator(&org.slug, &app.slug, env).await?;
    let token = dashboard
        .create_server_token(
            &org.slug,
            &app.slug,
            env,
            &format!("{} [{}]", manifest.name, manifest.provider),
        )
        .await?;

    let secret = prompts::webhook_secret()?;
    let extra = prompts::manifest_inputs(&manifest.input)?;

    let integration_config = IntegrationConfig {
        app_id,
        service_name: serverless.service.clone(),
        provider: manifest.provider,
        webhook: WebhookSection {
            secret,
            events: manifest.webhook.events.clone(),
        },
        api: ApiSection {
            token: token.api_key,
            permissions: manifest.api.permissions.clone(),
        },
        extra,
    };
    integration_config.write(dir)?;
    Ok(integration_config)
}
