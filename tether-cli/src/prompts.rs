//! Interactive wizard prompts
//!
//! Thin dialoguer wrappers plus the input validation they share. Everything
//! here is sequential terminal I/O; the interesting control flow (the
//! two-factor retry loop) lives in [`login`].

use colored::Colorize;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, Password, Select};
use tracing::debug;

use tether_api::{Application, Credentials, DashboardClient, Organization, Session};

use crate::CliResult;
use crate::config::{InputKind, InputSpec};

/// Validate a value against a manifest input kind.
pub fn validate(kind: InputKind, value: &str) -> Result<(), String> {
    match kind {
        InputKind::Text => value
            .chars()
            .all(|c| c.is_ascii())
            .then_some(())
            .ok_or_else(|| "Value must be text".to_string()),
        InputKind::Number => is_numeric(value)
            .then_some(())
            .ok_or_else(|| "Value must be a number".to_string()),
        InputKind::Email => is_email(value)
            .then_some(())
            .ok_or_else(|| "Invalid email address".to_string()),
        InputKind::Duration => is_duration(value)
            .then_some(())
            .ok_or_else(|| "Invalid time format \"<number> hours|days|years\"".to_string()),
    }
}

fn is_numeric(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|c| c.is_ascii_digit())
}

fn is_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}

fn is_duration(value: &str) -> bool {
    let Some((amount, unit)) = value.trim().split_once(' ') else {
        return false;
    };
    is_numeric(amount)
        && matches!(
            unit,
            "minutes" | "hours" | "days" | "weeks" | "months" | "years"
        )
}

fn is_two_factor_code(value: &str) -> bool {
    value.len() == 6 && is_numeric(value)
}

/// Ask whether a previously assembled configuration should be reused.
pub fn use_existing_config() -> CliResult<bool> {
    Ok(Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt("Existing configuration found. Would you like to use it?")
        .default(true)
        .interact()?)
}

/// Log in to the dashboard, handling two-factor challenges.
///
/// Wrong credentials re-prompt; a two-factor challenge asks for the 6-digit
/// code and retries the same credentials once with it.
pub async fn login(dashboard: &mut DashboardClient) -> CliResult<Session> {
    let theme = ColorfulTheme::default();

    loop {
        let email: String = Input::with_theme(&theme)
            .with_prompt("Enter email")
            .validate_with(|input: &String| validate(InputKind::Email, input))
            .interact_text()?;
        let password: String = Password::with_theme(&theme)
            .with_prompt("Enter password")
            .interact()?;

        let mut credentials = Credentials {
            email,
            password,
            twofactor: None,
        };

        match dashboard.authenticate(&credentials).await {
            Ok(session) => return Ok(session),
            Err(err) if err.is_two_factor_challenge() => {
                debug!("dashboard requested a two-factor code");
                let code: String = Input::with_theme(&theme)
                    .with_prompt("Enter two-factor code")
                    .validate_with(|input: &String| {
                        is_two_factor_code(input)
                            .then_some(())
                            .ok_or("Code must be a 6 digit number")
                    })
                    .interact_text()?;
                credentials.twofactor = Some(code);

                match dashboard.authenticate(&credentials).await {
                    Ok(session) => return Ok(session),
                    Err(_) => {
                        println!("  {}", "Invalid two-factor code. Try again.".yellow());
                    }
                }
            }
            Err(err) if err.status_code() == Some(401) => {
                println!("  {}", "Invalid email or password. Try again.".yellow());
            }
            Err(err) => return Err(err.into()),
        }
    }
}

/// Pick an organization.
pub fn select_organization(orgs: &[Organization]) -> CliResult<&Organization> {
    let names: Vec<&str> = orgs.iter().map(|o| o.name.as_str()).collect();
    let index = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Pick your organization")
        .items(&names)
        .default(0)
        .interact()?;
    Ok(&orgs[index])
}

/// Pick an application.
pub fn select_application(apps: &[Application]) -> CliResult<&Application> {
    let names: Vec<&str> = apps.iter().map(|a| a.name.as_str()).collect();
    let index = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Pick your application")
        .items(&names)
        .default(0)
        .interact()?;
    Ok(&apps[index])
}

/// Pick an application environment.
///
/// Organizations without a billing account only have staging; the prompt is
/// skipped for them.
pub fn select_environment(has_account: bool) -> CliResult<&'static str> {
    if !has_account {
        return Ok("staging");
    }
    let index = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Pick your application environment")
        .items(&["Staging", "Production"])
        .default(0)
        .interact()?;
    Ok(if index == 0 { "staging" } else { "production" })
}

/// Ask for the webhook signing secret.
pub fn webhook_secret() -> CliResult<String> {
    Ok(Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Enter webhook secret")
        .validate_with(|input: &String| {
            if input.is_empty() {
                Err("This value is required")
            } else {
                Ok(())
            }
        })
        .interact_text()?)
}

/// Collect the manifest-declared extra inputs.
pub fn manifest_inputs(
    specs: &[InputSpec],
) -> CliResult<serde_json::Map<String, serde_json::Value>> {
    let theme = ColorfulTheme::default();
    let mut values = serde_json::Map::new();

    for spec in specs {
        let mut input = Input::<String>::with_theme(&theme).with_prompt(spec.name.as_str());
        if let Some(default) = &spec.default {
            input = input.default(default.clone());
        }
        let kind = spec.kind;
        let required = spec.required;
        let value = input
            .allow_empty(!required)
            .validate_with(move |entered: &String| {
                if entered.is_empty() {
                    return if required {
                        Err("This value is required".to_string())
                    } else {
                        Ok(())
                    };
                }
                validate(kind, entered)
            })
            .interact_text()?;
        values.insert(spec.key.clone(), serde_json::Value::String(value));
    }

    Ok(values)
}
