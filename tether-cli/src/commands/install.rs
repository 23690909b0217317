//! Integration install command
//!
//! Downloads the latest release of a catalog integration from GitHub and
//! unpacks the provider-specific subdirectory into the current directory.

use std::io::Cursor;
use std::path::Path;

use colored::Colorize;
use serde::Deserialize;
use tracing::debug;

use crate::catalog;
use crate::config::Provider;
use crate::progress::spinner;
use crate::{CliError, CliResult};

#[derive(Debug, Deserialize)]
struct Release {
    zipball_url: String,
}

/// Install `name` for `provider` into `./<name>`.
pub async fn run(name: &str, provider: Provider) -> CliResult<()> {
    let entry = catalog::get(name)
        .ok_or_else(|| CliError::Install(format!("unknown integration: {name}")))?;
    if !entry.providers.contains(&provider) {
        return Err(CliError::Install(format!(
            "integration {name} does not support provider {provider}"
        )));
    }

    let dest = Path::new(".").join(name);
    if dest.exists() {
        return Err(CliError::Install(format!(
            "./{name} already exists, remove it first"
        )));
    }

    let pb = spinner(&format!("Downloading {name}..."));
    let result = download_and_unpack(entry, provider, &dest).await;
    pb.finish_and_clear();
    result?;

    println!(
        "  {} Installed {} into ./{}",
        "✓".green(),
        name.cyan(),
        name
    );
    println!("  Next: cd {name} && tether init");
    Ok(())
}

async fn download_and_unpack(
    entry: &catalog::CatalogEntry,
    provider: Provider,
    dest: &Path,
) -> CliResult<()> {
    // GitHub rejects requests without a user agent.
    let client = reqwest::Client::builder()
        .user_agent(concat!("tether-cli/", env!("CARGO_PKG_VERSION")))
        .build()
        .expect("Failed to create HTTP client");

    let release_url = format!(
        "https://api.github.com/repos/{}/releases/latest",
        entry.github
    );
    debug!(%release_url, "resolving latest release");
    let release: Release = client
        .get(&release_url)
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    debug!(zipball = %release.zipball_url, "downloading release archive");
    let bytes = client
        .get(&release.zipball_url)
        .send()
        .await?
        .error_for_status()?
        .bytes()
        .await?;

    let unpacked = tempfile::tempdir()?;
    unpack(&bytes, unpacked.path())?;

    // GitHub zipballs hold a single <owner>-<repo>-<sha>/ root directory.
    let root = std::fs::read_dir(unpacked.path())?
        .filter_map(Result::ok)
        .find(|e| e.path().is_dir())
        .ok_or_else(|| CliError::Install("release archive is empty".into()))?;

    let source = root.path().join(provider.to_string());
    if !source.is_dir() {
        return Err(CliError::Install(format!(
            "release archive has no {provider} directory"
        )));
    }
    copy_dir(&source, dest)?;
    Ok(())
}

/// Extract a zip archive held in memory into `dest`.
fn unpack(bytes: &[u8], dest: &Path) -> CliResult<()> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))?;
    archive.extract(dest)?;
    Ok(())
}

/// Recursively copy a directory tree.
fn copy_dir(src: &Path, dst: &Path) -> std::io::Result<()> {
    std::fs::create_dir_all(dst)?;
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let target = dst.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copy_dir(&entry.path(), &target)?;
        } else {
            std::fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}
