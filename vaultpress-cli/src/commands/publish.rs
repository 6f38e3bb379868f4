//! Publish command implementation.

use anyhow::{Context, Result};
use chrono::Local;
use std::path::PathBuf;
use vaultpress_core::{Config, Publisher};

pub struct PublishOptions {
    pub vault: PathBuf,
    pub site: PathBuf,
    pub clean: bool,
}

/// Publish the vault into the site, resolving relative paths against the
/// current working directory.
pub fn publish_vault(options: PublishOptions) -> Result<()> {
    let cwd = std::env::current_dir().context("Failed to resolve working directory")?;
    let config = Config {
        vault_dir: options.vault,
        site_dir: options.site,
        clean: options.clean,
    }
    .resolve_against(&cwd);

    tracing::debug!(
        "Publishing {:?} into {:?}",
        config.vault_dir,
        config.site_dir
    );

    let today = Local::now().date_naive();
    let report = Publisher::new(config, today)
        .publish()
        .context("Failed to publish vault")?;

    if !report.failures.is_empty() {
        tracing::warn!("{} files failed to publish", report.failures.len());
    }

    Ok(())
}
