//! # vaultpress CLI
//!
//! Publishes the notes of an Obsidian vault into a Jekyll site.
//!
//! Run with no arguments from a directory containing `obsidian-vault/` and
//! `blog/`.

mod commands;

use clap::Parser;
use std::path::PathBuf;
use vaultpress_core::config::{DEFAULT_SITE_DIR, DEFAULT_VAULT_DIR};

#[derive(Parser)]
#[command(name = "vaultpress")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Source vault directory
    #[arg(long, default_value = DEFAULT_VAULT_DIR)]
    vault: PathBuf,

    /// Destination site directory
    #[arg(long, default_value = DEFAULT_SITE_DIR)]
    site: PathBuf,

    /// Remove previously published documents from _posts and _notes first
    #[arg(long)]
    clean: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(if cli.verbose {
                tracing::Level::DEBUG.into()
            } else {
                tracing::Level::INFO.into()
            }),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let options = commands::PublishOptions {
        vault: cli.vault,
        site: cli.site,
        clean: cli.clean,
    };
    commands::publish_vault(options)
}
