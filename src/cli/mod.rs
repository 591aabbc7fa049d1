//! CLI module for the user registry
//!
//! Provides subcommands for working with user records:
//! - `validate`: check a name and email against the field rules
//! - `import`: create users from a JSON file and print the persisted records

pub mod import;
pub mod validate;

use clap::{Parser, Subcommand};

use crate::config::AppConfig;
use crate::infrastructure::logging;

/// User registry - validated user records with a pending/persisted lifecycle
#[derive(Parser)]
#[command(name = "user-registry")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Validate a name and email without storing anything
    Validate(validate::ValidateArgs),

    /// Create users from a JSON file
    Import(import::ImportArgs),
}

/// Load `.env` and configuration, then install logging
pub(crate) fn bootstrap() -> AppConfig {
    dotenvy::dotenv().ok();

    let loaded = AppConfig::load();
    let config = loaded.as_ref().cloned().unwrap_or_default();
    logging::init_logging(&config.logging);

    if let Err(e) = loaded {
        tracing::warn!(error = %e, "Falling back to default configuration");
    }

    config
}
