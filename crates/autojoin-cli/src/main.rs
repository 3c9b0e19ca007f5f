//! Autojoin CLI - extension host for the meeting auto-joiner.
//!
//! Loads the host configuration and the active extension profile, then
//! drives the enabled built-in extensions through their lifecycle against
//! headless host resources.

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod builtin;
mod commands;
mod config_bridge;
mod formatter;
mod headless;
mod theme;

use formatter::OutputFormat;

/// Autojoin - meeting auto-joiner extension host
#[derive(Parser)]
#[command(name = "autojoin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the host configuration file
    #[arg(short, long, global = true, env = "AUTOJOIN_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Pretty)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load, configure and run every enabled extension
    Run,

    /// Validate the host configuration and the active profile
    Check,

    /// List enabled extensions with their permissions and preferences
    List,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logging comes from config; fall back to defaults so `check` can still
    // report a broken file.
    let resolved = autojoin_config::Config::load(cli.config.as_deref());
    let log_config = match &resolved {
        Ok(r) => config_bridge::to_log_config(&r.config, cli.verbose),
        Err(_) => config_bridge::fallback_log_config(cli.verbose),
    };
    if let Err(e) = autojoin_telemetry::setup_logging(&log_config) {
        eprintln!("Failed to initialize logging: {e}");
    }

    match cli.command {
        Commands::Run => commands::run::run_extensions(resolved?, cli.format).await,
        Commands::Check => commands::check::check_config(resolved, cli.format),
        Commands::List => commands::list::list_extensions(&resolved?, cli.format),
    }
}
