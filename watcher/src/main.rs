//! ReviewRadar Watcher binary.
//!
//! Polls the review status endpoint for the tracked submission and notifies
//! a Telegram chat when the review verdict changes.
//!
//! # Commands
//!
//! - `reviewradar-watcher run`: Start the watch loop
//! - `reviewradar-watcher check`: Run a single poll cycle, then exit
//!
//! # Environment Variables
//!
//! See the [`config`](reviewradar_watcher::config) module for available
//! configuration options.

use anyhow::{bail, Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use reviewradar_watcher::config::Config;
use reviewradar_watcher::watch::Watcher;

/// ReviewRadar Watcher - submission review status notifier.
///
/// Watches one submitted assignment and forwards review verdict changes to a
/// Telegram chat.
#[derive(Parser, Debug)]
#[command(name = "reviewradar-watcher")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "\
ENVIRONMENT VARIABLES:
    REVIEWRADAR_API_TOKEN           Status endpoint OAuth token (required)
    REVIEWRADAR_BOT_TOKEN           Telegram bot token (required)
    REVIEWRADAR_CHAT_ID             Destination chat id (required)
    REVIEWRADAR_ENDPOINT            Status endpoint URL override
    REVIEWRADAR_TELEGRAM_API        Telegram API base URL override
    REVIEWRADAR_POLL_INTERVAL_SECS  Poll cadence in seconds (default: 600)
    REVIEWRADAR_NOVELTY             Duplicate suppression: text | status

EXAMPLES:
    # Start the watcher
    export REVIEWRADAR_API_TOKEN=...
    export REVIEWRADAR_BOT_TOKEN=...
    export REVIEWRADAR_CHAT_ID=...
    reviewradar-watcher run

    # Poll once and exit
    reviewradar-watcher check
")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

/// CLI subcommands.
#[derive(Subcommand, Debug)]
enum Command {
    /// Start the watch loop.
    ///
    /// Polls until the process receives SIGINT or SIGTERM.
    Run,

    /// Run a single poll cycle, then exit.
    ///
    /// Exits non-zero when the cycle ends in an operational error.
    Check,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to create tokio runtime")?;

    match cli.command {
        Command::Run => runtime.block_on(run_watcher()),
        Command::Check => runtime.block_on(run_check()),
    }
}

/// Runs the watch loop until shutdown.
async fn run_watcher() -> Result<()> {
    info!("Starting ReviewRadar Watcher");

    let watcher = startup()?;
    watcher.run().await;

    Ok(())
}

/// Runs a single cycle for ad-hoc checks and cron-style setups.
async fn run_check() -> Result<()> {
    let mut watcher = startup()?;

    match watcher.run_once().await {
        Some(outcome) => {
            info!(outcome = ?outcome, "Cycle finished");
            Ok(())
        }
        None => bail!("poll cycle failed, see log for the classified error"),
    }
}

/// Loads configuration and builds the watcher.
///
/// Missing credentials abort here, before the loop is ever entered.
fn startup() -> Result<Watcher> {
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Configuration is incomplete, refusing to start");
            return Err(e).context("Failed to load configuration");
        }
    };

    info!(
        endpoint = %config.endpoint,
        poll_interval_secs = config.poll_interval_secs,
        "Configuration loaded"
    );

    Ok(Watcher::new(&config, Utc::now().timestamp()))
}

/// Initializes the logging subsystem.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .init();
}
