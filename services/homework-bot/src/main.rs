//! Homework bot CLI
//!
//! Command-line entry point for the homework review status relay.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use homework_bot::{load_config, Config, HomeworkBotBuilder};
use tracing::Level;

#[derive(Parser)]
#[command(name = "homework-bot")]
#[command(about = "Relays homework review status changes to a Telegram chat")]
#[command(version)]
struct Args {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Polling period (e.g. "10m", "90s"); overrides the config file
    #[arg(long, value_parser = humantime::parse_duration)]
    retry_period: Option<Duration>,

    /// Log level
    #[arg(short, long, default_value = "info")]
    log_level: Level,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.log_level)
        .init();

    tracing::debug!(
        "Parsed command line arguments: config={:?}, retry_period={:?}, log_level={:?}",
        args.config,
        args.retry_period,
        args.log_level
    );

    let mut config = if let Some(config_path) = &args.config {
        tracing::debug!("Loading configuration from {:?}", config_path);
        load_config(config_path)?
    } else {
        tracing::debug!("Using default configuration");
        Config::default()
    };

    config.resolve_secrets();

    if let Some(retry_period) = args.retry_period {
        config.retry_period = retry_period;
    }

    tracing::info!("Starting homework bot");

    HomeworkBotBuilder::new(config).build()?.start().await?;

    Ok(())
}
