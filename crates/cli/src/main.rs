//! sentimind CLI entry point

use anyhow::{Context, Result};
use clap::Parser;
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod args;
mod commands;
mod config;
mod tui;

use args::{Cli, Commands};
use config::AppConfig;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Commands load (and report on) the config themselves; this read only
    // feeds logging defaults.
    let file_config = AppConfig::load(cli.config.as_deref()).ok();

    // Initialize logging
    let log_level = cli
        .log_level
        .clone()
        .or_else(|| file_config.as_ref().map(|c| c.general.log_level.clone()))
        .unwrap_or_else(|| "info".to_string());

    match &cli.command {
        Commands::Tui(args) => {
            let log_file = args
                .log_file
                .clone()
                .or_else(|| file_config.as_ref().map(|c| c.tui.log_file.clone()))
                .unwrap_or_else(config::default_tui_log_file);
            init_file_logging(&log_level, &log_file)?;
        }
        _ => init_logging(&log_level)?,
    }

    // Execute command
    match cli.command {
        Commands::Feed(args) => commands::feed::execute(args, cli.config).await,
        Commands::Post(args) => commands::post::execute(args, cli.config).await,
        Commands::Categories(args) => commands::categories::execute(args, cli.config).await,
        Commands::Tui(args) => commands::tui::execute(args, cli.config).await,
        Commands::Config(args) => commands::config::execute(args, cli.config).await,
        Commands::Doctor(args) => commands::doctor::execute(args, cli.config).await,
    }
}

fn init_logging(level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(level))?;

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(filter)
        .init();

    Ok(())
}

/// Logging for the terminal UI; stderr would draw over the screen
fn init_file_logging(level: &str, path: &Path) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(level))?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))?;

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .with(filter)
        .init();

    Ok(())
}
