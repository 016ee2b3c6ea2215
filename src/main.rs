//! sitewright - generate runnable tool servers from websites.
//!
//! Main entry point: tracing setup, configuration loading, command dispatch.

mod cli;
mod cmd_create;
mod cmd_discover;

use std::path::PathBuf;

use clap::Parser;
use tracing::error;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use sitewright_config::{ConfigLoader, SitewrightConfig};

use crate::cli::{Cli, Commands};

/// Per-user application directory.
fn sitewright_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".sitewright")
}

/// Initialize tracing with console (stderr) and rolling file output.
///
/// Stdout stays clean for command output (`discover` prints JSON there);
/// prompts and narration go to stderr.
fn init_tracing() -> anyhow::Result<()> {
    let log_dir = sitewright_dir().join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("sitewright")
        .filename_suffix("log")
        .max_log_files(14)
        .build(&log_dir)?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // Keep the writer guard alive for the program duration.
    static GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
        std::sync::OnceLock::new();
    let _ = GUARD.set(guard);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_ansi(true)
                .with_writer(std::io::stderr),
        )
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .init();

    Ok(())
}

fn load_config(cli: &Cli) -> anyhow::Result<SitewrightConfig> {
    let (path, required) = match &cli.config {
        Some(path) => (path.clone(), true),
        None => (sitewright_dir().join("config.toml"), false),
    };
    let config = ConfigLoader::load(&path, required)?;
    config.validate()?;
    Ok(config)
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;

    match cli.command {
        Commands::Create {
            url,
            output,
            no_vault,
        } => cmd_create::run(&config, &url, output, no_vault).await,
        Commands::Discover { url } => cmd_discover::run(&config, &url).await,
    }
}

#[tokio::main]
async fn main() {
    if let Err(e) = init_tracing() {
        eprintln!("Failed to initialize logging: {e}");
    }

    if let Err(e) = run().await {
        error!("{e:#}");
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
