//! Homework status bot binary.
//!
//! Checks that the three required secrets are configured, then polls the
//! review service forever and posts status changes to Telegram.

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use homework_bot::{CycleOutcome, PracticumClient, StatusWatcher, SystemClock, TelegramMessenger};
use homework_config::Config;
use homework_telemetry::{LogConfig, LogFormat, setup_default_logging, setup_logging};
use tracing::{debug, error, info};

/// Relay homework review status changes to a Telegram chat
#[derive(Parser)]
#[command(name = "homework-bot")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long, env = "HOMEWORK_BOT_CONFIG")]
    config: Option<PathBuf>,

    /// Run a single poll cycle and exit
    #[arg(long)]
    once: bool,

    /// Override the configured log level
    #[arg(long)]
    log_level: Option<String>,

    /// Override the configured log format: pretty, compact, json or full
    #[arg(long)]
    log_format: Option<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let dotenv = dotenvy::dotenv();
    let cli = Cli::parse();

    let resolved = match Config::load(cli.config.as_deref()) {
        Ok(resolved) => resolved,
        Err(e) => {
            let _ = setup_default_logging();
            error!(fatal = true, error = %e, "invalid configuration");
            return ExitCode::FAILURE;
        },
    };

    if let Err(e) = init_logging(&cli, &resolved.config) {
        eprintln!("failed to initialise logging: {e}");
        return ExitCode::FAILURE;
    }
    if let Ok(path) = dotenv {
        debug!(path = %path.display(), "loaded .env file");
    }
    debug!(files = ?resolved.loaded_files, "configuration loaded");

    let settings = match resolved.config.require() {
        Ok(settings) => settings,
        Err(e) => {
            error!(fatal = true, "{e}");
            return ExitCode::FAILURE;
        },
    };

    let messenger = match TelegramMessenger::new(&settings) {
        Ok(messenger) => messenger,
        Err(e) => {
            error!(fatal = true, error = %e, "cannot set up telegram client");
            return ExitCode::FAILURE;
        },
    };
    let api = PracticumClient::new(&settings);
    let mut watcher = StatusWatcher::new(api, messenger, SystemClock, &settings);

    info!(endpoint = %settings.endpoint, chat = %settings.chat_id, "homework bot started");
    watcher.announce_start().await;

    if cli.once {
        return match watcher.run_cycle().await {
            CycleOutcome::Failed(_) => ExitCode::FAILURE,
            CycleOutcome::Delivered(_) | CycleOutcome::Unchanged => ExitCode::SUCCESS,
        };
    }

    watcher.run().await;
    ExitCode::SUCCESS
}

fn init_logging(cli: &Cli, config: &Config) -> anyhow::Result<()> {
    let mut log_config = LogConfig::from_section(&config.logging);
    if let Some(level) = &cli.log_level {
        log_config.level.clone_from(level);
    }
    if let Some(format) = &cli.log_format {
        log_config.format = format.parse::<LogFormat>()?;
    }
    setup_logging(&log_config.with_env_directives())?;
    Ok(())
}
