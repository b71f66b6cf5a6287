//! hwstatus Bot
//!
//! Watches the review status of a student's homework and relays every change
//! to a Telegram chat.
//!
//! Architecture:
//! - Configuration: Load tokens and endpoints from the environment (and `.env`)
//! - Repositories: Trait seams over the status endpoint and the bot API
//! - Scheduler: The fetch, validate, notify, sleep loop
//!
//! The bot runs a single poll at a time on a current-thread runtime and keeps
//! going until the process is stopped. Only configuration problems are fatal.

mod config;
mod repository;
mod scheduler;

use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::repository::TelegramNotifier;
use crate::scheduler::StatusPoller;
use hwstatus_client::{PracticumClient, TelegramClient};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = load_config();

    // Initialize logging
    init_logging(config.as_ref().ok().and_then(|c| c.log_file.as_deref()))?;

    let config = match config {
        Ok(config) => config,
        Err(e) => {
            error!("Missing or invalid configuration: {}", e);
            return Err(e).context("Refusing to start without a valid configuration");
        }
    };

    info!("Starting hwstatus bot");
    info!(
        "Loaded configuration: endpoint={}, chat_id={}, retry_period={:?}",
        config.endpoint, config.telegram_chat_id, config.retry_period
    );

    let http = reqwest::Client::builder()
        .timeout(config.request_timeout)
        .build()
        .context("Failed to build HTTP client")?;

    let source = Arc::new(PracticumClient::with_client(
        config.endpoint.clone(),
        config.practicum_token.clone(),
        http.clone(),
    ));
    let notifier = Arc::new(TelegramNotifier::new(
        TelegramClient::with_client(
            config.telegram_api_url.clone(),
            config.telegram_token.clone(),
            http,
        ),
        config.telegram_chat_id.clone(),
    ));

    info!("Clients initialized");

    let mut poller = StatusPoller::new(&config, source, notifier);
    poller.run().await;

    Ok(())
}

/// Loads and validates configuration from the environment
fn load_config() -> std::result::Result<Config, config::ConfigError> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}

/// Installs the global subscriber: stdout, plus an optional log file
fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let file_layer = match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            Some(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hwstatus_bot=info,hwstatus_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .with(file_layer)
        .init();

    Ok(())
}
