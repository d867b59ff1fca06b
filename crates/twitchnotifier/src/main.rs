mod cli;
mod commands;
mod notify;
mod poll;

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use notifier_core::api::ApiClient;
use notifier_core::config::Config;
use notifier_core::platform;
use notifier_core::watchlist::WatchListStore;
use tracing::info;

use crate::cli::Cli;
use crate::notify::DesktopNotifier;
use crate::poll::{PollSettings, Poller};

fn init_logging() -> anyhow::Result<PathBuf> {
    let data_dir = platform::data_dir();
    std::fs::create_dir_all(&data_dir)?;
    let log_path = platform::log_path();

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;

    // stdout is the status display, so logs only ever go to the file.
    let log_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "info,hyper_util=warn,reqwest=warn,hyper=warn".to_string());
    tracing_subscriber::fmt()
        .with_writer(std::sync::Mutex::new(log_file))
        .with_env_filter(log_filter.as_str())
        .with_ansi(false)
        .init();

    Ok(log_path)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let log_path = init_logging().context("failed to open log file")?;
    info!("twitchnotifier {} starting, log: {:?}", env!("CARGO_PKG_VERSION"), log_path);

    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .with_context(|| format!("failed to load config {}", config_path.display()))?;
    info!("Config loaded from: {:?}", config_path);

    let channels_file = cli
        .channels_file
        .clone()
        .unwrap_or_else(|| config.paths.channels_file.clone());
    let format_file = cli
        .format_file
        .clone()
        .unwrap_or_else(|| config.paths.format_file.clone());

    let store = WatchListStore::new(channels_file);
    store.ensure_exists()?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    let Some(command) = cli.command else {
        let client = ApiClient::new(&config.api)?;
        let notifier = DesktopNotifier::new(&config.notify);
        let settings = PollSettings {
            interval: config.poll.interval(),
            clear_screen: config.poll.clear_screen,
            format_file,
        };
        let mut poller = Poller::new(client, notifier, store, settings);
        if cli.once {
            poller.cycle(&mut out).await?;
        } else {
            poller.run(&mut out).await?;
        }
        return Ok(());
    };

    commands::run(command, &store, &mut out)
}
