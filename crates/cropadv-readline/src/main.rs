use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use cropadv_core::{AdvisoryApi, Language};
use cropadv_infrastructure::{AdvisoryPaths, ConfigService};
use cropadv_interaction::HttpAdvisoryClient;

mod app;
mod commands;
mod helper;
mod render;

#[derive(Parser)]
#[command(name = "cropadv")]
#[command(about = "Smart Crop Advisory - crop recommendations from the terminal", long_about = None)]
struct Cli {
    /// Configuration file (defaults to ~/.config/cropadv/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Advisory API base URL, overriding configuration and environment
    #[arg(long)]
    api_url: Option<String>,

    /// Interface language: en, hi or mr
    #[arg(long)]
    lang: Option<Language>,
}

/// Routes tracing output to a daily log file so it never mixes with the REPL.
fn init_logging() -> Result<WorkerGuard> {
    let log_dir = AdvisoryPaths::log_dir()?;
    std::fs::create_dir_all(&log_dir)?;

    let appender = tracing_appender::rolling::daily(&log_dir, "cropadv.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_ansi(false)
        .with_writer(writer)
        .init();
    Ok(guard)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let _guard = init_logging()?;

    let config_service = match cli.config {
        Some(path) => ConfigService::with_path(path),
        None => ConfigService::new(),
    };
    let mut config = config_service.get_config()?;
    if let Some(url) = cli.api_url {
        config.api.base_url = url;
    }
    if let Some(language) = cli.lang {
        config.ui.default_language = language;
    }

    let client = HttpAdvisoryClient::new(&config.api.base_url)?;
    tracing::info!(
        "[Bootstrap] Starting cropadv (api: {}, language: {})",
        client.base_url(),
        config.ui.default_language
    );
    let api: Arc<dyn AdvisoryApi> = Arc::new(client);

    app::App::new(api, config).run().await
}
