pub mod application;
pub mod presentation;

use anyhow::{Context, Result};
use log::info;

use dailysign_domain::check_in::RunReport;
use dailysign_infrastructure::config::{resolve_config_path, AppConfig};
use dailysign_infrastructure::logging::{init_logger, LoggerOptions};

use application::services::{CheckInExecutor, ExecutorSettings, NotificationService};
use presentation::cli::Cli;

/// Resolve and load the config file named by the CLI or the environment
pub fn load_config(cli: &Cli) -> Result<AppConfig> {
    let path = resolve_config_path(cli.config.clone(), |key| std::env::var(key).ok())
        .context("No config file found: pass --config, set DAILYSIGN_CONFIG or create ./config.json")?;

    AppConfig::load(&path)
}

/// Check in every account, then push the summary unless `no_push` is set
pub async fn run(config: &AppConfig, no_push: bool) -> Result<RunReport> {
    let executor = CheckInExecutor::new(ExecutorSettings::from_config(config)?);
    let report = executor.execute_all(&config.accounts).await;

    if no_push {
        info!("--no-push given, skipping notifications");
    } else {
        NotificationService::from_config(config)
            .dispatch(&report)
            .await;
    }

    Ok(report)
}

/// Full process entry: config, logging, then one run
pub async fn start(cli: Cli) -> Result<RunReport> {
    let config = load_config(&cli)?;

    init_logger(&LoggerOptions {
        level: cli.log_level.clone(),
        log_dir: config.log_dir.clone(),
    })?;

    info!("🚀 dailysign v{} starting", env!("CARGO_PKG_VERSION"));
    run(&config, cli.no_push).await
}
