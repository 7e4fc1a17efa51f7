use std::time::Duration;

use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use hwstatus_core::{BotConfig, Secrets, Settings};
use hwstatus_practicum::PracticumClient;
use hwstatus_scheduler::PollEngine;
use hwstatus_telegram::TelegramNotifier;

mod cli;
mod logging;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Secrets and overrides may come from ./.env; real env vars take precedence.
    let dotenv = dotenvy::dotenv();

    // Tunables first: they name the log file.
    let (settings, settings_err) = match Settings::load(cli.config_path().as_deref()) {
        Ok(s) => (s, None),
        Err(e) => (Settings::default(), Some(e)),
    };
    logging::init(&settings.logging.file)?;
    if let Some(e) = settings_err {
        warn!("Config load failed ({}), using defaults", e);
    }
    match dotenv {
        Ok(path) => info!(path = %path.display(), "loaded environment from .env"),
        Err(e) if e.not_found() => {}
        Err(e) => warn!(error = %e, "failed to read .env"),
    }

    let secrets = Secrets::from_env();
    if !secrets.check_tokens() {
        error!(
            severity = "critical",
            missing = ?secrets.missing(),
            "required environment variables are missing, exiting"
        );
        std::process::exit(1);
    }
    let config = match BotConfig::new(secrets, settings) {
        Ok(c) => c,
        Err(e) => {
            error!(severity = "critical", error = %e, "invalid configuration, exiting");
            std::process::exit(1);
        }
    };

    let source = PracticumClient::new(config.practicum_token.clone(), &config.settings.practicum)?;
    let notifier = TelegramNotifier::from_config(&config);
    let cursor = cli
        .from_date
        .unwrap_or_else(|| chrono::Utc::now().timestamp());

    let mut engine = PollEngine::new(
        Box::new(source),
        Box::new(notifier),
        cursor,
        Duration::from_secs(config.settings.polling.retry_period_secs),
    );

    if cli.once {
        let outcome = engine.tick().await;
        info!(?outcome, cursor = engine.cursor(), "single iteration finished");
        return Ok(());
    }

    let cancel = CancellationToken::new();
    let on_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Ctrl-C received, stopping");
            on_signal.cancel();
        }
    });

    engine.run(cancel).await;
    Ok(())
}
