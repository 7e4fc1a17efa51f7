use std::fs::File;
use std::sync::Mutex;

use anyhow::Context;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const DEFAULT_FILTER: &str = "info,hwstatus_bot=debug,hwstatus_core=debug,hwstatus_practicum=debug,hwstatus_scheduler=debug,hwstatus_telegram=debug";

/// Log to stderr and to `log_file`, which is truncated on every start.
///
/// `RUST_LOG` overrides the default filter.
pub fn init(log_file: &str) -> anyhow::Result<()> {
    let file = File::create(log_file)
        .with_context(|| format!("failed to create log file {log_file}"))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into());

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
        .try_init()
        .context("failed to install tracing subscriber")?;

    Ok(())
}
