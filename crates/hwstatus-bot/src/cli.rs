use clap::Parser;

/// Relays homework review status changes to a Telegram chat.
#[derive(Debug, Parser)]
#[command(name = "hwstatus-bot", version, about)]
pub struct Cli {
    /// Path to the TOML config file (default: $HWSTATUS_CONFIG, then ./hwstatus.toml).
    #[arg(long, value_name = "PATH")]
    pub config: Option<String>,

    /// Run a single poll iteration and exit.
    #[arg(long)]
    pub once: bool,

    /// Initial cursor as a Unix timestamp (default: now).
    #[arg(long, value_name = "TS", allow_negative_numbers = true)]
    pub from_date: Option<i64>,
}

impl Cli {
    /// Explicit flag wins over the HWSTATUS_CONFIG env var.
    pub fn config_path(&self) -> Option<String> {
        self.config
            .clone()
            .or_else(|| std::env::var("HWSTATUS_CONFIG").ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cli = Cli::try_parse_from(["hwstatus-bot"]).unwrap();
        assert!(!cli.once);
        assert_eq!(cli.from_date, None);
        assert_eq!(cli.config, None);
    }

    #[test]
    fn all_flags() {
        let cli = Cli::try_parse_from([
            "hwstatus-bot",
            "--config",
            "/etc/hwstatus.toml",
            "--once",
            "--from-date",
            "1700000000",
        ])
        .unwrap();
        assert!(cli.once);
        assert_eq!(cli.from_date, Some(1_700_000_000));
        assert_eq!(cli.config_path().as_deref(), Some("/etc/hwstatus.toml"));
    }

    #[test]
    fn rejects_non_numeric_cursor() {
        assert!(Cli::try_parse_from(["hwstatus-bot", "--from-date", "yesterday"]).is_err());
    }
}
