use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

pub const DEFAULT_ENDPOINT: &str = "https://practicum.yandex.ru/api/user_api/homework_statuses/";
pub const DEFAULT_RETRY_PERIOD_SECS: u64 = 600;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_LOG_FILE: &str = "main.log";
pub const DEFAULT_CONFIG_FILE: &str = "hwstatus.toml";

/// Names of the required secret environment variables.
pub const PRACTICUM_TOKEN_VAR: &str = "PRACTICUM_TOKEN";
pub const TELEGRAM_TOKEN_VAR: &str = "TELEGRAM_TOKEN";
pub const TELEGRAM_CHAT_ID_VAR: &str = "TELEGRAM_CHAT_ID";

/// Tunables (hwstatus.toml + HWSTATUS__* env overrides).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub practicum: PracticumConfig,
    #[serde(default)]
    pub polling: PollingConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PracticumConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl Default for PracticumConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollingConfig {
    /// Sleep between two iterations of the poll loop.
    #[serde(default = "default_retry_period")]
    pub retry_period_secs: u64,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            retry_period_secs: DEFAULT_RETRY_PERIOD_SECS,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Truncated on every start.
    #[serde(default = "default_log_file")]
    pub file: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            file: default_log_file(),
        }
    }
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}
fn default_request_timeout() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}
fn default_retry_period() -> u64 {
    DEFAULT_RETRY_PERIOD_SECS
}
fn default_log_file() -> String {
    DEFAULT_LOG_FILE.to_string()
}

impl Settings {
    /// Load tunables from a TOML file with HWSTATUS__* env var overrides.
    ///
    /// A missing file is not an error: every field has a default.
    pub fn load(config_path: Option<&str>) -> crate::error::Result<Self> {
        let path = config_path.unwrap_or(DEFAULT_CONFIG_FILE);

        Figment::new()
            .merge(Toml::file(path))
            .merge(Env::prefixed("HWSTATUS__").split("__"))
            .extract()
            .map_err(|e| crate::error::BotError::Config(e.to_string()))
    }
}

/// Raw secret values as found in the environment. Any may be absent.
#[derive(Debug, Clone, Default)]
pub struct Secrets {
    pub practicum_token: Option<String>,
    pub telegram_token: Option<String>,
    pub telegram_chat_id: Option<String>,
}

impl Secrets {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable lookup. Empty values count as absent.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        Self {
            practicum_token: get(PRACTICUM_TOKEN_VAR),
            telegram_token: get(TELEGRAM_TOKEN_VAR),
            telegram_chat_id: get(TELEGRAM_CHAT_ID_VAR),
        }
    }

    /// Names of the required variables that are unset or empty.
    pub fn missing(&self) -> Vec<&'static str> {
        [
            (PRACTICUM_TOKEN_VAR, &self.practicum_token),
            (TELEGRAM_TOKEN_VAR, &self.telegram_token),
            (TELEGRAM_CHAT_ID_VAR, &self.telegram_chat_id),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_none())
        .map(|(name, _)| name)
        .collect()
    }

    /// True when all three secrets are present and non-empty.
    pub fn check_tokens(&self) -> bool {
        tracing::debug!("checking required environment variables");
        self.missing().is_empty()
    }
}

/// Immutable runtime configuration, built once at startup.
#[derive(Debug, Clone)]
pub struct BotConfig {
    pub practicum_token: String,
    pub telegram_token: String,
    pub telegram_chat_id: i64,
    pub settings: Settings,
}

impl BotConfig {
    /// Combine secrets and tunables. Fails if any secret is missing or the
    /// chat id is not an integer.
    pub fn new(secrets: Secrets, settings: Settings) -> crate::error::Result<Self> {
        let missing = secrets.missing();
        let (practicum_token, telegram_token, chat_id) = match (
            secrets.practicum_token,
            secrets.telegram_token,
            secrets.telegram_chat_id,
        ) {
            (Some(p), Some(t), Some(c)) => (p, t, c),
            _ => {
                return Err(crate::error::BotError::Config(format!(
                    "missing required environment variables: {}",
                    missing.join(", ")
                )))
            }
        };

        let telegram_chat_id = chat_id.trim().parse::<i64>().map_err(|_| {
            crate::error::BotError::Config(format!(
                "{TELEGRAM_CHAT_ID_VAR} must be an integer chat id, got {chat_id:?}"
            ))
        })?;

        Ok(Self {
            practicum_token,
            telegram_token,
            telegram_chat_id,
            settings,
        })
    }
}
