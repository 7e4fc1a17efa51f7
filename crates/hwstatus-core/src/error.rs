use thiserror::Error;

/// Every failure the poll loop can observe, as one closed set.
///
/// The driver matches on the variant: `Config` never reaches the loop,
/// `Network` is logged and skipped, `Protocol`/`DataShape` are reported to
/// the chat, and `Delivery` stays inside the notifier.
#[derive(Debug, Error)]
pub enum BotError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Endpoint {endpoint} returned HTTP {status}")]
    Protocol { status: u16, endpoint: String },

    #[error(transparent)]
    DataShape(#[from] DataShapeError),

    #[error("Delivery failed: {0}")]
    Delivery(String),
}

impl BotError {
    /// Short error code string, used as a structured log field.
    pub fn code(&self) -> &'static str {
        match self {
            BotError::Config(_) => "CONFIG_ERROR",
            BotError::Network(_) => "NETWORK_ERROR",
            BotError::Protocol { .. } => "PROTOCOL_ERROR",
            BotError::DataShape(e) => e.code(),
            BotError::Delivery(_) => "DELIVERY_ERROR",
        }
    }

    /// Transient failures are logged but not reported to the chat.
    pub fn is_transient(&self) -> bool {
        matches!(self, BotError::Network(_))
    }
}

/// The API answered, but not with what the homework API documents.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataShapeError {
    #[error("API response is not a dict (got {found})")]
    ResponseNotObject { found: &'static str },

    #[error("`homeworks` is not a list (got {found})")]
    HomeworksNotList { found: &'static str },

    #[error("homework record is not a dict (got {found})")]
    HomeworkNotObject { found: &'static str },

    #[error("missing key `{key}` in {context}")]
    MissingKey {
        key: &'static str,
        context: &'static str,
    },

    #[error("unknown homework status {0}")]
    UnknownStatus(String),

    #[error("response body is not valid JSON: {0}")]
    InvalidJson(String),
}

impl DataShapeError {
    /// `TYPE_ERROR`, `MISSING_KEY` or `INVALID_JSON`.
    ///
    /// An unrecognized status counts as a missing key: the verdict table has
    /// no entry for it.
    pub fn code(&self) -> &'static str {
        match self {
            DataShapeError::ResponseNotObject { .. }
            | DataShapeError::HomeworksNotList { .. }
            | DataShapeError::HomeworkNotObject { .. } => "TYPE_ERROR",
            DataShapeError::MissingKey { .. } | DataShapeError::UnknownStatus(_) => "MISSING_KEY",
            DataShapeError::InvalidJson(_) => "INVALID_JSON",
        }
    }
}

/// Name of a JSON value's type, for error messages.
pub fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "list",
        serde_json::Value::Object(_) => "dict",
    }
}

pub type Result<T> = std::result::Result<T, BotError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_status_is_a_missing_key() {
        let err = DataShapeError::UnknownStatus("\"done\"".to_string());
        assert_eq!(err.code(), "MISSING_KEY");
    }

    #[test]
    fn data_shape_code_passes_through() {
        let err = BotError::from(DataShapeError::HomeworksNotList { found: "string" });
        assert_eq!(err.code(), "TYPE_ERROR");
        assert!(!err.is_transient());
        assert_eq!(err.to_string(), "`homeworks` is not a list (got string)");
    }

    #[test]
    fn protocol_error_mentions_status() {
        let err = BotError::Protocol {
            status: 503,
            endpoint: "http://x/".to_string(),
        };
        assert_eq!(err.code(), "PROTOCOL_ERROR");
        assert!(err.to_string().contains("503"));
    }
}
