use hwstatus_core::BotError;

/// Errors produced by the Telegram notifier.
#[derive(Debug, thiserror::Error)]
pub enum TelegramError {
    /// Telegram refused (or never received) one part of a message.
    #[error("chunk {index} of {total} not delivered: {source}")]
    Chunk {
        index: usize,
        total: usize,
        #[source]
        source: teloxide::RequestError,
    },
}

impl From<TelegramError> for BotError {
    fn from(e: TelegramError) -> Self {
        BotError::Delivery(e.to_string())
    }
}
