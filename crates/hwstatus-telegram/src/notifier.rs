//! Telegram notifier.
//!
//! Wraps a teloxide `Bot` bound to the one chat every notification goes to.
//! Outbound only: no dispatcher, no update polling.

use async_trait::async_trait;
use teloxide::prelude::*;
use tracing::debug;

use hwstatus_core::{BotConfig, BotError, Notifier};

use crate::send::send_response;

pub struct TelegramNotifier {
    bot: Bot,
    chat_id: ChatId,
}

impl TelegramNotifier {
    /// `token` is assumed non-empty: `BotConfig` only exists once all secrets are.
    pub fn new(token: &str, chat_id: i64) -> Self {
        Self {
            bot: Bot::new(token),
            chat_id: ChatId(chat_id),
        }
    }

    pub fn from_config(config: &BotConfig) -> Self {
        Self::new(&config.telegram_token, config.telegram_chat_id)
    }

    /// Replace the underlying bot, e.g. to point it at another Bot API server.
    pub fn with_bot(mut self, bot: Bot) -> Self {
        self.bot = bot;
        self
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    fn name(&self) -> &str {
        "telegram"
    }

    async fn send(&self, text: &str) -> Result<(), BotError> {
        debug!(chat_id = self.chat_id.0, chars = text.chars().count(), "telegram: sending message");
        send_response(&self.bot, self.chat_id, text).await?;
        Ok(())
    }
}
