//! Outbound notification interface shared by the poll loop and chat adapters.

use async_trait::async_trait;
use tracing::{debug, error};

use crate::error::BotError;

/// Fixed text sent when the API reports no homework updates.
pub const NO_NEW_STATUS: &str = "Нет подходящего статуса для ответа";

/// Prefix of every failure report sent to the chat.
pub const FAILURE_PREFIX: &str = "Сбой в работе программы";

/// Render the chat message for a failed iteration.
pub fn failure_message(error: &BotError) -> String {
    format!("{FAILURE_PREFIX}: {error}")
}

/// Destination for human-readable notifications.
///
/// Implementations deliver to one fixed destination and report failures as
/// [`BotError::Delivery`]; callers go through [`send_message`], which never
/// lets a delivery failure escape.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Stable lowercase identifier (e.g. `"telegram"`), used in logs.
    fn name(&self) -> &str;

    async fn send(&self, text: &str) -> Result<(), BotError>;
}

/// Deliver `message` through `notifier`, logging and swallowing any failure.
///
/// Returns whether delivery succeeded so callers can record it.
pub async fn send_message(notifier: &dyn Notifier, message: &str) -> bool {
    match notifier.send(message).await {
        Ok(()) => {
            debug!(channel = notifier.name(), text = %message, "message delivered");
            true
        }
        Err(e) => {
            error!(channel = notifier.name(), code = e.code(), error = %e, "message not delivered");
            false
        }
    }
}
