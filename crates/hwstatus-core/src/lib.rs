//! `hwstatus-core` — configuration, error taxonomy, verdict table and the
//! notification interface shared by every other crate in the workspace.

pub mod config;
pub mod error;
pub mod notify;
pub mod verdict;

pub use config::{BotConfig, Secrets, Settings};
pub use error::{BotError, DataShapeError, Result};
pub use notify::{send_message, Notifier};
pub use verdict::HomeworkStatus;
