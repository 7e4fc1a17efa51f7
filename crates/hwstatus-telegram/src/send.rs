//! Message sending helpers for the Telegram notifier.
//!
//! Telegram's message limit is 4096 characters. We use 4090 for safety.
//! Messages are sent as plain text: homework names and error texts are not
//! escaped for any parse mode.

use std::time::Duration;

use teloxide::prelude::*;

use crate::error::TelegramError;

/// Maximum characters per Telegram message (limit is 4096; we use 4090 for safety).
pub const CHUNK_MAX: usize = 4090;

/// Split `text` into chunks of at most [`CHUNK_MAX`] characters.
///
/// Prefers to break at a newline, then at a space; a run with neither is cut
/// at the limit. Counts characters, not bytes, so Cyrillic text is never cut
/// inside a code point.
pub fn split_chunks(text: &str) -> Vec<String> {
    if text.chars().count() <= CHUNK_MAX {
        return vec![text.to_string()];
    }

    let mut chunks = Vec::new();
    let mut remaining = text;
    while remaining.chars().count() > CHUNK_MAX {
        // Byte offset of the first character past the limit.
        let limit = remaining
            .char_indices()
            .nth(CHUNK_MAX)
            .map(|(i, _)| i)
            .unwrap_or(remaining.len());
        let window = &remaining[..limit];
        let split_at = window
            .rfind('\n')
            .or_else(|| window.rfind(' '))
            .filter(|&i| i > 0)
            .unwrap_or(limit);
        chunks.push(remaining[..split_at].to_string());
        remaining = remaining[split_at..].trim_start();
    }
    if !remaining.is_empty() {
        chunks.push(remaining.to_string());
    }
    chunks
}

/// Send `text` to `chat_id` in as many messages as it takes.
///
/// Stops at the first chunk Telegram rejects. A 100ms delay is inserted
/// between consecutive chunks to avoid hitting rate limits.
pub async fn send_response(bot: &Bot, chat_id: ChatId, text: &str) -> Result<(), TelegramError> {
    let chunks = split_chunks(text);
    for (i, chunk) in chunks.iter().enumerate() {
        bot.send_message(chat_id, chunk.as_str())
            .await
            .map_err(|source| TelegramError::Chunk {
                index: i + 1,
                total: chunks.len(),
                source,
            })?;

        if i + 1 < chunks.len() {
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_single_chunk() {
        let chunks = split_chunks("Нет подходящего статуса для ответа");
        assert_eq!(chunks, vec!["Нет подходящего статуса для ответа".to_string()]);
    }

    #[test]
    fn exactly_chunk_max_chars_is_single_chunk() {
        // Two bytes per char: the byte length is well over CHUNK_MAX.
        let text = "ж".repeat(CHUNK_MAX);
        assert_eq!(split_chunks(&text).len(), 1);
    }

    #[test]
    fn over_limit_splits_on_newline() {
        let line = "a".repeat(2000);
        let text = format!("{line}\n{line}\n{line}");
        let chunks = split_chunks(&text);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0], format!("{line}\n{line}"));
        assert_eq!(chunks[1], line);
    }

    #[test]
    fn long_cyrillic_line_force_splits_on_char_boundaries() {
        let text = "ю".repeat(9000);
        let chunks = split_chunks(&text);
        assert_eq!(chunks.len(), 3);
        for c in &chunks {
            assert!(c.chars().count() <= CHUNK_MAX);
        }
        let total: usize = chunks.iter().map(|c| c.chars().count()).sum();
        assert_eq!(total, 9000);
    }

    #[test]
    fn prefers_spaces_over_mid_word_cuts() {
        let word = "слово";
        let text = vec![word; 1500].join(" ");
        for c in split_chunks(&text) {
            assert!(c.starts_with(word) && c.ends_with(word), "cut mid-word");
        }
    }
}
