use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use hwstatus_core::notify::{failure_message, send_message, Notifier, NO_NEW_STATUS};
use hwstatus_core::Result;
use hwstatus_practicum::{check_response, current_date, parse_status, HomeworkSource};

/// What one iteration of the loop ended with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// The latest homework was rendered and handed to the notifier.
    StatusChanged(String),
    /// The API reported no homework updates.
    NoUpdates,
    /// The iteration failed; this failure report was handed to the notifier.
    Reported(String),
    /// Transient network failure; logged only.
    Skipped,
}

/// Drives fetch → validate → notify every `retry_period` until cancelled.
pub struct PollEngine {
    source: Box<dyn HomeworkSource>,
    notifier: Box<dyn Notifier>,
    /// Only updates after this epoch timestamp are requested.
    cursor: i64,
    retry_period: Duration,
}

impl PollEngine {
    pub fn new(
        source: Box<dyn HomeworkSource>,
        notifier: Box<dyn Notifier>,
        cursor: i64,
        retry_period: Duration,
    ) -> Self {
        Self {
            source,
            notifier,
            cursor,
            retry_period,
        }
    }

    pub fn cursor(&self) -> i64 {
        self.cursor
    }

    /// Main loop. Runs one iteration, sleeps, repeats until `cancel` fires.
    pub async fn run(&mut self, cancel: CancellationToken) {
        info!(
            cursor = self.cursor,
            retry_secs = self.retry_period.as_secs(),
            "poll engine started"
        );

        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                outcome = self.tick() => debug!(?outcome, "poll iteration finished"),
            }

            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = tokio::time::sleep(self.retry_period) => {}
            }
        }

        info!(cursor = self.cursor, "poll engine shutting down");
    }

    /// Run exactly one iteration. Never fails: every error is reported or logged here.
    pub async fn tick(&mut self) -> TickOutcome {
        info!(cursor = self.cursor, "poll iteration started");

        match self.poll().await {
            Ok(Some(message)) => {
                send_message(self.notifier.as_ref(), &message).await;
                TickOutcome::StatusChanged(message)
            }
            Ok(None) => {
                debug!("no homework updates");
                send_message(self.notifier.as_ref(), NO_NEW_STATUS).await;
                TickOutcome::NoUpdates
            }
            Err(e) if e.is_transient() => {
                error!(code = e.code(), error = %e, "homework API unreachable, retrying next period");
                TickOutcome::Skipped
            }
            Err(e) => {
                let message = failure_message(&e);
                error!(code = e.code(), "{message}");
                send_message(self.notifier.as_ref(), &message).await;
                TickOutcome::Reported(message)
            }
        }
    }

    /// Fetch and validate, advance the cursor, render the newest homework.
    ///
    /// `Ok(None)` means the API answered with an empty `homeworks` list.
    async fn poll(&mut self) -> Result<Option<String>> {
        let response = self.source.get_api_answer(self.cursor).await?;
        let homeworks = check_response(&response)?;
        self.advance_cursor(current_date(&response));

        match homeworks.first() {
            Some(homework) => Ok(Some(parse_status(homework)?)),
            None => Ok(None),
        }
    }

    /// The cursor never moves backwards; a missing timestamp leaves it as is.
    fn advance_cursor(&mut self, server_date: Option<i64>) {
        match server_date {
            Some(date) if date >= self.cursor => self.cursor = date,
            Some(date) => warn!(
                cursor = self.cursor,
                current_date = date,
                "server current_date is behind the cursor, keeping cursor"
            ),
            None => warn!(cursor = self.cursor, "response has no integer current_date, keeping cursor"),
        }
    }
}
