//! `hwstatus-scheduler` — the poll loop.
//!
//! # Overview
//!
//! [`engine::PollEngine`] owns the cursor and, every retry period, runs one
//! iteration: fetch → validate → advance cursor → render → notify. Every
//! failure inside an iteration is handled there; only cancellation ends
//! [`engine::PollEngine::run`].
//!
//! | Outcome          | What the chat sees                    |
//! |------------------|---------------------------------------|
//! | `StatusChanged`  | the rendered status message           |
//! | `NoUpdates`      | the fixed "no new status" text        |
//! | `Reported`       | `Сбой в работе программы: <error>`    |
//! | `Skipped`        | nothing (network failure, logged)     |

pub mod engine;

pub use engine::{PollEngine, TickOutcome};
