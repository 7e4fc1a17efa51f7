//! `hwstatus-practicum` — client for the Practicum homework-status API.
//!
//! [`client::PracticumClient`] fetches raw JSON; [`response::check_response`]
//! and [`response::parse_status`] turn it into a chat message without ever
//! trusting its shape.

pub mod client;
pub mod response;

pub use client::{HomeworkSource, PracticumClient};
pub use response::{check_response, current_date, parse_status};
