//! Notification message parsing.

mod parser;
pub mod rules;

pub use parser::{parse_message, NotificationParser, ParsedMessage};

use chrono::{Local, NaiveDateTime, Timelike};

use rules::BATCH_DELIMITER;

/// Trait for notification parsers.
pub trait MessageParser {
    /// Parse one line, stamping the result with `received_at`.
    fn parse_at(&self, text: &str, received_at: NaiveDateTime) -> ParsedMessage;

    /// Parse one line, stamping the result with the current local time.
    fn parse(&self, text: &str) -> ParsedMessage {
        self.parse_at(text, now())
    }
}

/// Current local time, truncated to whole seconds.
pub fn now() -> NaiveDateTime {
    let now = Local::now().naive_local();
    now.with_nanosecond(0).unwrap_or(now)
}

/// Split batch input on line breaks and `;`, dropping blank segments.
pub fn split_batch(input: &str) -> Vec<&str> {
    BATCH_DELIMITER
        .split(input)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}
