//! Error types for calendar-helper.

use thiserror::Error;

/// Errors that can occur while reading the calendar store.
///
/// A calendar that does not exist is not an error here; see
/// [`crate::fetch::FetchOutcome::CalendarNotFound`].
#[derive(Error, Debug)]
pub enum HelperError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Calendar store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Calendar store error: {0}")]
    Store(String),

    #[error("Fixture error: {0}")]
    Fixture(String),

    #[error("Date window out of range: cannot shift {days} days from now")]
    WindowOutOfRange { days: u32 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for calendar-helper operations.
pub type HelperResult<T> = Result<T, HelperError>;
