//! Error types for recurrence-engine operations.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    /// The call needs input the rule does not provide (e.g. no expiration date
    /// to serve as the default window end).
    #[error("Precondition failed: {0}")]
    Precondition(String),

    /// A date could not be constructed or advanced (illegal day/month pair,
    /// or stepping past the representable date range).
    #[error("Calendar arithmetic error: {0}")]
    CalendarArithmetic(String),

    #[error("Invalid rule: {0}")]
    InvalidRule(String),
}

pub type Result<T> = std::result::Result<T, ScheduleError>;
