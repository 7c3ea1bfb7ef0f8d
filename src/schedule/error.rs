//! Schedule error types

use chrono::NaiveDateTime;
use thiserror::Error;

/// Errors produced while composing or parsing appointment times
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    /// Time of day is not a two-digit `HH:MM` value
    #[error("Invalid time of day '{0}': expected HH:MM")]
    InvalidTime(String),

    /// Date input is neither `YYYY-MM-DD` nor a known preset
    #[error("Invalid date '{0}': expected YYYY-MM-DD, today, tomorrow, 3d or 1w")]
    InvalidDate(String),

    /// Timezone setting could not be parsed
    #[error("Invalid timezone '{0}': expected local, utc or an offset like +07:00")]
    InvalidTimeZone(String),

    /// Wall-clock time falls into a DST gap of the clinic timezone
    #[error("Local time {0} does not exist in the clinic timezone")]
    NonexistentLocalTime(NaiveDateTime),

    /// Internal pattern compilation failed
    #[error("Pattern error: {0}")]
    Pattern(String),
}

/// Result type alias for schedule operations
pub type ScheduleResult<T> = Result<T, ScheduleError>;
