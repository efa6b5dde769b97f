//! Error types for daygrid.

use chrono::NaiveDate;
use thiserror::Error;

/// Errors that can occur in daygrid operations.
///
/// The booking variants are all recoverable: they are meant to be shown to
/// the user, who can correct the input and try again.
#[derive(Error, Debug)]
pub enum DayGridError {
    #[error("missing field")]
    MissingField,

    #[error("slot already booked on {date}")]
    SlotTaken { date: NaiveDate },

    #[error("{date} is in the past")]
    PastDate { date: NaiveDate },

    #[error("Day {day} is outside the displayed month (1-{days_in_month})")]
    DayOutOfRange { day: u32, days_in_month: u32 },

    #[error("Invalid date '{0}'. Expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Invalid time '{0}'. Expected HH:MM")]
    InvalidTime(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DayGridError {
    /// The message shown to the user when this error interrupts a booking.
    pub fn user_message(&self) -> String {
        match self {
            DayGridError::MissingField => "Please fill all event fields!".to_string(),
            DayGridError::SlotTaken { date } => {
                format!("This time slot is already booked on {}!", date.format("%Y-%m-%d"))
            }
            DayGridError::PastDate { .. } => "Cannot add event on past dates!".to_string(),
            other => other.to_string(),
        }
    }
}

/// Result type alias for daygrid operations.
pub type DayGridResult<T> = Result<T, DayGridError>;
