//! User-facing outcome messages.
//!
//! The engine and session only decide *what* to tell the user. How a notice
//! is shown (and for how long) is up to the [`Notifier`] the caller plugs in.

use std::fmt;

use crate::error::DayGridError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Error(String),
}

impl Notice {
    pub fn message(&self) -> &str {
        match self {
            Notice::Success(m) | Notice::Error(m) => m,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Notice::Error(_))
    }
}

impl From<&DayGridError> for Notice {
    fn from(err: &DayGridError) -> Self {
        Notice::Error(err.user_message())
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Receives notices as they happen.
pub trait Notifier {
    fn notify(&mut self, notice: Notice);
}

/// Collects notices in order.
impl Notifier for Vec<Notice> {
    fn notify(&mut self, notice: Notice) {
        self.push(notice);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_become_error_notices() {
        let notice = Notice::from(&DayGridError::MissingField);
        assert!(notice.is_error());
        assert_eq!(notice.to_string(), "Please fill all event fields!");
    }

    #[test]
    fn vec_records_in_order() {
        let mut log: Vec<Notice> = Vec::new();
        log.notify(Notice::Error("first".into()));
        log.notify(Notice::Success("second".into()));
        assert_eq!(log.len(), 2);
        assert!(!log[1].is_error());
        assert_eq!(log[1].message(), "second");
    }
}
