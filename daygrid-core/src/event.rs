//! Event, slot and draft types.

use std::fmt;

use chrono::{NaiveDate, NaiveTime, Timelike};

use crate::error::{DayGridError, DayGridResult};

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIME_FORMAT: &str = "%H:%M";
pub const DEFAULT_DURATION: &str = "1h";

/// A booked (date, time) pair. At most one event may occupy a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Slot {
    pub date: NaiveDate,
    pub time: NaiveTime,
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} at {}",
            self.date.format(DATE_FORMAT),
            self.time.format(TIME_FORMAT)
        )
    }
}

/// A committed calendar event. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    title: String,
    slot: Slot,
    /// Free-form, e.g. "1h". Not used for conflict detection.
    duration: String,
}

impl Event {
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn date(&self) -> NaiveDate {
        self.slot.date
    }

    pub fn time(&self) -> NaiveTime {
        self.slot.time
    }

    pub fn slot(&self) -> Slot {
        self.slot
    }

    pub fn duration(&self) -> &str {
        &self.duration
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title)
    }
}

/// The contents of the add-event form. Empty fields are `None` (or an empty
/// title) until the user fills them in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDraft {
    pub title: String,
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    pub duration: String,
}

impl Default for EventDraft {
    fn default() -> Self {
        EventDraft::with_duration(DEFAULT_DURATION)
    }
}

impl EventDraft {
    /// An empty draft with a preset duration.
    pub fn with_duration(duration: &str) -> Self {
        EventDraft {
            title: String::new(),
            date: None,
            time: None,
            duration: duration.to_string(),
        }
    }

    /// Build a draft from raw form text. Blank fields stay empty; malformed
    /// dates or times are rejected.
    pub fn from_fields(title: &str, date: &str, time: &str, duration: &str) -> DayGridResult<Self> {
        Ok(EventDraft {
            title: title.to_string(),
            date: parse_date_field(date)?,
            time: parse_time_field(time)?,
            duration: duration.to_string(),
        })
    }

    /// The slot this draft would occupy, if both parts are filled in.
    pub fn slot(&self) -> Option<Slot> {
        Some(Slot {
            date: self.date?,
            time: self.time?,
        })
    }

    /// Turn the draft into an event, failing if title, date or time is empty.
    pub(crate) fn into_event(self) -> DayGridResult<Event> {
        if self.title.trim().is_empty() {
            return Err(DayGridError::MissingField);
        }
        let slot = self.slot().ok_or(DayGridError::MissingField)?;

        Ok(Event {
            title: self.title,
            slot: Slot {
                date: slot.date,
                time: truncate_to_minute(slot.time),
            },
            duration: self.duration,
        })
    }
}

/// Drop seconds and sub-second parts. Slots have minute precision.
pub fn truncate_to_minute(time: NaiveTime) -> NaiveTime {
    time.with_nanosecond(0)
        .and_then(|t| t.with_second(0))
        .unwrap_or(time)
}

/// Parse a `YYYY-MM-DD` form field. Blank input means "not filled in".
pub fn parse_date_field(input: &str) -> DayGridResult<Option<NaiveDate>> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(input, DATE_FORMAT)
        .map(Some)
        .map_err(|_| DayGridError::InvalidDate(input.to_string()))
}

/// Parse an `HH:MM` form field. Blank input means "not filled in".
///
/// Seconds are dropped so that "09:00" and "09:00:30" name the same slot.
pub fn parse_time_field(input: &str) -> DayGridResult<Option<NaiveTime>> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }
    NaiveTime::parse_from_str(input, TIME_FORMAT)
        .or_else(|_| NaiveTime::parse_from_str(input, "%H:%M:%S"))
        .map(truncate_to_minute)
        .map(Some)
        .map_err(|_| DayGridError::InvalidTime(input.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn blank_fields_parse_as_empty() {
        assert_eq!(parse_date_field("").unwrap(), None);
        assert_eq!(parse_date_field("   ").unwrap(), None);
        assert_eq!(parse_time_field("").unwrap(), None);
    }

    #[test]
    fn date_field_requires_iso_format() {
        assert_eq!(parse_date_field("2025-06-10").unwrap(), Some(date(2025, 6, 10)));
        assert!(matches!(
            parse_date_field("10/06/2025"),
            Err(DayGridError::InvalidDate(_))
        ));
        assert!(matches!(
            parse_date_field("2023-02-29"),
            Err(DayGridError::InvalidDate(_))
        ));
    }

    #[test]
    fn time_field_accepts_minutes_and_drops_seconds() {
        assert_eq!(parse_time_field("09:00").unwrap(), Some(time(9, 0)));
        assert_eq!(parse_time_field("9:30").unwrap(), Some(time(9, 30)));
        assert_eq!(parse_time_field("14:15:45").unwrap(), Some(time(14, 15)));
        assert!(matches!(
            parse_time_field("25:00"),
            Err(DayGridError::InvalidTime(_))
        ));
    }

    #[test]
    fn draft_from_fields_keeps_duration_text() {
        let draft = EventDraft::from_fields("Standup", "2025-06-10", "09:00", "whenever").unwrap();
        assert_eq!(draft.duration, "whenever");
        assert_eq!(
            draft.slot(),
            Some(Slot {
                date: date(2025, 6, 10),
                time: time(9, 0)
            })
        );
    }

    #[test]
    fn draft_missing_any_required_field_is_rejected() {
        let full = EventDraft::from_fields("Standup", "2025-06-10", "09:00", "1h").unwrap();

        let mut no_title = full.clone();
        no_title.title.clear();
        assert!(matches!(no_title.into_event(), Err(DayGridError::MissingField)));

        let mut blank_title = full.clone();
        blank_title.title = "   ".into();
        assert!(matches!(blank_title.into_event(), Err(DayGridError::MissingField)));

        let mut no_date = full.clone();
        no_date.date = None;
        assert!(matches!(no_date.into_event(), Err(DayGridError::MissingField)));

        let mut no_time = full.clone();
        no_time.time = None;
        assert!(matches!(no_time.into_event(), Err(DayGridError::MissingField)));

        let event = full.into_event().unwrap();
        assert_eq!(event.title(), "Standup");
        assert_eq!(event.duration(), "1h");
    }

    #[test]
    fn draft_time_is_truncated_to_the_minute() {
        let mut draft = EventDraft::from_fields("Standup", "2025-06-10", "", "1h").unwrap();
        draft.time = NaiveTime::from_hms_milli_opt(9, 0, 30, 250);

        let event = draft.into_event().unwrap();
        assert_eq!(event.time(), time(9, 0));
    }

    #[test]
    fn empty_duration_is_allowed() {
        let draft = EventDraft::from_fields("Standup", "2025-06-10", "09:00", "").unwrap();
        assert!(draft.into_event().is_ok());
    }

    #[test]
    fn default_draft_is_empty_with_one_hour() {
        let draft = EventDraft::default();
        assert!(draft.title.is_empty());
        assert_eq!(draft.slot(), None);
        assert_eq!(draft.duration, "1h");
    }

    #[test]
    fn slot_display() {
        let slot = Slot {
            date: date(2025, 6, 10),
            time: time(9, 5),
        };
        assert_eq!(slot.to_string(), "2025-06-10 at 09:05");
    }
}
