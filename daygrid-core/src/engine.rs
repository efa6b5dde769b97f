//! The calendar engine: displayed month, committed events, and the booking
//! rules that guard them.

use chrono::{NaiveDate, NaiveTime};
use tracing::{debug, info};

use crate::clock::{Clock, SystemClock};
use crate::error::{DayGridError, DayGridResult};
use crate::event::{Event, EventDraft, truncate_to_minute};
use crate::month::{MonthGrid, YearMonth};

/// Owns the displayed month and the in-memory event list for one session.
///
/// Two rules hold for the event list: no two events share a (date, time)
/// slot, and events are only ever appended.
#[derive(Debug, Clone)]
pub struct CalendarEngine<C: Clock = SystemClock> {
    clock: C,
    displayed: YearMonth,
    events: Vec<Event>,
    reject_past_form_dates: bool,
}

impl CalendarEngine<SystemClock> {
    /// An empty engine showing the current month.
    pub fn new() -> Self {
        CalendarEngine::with_clock(SystemClock)
    }
}

impl Default for CalendarEngine<SystemClock> {
    fn default() -> Self {
        CalendarEngine::new()
    }
}

impl<C: Clock> CalendarEngine<C> {
    pub fn with_clock(clock: C) -> Self {
        let displayed = YearMonth::containing(clock.today());
        CalendarEngine {
            clock,
            displayed,
            events: Vec::new(),
            reject_past_form_dates: false,
        }
    }

    /// Also refuse past dates in [`add_event`](Self::add_event).
    ///
    /// Off by default: only [`handle_day_click`](Self::handle_day_click)
    /// blocks past dates, a date typed into the form is accepted.
    pub fn reject_past_form_dates(mut self, reject: bool) -> Self {
        self.reject_past_form_dates = reject;
        self
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    // NAVIGATION:

    pub fn displayed(&self) -> YearMonth {
        self.displayed
    }

    pub fn go_to_previous_month(&mut self) {
        self.displayed = self.displayed.previous();
        debug!(displayed = %self.displayed, "Moved to previous month");
    }

    pub fn go_to_next_month(&mut self) {
        self.displayed = self.displayed.next();
        debug!(displayed = %self.displayed, "Moved to next month");
    }

    /// Show `month` (zero-based) of `year`. Months outside 0..=11 roll over
    /// into neighbouring years.
    pub fn jump_to(&mut self, year: i32, month: i32) {
        self.displayed = YearMonth::new(year, month);
        debug!(displayed = %self.displayed, "Jumped to month");
    }

    /// Layout of the displayed month.
    pub fn month_grid(&self) -> MonthGrid {
        self.displayed.grid()
    }

    // RULES:

    /// True if `date` is strictly before today. Today is never past.
    pub fn is_past(&self, date: NaiveDate) -> bool {
        date < self.clock.today()
    }

    /// True if an event already occupies this date and time, compared to
    /// the minute.
    pub fn is_slot_taken(&self, date: NaiveDate, time: NaiveTime) -> bool {
        let time = truncate_to_minute(time);
        self.events
            .iter()
            .any(|e| e.date() == date && e.time() == time)
    }

    // BOOKING:

    /// Validate a draft and append it as a new event.
    ///
    /// Fails with [`DayGridError::MissingField`] if title, date or time is
    /// empty, then with [`DayGridError::SlotTaken`] if the slot is booked.
    /// Nothing changes on failure.
    pub fn add_event(&mut self, draft: EventDraft) -> DayGridResult<&Event> {
        let event = draft.into_event()?;

        if self.is_slot_taken(event.date(), event.time()) {
            debug!(slot = %event.slot(), "Rejected event: slot taken");
            return Err(DayGridError::SlotTaken { date: event.date() });
        }

        if self.reject_past_form_dates && self.is_past(event.date()) {
            debug!(date = %event.date(), "Rejected event: past date");
            return Err(DayGridError::PastDate { date: event.date() });
        }

        info!(title = event.title(), slot = %event.slot(), "Added event");
        self.events.push(event);
        Ok(&self.events[self.events.len() - 1])
    }

    /// Resolve a click on `day` of the displayed month.
    ///
    /// Returns the clicked date when booking may start there, or
    /// [`DayGridError::PastDate`] when it lies before today.
    pub fn handle_day_click(&self, day: u32) -> DayGridResult<NaiveDate> {
        let date = self
            .displayed
            .day(day)
            .ok_or_else(|| DayGridError::DayOutOfRange {
                day,
                days_in_month: self.month_grid().days_in_month,
            })?;

        if self.is_past(date) {
            debug!(%date, "Ignored click on past date");
            return Err(DayGridError::PastDate { date });
        }

        Ok(date)
    }

    // QUERIES:

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Events on `date`, in the order they were added.
    pub fn list_events_for_date(&self, date: NaiveDate) -> Vec<&Event> {
        self.events.iter().filter(|e| e.date() == date).collect()
    }

    /// The agenda: every event ordered by date. Events on the same date keep
    /// the order they were added in.
    pub fn list_all_events_sorted(&self) -> Vec<&Event> {
        let mut sorted: Vec<&Event> = self.events.iter().collect();
        sorted.sort_by_key(|e| e.date());
        sorted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn engine_on(today: NaiveDate) -> CalendarEngine<FixedClock> {
        CalendarEngine::with_clock(FixedClock(today))
    }

    fn draft(title: &str, date: &str, time: &str, duration: &str) -> EventDraft {
        EventDraft::from_fields(title, date, time, duration).unwrap()
    }

    #[test]
    fn starts_on_current_month_with_no_events() {
        let engine = engine_on(date(2025, 6, 12));
        assert_eq!(engine.displayed(), YearMonth::new(2025, 5));
        assert!(engine.is_empty());
    }

    #[test]
    fn previous_month_from_january_wraps_year() {
        let mut engine = engine_on(date(2025, 1, 15));
        engine.go_to_previous_month();
        assert_eq!(engine.displayed().year(), 2024);
        assert_eq!(engine.displayed().month0(), 11);
    }

    #[test]
    fn next_month_from_december_wraps_year() {
        let mut engine = engine_on(date(2025, 12, 3));
        engine.go_to_next_month();
        assert_eq!(engine.displayed().year(), 2026);
        assert_eq!(engine.displayed().month0(), 0);
    }

    #[test]
    fn jump_to_normalizes_month() {
        let mut engine = engine_on(date(2025, 6, 1));
        engine.jump_to(2027, 3);
        assert_eq!(engine.displayed(), YearMonth::new(2027, 3));

        engine.jump_to(2027, 12);
        assert_eq!(engine.displayed(), YearMonth::new(2028, 0));
    }

    #[test]
    fn month_grid_follows_displayed_month() {
        let mut engine = engine_on(date(2024, 2, 10));
        assert_eq!(engine.month_grid().days_in_month, 29);
        engine.jump_to(2023, 1);
        assert_eq!(engine.month_grid().days_in_month, 28);
    }

    #[test]
    fn today_is_not_past() {
        let today = date(2025, 6, 12);
        let engine = engine_on(today);
        assert!(engine.is_past(date(2025, 6, 11)));
        assert!(engine.is_past(date(2024, 12, 31)));
        assert!(!engine.is_past(today));
        assert!(!engine.is_past(date(2025, 6, 13)));
    }

    #[test]
    fn add_event_appends_and_returns_event() {
        let mut engine = engine_on(date(2025, 6, 1));
        let event = engine
            .add_event(draft("Standup", "2025-06-10", "09:00", "1h"))
            .unwrap();
        assert_eq!(event.title(), "Standup");
        assert_eq!(engine.len(), 1);
        assert!(engine.is_slot_taken(date(2025, 6, 10), NaiveTime::from_hms_opt(9, 0, 0).unwrap()));
    }

    #[test]
    fn missing_fields_fail_without_mutation() {
        let mut engine = engine_on(date(2025, 6, 1));
        for d in [
            draft("", "2025-06-10", "09:00", "1h"),
            draft("Standup", "", "09:00", "1h"),
            draft("Standup", "2025-06-10", "", "1h"),
        ] {
            assert!(matches!(engine.add_event(d), Err(DayGridError::MissingField)));
        }
        assert!(engine.is_empty());
    }

    #[test]
    fn same_slot_is_rejected() {
        let mut engine = engine_on(date(2025, 6, 1));
        engine
            .add_event(draft("Standup", "2025-06-10", "09:00", "1h"))
            .unwrap();

        let err = engine
            .add_event(draft("Sync", "2025-06-10", "09:00", "30m"))
            .unwrap_err();
        assert!(matches!(err, DayGridError::SlotTaken { date: d } if d == date(2025, 6, 10)));
        assert_eq!(engine.len(), 1);
    }

    #[test]
    fn seconds_do_not_make_a_new_slot() {
        let mut engine = engine_on(date(2025, 6, 1));
        let mut first = draft("Standup", "2025-06-10", "", "1h");
        first.time = NaiveTime::from_hms_opt(9, 0, 0);
        engine.add_event(first).unwrap();

        let mut second = draft("Sync", "2025-06-10", "", "30m");
        second.time = NaiveTime::from_hms_opt(9, 0, 30);
        assert!(matches!(
            engine.add_event(second),
            Err(DayGridError::SlotTaken { .. })
        ));
        assert_eq!(engine.len(), 1);
        assert!(engine.is_slot_taken(
            date(2025, 6, 10),
            NaiveTime::from_hms_opt(9, 0, 59).unwrap()
        ));
    }

    #[test]
    fn overlapping_but_distinct_slots_are_allowed() {
        let mut engine = engine_on(date(2025, 6, 1));
        engine
            .add_event(draft("Workshop", "2025-06-10", "09:00", "3h"))
            .unwrap();
        engine
            .add_event(draft("Coffee", "2025-06-10", "10:00", "15m"))
            .unwrap();
        engine
            .add_event(draft("Standup", "2025-06-11", "09:00", "1h"))
            .unwrap();
        assert_eq!(engine.len(), 3);
    }

    #[test]
    fn missing_field_is_checked_before_conflict() {
        let mut engine = engine_on(date(2025, 6, 1));
        engine
            .add_event(draft("Standup", "2025-06-10", "09:00", "1h"))
            .unwrap();
        let err = engine
            .add_event(draft("", "2025-06-10", "09:00", "1h"))
            .unwrap_err();
        assert!(matches!(err, DayGridError::MissingField));
    }

    #[test]
    fn form_accepts_past_dates_by_default() {
        let mut engine = engine_on(date(2025, 6, 12));
        assert!(engine
            .add_event(draft("Retro", "2025-06-01", "15:00", "1h"))
            .is_ok());
    }

    #[test]
    fn form_rejects_past_dates_when_enabled() {
        let mut engine = engine_on(date(2025, 6, 12)).reject_past_form_dates(true);
        let err = engine
            .add_event(draft("Retro", "2025-06-01", "15:00", "1h"))
            .unwrap_err();
        assert!(matches!(err, DayGridError::PastDate { .. }));
        assert!(engine.is_empty());

        assert!(engine
            .add_event(draft("Planning", "2025-06-12", "15:00", "1h"))
            .is_ok());
    }

    #[test]
    fn day_click_before_today_is_rejected() {
        let engine = engine_on(date(2025, 6, 12));
        assert!(matches!(
            engine.handle_day_click(11),
            Err(DayGridError::PastDate { date: d }) if d == date(2025, 6, 11)
        ));
    }

    #[test]
    fn day_click_today_or_later_returns_date() {
        let mut engine = engine_on(date(2025, 6, 12));
        assert_eq!(engine.handle_day_click(12).unwrap(), date(2025, 6, 12));
        assert_eq!(engine.handle_day_click(30).unwrap(), date(2025, 6, 30));

        engine.go_to_next_month();
        assert_eq!(engine.handle_day_click(1).unwrap(), date(2025, 7, 1));

        engine.jump_to(2025, 4);
        assert!(engine.handle_day_click(31).is_err());
    }

    #[test]
    fn day_click_outside_month_is_rejected() {
        let engine = engine_on(date(2025, 6, 12));
        assert!(matches!(
            engine.handle_day_click(31),
            Err(DayGridError::DayOutOfRange {
                day: 31,
                days_in_month: 30
            })
        ));
        assert!(engine.handle_day_click(0).is_err());
    }

    #[test]
    fn events_for_date_only_match_that_date() {
        let mut engine = engine_on(date(2025, 6, 1));
        engine
            .add_event(draft("Standup", "2025-06-10", "09:00", "1h"))
            .unwrap();
        engine
            .add_event(draft("Lunch", "2025-06-11", "12:00", "1h"))
            .unwrap();
        engine
            .add_event(draft("Review", "2025-06-10", "16:00", "1h"))
            .unwrap();

        let titles: Vec<_> = engine
            .list_events_for_date(date(2025, 6, 10))
            .iter()
            .map(|e| e.title())
            .collect();
        assert_eq!(titles, ["Standup", "Review"]);
        assert!(engine.list_events_for_date(date(2025, 6, 12)).is_empty());
    }

    #[test]
    fn agenda_is_sorted_by_date() {
        let mut engine = engine_on(date(2025, 6, 1));
        engine
            .add_event(draft("Launch", "2025-07-01", "10:00", "1h"))
            .unwrap();
        engine
            .add_event(draft("Kickoff", "2025-06-15", "10:00", "1h"))
            .unwrap();
        engine
            .add_event(draft("Demo", "2025-06-20", "10:00", "1h"))
            .unwrap();

        let dates: Vec<_> = engine
            .list_all_events_sorted()
            .iter()
            .map(|e| e.date())
            .collect();
        assert_eq!(dates, [date(2025, 6, 15), date(2025, 6, 20), date(2025, 7, 1)]);

        // Storage keeps insertion order.
        assert_eq!(engine.events()[0].title(), "Launch");
    }

    #[test]
    fn agenda_ties_keep_insertion_order() {
        let mut engine = engine_on(date(2025, 6, 1));
        engine
            .add_event(draft("Late", "2025-06-10", "17:00", "1h"))
            .unwrap();
        engine
            .add_event(draft("Early", "2025-06-10", "08:00", "1h"))
            .unwrap();

        let titles: Vec<_> = engine
            .list_all_events_sorted()
            .iter()
            .map(|e| e.title())
            .collect();
        assert_eq!(titles, ["Late", "Early"]);
    }
}
