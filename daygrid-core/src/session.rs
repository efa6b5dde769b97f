//! Presentation state around the engine: which overlay is open, the draft
//! in the add-event form, and the month picker selections.

use chrono::{Datelike, NaiveDate, NaiveTime};
use tracing::debug;

use crate::clock::{Clock, SystemClock};
use crate::engine::CalendarEngine;
use crate::error::DayGridResult;
use crate::event::{DEFAULT_DURATION, Event, EventDraft};
use crate::month::month_name;
use crate::notice::{Notice, Notifier};

pub const DEFAULT_PICKER_YEARS: u32 = 5;
pub const MAX_PICKER_YEARS: u32 = 100;

pub fn default_time() -> NaiveTime {
    NaiveTime::from_hms_opt(9, 0, 0).expect("09:00 is a valid time")
}

/// What the user is currently looking at. Only one overlay is open at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    Browsing,
    PickingMonth,
    AddingEvent,
}

/// Month and year chosen in the picker, applied on confirm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthPicker {
    /// Zero-based.
    pub month: u32,
    pub year: i32,
}

pub struct Session<N: Notifier, C: Clock = SystemClock> {
    engine: CalendarEngine<C>,
    mode: UiMode,
    draft: EventDraft,
    default_time: NaiveTime,
    default_duration: String,
    picker: MonthPicker,
    picker_years: u32,
    notifier: N,
}

impl<N: Notifier, C: Clock> Session<N, C> {
    pub fn new(engine: CalendarEngine<C>, notifier: N) -> Self {
        let today = engine.today();
        Session {
            engine,
            mode: UiMode::Browsing,
            draft: EventDraft::default(),
            default_time: default_time(),
            default_duration: DEFAULT_DURATION.to_string(),
            picker: MonthPicker {
                month: today.month0(),
                year: today.year(),
            },
            picker_years: DEFAULT_PICKER_YEARS,
            notifier,
        }
    }

    /// Time pre-filled when a day is clicked.
    pub fn with_default_time(mut self, time: NaiveTime) -> Self {
        self.default_time = time;
        self
    }

    /// Duration the draft starts with after each successful booking.
    pub fn with_default_duration(mut self, duration: &str) -> Self {
        self.default_duration = duration.to_string();
        self.draft.duration = duration.to_string();
        self
    }

    /// How many years (starting with the current one) the picker offers,
    /// clamped to 1..=[`MAX_PICKER_YEARS`].
    pub fn with_picker_years(mut self, years: u32) -> Self {
        self.picker_years = years.clamp(1, MAX_PICKER_YEARS);
        self
    }

    pub fn engine(&self) -> &CalendarEngine<C> {
        &self.engine
    }

    pub fn mode(&self) -> UiMode {
        self.mode
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn default_time(&self) -> NaiveTime {
        self.default_time
    }

    // NAVIGATION:

    pub fn previous_month(&mut self) {
        self.engine.go_to_previous_month();
    }

    pub fn next_month(&mut self) {
        self.engine.go_to_next_month();
    }

    // MONTH PICKER:

    /// Open the picker. Selections made earlier in the session are kept.
    pub fn open_month_picker(&mut self) {
        self.mode = UiMode::PickingMonth;
    }

    pub fn cancel_month_picker(&mut self) {
        self.mode = UiMode::Browsing;
    }

    pub fn picker(&self) -> MonthPicker {
        self.picker
    }

    pub fn pick_month(&mut self, month0: u32) {
        self.picker.month = month0;
    }

    pub fn pick_year(&mut self, year: i32) {
        self.picker.year = year;
    }

    /// Jump to the picked month and close the picker.
    pub fn confirm_month_picker(&mut self) {
        self.engine
            .jump_to(self.picker.year, self.picker.month as i32);
        self.mode = UiMode::Browsing;
    }

    /// Years offered by the picker: this year and the ones after it.
    pub fn year_options(&self) -> Vec<i32> {
        let current = self.engine.today().year();
        let span = i32::try_from(self.picker_years).unwrap_or(MAX_PICKER_YEARS as i32);
        (0..span).map(|i| current.saturating_add(i)).collect()
    }

    /// (zero-based month, name) pairs for the picker.
    pub fn month_options(&self) -> Vec<(u32, &'static str)> {
        (0..12).map(|m| (m, month_name(m))).collect()
    }

    // ADD EVENT FORM:

    /// Open the form as-is, without pre-filling anything.
    pub fn open_add_event(&mut self) {
        self.mode = UiMode::AddingEvent;
    }

    /// Close the form. The draft is kept for next time.
    pub fn close_add_event(&mut self) {
        self.mode = UiMode::Browsing;
    }

    pub fn draft(&self) -> &EventDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut EventDraft {
        &mut self.draft
    }

    /// Start booking on `day` of the displayed month.
    ///
    /// Past days produce an error notice and leave the form closed. Otherwise
    /// the draft gets the clicked date and the default time (title and
    /// duration are left alone) and the form opens.
    pub fn click_day(&mut self, day: u32) -> DayGridResult<NaiveDate> {
        match self.engine.handle_day_click(day) {
            Ok(date) => {
                self.draft.date = Some(date);
                self.draft.time = Some(self.default_time);
                self.mode = UiMode::AddingEvent;
                Ok(date)
            }
            Err(e) => {
                self.notifier.notify(Notice::from(&e));
                Err(e)
            }
        }
    }

    /// Submit the draft.
    ///
    /// On success the draft is reset, the form closes and a success notice is
    /// sent. On failure an error notice is sent and the form stays open with
    /// the draft untouched.
    pub fn submit_event(&mut self) -> DayGridResult<Event> {
        match self.engine.add_event(self.draft.clone()) {
            Ok(event) => {
                let event = event.clone();
                self.notifier
                    .notify(Notice::Success(format!("Event \"{}\" added!", event.title())));
                self.draft = EventDraft::with_duration(&self.default_duration);
                self.mode = UiMode::Browsing;
                Ok(event)
            }
            Err(e) => {
                debug!(error = %e, "Event submission failed");
                self.notifier.notify(Notice::from(&e));
                Err(e)
            }
        }
    }
}
