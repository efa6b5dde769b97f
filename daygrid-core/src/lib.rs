//! Core types for daygrid.
//!
//! This crate holds everything that has rules attached to it:
//! - `engine`: the displayed month, the event list and the booking checks
//! - `month`: month arithmetic and the day grid layout
//! - `session`: presentation state (open overlay, draft, month picker)
//! - `config`: session defaults from the config file

pub mod clock;
pub mod config;
pub mod engine;
pub mod error;
pub mod event;
pub mod month;
pub mod notice;
pub mod session;

pub use clock::{Clock, FixedClock, SystemClock};
pub use engine::CalendarEngine;
pub use error::{DayGridError, DayGridResult};
pub use event::{Event, EventDraft, Slot};
pub use month::{MonthGrid, YearMonth, compute_month_grid};
pub use notice::{Notice, Notifier};
pub use session::{Session, UiMode};
