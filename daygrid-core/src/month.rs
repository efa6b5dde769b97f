//! Displayed month arithmetic and the day grid layout.

use std::fmt;

use chrono::{Datelike, Month, NaiveDate};
use serde::{Deserialize, Serialize};

/// Column headers for the grid, Sunday first.
pub const WEEKDAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

// Keep one month of headroom on each side so next/previous and the
// first-of-next-month lookups always stay representable.
fn min_year() -> i32 {
    NaiveDate::MIN.year() + 1
}

fn max_year() -> i32 {
    NaiveDate::MAX.year() - 1
}

/// A (year, zero-based month) pair.
///
/// Construction normalizes the month by calendar arithmetic: month 12 is
/// January of the following year, month -1 is December of the previous one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawYearMonth")]
pub struct YearMonth {
    year: i32,
    month: u32,
}

/// Unchecked form of [`YearMonth`] as it appears in serialized data.
#[derive(Deserialize)]
struct RawYearMonth {
    year: i32,
    month: u32,
}

impl TryFrom<RawYearMonth> for YearMonth {
    type Error = String;

    fn try_from(raw: RawYearMonth) -> Result<Self, Self::Error> {
        if raw.month > 11 {
            return Err(format!("month {} is outside 0-11", raw.month));
        }
        let ym = YearMonth::new(raw.year, raw.month as i32);
        if ym.year != raw.year {
            return Err(format!("year {} is out of range", raw.year));
        }
        Ok(ym)
    }
}

impl YearMonth {
    pub fn new(year: i32, month: i32) -> Self {
        let total = i64::from(year) * 12 + i64::from(month);
        let year = total.div_euclid(12);
        let month = total.rem_euclid(12) as u32;

        if year < i64::from(min_year()) {
            YearMonth { year: min_year(), month: 0 }
        } else if year > i64::from(max_year()) {
            YearMonth { year: max_year(), month: 11 }
        } else {
            YearMonth { year: year as i32, month }
        }
    }

    /// The month containing `date`.
    pub fn containing(date: NaiveDate) -> Self {
        YearMonth::new(date.year(), date.month0() as i32)
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// Zero-based month, 0 = January.
    pub fn month0(&self) -> u32 {
        self.month
    }

    pub fn previous(&self) -> Self {
        YearMonth::new(self.year, self.month as i32 - 1)
    }

    pub fn next(&self) -> Self {
        YearMonth::new(self.year, self.month as i32 + 1)
    }

    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month + 1, 1)
            .expect("year is clamped to the representable range")
    }

    /// The date of `day` in this month, if the month has that day.
    pub fn day(&self, day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month + 1, day)
    }

    pub fn grid(&self) -> MonthGrid {
        let first = self.first_day();
        let (next_year, next_month) = if self.month == 11 {
            (self.year + 1, 1)
        } else {
            (self.year, self.month + 2)
        };
        // Day zero of the next month is the last day of this one.
        let next_first = NaiveDate::from_ymd_opt(next_year, next_month, 1)
            .expect("year is clamped to the representable range");
        let days_in_month = (next_first - first).num_days() as u32;

        MonthGrid {
            first_weekday: first.weekday().num_days_from_sunday(),
            days_in_month,
        }
    }

    /// English month name, e.g. "January".
    pub fn month_name(&self) -> &'static str {
        month_name(self.month)
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.month_name(), self.year)
    }
}

/// English name for a zero-based month index (taken modulo 12).
pub fn month_name(month0: u32) -> &'static str {
    Month::try_from((month0 % 12 + 1) as u8)
        .map(|m| m.name())
        .unwrap_or("January")
}

/// Layout of one month: where day 1 falls and how many days follow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthGrid {
    /// Weekday of day 1, 0 = Sunday .. 6 = Saturday.
    pub first_weekday: u32,
    pub days_in_month: u32,
}

impl MonthGrid {
    /// Rows of seven cells, Sunday first, with `None` for the padding before
    /// day 1 and after the last day.
    pub fn weeks(&self) -> Vec<[Option<u32>; 7]> {
        let cells = self.first_weekday + self.days_in_month;
        let rows = cells.div_ceil(7);

        (0..rows)
            .map(|row| {
                let mut week = [None; 7];
                for (col, cell) in week.iter_mut().enumerate() {
                    let index = row * 7 + col as u32;
                    if index >= self.first_weekday && index < cells {
                        *cell = Some(index - self.first_weekday + 1);
                    }
                }
                week
            })
            .collect()
    }
}

/// Grid layout for a year and zero-based month. Out-of-range months are
/// normalized the same way as [`YearMonth::new`].
pub fn compute_month_grid(year: i32, month: i32) -> MonthGrid {
    YearMonth::new(year, month).grid()
}
