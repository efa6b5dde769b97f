//! Terminal rendering for daygrid types.
//!
//! Extension traits and helpers that turn daygrid-core values into colored
//! terminal text using owo_colors.

use chrono::NaiveDate;
use daygrid_core::event::{DATE_FORMAT, TIME_FORMAT};
use daygrid_core::month::WEEKDAY_LABELS;
use daygrid_core::{CalendarEngine, Clock, Event, Notice};
use owo_colors::OwoColorize;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for Notice {
    fn render(&self) -> String {
        match self {
            Notice::Success(msg) => format!("  {} {}", "✓".green(), msg.green()),
            Notice::Error(msg) => format!("  {} {}", "✗".red(), msg.red()),
        }
    }
}

impl Render for Event {
    fn render(&self) -> String {
        format!(
            "{} {}",
            self.title().bold(),
            format!(
                "{} at {} ({})",
                self.date().format(DATE_FORMAT),
                self.time().format(TIME_FORMAT),
                self.duration()
            )
            .dimmed()
        )
    }
}

const CELL_WIDTH: usize = 4;

/// Render the displayed month: title, weekday header, day cells, and the
/// events booked on each day of the month.
///
/// Past days are dimmed, today is underlined, days with events are marked
/// with `*`.
pub fn render_month<C: Clock>(engine: &CalendarEngine<C>) -> String {
    let displayed = engine.displayed();
    let today = engine.today();
    let grid = engine.month_grid();
    let width = CELL_WIDTH * 7;

    let mut lines = Vec::new();
    lines.push(format!("{:^width$}", displayed.to_string()).bold().to_string());
    lines.push(
        WEEKDAY_LABELS
            .iter()
            .map(|d| format!("{:>3} ", d))
            .collect::<String>()
            .dimmed()
            .to_string(),
    );

    let mut chips = Vec::new();

    for week in grid.weeks() {
        let mut line = String::new();
        for cell in week {
            let Some(day) = cell else {
                line.push_str(&" ".repeat(CELL_WIDTH));
                continue;
            };
            let Some(date) = displayed.day(day) else {
                continue;
            };

            let events = engine.list_events_for_date(date);
            let marker = if events.is_empty() { " " } else { "*" };
            let text = format!("{:>3}", day);

            let text = if date == today {
                text.bold().underline().to_string()
            } else if engine.is_past(date) {
                text.dimmed().to_string()
            } else {
                text
            };
            line.push_str(&text);
            line.push_str(&marker.yellow().to_string());

            if !events.is_empty() {
                chips.push(render_day_chips(date, &events));
            }
        }
        lines.push(line.trim_end().to_string());
    }

    if !chips.is_empty() {
        lines.push(String::new());
        lines.extend(chips);
    }

    lines.join("\n")
}

/// One line listing the events of a day, e.g. ` 10  Standup 09:00 · Review 16:00`.
fn render_day_chips(date: NaiveDate, events: &[&Event]) -> String {
    let chips = events
        .iter()
        .map(|e| format!("{} {}", e.title(), e.time().format(TIME_FORMAT).to_string().dimmed()))
        .collect::<Vec<_>>()
        .join(" · ");

    format!("{}  {}", date.format("%e").to_string().yellow(), chips)
}

/// Render the agenda: all events ordered by date.
pub fn render_agenda(events: &[&Event]) -> String {
    let mut lines = vec!["Scheduled Events".bold().to_string()];

    if events.is_empty() {
        lines.push(format!("  {}", "No events yet.".dimmed()));
    } else {
        lines.extend(events.iter().map(|e| format!("  {}", e.render())));
    }

    lines.join("\n")
}
