use anyhow::Result;
use daygrid_core::config::DayGridConfig;
use daygrid_core::event::{DATE_FORMAT, TIME_FORMAT};
use daygrid_core::{Notice, Notifier, Session, SystemClock, UiMode};
use dialoguer::{Input, Select};
use owo_colors::OwoColorize;
use tracing::debug;

use crate::input::{parse_date, parse_time};
use crate::render::{Render, render_agenda, render_month};

/// Prints notices as they arrive: errors on stderr, the rest on stdout.
struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&mut self, notice: Notice) {
        if notice.is_error() {
            eprintln!("{}", notice.render());
        } else {
            println!("{}", notice.render());
        }
    }
}

type TerminalSession = Session<TerminalNotifier, SystemClock>;

const BROWSE_ACTIONS: [&str; 7] = [
    "← Previous month",
    "Next month →",
    "Pick month and year",
    "Select a day",
    "+ Add event",
    "Show agenda",
    "Quit",
];

/// Run an interactive session until the user quits. Events live only as
/// long as the session.
pub fn run(config: &DayGridConfig) -> Result<()> {
    let mut session = config.session(SystemClock, TerminalNotifier)?;

    loop {
        match session.mode() {
            UiMode::Browsing => {
                if !browse(&mut session)? {
                    break;
                }
            }
            UiMode::PickingMonth => pick_month(&mut session)?,
            UiMode::AddingEvent => add_event_form(&mut session)?,
        }
    }

    Ok(())
}

/// Show the grid and ask for the next action. Returns false on quit.
fn browse(session: &mut TerminalSession) -> Result<bool> {
    println!();
    println!("{}", render_month(session.engine()));
    println!();

    let choice = Select::new()
        .with_prompt("  What next?")
        .items(&BROWSE_ACTIONS)
        .default(0)
        .interact()?;

    match choice {
        0 => session.previous_month(),
        1 => session.next_month(),
        2 => session.open_month_picker(),
        3 => select_day(session)?,
        4 => session.open_add_event(),
        5 => {
            println!();
            println!("{}", render_agenda(&session.engine().list_all_events_sorted()));
        }
        _ => return Ok(false),
    }

    Ok(true)
}

fn select_day(session: &mut TerminalSession) -> Result<()> {
    let days = session.engine().month_grid().days_in_month;

    let day: u32 = Input::new()
        .with_prompt(format!("  Day (1-{days})"))
        .validate_with(|d: &u32| -> Result<(), String> {
            if (1..=days).contains(d) {
                Ok(())
            } else {
                Err(format!("Pick a day between 1 and {days}"))
            }
        })
        .interact_text()?;

    // Past days were already reported through the notifier.
    if let Err(e) = session.click_day(day) {
        debug!(error = %e, "Day not selectable");
    }

    Ok(())
}

fn pick_month(session: &mut TerminalSession) -> Result<()> {
    let picker = session.picker();

    let months: Vec<&str> = session
        .month_options()
        .into_iter()
        .map(|(_, name)| name)
        .collect();
    let month = Select::new()
        .with_prompt("  Month")
        .items(&months)
        .default(picker.month as usize)
        .interact()?;
    session.pick_month(month as u32);

    let years = session.year_options();
    let labels: Vec<String> = years.iter().map(|y| y.to_string()).collect();
    let current = years.iter().position(|y| *y == picker.year).unwrap_or(0);
    let year = Select::new()
        .with_prompt("  Year")
        .items(&labels)
        .default(current)
        .interact()?;
    session.pick_year(years[year]);

    let confirm = Select::new().items(&["Go", "Cancel"]).default(0).interact()?;
    if confirm == 0 {
        session.confirm_month_picker();
    } else {
        session.cancel_month_picker();
    }

    Ok(())
}

fn add_event_form(session: &mut TerminalSession) -> Result<()> {
    println!();
    println!("{}", "  Add Event".bold());

    let draft = session.draft().clone();

    let title = prompt_text("  Title", &draft.title)?;
    let date = prompt_field(
        "  Date (YYYY-MM-DD)",
        draft
            .date
            .map(|d| d.format(DATE_FORMAT).to_string())
            .unwrap_or_default(),
        parse_date,
    )?;
    let time = prompt_field(
        "  Time (HH:MM)",
        draft
            .time
            .map(|t| t.format(TIME_FORMAT).to_string())
            .unwrap_or_default(),
        parse_time,
    )?;
    let duration = prompt_text("  Duration (e.g. 1h)", &draft.duration)?;

    let form = session.draft_mut();
    form.title = title;
    form.date = date;
    form.time = time;
    form.duration = duration;

    let action = Select::new()
        .items(&["Add Event", "Cancel"])
        .default(0)
        .interact()?;

    if action == 0 {
        // Failures are reported through the notifier and keep the form open.
        if let Err(e) = session.submit_event() {
            debug!(error = %e, "Event not added");
        }
    } else {
        session.close_add_event();
    }

    Ok(())
}

fn prompt_text(prompt: &str, current: &str) -> Result<String> {
    Ok(Input::<String>::new()
        .with_prompt(prompt)
        .with_initial_text(current)
        .allow_empty(true)
        .interact_text()?)
}

/// Prompt the user with retry on parse errors.
fn prompt_field<T, F>(prompt: &str, current: String, parse: F) -> Result<Option<T>>
where
    F: Fn(&str) -> Result<Option<T>>,
{
    loop {
        let input = prompt_text(prompt, &current)?;
        match parse(&input) {
            Ok(value) => return Ok(value),
            Err(e) => eprintln!("  {}", e.to_string().red()),
        }
    }
}
