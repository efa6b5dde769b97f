//! Parsing of what the user types into the add-event form.

use anyhow::Result;
use chrono::{NaiveDate, NaiveTime};
use daygrid_core::event::{parse_date_field, parse_time_field};

/// Expand common abbreviations that fuzzydate doesn't handle.
fn expand_abbreviations(input: &str) -> String {
    let abbrevs = [
        ("mon", "monday"),
        ("tue", "tuesday"),
        ("tues", "tuesday"),
        ("wed", "wednesday"),
        ("thu", "thursday"),
        ("thur", "thursday"),
        ("thurs", "thursday"),
        ("fri", "friday"),
        ("sat", "saturday"),
        ("sun", "sunday"),
        ("jan", "january"),
        ("feb", "february"),
        ("mar", "march"),
        ("apr", "april"),
        ("jun", "june"),
        ("jul", "july"),
        ("aug", "august"),
        ("sep", "september"),
        ("sept", "september"),
        ("oct", "october"),
        ("nov", "november"),
        ("dec", "december"),
    ];

    let lower = input.to_lowercase();

    lower
        .split_whitespace()
        .map(|word| {
            abbrevs
                .iter()
                .find(|(abbr, _)| *abbr == word)
                .map(|(_, full)| *full)
                .unwrap_or(word)
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parse the date field. Accepts `YYYY-MM-DD` or natural language such as
/// "tomorrow" or "fri". Blank input leaves the field empty.
pub fn parse_date(input: &str) -> Result<Option<NaiveDate>> {
    if let Ok(date) = parse_date_field(input) {
        return Ok(date);
    }

    let expanded = expand_abbreviations(input);
    let dt = fuzzydate::parse(&expanded)
        .map_err(|_| anyhow::anyhow!("Could not parse date: \"{}\"", input.trim()))?;

    Ok(Some(dt.date()))
}

/// Parse the time field (`HH:MM`). Blank input leaves the field empty.
pub fn parse_time(input: &str) -> Result<Option<NaiveTime>> {
    Ok(parse_time_field(input)?)
}
