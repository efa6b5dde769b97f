use anyhow::Result;
use chrono::Datelike;
use daygrid_core::CalendarEngine;

use crate::render::render_month;

/// Print one month. Missing year/month default to today's.
pub fn run(year: Option<i32>, month: Option<u32>) -> Result<()> {
    let mut engine = CalendarEngine::new();
    let today = engine.today();

    let year = year.unwrap_or(today.year());
    let month0 = month.map(|m| m as i32 - 1).unwrap_or(today.month0() as i32);
    engine.jump_to(year, month0);

    println!("{}", render_month(&engine));

    Ok(())
}
