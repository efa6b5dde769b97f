use std::path::Path;

use anyhow::{Context, Result};
use daygrid_core::config::DayGridConfig;
use owo_colors::OwoColorize;

pub fn run(path_override: Option<&Path>, config: &DayGridConfig, save: bool) -> Result<()> {
    let config_path = match path_override {
        Some(path) => path.to_path_buf(),
        None => DayGridConfig::config_path()?,
    };

    if save {
        config
            .save(&config_path)
            .with_context(|| format!("Failed to save config to {}", config_path.display()))?;
        println!("{} {}", "Saved settings to".green(), config_path.display());
        println!();
    }

    println!("{}", "Paths".bold());
    println!("  Config:     {}", config_path.display());
    println!();
    println!("{}", "Settings".bold());
    println!("  default_time:            {}", config.default_time);
    println!("  default_duration:        {}", config.default_duration);
    println!("  picker_years:            {}", config.picker_years);
    println!(
        "  reject_past_form_dates:  {}",
        config.reject_past_form_dates
    );

    Ok(())
}
