//! Session defaults read from ~/.config/daygrid/config.toml.

use std::path::{Path, PathBuf};

use chrono::NaiveTime;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::clock::Clock;
use crate::engine::CalendarEngine;
use crate::error::{DayGridError, DayGridResult};
use crate::event::{DEFAULT_DURATION, parse_time_field};
use crate::notice::Notifier;
use crate::session::{DEFAULT_PICKER_YEARS, MAX_PICKER_YEARS, Session};

static DEFAULT_TIME: &str = "09:00";

fn default_time() -> String {
    DEFAULT_TIME.to_string()
}

fn default_duration() -> String {
    DEFAULT_DURATION.to_string()
}

fn default_picker_years() -> u32 {
    DEFAULT_PICKER_YEARS
}

/// Settings for a daygrid session. Every key is optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayGridConfig {
    /// Time slot pre-filled when a day is selected (HH:MM).
    #[serde(default = "default_time")]
    pub default_time: String,

    /// Duration a fresh event draft starts with.
    #[serde(default = "default_duration")]
    pub default_duration: String,

    /// Number of years offered by the month picker, starting with this year.
    #[serde(default = "default_picker_years")]
    pub picker_years: u32,

    /// Also refuse past dates typed into the add-event form. Past days in
    /// the grid are always refused.
    #[serde(default)]
    pub reject_past_form_dates: bool,
}

impl Default for DayGridConfig {
    fn default() -> Self {
        DayGridConfig {
            default_time: default_time(),
            default_duration: default_duration(),
            picker_years: default_picker_years(),
            reject_past_form_dates: false,
        }
    }
}

impl DayGridConfig {
    pub fn config_path() -> DayGridResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| DayGridError::Config("Could not determine config directory".into()))?
            .join("daygrid");

        Ok(config_dir.join("config.toml"))
    }

    /// Load from the default location, creating a commented template there
    /// on first run.
    pub fn load() -> DayGridResult<Self> {
        let path = Self::config_path()?;

        if !path.exists() {
            Self::create_default_config(&path)?;
        }

        Self::load_from(&path)
    }

    /// Load from `path` (which may be missing), then apply `DAYGRID_*`
    /// environment overrides.
    pub fn load_from(path: &Path) -> DayGridResult<Self> {
        debug!(path = %path.display(), "Loading config");

        let config: DayGridConfig = Config::builder()
            .add_source(File::from(path.to_path_buf()).required(false))
            .add_source(Environment::with_prefix("DAYGRID").try_parsing(true))
            .build()
            .map_err(|e| DayGridError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| DayGridError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> DayGridResult<()> {
        self.default_time()?;
        if !(1..=MAX_PICKER_YEARS).contains(&self.picker_years) {
            return Err(DayGridError::Config(format!(
                "picker_years must be between 1 and {MAX_PICKER_YEARS}, got {}",
                self.picker_years
            )));
        }
        Ok(())
    }

    /// `default_time` as a time of day.
    pub fn default_time(&self) -> DayGridResult<NaiveTime> {
        parse_time_field(&self.default_time)
            .ok()
            .flatten()
            .ok_or_else(|| {
                DayGridError::Config(format!(
                    "default_time '{}' is not a valid HH:MM time",
                    self.default_time
                ))
            })
    }

    /// Build a session with these settings.
    pub fn session<N: Notifier, C: Clock>(
        &self,
        clock: C,
        notifier: N,
    ) -> DayGridResult<Session<N, C>> {
        let engine =
            CalendarEngine::with_clock(clock).reject_past_form_dates(self.reject_past_form_dates);

        Ok(Session::new(engine, notifier)
            .with_default_time(self.default_time()?)
            .with_default_duration(&self.default_duration)
            .with_picker_years(self.picker_years))
    }

    /// Save the current config to `path`.
    pub fn save(&self, path: &Path) -> DayGridResult<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| DayGridError::Config(e.to_string()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        debug!(path = %path.display(), "Saved config");

        Ok(())
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> DayGridResult<()> {
        let contents = format!(
            "\
# daygrid configuration

# Time pre-filled when you pick a day:
# default_time = \"{DEFAULT_TIME}\"

# Duration new events start with:
# default_duration = \"{DEFAULT_DURATION}\"

# How many years the month picker offers:
# picker_years = {DEFAULT_PICKER_YEARS}

# Refuse past dates typed into the add-event form too:
# reject_past_form_dates = false
"
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, contents)?;

        Ok(())
    }
}
