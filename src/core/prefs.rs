//! User preferences: reminder threshold and default hourly rate.

use crate::config::Config;
use crate::errors::{AppError, AppResult};
use std::path::PathBuf;

pub const DEFAULT_REMINDER_HOURS: i64 = 2;
pub const DEFAULT_HOURLY_RATE: f64 = 0.0;
pub const MIN_REMINDER_HOURS: i64 = 1;
pub const MAX_REMINDER_HOURS: i64 = 12;

pub trait PreferencesStore {
    fn reminder_hours(&self) -> i64;
    fn set_reminder_hours(&mut self, hours: i64) -> AppResult<()>;
    fn hourly_rate(&self) -> f64;
    fn set_hourly_rate(&mut self, rate: f64) -> AppResult<()>;
}

pub fn validate_rate(rate: f64) -> AppResult<f64> {
    if rate.is_finite() && rate > 0.0 {
        Ok(rate)
    } else {
        Err(AppError::InvalidRate(rate.to_string()))
    }
}

/// A configured default rate: finite and not negative. Zero means "no rate".
pub fn validate_default_rate(rate: f64) -> AppResult<f64> {
    if rate.is_finite() && rate >= 0.0 {
        Ok(rate)
    } else {
        Err(AppError::InvalidRate(rate.to_string()))
    }
}

/// Parse user input such as "20", "17.50" or "$17.50".
pub fn parse_rate(input: &str) -> AppResult<f64> {
    let cleaned = input.trim().trim_start_matches('$');
    let rate: f64 = cleaned
        .parse()
        .map_err(|_| AppError::InvalidRate(input.to_string()))?;
    validate_rate(rate)
}

pub fn validate_reminder_hours(hours: i64) -> AppResult<i64> {
    if (MIN_REMINDER_HOURS..=MAX_REMINDER_HOURS).contains(&hours) {
        Ok(hours)
    } else {
        Err(AppError::InvalidReminderHours(hours))
    }
}

/// Preferences persisted in the YAML configuration file.
///
/// Setters re-read the file before writing so that CLI overrides
/// (such as `--db`) held in memory never leak into it.
pub struct FilePreferences {
    path: PathBuf,
    current: Config,
}

impl FilePreferences {
    pub fn new(path: PathBuf, current: Config) -> Self {
        Self { path, current }
    }

    fn write<F: Fn(&mut Config)>(&mut self, apply: F) -> AppResult<()> {
        let mut on_disk = Config::read_from(&self.path)?;
        apply(&mut on_disk);
        on_disk.save_to(&self.path)?;
        apply(&mut self.current);
        Ok(())
    }
}

impl PreferencesStore for FilePreferences {
    fn reminder_hours(&self) -> i64 {
        self.current.reminder_hours
    }

    fn set_reminder_hours(&mut self, hours: i64) -> AppResult<()> {
        let hours = validate_reminder_hours(hours)?;
        self.write(|c| c.reminder_hours = hours)
    }

    fn hourly_rate(&self) -> f64 {
        self.current.hourly_rate
    }

    fn set_hourly_rate(&mut self, rate: f64) -> AppResult<()> {
        let rate = validate_rate(rate)?;
        self.write(|c| c.hourly_rate = rate)
    }
}

/// Non-persistent preferences.
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryPreferences {
    pub reminder_hours: i64,
    pub hourly_rate: f64,
}

impl Default for MemoryPreferences {
    fn default() -> Self {
        Self {
            reminder_hours: DEFAULT_REMINDER_HOURS,
            hourly_rate: DEFAULT_HOURLY_RATE,
        }
    }
}

impl PreferencesStore for MemoryPreferences {
    fn reminder_hours(&self) -> i64 {
        self.reminder_hours
    }

    fn set_reminder_hours(&mut self, hours: i64) -> AppResult<()> {
        self.reminder_hours = validate_reminder_hours(hours)?;
        Ok(())
    }

    fn hourly_rate(&self) -> f64 {
        self.hourly_rate
    }

    fn set_hourly_rate(&mut self, rate: f64) -> AppResult<()> {
        self.hourly_rate = validate_rate(rate)?;
        Ok(())
    }
}
