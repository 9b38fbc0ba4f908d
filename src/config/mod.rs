use crate::core::prefs::{
    DEFAULT_HOURLY_RATE, DEFAULT_REMINDER_HOURS, validate_default_rate, validate_reminder_hours,
};
use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_database")]
    pub database: String,
    #[serde(default = "default_hourly_rate")]
    pub hourly_rate: f64,
    #[serde(default = "default_reminder_hours")]
    pub reminder_hours: i64,
}

fn default_database() -> String {
    Config::database_file().to_string_lossy().to_string()
}
fn default_hourly_rate() -> f64 {
    DEFAULT_HOURLY_RATE
}
fn default_reminder_hours() -> i64 {
    DEFAULT_REMINDER_HOURS
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: default_database(),
            hourly_rate: default_hourly_rate(),
            reminder_hours: default_reminder_hours(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory (`~/.timesquish`)
    pub fn config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".timesquish")
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("timesquish.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("timesquish.sqlite")
    }

    /// Parse the file at `path` without checking the values; a missing file
    /// yields the defaults. Fields absent from the file take their defaults.
    pub fn read_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;
        serde_yaml::from_str(&content)
            .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Like `read_from`, but an out-of-range `hourly_rate` or
    /// `reminder_hours` is a configuration error.
    pub fn load_from(path: &Path) -> AppResult<Self> {
        let config = Self::read_from(path)?;
        config
            .validate()
            .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))?;
        Ok(config)
    }

    pub fn validate(&self) -> AppResult<()> {
        validate_default_rate(self.hourly_rate)?;
        validate_reminder_hours(self.reminder_hours)?;
        Ok(())
    }

    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        if let Some(dir) = path.parent()
            && !dir.as_os_str().is_empty()
        {
            fs::create_dir_all(dir)?;
        }
        let yaml = serde_yaml::to_string(self).map_err(|_| AppError::ConfigSave)?;
        fs::write(path, yaml).map_err(|_| AppError::ConfigSave)?;
        Ok(())
    }

    /// Initialize configuration and database files.
    ///
    /// A relative `custom_db` is resolved against the directory of the
    /// config file. In test mode the config file is left untouched.
    pub fn init_all(config_path: &Path, custom_db: Option<&str>, is_test: bool) -> AppResult<Self> {
        let dir = config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(Self::config_dir);
        fs::create_dir_all(&dir)?;

        let mut config = Self::load_from(config_path)?;
        if let Some(name) = custom_db {
            let p = Path::new(name);
            config.database = if p.is_absolute() {
                p.to_string_lossy().to_string()
            } else {
                dir.join(p).to_string_lossy().to_string()
            };
        }

        if !is_test {
            config.save_to(config_path)?;
        }

        let db_path = Path::new(&config.database);
        if let Some(db_dir) = db_path.parent()
            && !db_dir.as_os_str().is_empty()
        {
            fs::create_dir_all(db_dir)?;
        }

        Ok(config)
    }
}
