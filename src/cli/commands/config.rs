use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::prefs::{FilePreferences, PreferencesStore, parse_rate};
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{error, success, warning};
use crate::utils::formatting::hourly;
use std::path::Path;
use std::process::Command;

/// Handle the `config` subcommand
pub fn handle(cmd: &Commands, cfg: &Config, path: &Path) -> AppResult<()> {
    if let Commands::Config {
        print_config,
        edit_config,
        editor,
        rate,
        reminder_hours,
    } = cmd
    {
        let mut prefs = FilePreferences::new(path.to_path_buf(), cfg.clone());

        if let Some(r) = rate {
            prefs.set_hourly_rate(parse_rate(r)?)?;
            success(format!("Default hourly rate set to {}", hourly(prefs.hourly_rate())));
        }

        if let Some(h) = reminder_hours {
            prefs.set_reminder_hours(*h)?;
            success(format!("Reminder set to {} hour(s)", prefs.reminder_hours()));
        }

        if *print_config {
            let shown = Config::read_from(path)?;
            let yaml =
                serde_yaml::to_string(&shown).map_err(|e| AppError::Config(e.to_string()))?;
            println!("📄 Current configuration ({}):\n", path.display());
            println!("{}", yaml);
        }

        if *edit_config {
            edit_file(path, editor.clone());
        }
    }

    Ok(())
}

fn edit_file(path: &Path, requested: Option<String>) {
    let default_editor = std::env::var("EDITOR")
        .or_else(|_| std::env::var("VISUAL"))
        .unwrap_or_else(|_| {
            if cfg!(target_os = "windows") {
                "notepad".to_string()
            } else {
                "nano".to_string()
            }
        });

    let editor_to_use = requested.unwrap_or_else(|| default_editor.clone());

    match Command::new(&editor_to_use).arg(path).status() {
        Ok(s) if s.success() => {
            success(format!(
                "Configuration file edited successfully using '{}'",
                editor_to_use
            ));
        }
        _ => {
            warning(format!(
                "Editor '{}' not available, falling back to '{}'",
                editor_to_use, default_editor
            ));
            match Command::new(&default_editor).arg(path).status() {
                Ok(s) if s.success() => success(format!(
                    "Configuration file edited successfully using fallback '{}'",
                    default_editor
                )),
                _ => error(format!(
                    "Failed to edit configuration file using fallback '{}'",
                    default_editor
                )),
            }
        }
    }
}
