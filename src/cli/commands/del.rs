use super::open_store;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::entries::EntryLogic;
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};

use std::io::{self, Write};

/// Ask a yes/no confirmation from the user
fn ask_confirmation(prompt: &str) -> bool {
    warning(prompt);
    print!("Confirm [y/N]: ");
    let _ = io::stdout().flush();

    let mut s = String::new();
    if io::stdin().read_line(&mut s).is_ok() {
        matches!(s.trim().to_lowercase().as_str(), "y" | "yes")
    } else {
        false
    }
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Del { id, yes } = cmd {
        let mut store = open_store(cfg)?;
        let entry = store.require(*id)?;

        let prompt = if entry.is_squished() {
            format!(
                "Delete squished block #{} together with the entries inside it? This action is irreversible.",
                id
            )
        } else {
            format!("Delete entry #{} ({})? This action is irreversible.", id, entry.date())
        };

        if !*yes && !ask_confirmation(&prompt) {
            info("Operation cancelled.");
            return Ok(());
        }

        let removed = EntryLogic::delete(&mut store, *id)?;
        success(format!("Entry #{} deleted ({} row(s) removed).", id, removed));
    }

    Ok(())
}
