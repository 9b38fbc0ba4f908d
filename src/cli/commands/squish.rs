//! `squish` and `unsquish`.

use super::open_store;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::squish::SquishLogic;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use crate::utils::formatting::{hourly, mins2readable};

pub fn handle_squish(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Squish { ids } = cmd {
        let mut store = open_store(cfg)?;
        let summary = SquishLogic::squish_ids(&mut store, ids)?;

        success(format!(
            "Squished {} entries into block #{}: {} starting {} at {}",
            ids.len(),
            summary.id,
            mins2readable(summary.minutes(), false, false),
            summary.start_time.format("%Y-%m-%d %H:%M"),
            hourly(summary.hourly_pay)
        ));
    }
    Ok(())
}

pub fn handle_unsquish(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Unsquish { id } = cmd {
        let mut store = open_store(cfg)?;
        let restored = SquishLogic::unsquish_id(&mut store, *id)?;

        if restored.is_empty() {
            info(format!("Nothing to unsquish for #{}.", id));
        } else {
            let ids: Vec<String> = restored.iter().map(|e| format!("#{}", e.id)).collect();
            success(format!("Block #{} split back into {}.", id, ids.join(", ")));
        }
    }
    Ok(())
}
