use super::open_store;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::entries::EntryLogic;
use crate::errors::AppResult;
use crate::ui::messages::success;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Submit { ids, undo } = cmd {
        let mut store = open_store(cfg)?;
        EntryLogic::set_submitted(&mut store, ids, !*undo)?;

        let state = if *undo { "not submitted" } else { "submitted" };
        let noun = if ids.len() == 1 { "entry" } else { "entries" };
        success(format!("{} {} marked as {}.", ids.len(), noun, state));
    }
    Ok(())
}
