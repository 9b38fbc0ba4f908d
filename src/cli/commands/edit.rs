use super::open_store;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::entries::{EntryEdit, EntryLogic};
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use crate::utils::time::{parse_end, parse_optional_datetime};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Edit {
        id,
        start,
        end,
        label,
    } = cmd
    {
        if start.is_none() && end.is_none() && label.is_none() {
            info("Nothing to change: pass --start, --end or --label.");
            return Ok(());
        }

        let mut store = open_store(cfg)?;
        let current = store.require(*id)?;

        let start_time = parse_optional_datetime(start.as_ref())?;
        let anchor = start_time.unwrap_or(current.start_time);
        let end_time = match end {
            Some(e) => Some(parse_end(e, anchor)?),
            None => None,
        };

        let entry = EntryLogic::edit(
            &mut store,
            *id,
            EntryEdit {
                start_time,
                end_time,
                label: label.clone(),
            },
        )?;

        success(format!(
            "Entry #{} updated: {} → {}",
            entry.id,
            entry.start_time.format("%Y-%m-%d %H:%M"),
            entry
                .end_time
                .map(|e| e.format("%H:%M").to_string())
                .unwrap_or_else(|| "open".to_string())
        ));
    }
    Ok(())
}
