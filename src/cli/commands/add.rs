use super::{open_store, resolve_rate};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::entries::EntryLogic;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;
use crate::utils::formatting::mins2readable;
use crate::utils::time::{parse_datetime, parse_end};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Add {
        start,
        end,
        label,
        rate,
    } = cmd
    {
        let start_dt = parse_datetime(start).ok_or_else(|| AppError::InvalidTime(start.clone()))?;
        let end_dt = parse_end(end, start_dt)?;
        let rate = resolve_rate(rate.as_ref(), cfg)?;

        let mut store = open_store(cfg)?;
        let entry = EntryLogic::add_manual(&mut store, start_dt, end_dt, label.clone(), rate)?;

        success(format!(
            "Entry #{} added: {} → {} ({})",
            entry.id,
            entry.start_time.format("%Y-%m-%d %H:%M"),
            end_dt.format("%H:%M"),
            mins2readable(entry.minutes(), false, false)
        ));
    }
    Ok(())
}
