//! `in`, `out` and `status`: the live session.

use super::{open_store, resolve_rate};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::calculator::earnings::{
    earnings_with_live_session, effective_rate, entry_earnings,
};
use crate::core::calculator::periods::week_range;
use crate::core::reminder::StoredReminder;
use crate::core::session::SessionLogic;
use crate::db::queries::EntryQuery;
use crate::errors::AppResult;
use crate::ui::messages::{header, info, success, warning};
use crate::utils::formatting::{greeting, hourly, mins2readable, money};
use crate::utils::time::{at_or_now, format_seconds};
use chrono::Timelike;

pub fn handle_in(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::In { at, rate } = cmd {
        let now = at_or_now(at.as_ref())?;
        let rate = resolve_rate(rate.as_ref(), cfg)?;

        let mut store = open_store(cfg)?;
        let mut reminder = StoredReminder::open(&cfg.database, now)?;

        let session = SessionLogic::clock_in(
            &mut store,
            &mut reminder,
            rate,
            cfg.reminder_hours,
            now,
        )?;

        success(format!(
            "Clocked in at {} (entry #{}, {})",
            session.start_time.format("%Y-%m-%d %H:%M"),
            session.id,
            hourly(session.hourly_pay)
        ));
        info(format!(
            "You will be reminded after {} hour(s) if still clocked in.",
            cfg.reminder_hours
        ));
    }
    Ok(())
}

pub fn handle_out(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Out { at } = cmd {
        let now = at_or_now(at.as_ref())?;

        let mut store = open_store(cfg)?;
        let mut reminder = StoredReminder::open(&cfg.database, now)?;

        match SessionLogic::clock_out(&mut store, &mut reminder, now)? {
            Some(entry) => {
                let earned = entry_earnings(&entry, cfg.hourly_rate);
                success(format!(
                    "Clocked out at {} after {} (entry #{}, earned {})",
                    now.format("%Y-%m-%d %H:%M"),
                    mins2readable(entry.minutes(), false, false),
                    entry.id,
                    money(earned)
                ));
            }
            None => info("No active session: nothing to clock out."),
        }
    }
    Ok(())
}

pub fn handle_status(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Status { at } = cmd {
        let now = at_or_now(at.as_ref())?;
        let store = open_store(cfg)?;
        let reminder = StoredReminder::open(&cfg.database, now)?;

        println!("{}", greeting(now.hour()));

        let session = SessionLogic::active_session(&store)?;
        let week = week_range(now.date());
        let entries = store.query(&EntryQuery::ByDateRange(week))?;

        match &session {
            Some(s) => {
                header("Active session");
                println!(
                    "Started : {}",
                    s.start_time.format("%Y-%m-%d %H:%M")
                );
                println!(
                    "Elapsed : {}",
                    format_seconds(SessionLogic::elapsed(s, now).num_seconds())
                );
                println!(
                    "Earned  : {} at {}",
                    money(SessionLogic::session_earnings(s, now, cfg.hourly_rate)),
                    hourly(effective_rate(s, cfg.hourly_rate))
                );

                if let Some(r) = reminder.due(now)? {
                    warning(format!(
                        "{} (since {})",
                        r.message,
                        r.fire_at.format("%H:%M")
                    ));
                }
            }
            None => info("Not clocked in."),
        }

        let total = earnings_with_live_session(
            &entries,
            &week,
            session.as_ref(),
            now,
            cfg.hourly_rate,
        );
        println!("Week {}: {}", week, money(total));
    }
    Ok(())
}
