use super::open_store;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::calculator::earnings::{entry_earnings, group_by_date, summarize};
use crate::core::calculator::periods::week_range;
use crate::db::queries::EntryQuery;
use crate::errors::{AppError, AppResult};
use crate::models::entry::TimeEntry;
use crate::models::period::Period;
use crate::ui::messages::{header, info};
use crate::utils::colors::{GREY, MAGENTA, YELLOW, color_for_submitted, paint};
use crate::utils::date;
use crate::utils::formatting::{bold, mins2readable, money};
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List {
        week,
        all,
        hidden,
        unsubmitted,
        json,
    } = cmd
    {
        let store = open_store(cfg)?;

        let period = if *all {
            None
        } else {
            let day = match week {
                Some(w) => date::parse_date(w).ok_or_else(|| AppError::InvalidDate(w.clone()))?,
                None => date::today(),
            };
            Some(week_range(day))
        };

        let entries: Vec<TimeEntry> = match (period, *hidden, *unsubmitted) {
            (Some(p), false, false) => store.query(&EntryQuery::ByDateRange(p))?,
            (_, false, true) => store.query(&EntryQuery::Unsubmitted)?,
            (_, true, _) => store.query(&EntryQuery::All)?,
            (None, false, false) => store.query(&EntryQuery::AllVisible)?,
        };

        let entries: Vec<TimeEntry> = entries
            .into_iter()
            .filter(|e| period.is_none_or(|p| p.contains(e.date())))
            .filter(|e| !*unsubmitted || !e.is_submitted)
            .collect();

        if *json {
            let out = serde_json::to_string_pretty(&entries)
                .map_err(|e| AppError::Other(e.to_string()))?;
            println!("{}", out);
            return Ok(());
        }

        if entries.is_empty() {
            match period {
                Some(p) => info(format!("No entries for {}.", p)),
                None => info("No entries."),
            }
            return Ok(());
        }

        for (day, items) in group_by_date(&entries) {
            header(format!("{} {}", date::weekday_str(day), day));
            print_day(&items, cfg.hourly_rate);
            println!();
        }

        if let Some(p) = period {
            print_summary_row(&entries, &p, cfg.hourly_rate);
        }
    }
    Ok(())
}

fn print_day(entries: &[TimeEntry], default_rate: f64) {
    let mut table = Table::new(vec![
        Column::new("ID", 5),
        Column::new("START", 6),
        Column::new("END", 6),
        Column::new("WORKED", 8),
        Column::new("RATE", 9),
        Column::new("EARNED", 10),
        Column::new("STATUS", 10),
        Column::new("LABEL", 20),
    ]);

    for e in entries {
        let end = match e.end_time {
            Some(t) => t.format("%H:%M").to_string(),
            None => paint(YELLOW, "open"),
        };

        let status = if e.is_hidden {
            paint(GREY, "hidden")
        } else {
            let text = if e.is_submitted { "submitted" } else { "pending" };
            paint(color_for_submitted(e.is_submitted), text)
        };

        let label = if e.is_squished() {
            paint(MAGENTA, e.display_label())
        } else {
            e.display_label().to_string()
        };

        table.add_row(vec![
            e.id.to_string(),
            e.start_time.format("%H:%M").to_string(),
            end,
            mins2readable(e.minutes(), false, true),
            money(e.hourly_pay),
            money(entry_earnings(e, default_rate)),
            status,
            label,
        ]);
    }

    print!("{}", table.render());
}

fn print_summary_row(entries: &[TimeEntry], period: &Period, default_rate: f64) {
    let s = summarize(entries, period, default_rate);
    println!(
        "{} {} | days worked: {} | hours: {} | earnings: {} | unsubmitted: {}",
        bold("Week"),
        s.period,
        s.days_worked,
        format!("{:.1}", s.total_hours()),
        money(s.earnings),
        s.unsubmitted
    );
}
