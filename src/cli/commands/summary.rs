use super::open_store;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::calculator::earnings::{earnings_with_live_session, summarize};
use crate::core::calculator::periods::{biweekly_range, recent_weeks, week_range};
use crate::core::session::SessionLogic;
use crate::db::queries::EntryQuery;
use crate::db::store::EntryStore;
use crate::errors::{AppError, AppResult};
use crate::models::summary::PeriodSummary;
use crate::ui::messages::header;
use crate::utils::date;
use crate::utils::formatting::{hourly, money};
use crate::utils::table::{Column, Table};
use crate::utils::time;
use chrono::NaiveDate;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Summary { date: day, weeks } = cmd {
        let today = match day {
            Some(d) => date::parse_date(d).ok_or_else(|| AppError::InvalidDate(d.clone()))?,
            None => date::today(),
        };

        let store = open_store(cfg)?;
        let week = week_range(today);
        let pay_period = biweekly_range(today);

        let pay_entries = store.query(&EntryQuery::ByDateRange(pay_period))?;
        let week_summary = summarize(&pay_entries, &week, cfg.hourly_rate);
        let pay_summary = summarize(&pay_entries, &pay_period, cfg.hourly_rate);

        header(format!("Summary for {}", today));
        println!("Hourly rate     : {}", hourly(cfg.hourly_rate));
        print_line("Week to date", &week_summary);
        print_line("Pay period", &pay_summary);

        if let Some(session) = SessionLogic::active_session(&store)? {
            let now = time::now();
            let live = earnings_with_live_session(
                &pay_entries,
                &week,
                Some(&session),
                now,
                cfg.hourly_rate,
            );
            println!("Week incl. live : {}", money(live));
        }

        if *weeks > 0 {
            print_previous_weeks(&store, today, *weeks, cfg.hourly_rate)?;
        }
    }
    Ok(())
}

fn print_line(title: &str, s: &PeriodSummary) {
    println!(
        "{:<16}: {} | {} day(s) | {} h | {}",
        title,
        s.period,
        s.days_worked,
        format!("{:.1}", s.total_hours()),
        money(s.earnings)
    );
}

fn print_previous_weeks(
    store: &EntryStore,
    today: NaiveDate,
    count: usize,
    default_rate: f64,
) -> AppResult<()> {
    let mut table = Table::new(vec![
        Column::new("WEEK", 25),
        Column::new("DAYS", 5),
        Column::new("HOURS", 7),
        Column::new("EARNINGS", 10),
        Column::new("PENDING", 7),
    ]);

    // The current week comes first and is already printed above.
    for period in recent_weeks(today, count + 1).into_iter().skip(1) {
        let entries = store.query(&EntryQuery::ByDateRange(period))?;
        let s = summarize(&entries, &period, default_rate);
        table.add_row(vec![
            s.period.to_string(),
            s.days_worked.to_string(),
            format!("{:.1}", s.total_hours()),
            money(s.earnings),
            s.unsubmitted.to_string(),
        ]);
    }

    println!();
    print!("{}", table.render());
    Ok(())
}
