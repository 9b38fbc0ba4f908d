use crate::core::session::SessionLogic;
use crate::models::entry::TimeEntry;
use crate::models::period::Period;
use crate::models::summary::PeriodSummary;
use chrono::{NaiveDate, NaiveDateTime};
use std::collections::{BTreeMap, HashSet};

/// Rate applied to an entry: its own captured rate when set, else the default.
pub fn effective_rate(entry: &TimeEntry, default_rate: f64) -> f64 {
    if entry.hourly_pay > 0.0 {
        entry.hourly_pay
    } else {
        default_rate
    }
}

pub fn entry_earnings(entry: &TimeEntry, default_rate: f64) -> f64 {
    entry.hours() * effective_rate(entry, default_rate)
}

/// Entries that count towards `period`: visible, started inside it.
fn in_period<'a>(
    entries: &'a [TimeEntry],
    period: &'a Period,
) -> impl Iterator<Item = &'a TimeEntry> + 'a {
    entries
        .iter()
        .filter(move |e| !e.is_hidden && period.contains(e.date()))
}

pub fn earnings_for_range(entries: &[TimeEntry], period: &Period, default_rate: f64) -> f64 {
    in_period(entries, period)
        .map(|e| entry_earnings(e, default_rate))
        .sum()
}

pub fn minutes_for_range(entries: &[TimeEntry], period: &Period) -> i64 {
    in_period(entries, period).map(TimeEntry::minutes).sum()
}

pub fn summarize(entries: &[TimeEntry], period: &Period, default_rate: f64) -> PeriodSummary {
    let days: HashSet<NaiveDate> = in_period(entries, period).map(TimeEntry::date).collect();

    PeriodSummary {
        period: *period,
        days_worked: days.len(),
        total_minutes: minutes_for_range(entries, period),
        earnings: earnings_for_range(entries, period, default_rate),
        unsubmitted: in_period(entries, period)
            .filter(|e| !e.is_submitted)
            .count(),
    }
}

/// Period earnings plus whatever the running session has accrued so far.
pub fn earnings_with_live_session(
    entries: &[TimeEntry],
    period: &Period,
    session: Option<&TimeEntry>,
    now: NaiveDateTime,
    default_rate: f64,
) -> f64 {
    let stored = earnings_for_range(entries, period, default_rate);
    let live = match session {
        Some(s) if s.is_open() && period.contains(s.date()) => {
            SessionLogic::session_earnings(s, now, default_rate)
        }
        _ => 0.0,
    };
    stored + live
}

/// Entries grouped by calendar date: newest day first, each day in start order.
pub fn group_by_date(entries: &[TimeEntry]) -> Vec<(NaiveDate, Vec<TimeEntry>)> {
    let mut groups: BTreeMap<NaiveDate, Vec<TimeEntry>> = BTreeMap::new();
    for e in entries {
        groups.entry(e.date()).or_default().push(e.clone());
    }

    groups
        .into_iter()
        .rev()
        .map(|(date, mut day)| {
            day.sort_by_key(|e| (e.start_time, e.id));
            (date, day)
        })
        .collect()
}
