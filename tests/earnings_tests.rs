mod common;

use chrono::{Duration, NaiveDate};
use common::{RecordingReminder, add_closed, mem_store, ts};
use timesquish::core::calculator::earnings::{
    earnings_for_range, earnings_with_live_session, group_by_date, minutes_for_range, summarize,
};
use timesquish::core::calculator::periods::{biweekly_range, recent_weeks, week_range};
use timesquish::core::session::SessionLogic;
use timesquish::core::squish::SquishLogic;
use timesquish::db::queries::EntryQuery;
use timesquish::models::period::Period;

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

#[test]
fn test_earnings_for_week() {
    let mut store = mem_store();
    add_closed(&mut store, "2024-06-10 09:00", "2024-06-10 17:00", 20.0);
    add_closed(&mut store, "2024-06-12 10:00", "2024-06-12 12:00", 15.0);
    // Outside the week.
    add_closed(&mut store, "2024-06-16 09:00", "2024-06-16 17:00", 20.0);

    let week = week_range(day(2024, 6, 12));
    let entries = store.query(&EntryQuery::All).expect("query");

    assert_eq!(earnings_for_range(&entries, &week, 0.0), 190.0);
    assert_eq!(minutes_for_range(&entries, &week), 600);
}

#[test]
fn test_earnings_empty_input_is_zero() {
    let week = week_range(day(2024, 6, 12));
    assert_eq!(earnings_for_range(&[], &week, 25.0), 0.0);
    assert_eq!(minutes_for_range(&[], &week), 0);
}

#[test]
fn test_default_rate_applies_when_entry_has_none() {
    let mut store = mem_store();
    add_closed(&mut store, "2024-06-10 09:00", "2024-06-10 11:00", 0.0);
    let entries = store.query(&EntryQuery::All).expect("query");
    let week = week_range(day(2024, 6, 10));

    assert_eq!(earnings_for_range(&entries, &week, 12.5), 25.0);
}

#[test]
fn test_hidden_entries_are_not_counted_twice() {
    let mut store = mem_store();
    let a = add_closed(&mut store, "2024-06-10 09:00", "2024-06-10 11:00", 10.0);
    let b = add_closed(&mut store, "2024-06-11 09:00", "2024-06-11 11:00", 20.0);
    SquishLogic::squish(&mut store, &[a, b]).expect("squish");

    let all = store.query(&EntryQuery::All).expect("query");
    assert_eq!(all.len(), 3);

    let week = week_range(day(2024, 6, 10));
    assert_eq!(minutes_for_range(&all, &week), 240);
    assert_eq!(earnings_for_range(&all, &week, 0.0), 60.0);
}

#[test]
fn test_week_range_starts_on_sunday() {
    let week = week_range(day(2024, 6, 12));
    assert_eq!(week, Period::new(day(2024, 6, 9), day(2024, 6, 15)));

    // A Sunday starts its own week, a Saturday closes it.
    assert_eq!(week_range(day(2024, 6, 9)).start, day(2024, 6, 9));
    assert_eq!(week_range(day(2024, 6, 15)).start, day(2024, 6, 9));
    assert_eq!(week_range(day(2024, 6, 16)).start, day(2024, 6, 16));
}

#[test]
fn test_biweekly_range() {
    let period = biweekly_range(day(2024, 6, 12));
    assert_eq!(period, Period::new(day(2024, 6, 9), day(2024, 6, 22)));
    assert_eq!(period.days(), 14);

    // The second week of the same period maps to the same window.
    assert_eq!(biweekly_range(day(2024, 6, 19)), period);
    assert_eq!(biweekly_range(day(2024, 6, 22)), period);
    assert_eq!(biweekly_range(day(2024, 6, 23)).start, day(2024, 6, 23));
}

#[test]
fn test_biweekly_periods_are_contiguous() {
    let mut d = day(2023, 12, 20);
    let mut previous = biweekly_range(d);

    for _ in 0..120 {
        d += Duration::days(3);
        let current = biweekly_range(d);
        assert!(current.contains(d));
        assert_eq!(current.days(), 14);
        if current != previous {
            assert_eq!(current.start, previous.end + Duration::days(1));
            previous = current;
        }
    }
}

#[test]
fn test_recent_weeks_newest_first() {
    let weeks = recent_weeks(day(2024, 6, 12), 3);
    assert_eq!(weeks.len(), 3);
    assert_eq!(weeks[0].start, day(2024, 6, 9));
    assert_eq!(weeks[1].start, day(2024, 6, 2));
    assert_eq!(weeks[2].end, day(2024, 6, 1));
}

#[test]
fn test_summarize_week() {
    let mut store = mem_store();
    let a = add_closed(&mut store, "2024-06-10 09:00", "2024-06-10 12:00", 20.0);
    add_closed(&mut store, "2024-06-10 13:00", "2024-06-10 15:00", 20.0);
    add_closed(&mut store, "2024-06-13 09:00", "2024-06-13 10:30", 20.0);
    store.set_submitted(a.id, true).expect("submit");

    let week = week_range(day(2024, 6, 12));
    let entries = store.query(&EntryQuery::ByDateRange(week)).expect("query");
    let s = summarize(&entries, &week, 0.0);

    assert_eq!(s.days_worked, 2);
    assert_eq!(s.total_minutes, 390);
    assert_eq!(s.total_hours(), 6.5);
    assert_eq!(s.earnings, 130.0);
    assert_eq!(s.unsubmitted, 2);
}

#[test]
fn test_group_by_date_orders_days_and_entries() {
    let mut store = mem_store();
    add_closed(&mut store, "2024-06-10 13:00", "2024-06-10 14:00", 10.0);
    add_closed(&mut store, "2024-06-12 09:00", "2024-06-12 10:00", 10.0);
    add_closed(&mut store, "2024-06-10 08:00", "2024-06-10 09:00", 10.0);

    let entries = store.query(&EntryQuery::AllVisible).expect("query");
    let groups = group_by_date(&entries);

    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].0, day(2024, 6, 12));
    assert_eq!(groups[1].0, day(2024, 6, 10));
    assert_eq!(groups[1].1[0].start_time, ts("2024-06-10 08:00"));
    assert_eq!(groups[1].1[1].start_time, ts("2024-06-10 13:00"));
}

#[test]
fn test_week_earnings_include_live_session() {
    let mut store = mem_store();
    let mut reminder = RecordingReminder::default();
    add_closed(&mut store, "2024-06-10 09:00", "2024-06-10 11:00", 20.0);
    let session = SessionLogic::clock_in(&mut store, &mut reminder, 20.0, 2, ts("2024-06-12 09:00"))
        .expect("clock in");

    let week = week_range(day(2024, 6, 12));
    let entries = store.query(&EntryQuery::ByDateRange(week)).expect("query");
    let total =
        earnings_with_live_session(&entries, &week, Some(&session), ts("2024-06-12 10:30"), 0.0);

    assert_eq!(total, 40.0 + 30.0);
}
