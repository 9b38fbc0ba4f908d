mod common;

use common::{setup_test_config, ts};
use std::fs;
use std::path::PathBuf;
use timesquish::config::Config;
use timesquish::core::prefs::{FilePreferences, MemoryPreferences, PreferencesStore, parse_rate};
use timesquish::core::reminder::{REMINDER_MESSAGE, ReminderScheduler, StoredReminder, hours_to_millis};
use timesquish::errors::AppError;

#[test]
fn test_memory_preferences_defaults_and_validation() {
    let mut prefs = MemoryPreferences::default();
    assert_eq!(prefs.reminder_hours(), 2);
    assert_eq!(prefs.hourly_rate(), 0.0);

    prefs.set_reminder_hours(12).expect("upper bound");
    prefs.set_reminder_hours(1).expect("lower bound");
    assert!(matches!(
        prefs.set_reminder_hours(0),
        Err(AppError::InvalidReminderHours(0))
    ));
    assert!(matches!(
        prefs.set_reminder_hours(13),
        Err(AppError::InvalidReminderHours(13))
    ));
    assert_eq!(prefs.reminder_hours(), 1);

    prefs.set_hourly_rate(17.25).expect("rate");
    assert!(prefs.set_hourly_rate(0.0).is_err());
    assert!(prefs.set_hourly_rate(-3.0).is_err());
    assert!(prefs.set_hourly_rate(f64::NAN).is_err());
    assert_eq!(prefs.hourly_rate(), 17.25);
}

#[test]
fn test_parse_rate_accepts_currency_symbol() {
    assert_eq!(parse_rate("20").expect("plain"), 20.0);
    assert_eq!(parse_rate(" $17.50 ").expect("dollar"), 17.5);
    assert!(matches!(parse_rate("abc"), Err(AppError::InvalidRate(_))));
    assert!(matches!(parse_rate("0"), Err(AppError::InvalidRate(_))));
}

#[test]
fn test_file_preferences_persist_without_leaking_overrides() {
    let path = PathBuf::from(setup_test_config("file_prefs"));
    let on_disk = Config {
        database: "/tmp/original.sqlite".into(),
        ..Config::default()
    };
    on_disk.save_to(&path).expect("save");

    // In-memory override, as `--db` would do.
    let mut current = Config::load_from(&path).expect("load");
    current.database = "/tmp/override.sqlite".into();

    let mut prefs = FilePreferences::new(path.clone(), current);
    prefs.set_hourly_rate(22.0).expect("rate");
    prefs.set_reminder_hours(4).expect("hours");
    assert_eq!(prefs.hourly_rate(), 22.0);
    assert_eq!(prefs.reminder_hours(), 4);

    let reloaded = Config::load_from(&path).expect("reload");
    assert_eq!(reloaded.hourly_rate, 22.0);
    assert_eq!(reloaded.reminder_hours, 4);
    assert_eq!(reloaded.database, "/tmp/original.sqlite");

    fs::remove_file(&path).ok();
}

#[test]
fn test_config_missing_fields_take_defaults() {
    let path = PathBuf::from(setup_test_config("partial_conf"));
    fs::write(&path, "database: /tmp/partial.sqlite\n").expect("write");

    let cfg = Config::load_from(&path).expect("load");
    assert_eq!(cfg.database, "/tmp/partial.sqlite");
    assert_eq!(cfg.hourly_rate, 0.0);
    assert_eq!(cfg.reminder_hours, 2);

    fs::remove_file(&path).ok();
}

#[test]
fn test_stored_reminder_lifecycle() {
    let now = ts("2024-01-01 09:00");
    let mut reminder = StoredReminder::in_memory(now).expect("open");
    assert!(reminder.pending().expect("pending").is_none());

    reminder.schedule(hours_to_millis(2).expect("millis")).expect("schedule");
    let pending = reminder.pending().expect("pending").expect("scheduled");
    assert_eq!(pending.fire_at, ts("2024-01-01 11:00"));
    assert_eq!(pending.message, REMINDER_MESSAGE);

    assert!(reminder.due(ts("2024-01-01 10:59")).expect("due").is_none());
    assert!(reminder.due(ts("2024-01-01 11:00")).expect("due").is_some());

    // A new schedule replaces the pending one.
    reminder.schedule(hours_to_millis(5).expect("millis")).expect("reschedule");
    let pending = reminder.pending().expect("pending").expect("scheduled");
    assert_eq!(pending.fire_at, ts("2024-01-01 14:00"));

    reminder.cancel().expect("cancel");
    assert!(reminder.pending().expect("pending").is_none());
}

#[test]
fn test_reminder_delay_overflow_is_an_error() {
    let now = ts("2024-01-01 09:00");
    let mut reminder = StoredReminder::in_memory(now).expect("open");

    assert!(matches!(
        hours_to_millis(i64::MAX / 1000),
        Err(AppError::InvalidReminderHours(_))
    ));

    let huge = hours_to_millis(10_000_000_000).expect("fits in i64 millis");
    assert!(matches!(
        reminder.schedule(huge),
        Err(AppError::InvalidReminderDelay(_))
    ));
    assert!(matches!(
        reminder.schedule(-1),
        Err(AppError::InvalidReminderDelay(-1))
    ));
    assert!(reminder.pending().expect("pending").is_none());
}

#[test]
fn test_config_rejects_out_of_range_values() {
    let path = PathBuf::from(setup_test_config("bad_values_conf"));

    fs::write(&path, "reminder_hours: 10000000000\n").expect("write");
    assert!(matches!(Config::load_from(&path), Err(AppError::Config(_))));
    // Unchecked reads still work so the file can be shown and fixed.
    let raw = Config::read_from(&path).expect("read");
    assert_eq!(raw.reminder_hours, 10_000_000_000);

    fs::write(&path, "hourly_rate: -4.0\n").expect("write");
    assert!(matches!(Config::load_from(&path), Err(AppError::Config(_))));

    fs::write(&path, "hourly_rate: 0.0\nreminder_hours: 12\n").expect("write");
    Config::load_from(&path).expect("valid config");

    fs::remove_file(&path).ok();
}
