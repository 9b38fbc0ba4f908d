//! Time utilities: parsing HH:MM and timestamps, the DB timestamp format, formatting minutes.

use crate::errors::{AppError, AppResult};
use chrono::{Local, NaiveDateTime, NaiveTime, Timelike};

/// Timestamps are stored as TEXT in this format so that lexical order is chronological.
pub const DB_DATETIME_FMT: &str = "%Y-%m-%dT%H:%M:%S";

const INPUT_DATETIME_FMTS: [&str; 4] = [
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
];

/// Current local wall-clock time, truncated to whole seconds.
pub fn now() -> NaiveDateTime {
    let n = Local::now().naive_local();
    n.with_nanosecond(0).unwrap_or(n)
}

pub fn parse_time(t: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(t, "%H:%M").ok()
}

pub fn parse_datetime(s: &str) -> Option<NaiveDateTime> {
    INPUT_DATETIME_FMTS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s.trim(), fmt).ok())
}

pub fn to_db(dt: &NaiveDateTime) -> String {
    dt.format(DB_DATETIME_FMT).to_string()
}

pub fn from_db(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, DB_DATETIME_FMT).ok()
}

/// HH:MM:SS clock used by the live session view.
pub fn format_seconds(secs: i64) -> String {
    let s = secs.max(0);
    format!("{:02}:{:02}:{:02}", s / 3600, (s % 3600) / 60, s % 60)
}

pub fn parse_optional_datetime(input: Option<&String>) -> AppResult<Option<NaiveDateTime>> {
    match input {
        Some(s) => parse_datetime(s)
            .map(Some)
            .ok_or_else(|| AppError::InvalidTime(s.to_string())),
        None => Ok(None),
    }
}

/// A full timestamp, or `HH:MM` taken on the date of `start`.
pub fn parse_end(s: &str, start: NaiveDateTime) -> AppResult<NaiveDateTime> {
    if let Some(dt) = parse_datetime(s) {
        return Ok(dt);
    }
    parse_time(s.trim())
        .map(|t| start.date().and_time(t))
        .ok_or_else(|| AppError::InvalidTime(s.to_string()))
}

/// `--at` style override: the parsed timestamp, or the current time.
pub fn at_or_now(at: Option<&String>) -> AppResult<NaiveDateTime> {
    Ok(parse_optional_datetime(at)?.unwrap_or_else(now))
}
