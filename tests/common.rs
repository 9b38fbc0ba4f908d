#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::NaiveDateTime;
use std::env;
use std::fs;
use std::path::PathBuf;
use timesquish::core::entries::EntryLogic;
use timesquish::core::reminder::ReminderScheduler;
use timesquish::db::store::EntryStore;
use timesquish::errors::{AppError, AppResult};
use timesquish::models::entry::TimeEntry;
use timesquish::utils::time::parse_datetime;

pub fn tsq() -> Command {
    cargo_bin_cmd!("timesquish")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_timesquish.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Same for a config file
pub fn setup_test_config(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_timesquish.conf", name));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// `init` against a fresh temp DB and config; returns (db, config).
pub fn init_env(name: &str) -> (String, String) {
    let db = setup_test_db(name);
    let conf = setup_test_config(name);
    tsq()
        .args(["--db", &db, "--config", &conf, "init"])
        .assert()
        .success();
    (db, conf)
}

pub fn ts(s: &str) -> NaiveDateTime {
    parse_datetime(s).expect("valid timestamp")
}

pub fn mem_store() -> EntryStore {
    EntryStore::in_memory().expect("in-memory store")
}

/// Insert a closed manual entry.
pub fn add_closed(store: &mut EntryStore, start: &str, end: &str, rate: f64) -> TimeEntry {
    EntryLogic::add_manual(store, ts(start), ts(end), None, rate).expect("add entry")
}

/// Reminder double that records calls instead of scheduling anything.
#[derive(Default)]
pub struct RecordingReminder {
    pub scheduled: Vec<i64>,
    pub cancelled: usize,
    pub fail: bool,
}

impl ReminderScheduler for RecordingReminder {
    fn schedule(&mut self, delay_millis: i64) -> AppResult<()> {
        if self.fail {
            return Err(AppError::Other("scheduler unavailable".into()));
        }
        self.scheduled.push(delay_millis);
        Ok(())
    }

    fn cancel(&mut self) -> AppResult<()> {
        if self.fail {
            return Err(AppError::Other("scheduler unavailable".into()));
        }
        self.cancelled += 1;
        Ok(())
    }
}
