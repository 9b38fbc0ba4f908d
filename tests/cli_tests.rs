mod common;

use common::{init_env, setup_test_config, setup_test_db, tsq};
use predicates::str::contains;
use serde_json::Value;
use std::fs;

fn run(db: &str, conf: &str, args: &[&str]) -> assert_cmd::assert::Assert {
    let mut full = vec!["--db", db, "--config", conf];
    full.extend_from_slice(args);
    tsq().args(full).assert()
}

#[test]
fn test_init_creates_config_and_db() {
    let db = setup_test_db("cli_init");
    let conf = setup_test_config("cli_init");

    tsq()
        .args(["--db", &db, "--config", &conf, "init"])
        .assert()
        .success()
        .stdout(contains("Database initialized"));

    assert!(fs::metadata(&db).is_ok());
    let content = fs::read_to_string(&conf).expect("config written");
    assert!(content.contains("reminder_hours: 2"));
}

#[test]
fn test_init_in_test_mode_skips_config() {
    let db = setup_test_db("cli_init_test_mode");
    let conf = setup_test_config("cli_init_test_mode");

    tsq()
        .args(["--db", &db, "--config", &conf, "--test", "init"])
        .assert()
        .success();

    assert!(fs::metadata(&db).is_ok());
    assert!(fs::metadata(&conf).is_err());
}

#[test]
fn test_clock_in_and_out() {
    let (db, conf) = init_env("cli_clock");

    run(&db, &conf, &["in", "--at", "2024-01-01 09:00", "--rate", "20"])
        .success()
        .stdout(contains("Clocked in"));

    run(&db, &conf, &["in", "--at", "2024-01-01 10:00"])
        .failure()
        .stderr(contains("already active"));

    run(&db, &conf, &["status", "--at", "2024-01-01 12:00"])
        .success()
        .stdout(contains("03:00:00"))
        .stdout(contains("$60.00"))
        .stdout(contains("still clocked in"));

    run(&db, &conf, &["out", "--at", "2024-01-01 17:00"])
        .success()
        .stdout(contains("08h 00m"))
        .stdout(contains("$160.00"));

    run(&db, &conf, &["out"])
        .success()
        .stdout(contains("No active session"));
}

#[test]
fn test_add_and_list_week() {
    let (db, conf) = init_env("cli_add_list");

    run(
        &db,
        &conf,
        &["add", "2024-06-10 09:00", "17:00", "--rate", "20", "--label", "Register"],
    )
    .success()
    .stdout(contains("Entry #1 added"));
    run(&db, &conf, &["add", "2024-06-12 10:00", "2024-06-12 12:00", "--rate", "15"]).success();

    run(&db, &conf, &["list", "--week", "2024-06-12"])
        .success()
        .stdout(contains("2024-06-10"))
        .stdout(contains("Register"))
        .stdout(contains("$190.00"));

    run(&db, &conf, &["add", "2024-06-12 12:00", "11:00"])
        .failure()
        .stderr(contains("End time must be after start time"));
}

#[test]
fn test_squish_and_unsquish() {
    let (db, conf) = init_env("cli_squish");

    run(&db, &conf, &["add", "2024-01-02 09:00", "11:00", "--rate", "10"]).success();
    run(&db, &conf, &["add", "2024-01-02 13:00", "15:00", "--rate", "20"]).success();

    run(&db, &conf, &["squish", "1", "2"])
        .success()
        .stdout(contains("block #3"))
        .stdout(contains("$15.00/h"));

    let out = run(&db, &conf, &["list", "--all", "--json"]).success();
    let json: Value =
        serde_json::from_slice(&out.get_output().stdout).expect("json output");
    let rows = json.as_array().expect("array");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["kind"], "squished");
    assert_eq!(rows[0]["duration_minutes"], 240);

    run(&db, &conf, &["unsquish", "3"])
        .success()
        .stdout(contains("#1, #2"));
    run(&db, &conf, &["unsquish", "3"])
        .success()
        .stdout(contains("Nothing to unsquish"));

    let out = run(&db, &conf, &["list", "--all", "--json"]).success();
    let json: Value =
        serde_json::from_slice(&out.get_output().stdout).expect("json output");
    assert_eq!(json.as_array().expect("array").len(), 2);
}

#[test]
fn test_submit_and_delete() {
    let (db, conf) = init_env("cli_submit_del");

    run(&db, &conf, &["add", "2024-01-02 09:00", "11:00"]).success();
    run(&db, &conf, &["submit", "1"])
        .success()
        .stdout(contains("marked as submitted"));

    run(&db, &conf, &["list", "--all", "--unsubmitted", "--json"])
        .success()
        .stdout(contains("[]"));

    run(&db, &conf, &["submit", "7"])
        .failure()
        .stderr(contains("Entry #7 not found"));

    run(&db, &conf, &["del", "1", "--yes"])
        .success()
        .stdout(contains("Entry #1 deleted"));
}

#[test]
fn test_config_rate_and_summary() {
    let (db, conf) = init_env("cli_config_summary");

    run(&db, &conf, &["config", "--rate", "$12.50", "--reminder-hours", "3"])
        .success()
        .stdout(contains("$12.50/h"));

    run(&db, &conf, &["config", "--reminder-hours", "13"])
        .failure()
        .stderr(contains("allowed range is 1-12"));

    let content = fs::read_to_string(&conf).expect("config");
    assert!(content.contains("hourly_rate: 12.5"));
    assert!(content.contains("reminder_hours: 3"));

    // Entries without their own rate use the configured one.
    run(&db, &conf, &["add", "2024-06-10 09:00", "13:00"]).success();
    run(&db, &conf, &["summary", "--date", "2024-06-12"])
        .success()
        .stdout(contains("2024-06-09 → 2024-06-15"))
        .stdout(contains("2024-06-09 → 2024-06-22"))
        .stdout(contains("$50.00"))
        .stdout(contains("4.0"));
}

#[test]
fn test_log_print() {
    let (db, conf) = init_env("cli_log");
    run(&db, &conf, &["add", "2024-01-02 09:00", "11:00"]).success();

    run(&db, &conf, &["log", "--print"])
        .success()
        .stdout(contains("init"))
        .stdout(contains("add"));
}

#[test]
fn test_out_of_range_config_is_reported() {
    let (db, conf) = init_env("cli_bad_config");
    let content = fs::read_to_string(&conf).expect("config");
    let broken = content.replace("reminder_hours: 2", "reminder_hours: 10000000000");
    fs::write(&conf, broken).expect("write");

    run(&db, &conf, &["in", "--at", "2024-01-01 09:00"])
        .failure()
        .stderr(contains("Configuration error"));

    run(&db, &conf, &["config", "--print"])
        .success()
        .stdout(contains("10000000000"));

    run(&db, &conf, &["config", "--reminder-hours", "4"]).success();
    run(&db, &conf, &["in", "--at", "2024-01-01 09:00"]).success();
}
