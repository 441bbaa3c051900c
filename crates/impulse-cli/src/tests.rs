//! CLI command tests
//!
//! This module contains all tests for the CLI commands.

use impulse_core::models::{Outcome, PurchaseEvent, StreakState};
use impulse_core::{Database, EventSource, ExportFormat, RadarMetric, Settings};

use crate::commands::{self, truncate};

const DAY_MS: i64 = 86_400_000;
/// 2024-03-10T12:00:00Z
const NOW: i64 = 1_710_072_000_000;

fn test_settings() -> Settings {
    Settings {
        utc_offset_minutes: Some(0),
        ..Settings::default()
    }
}

fn sample_events() -> Vec<PurchaseEvent> {
    vec![
        PurchaseEvent::resisted(NOW - DAY_MS, 40.0, "Gym membership"),
        PurchaseEvent::purchased(NOW - 2 * DAY_MS, 15.0, "Netflix subscription"),
        PurchaseEvent::resisted(NOW - 45 * DAY_MS, 120.0, "Designer watch"),
    ]
}

fn setup_test_db() -> Database {
    let db = Database::in_memory().unwrap();
    db.import_events(&sample_events()).unwrap();
    db
}

// ========== Event Loading Tests ==========

#[test]
fn test_load_events_uses_configured_window() {
    let db = setup_test_db();
    let events = commands::load_events(&db, &test_settings(), None, NOW).unwrap();
    assert_eq!(events.len(), 2);
}

#[test]
fn test_load_events_days_override() {
    let db = setup_test_db();
    let events = commands::load_events(&db, &test_settings(), Some(1), NOW).unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].description, "Gym membership");
}

#[test]
fn test_load_events_zero_days_means_all_time() {
    let db = setup_test_db();
    let events = commands::load_events(&db, &test_settings(), Some(0), NOW).unwrap();
    assert_eq!(events.len(), 3);
}

#[test]
fn test_open_source_prefers_document() {
    let dir = tempfile::tempdir().unwrap();
    let doc = dir.path().join("stats.json");
    std::fs::write(
        &doc,
        r#"{"recentBattles": [{"timestamp": 1000, "result": "defeat", "amount": 12.5, "item": "Pizza"}]}"#,
    )
    .unwrap();

    let source = commands::open_source(&dir.path().join("unused.db"), Some(&doc)).unwrap();
    let events = source.load_events().unwrap();
    assert_eq!(events, vec![PurchaseEvent::resisted(1000, 12.5, "Pizza")]);
    assert!(!dir.path().join("unused.db").exists());
}

#[test]
fn test_open_source_database() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("impulse.db");
    let source = commands::open_source(&db_path, None).unwrap();
    assert!(source.load_events().unwrap().is_empty());
    assert!(db_path.exists());
}

#[test]
fn test_load_settings_missing_file_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let settings = commands::load_settings(Some(&dir.path().join("nope.toml"))).unwrap();
    assert_eq!(settings.recent_limit, 10);
    assert_eq!(settings.window_days, Some(30));
}

#[test]
fn test_load_settings_invalid_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("impulse.toml");
    std::fs::write(&path, "[report\nwindow_days = ").unwrap();
    assert!(commands::load_settings(Some(&path)).is_err());
}

// ========== Report Command Tests ==========

#[test]
fn test_cmd_summary_empty() {
    let result = commands::cmd_summary(&[], &test_settings(), false);
    assert!(result.is_ok());
}

#[test]
fn test_cmd_summary_with_data() {
    let events = sample_events();
    assert!(commands::cmd_summary(&events, &test_settings(), false).is_ok());
    assert!(commands::cmd_summary(&events, &test_settings(), true).is_ok());
}

#[test]
fn test_summary_json_fields() {
    let result = test_settings().aggregator().aggregate(&sample_events());
    let json = commands::summary_json(&result);
    assert_eq!(json["total_events"], 3);
    assert_eq!(json["amount_saved"], 160.0);
    assert_eq!(json["amount_spent"], 15.0);
    assert_eq!(json["biggest_save"], 120.0);
    assert_eq!(json["streak"]["length"], 1);
    assert_eq!(json["streak"]["outcome"], "resisted");
}

#[test]
fn test_cmd_categories() {
    let events = sample_events();
    assert!(commands::cmd_categories(&events, &test_settings(), false).is_ok());
    assert!(commands::cmd_categories(&events, &test_settings(), true).is_ok());
    assert!(commands::cmd_categories(&[], &test_settings(), false).is_ok());
}

#[test]
fn test_cmd_timeline() {
    let events = sample_events();
    assert!(commands::cmd_timeline(&events, &test_settings(), false).is_ok());
    assert!(commands::cmd_timeline(&events, &test_settings(), true).is_ok());
    assert!(commands::cmd_timeline(&[], &test_settings(), false).is_ok());
}

#[test]
fn test_cmd_radar_both_metrics() {
    let events = sample_events();
    for metric in [RadarMetric::Spent, RadarMetric::Saved] {
        assert!(commands::cmd_radar(&events, &test_settings(), metric, false).is_ok());
        assert!(commands::cmd_radar(&events, &test_settings(), metric, true).is_ok());
    }
    assert!(commands::cmd_radar(&[], &test_settings(), RadarMetric::Spent, false).is_ok());
}

#[test]
fn test_cmd_streak_and_recent() {
    let events = sample_events();
    assert!(commands::cmd_streak(&events).is_ok());
    assert!(commands::cmd_streak(&[]).is_ok());
    assert!(commands::cmd_recent(&events, &test_settings(), 2).is_ok());
    assert!(commands::cmd_recent(&[], &test_settings(), 10).is_ok());
}

#[test]
fn test_recent_timestamps_use_configured_offset() {
    // 2024-03-09T23:30:00Z
    let late_evening = NOW - 12 * 3_600_000 - 30 * 60_000;

    let utc = test_settings().utc_offset();
    assert_eq!(utc.to_string(), "+00:00");
    assert_eq!(
        commands::format_timestamp(late_evening, &utc),
        "2024-03-09 23:30:00"
    );

    let plus_one = Settings {
        utc_offset_minutes: Some(60),
        ..Settings::default()
    };
    let offset = plus_one.utc_offset();
    assert_eq!(
        commands::format_timestamp(late_evening, &offset),
        "2024-03-10 00:30:00"
    );

    // The same date lands in the timeline bucket
    let result = plus_one
        .aggregator()
        .aggregate(&[PurchaseEvent::resisted(late_evening, 5.0, "Pizza")]);
    assert_eq!(result.timeline[0].date.to_string(), "2024-03-10");
    assert!(commands::cmd_recent(
        &[PurchaseEvent::resisted(late_evening, 5.0, "Pizza")],
        &plus_one,
        5
    )
    .is_ok());
}

#[test]
fn test_format_timestamp_out_of_range() {
    let utc = test_settings().utc_offset();
    assert_eq!(commands::format_timestamp(i64::MAX, &utc), i64::MAX.to_string());
}

#[test]
fn test_describe_streak() {
    assert_eq!(
        commands::describe_streak(&StreakState::default()),
        "no decisions yet"
    );
    let streak = StreakState {
        length: 3,
        outcome: Some(Outcome::Resisted),
    };
    assert_eq!(commands::describe_streak(&streak), "3 resisted in a row");
}

// ========== Event Command Tests ==========

#[test]
fn test_cmd_classify() {
    assert!(commands::cmd_classify("Designer watch").is_ok());
    assert!(commands::cmd_classify("").is_ok());
}

#[test]
fn test_cmd_log_records_event() {
    let db = Database::in_memory().unwrap();
    let result = commands::cmd_log(&db, "Wireless earbuds", 59.0, Outcome::Resisted, NOW);
    assert!(result.is_ok());

    let events = db.list_events(None).unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].amount, 59.0);
    assert_eq!(events[0].outcome, Outcome::Resisted);
}

#[test]
fn test_cmd_log_duplicate_timestamp() {
    let db = Database::in_memory().unwrap();
    commands::cmd_log(&db, "Pizza", 9.0, Outcome::Purchased, NOW).unwrap();
    let result = commands::cmd_log(&db, "Burger", 7.0, Outcome::Purchased, NOW);
    assert!(result.is_ok());
    assert_eq!(db.count_attempts().unwrap(), 1);
}

#[test]
fn test_cmd_log_rejects_negative_amount() {
    let db = Database::in_memory().unwrap();
    let result = commands::cmd_log(&db, "Shoes", -5.0, Outcome::Purchased, NOW);
    assert!(result.is_err());
    assert_eq!(db.count_attempts().unwrap(), 0);
}

#[test]
fn test_cmd_import() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("events.json");
    impulse_core::document::save_events(&file, &sample_events()).unwrap();

    let db = Database::in_memory().unwrap();
    assert!(commands::cmd_import(&db, &file).is_ok());
    assert_eq!(db.count_attempts().unwrap(), 3);

    // Second import only finds duplicates
    assert!(commands::cmd_import(&db, &file).is_ok());
    assert_eq!(db.count_attempts().unwrap(), 3);
}

#[test]
fn test_cmd_import_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let db = Database::in_memory().unwrap();
    let result = commands::cmd_import(&db, &dir.path().join("missing.json"));
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("not found"));
}

#[test]
fn test_cmd_import_malformed_file() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("bad.json");
    std::fs::write(&file, r#"[{"timestamp": 1, "outcome": "maybe", "amount": 1.0}]"#).unwrap();

    let db = Database::in_memory().unwrap();
    assert!(commands::cmd_import(&db, &file).is_err());
    assert_eq!(db.count_attempts().unwrap(), 0);
}

#[test]
fn test_cmd_export_csv() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("events.csv");
    commands::cmd_export(&sample_events(), &output, ExportFormat::Csv).unwrap();

    let text = std::fs::read_to_string(&output).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], "timestamp,outcome,amount,category,description");
}

#[test]
fn test_cmd_export_json_reimports() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("events.json");
    commands::cmd_export(&sample_events(), &output, ExportFormat::Json).unwrap();

    let db = Database::in_memory().unwrap();
    commands::cmd_import(&db, &output).unwrap();
    assert_eq!(db.count_attempts().unwrap(), 3);
}

// ========== Utility Tests ==========

#[test]
fn test_truncate() {
    assert_eq!(truncate("hello", 10), "hello");
    assert_eq!(truncate("hello world", 8), "hello...");
    assert_eq!(truncate("", 5), "");
    // Multi-byte characters are counted, not bytes
    assert_eq!(truncate("café au lait", 7), "café...");
}
