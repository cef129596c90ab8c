use chrono::NaiveDate;
use rusqlite::Connection;

use super::*;

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn fixture_db(dir: &tempfile::TempDir) -> NovelDb {
    let path = dir.path().join("novels.db");
    let conn = Connection::open(&path).unwrap();
    conn.execute_batch(
        "CREATE TABLE management_novels (
             id INTEGER PRIMARY KEY, title TEXT, author TEXT, publisher TEXT,
             platform TEXT, genre TEXT, launch_date TEXT, novel_url TEXT,
             created_at TEXT
         );
         CREATE TABLE daily_statistics (
             id INTEGER PRIMARY KEY, novel_id INTEGER, date TEXT,
             views REAL, revenue REAL, detail_data TEXT
         );
         CREATE TABLE daily_rankings (
             id INTEGER PRIMARY KEY, ranking_date TEXT, platform TEXT,
             ranking_type TEXT, rank INTEGER, title TEXT, author TEXT,
             genre TEXT, views REAL, novel_id INTEGER, novel_url TEXT
         );

         INSERT INTO management_novels VALUES
             (1, '탑의 정복자', 'kim', NULL, '카카오페이지', NULL, '2024-01-01', NULL, '2024-01-01'),
             (2, 'Dataless', 'lee', NULL, NULL, NULL, NULL, NULL, '2024-01-02');

         INSERT INTO daily_statistics VALUES
             (1, 1, '2024-01-02', 1000.0, NULL, NULL),
             (2, 1, '2024-01-03', 1800.0, NULL, NULL),
             (3, 1, '2024-01-05', 2500.0, NULL, NULL);",
    )
    .unwrap();
    NovelDb::open(&path).unwrap()
}

#[test]
fn build_normalizes_platform_and_series() {
    let dir = tempfile::tempdir().unwrap();
    let db = fixture_db(&dir);
    let stats = build(&db, 1).unwrap();

    assert_eq!(stats.canonical_platform, "Kakao");
    assert_eq!(stats.built.total_views, 2500.0);
    // Dense from launch: days 0..=4.
    assert_eq!(stats.built.series.len(), 5);
    assert_eq!(stats.recent.len(), 3);
}

#[test]
fn build_computes_surge_at_latest_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let db = fixture_db(&dir);
    let stats = build(&db, 1).unwrap();

    // Latest is 01-05; the daily lookback (01-04) matches 01-03 within
    // tolerance: 2500 - 1800.
    let daily = stats.surge_daily.unwrap();
    assert_eq!(daily.surge, 700.0);
    assert_eq!(daily.surge_rate, 38.9);
}

#[test]
fn build_handles_a_novel_without_data() {
    let dir = tempfile::tempdir().unwrap();
    let db = fixture_db(&dir);
    let stats = build(&db, 2).unwrap();

    assert_eq!(stats.canonical_platform, crate::platform::UNCLASSIFIED);
    assert_eq!(stats.built.total_views, 0.0);
    assert!(stats.built.series.is_empty());
    assert!(stats.surge_daily.is_none());
}

#[test]
fn build_unknown_novel_fails() {
    let dir = tempfile::tempdir().unwrap();
    let db = fixture_db(&dir);
    let err = build(&db, 99).unwrap_err();
    assert!(err.to_string().contains("not found"));
}

#[test]
fn run_prints_both_formats() {
    let dir = tempfile::tempdir().unwrap();
    let db = fixture_db(&dir);
    run(&db, 1, false).unwrap();
    run(&db, 1, true).unwrap();
    run(&db, 2, false).unwrap();
}
