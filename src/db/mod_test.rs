use std::path::PathBuf;

use rusqlite::Connection;

use super::*;

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

/// Build a snapshot file with the collector's schema and a small cast:
/// two tracked novels (one without a launch date), stats with a bad date
/// and a NULL views row, and two days of rankings.
fn fixture_db(dir: &tempfile::TempDir) -> PathBuf {
    let path = dir.path().join("novels.db");
    let conn = Connection::open(&path).unwrap();
    conn.execute_batch(
        "CREATE TABLE management_novels (
             id INTEGER PRIMARY KEY,
             title TEXT NOT NULL,
             author TEXT,
             publisher TEXT,
             platform TEXT,
             genre TEXT,
             launch_date TEXT,
             novel_url TEXT,
             created_at TEXT
         );
         CREATE TABLE daily_statistics (
             id INTEGER PRIMARY KEY,
             novel_id INTEGER NOT NULL,
             date TEXT NOT NULL,
             views REAL,
             revenue REAL,
             detail_data TEXT
         );
         CREATE TABLE daily_rankings (
             id INTEGER PRIMARY KEY,
             ranking_date TEXT NOT NULL,
             platform TEXT,
             ranking_type TEXT,
             rank INTEGER,
             title TEXT,
             author TEXT,
             genre TEXT,
             views REAL,
             novel_id INTEGER,
             novel_url TEXT
         );

         INSERT INTO management_novels VALUES
             (1, '무한의 탑', 'kim', NULL, '문피아', 'fantasy', '2024-01-01',
              'https://example.com/1', '2024-01-01 10:00:00'),
             (2, 'Second Novel', 'lee', NULL, 'naver', NULL, NULL,
              'https://example.com/2', '2024-02-01 10:00:00');

         INSERT INTO daily_statistics VALUES
             (1, 1, '2024-03-01', 100.0, 5.0, NULL),
             (2, 1, '2024-03-02', 150.0, NULL, '{\"avg_read_through_rate\": 41.5}'),
             (3, 1, 'garbage-date', 999.0, NULL, NULL),
             (4, 1, '2024-03-03', NULL, NULL, NULL),
             (5, 2, '2024-03-02', 80.0, NULL, NULL);

         INSERT INTO daily_rankings VALUES
             (1, '2024-03-02', '문피아', 'daily', 1, '무한의 탑', 'kim', 'fantasy',
              150.0, 1, 'https://example.com/1'),
             (2, '2024-03-02', '네이버시리즈', 'daily', 1, 'Second Novel', 'lee', NULL,
              80.0, 2, 'https://example.com/2'),
             (3, '2024-03-02', '문피아', 'rookie', 3, '무한의 탑', 'kim', 'fantasy',
              NULL, 1, NULL),
             (4, '2024-03-01', '문피아', 'daily', 2, '무한의 탑', 'kim', 'fantasy',
              100.0, 1, NULL);",
    )
    .unwrap();
    path
}

#[test]
fn open_missing_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let result = NovelDb::open(&dir.path().join("absent.db"));
    assert!(result.is_err(), "read-only open of a missing file should fail");
}

#[test]
fn all_novels_newest_first() {
    let dir = tempfile::tempdir().unwrap();
    let db = NovelDb::open(&fixture_db(&dir)).unwrap();
    let novels = db.all_novels().unwrap();
    assert_eq!(novels.len(), 2);
    assert_eq!(novels[0].id, 2, "most recently created novel should come first");
    assert_eq!(novels[1].title, "무한의 탑");
    assert_eq!(novels[1].launch_date, Some(date("2024-01-01")));
}

#[test]
fn novel_by_id_hits_and_misses() {
    let dir = tempfile::tempdir().unwrap();
    let db = NovelDb::open(&fixture_db(&dir)).unwrap();
    assert_eq!(db.novel_by_id(1).unwrap().unwrap().author, "kim");
    assert!(db.novel_by_id(99).unwrap().is_none());
}

#[test]
fn novels_with_launch_date_filters_nulls() {
    let dir = tempfile::tempdir().unwrap();
    let db = NovelDb::open(&fixture_db(&dir)).unwrap();
    let novels = db.novels_with_launch_date().unwrap();
    assert_eq!(novels.len(), 1);
    assert_eq!(novels[0].id, 1);
}

#[test]
fn daily_stats_skip_malformed_rows() {
    let dir = tempfile::tempdir().unwrap();
    let db = NovelDb::open(&fixture_db(&dir)).unwrap();
    let stats = db.daily_stats(1).unwrap();
    // The garbage-date row and the NULL-views row are dropped.
    assert_eq!(stats.len(), 2);
    assert_eq!(stats[0].date, date("2024-03-01"));
    assert_eq!(stats[1].views, 150.0);
    assert!(stats[1].detail_data.as_deref().unwrap().contains("avg_read_through_rate"));
}

#[test]
fn observations_are_date_view_pairs() {
    let dir = tempfile::tempdir().unwrap();
    let db = NovelDb::open(&fixture_db(&dir)).unwrap();
    let observations = db.observations(1).unwrap();
    assert_eq!(
        observations,
        vec![(date("2024-03-01"), 100.0), (date("2024-03-02"), 150.0)]
    );
}

#[test]
fn stat_on_exact_date() {
    let dir = tempfile::tempdir().unwrap();
    let db = NovelDb::open(&fixture_db(&dir)).unwrap();
    let stat = db.stat_on(1, date("2024-03-02")).unwrap().unwrap();
    assert_eq!(stat.views, 150.0);
    assert!(db.stat_on(1, date("2024-03-09")).unwrap().is_none());
}

#[test]
fn aggregate_stats_require_launch_date() {
    let dir = tempfile::tempdir().unwrap();
    let db = NovelDb::open(&fixture_db(&dir)).unwrap();
    let rows = db.all_stats_for_aggregate().unwrap();
    // Novel 2 has no launch date, so only novel 1's two valid rows remain.
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|(novel_id, _, _)| *novel_id == 1));
}

#[test]
fn rankings_by_date_order_and_mapping() {
    let dir = tempfile::tempdir().unwrap();
    let db = NovelDb::open(&fixture_db(&dir)).unwrap();
    let rankings = db.rankings_by_date(date("2024-03-02")).unwrap();
    assert_eq!(rankings.len(), 3);
    assert!(
        rankings.windows(2).all(|w| w[0].platform <= w[1].platform),
        "rankings should be grouped by platform"
    );
    let rookie = rankings.iter().find(|r| r.ranking_type == "rookie").unwrap();
    assert_eq!(rookie.rank, 3);
    assert_eq!(rookie.views, None);
}

#[test]
fn rookie_rankings_filter_section_types() {
    let dir = tempfile::tempdir().unwrap();
    let db = NovelDb::open(&fixture_db(&dir)).unwrap();
    let rows = db.rookie_rankings_by_date(date("2024-03-02")).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].ranking_type, "rookie");
}

#[test]
fn latest_dates() {
    let dir = tempfile::tempdir().unwrap();
    let db = NovelDb::open(&fixture_db(&dir)).unwrap();
    assert_eq!(db.latest_ranking_date().unwrap(), Some(date("2024-03-02")));
    assert_eq!(db.latest_rookie_date().unwrap(), Some(date("2024-03-02")));
}

#[test]
fn available_ranking_dates_newest_first_with_limit() {
    let dir = tempfile::tempdir().unwrap();
    let db = NovelDb::open(&fixture_db(&dir)).unwrap();
    let dates = db.available_ranking_dates(10).unwrap();
    assert_eq!(dates, vec![date("2024-03-02"), date("2024-03-01")]);
    assert_eq!(db.available_ranking_dates(1).unwrap().len(), 1);
}

#[test]
fn parse_date_tolerates_time_suffix() {
    assert_eq!(parse_date("2024-03-02"), Some(date("2024-03-02")));
    assert_eq!(parse_date("2024-03-02 10:30:00"), Some(date("2024-03-02")));
    assert_eq!(parse_date("not a date"), None);
}
