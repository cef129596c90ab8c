//! Rookie monitor: what moved on the rookie and genre boards.
//!
//! Only meaningful when the snapshot contains rookie-monitor collection
//! runs (the dedicated board scrape). The report names titles that entered
//! the rookie board since the previous day, ranks each board section by
//! day-over-day surge, and lists the best read-through rates.

mod report;

use std::collections::BTreeSet;
use std::error::Error;

use chrono::{Days, NaiveDate};

use crate::db::{NovelDb, ROOKIE_RANKING_TYPES, RankingRow};
use crate::format::round1;

/// Rows shown per section and in the read-through list.
const SECTION_LIMIT: usize = 20;

/// Section keys → headings, in display order; keys match
/// [`ROOKIE_RANKING_TYPES`].
const SECTION_LABELS: &[(&str, &str)] = &[
    ("rookie", "Rookie best"),
    ("new_novel_today", "New titles best"),
    ("genre_heroism", "Martial arts best"),
    ("genre_fantasy", "Fantasy best"),
    ("genre_fusion", "Fusion best"),
    ("genre_game", "Game best"),
    ("genre_newfantasy", "Modern fantasy best"),
    ("genre_history", "Alt-history best"),
];

pub fn section_label(key: &str) -> &str {
    SECTION_LABELS
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, label)| *label)
        .unwrap_or(key)
}

/// A title that entered the rookie board since the previous day.
pub struct NewRookie {
    pub rank: i64,
    pub title: String,
    pub author: String,
    pub genre: String,
    pub novel_url: String,
    pub novel_id: i64,
}

/// One board member's day-over-day movement.
pub struct SectionSurge {
    pub novel_id: i64,
    pub title: String,
    pub author: String,
    pub views_today: f64,
    pub views_prev: f64,
    pub surge: f64,
    pub surge_rate: f64,
    pub read_through: Option<f64>,
}

pub struct ReadThrough {
    pub novel_id: i64,
    pub title: String,
    pub author: String,
    pub read_through: f64,
    pub views: Option<f64>,
}

pub struct RookieReport {
    pub date: NaiveDate,
    pub new_rookies: Vec<NewRookie>,
    /// (section label, members by surge rate descending).
    pub sections: Vec<(String, Vec<SectionSurge>)>,
    pub top_read_through: Vec<ReadThrough>,
}

/// `avg_read_through_rate` out of a stat row's detail JSON, if present.
fn read_through_rate(detail_data: Option<&str>) -> Option<f64> {
    let value: serde_json::Value = serde_json::from_str(detail_data?).ok()?;
    value.get("avg_read_through_rate")?.as_f64()
}

fn rookie_ids(rows: &[RankingRow]) -> BTreeSet<i64> {
    rows.iter()
        .filter(|row| row.ranking_type == "rookie")
        .filter_map(|row| row.novel_id)
        .collect()
}

/// Assemble the report for `date` (default: the latest monitor run).
/// `None` means the snapshot has no rookie-monitor data at all.
pub fn build(
    db: &NovelDb,
    date: Option<NaiveDate>,
) -> Result<Option<RookieReport>, Box<dyn Error>> {
    let target = match date {
        Some(date) => Some(date),
        None => db.latest_rookie_date()?,
    };
    let Some(target) = target else {
        return Ok(None);
    };
    let previous = target - Days::new(1);

    let today_rows = db.rookie_rankings_by_date(target)?;
    let prev_rows = db.rookie_rankings_by_date(previous)?;

    let prev_ids = rookie_ids(&prev_rows);
    let mut new_rookies: Vec<NewRookie> = today_rows
        .iter()
        .filter(|row| row.ranking_type == "rookie")
        .filter_map(|row| {
            let novel_id = row.novel_id?;
            if prev_ids.contains(&novel_id) {
                return None;
            }
            Some(NewRookie {
                rank: row.rank,
                title: row.title.clone(),
                author: row.author.clone().unwrap_or_default(),
                genre: row.genre.clone().unwrap_or_default(),
                novel_url: row.novel_url.clone().unwrap_or_default(),
                novel_id,
            })
        })
        .collect();
    new_rookies.sort_by_key(|rookie| rookie.rank);

    let mut sections = Vec::new();
    for &section in ROOKIE_RANKING_TYPES {
        let section_rows: Vec<&RankingRow> = today_rows
            .iter()
            .filter(|row| row.ranking_type == section)
            .collect();
        if section_rows.is_empty() {
            continue;
        }

        let mut seen: BTreeSet<i64> = BTreeSet::new();
        let mut members = Vec::new();
        for row in &section_rows {
            let Some(novel_id) = row.novel_id else {
                continue;
            };
            if !seen.insert(novel_id) {
                continue;
            }

            let today_stat = db.stat_on(novel_id, target)?;
            let prev_stat = db.stat_on(novel_id, previous)?;
            let views_today = today_stat.as_ref().map(|s| s.views).unwrap_or(0.0);
            let views_prev = prev_stat.as_ref().map(|s| s.views).unwrap_or(0.0);
            let surge = views_today - views_prev;
            let surge_rate = if views_prev > 0.0 {
                surge / views_prev * 100.0
            } else if surge > 0.0 {
                100.0
            } else {
                0.0
            };
            let read_through = today_stat
                .as_ref()
                .and_then(|stat| read_through_rate(stat.detail_data.as_deref()));

            members.push(SectionSurge {
                novel_id,
                title: row.title.clone(),
                author: row.author.clone().unwrap_or_default(),
                views_today,
                views_prev,
                surge,
                surge_rate: round1(surge_rate),
                read_through,
            });
        }

        members.sort_by(|a, b| b.surge_rate.total_cmp(&a.surge_rate));
        members.truncate(SECTION_LIMIT);
        sections.push((section_label(section).to_string(), members));
    }

    let mut board_ids: BTreeSet<i64> = BTreeSet::new();
    for row in &today_rows {
        if let Some(novel_id) = row.novel_id {
            board_ids.insert(novel_id);
        }
    }
    let mut top_read_through = Vec::new();
    for novel_id in board_ids {
        let Some(stat) = db.stat_on(novel_id, target)? else {
            continue;
        };
        let Some(rate) = read_through_rate(stat.detail_data.as_deref()) else {
            continue;
        };
        let named = today_rows.iter().find(|row| row.novel_id == Some(novel_id));
        top_read_through.push(ReadThrough {
            novel_id,
            title: named.map(|row| row.title.clone()).unwrap_or_default(),
            author: named
                .and_then(|row| row.author.clone())
                .unwrap_or_default(),
            read_through: rate,
            views: Some(stat.views),
        });
    }
    top_read_through.sort_by(|a, b| b.read_through.total_cmp(&a.read_through));
    top_read_through.truncate(SECTION_LIMIT);

    Ok(Some(RookieReport {
        date: target,
        new_rookies,
        sections,
        top_read_through,
    }))
}

pub fn run(db: &NovelDb, date: Option<NaiveDate>, json: bool) -> Result<(), Box<dyn Error>> {
    match build(db, date)? {
        Some(rookie_report) => {
            if json {
                report::print_json(&rookie_report)
            } else {
                report::print_report(&rookie_report);
                Ok(())
            }
        }
        None => {
            println!("No rookie monitor data in this database.");
            Ok(())
        }
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
