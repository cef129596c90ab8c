//! Daily report: per-platform ranking tables and surge lists for one
//! collection date.
//!
//! `np today` runs this against the latest date with ranking data,
//! `np report --date` against any collected date. Surge rows are computed
//! for every tracked novel across all three horizons; the tables hide
//! declines (display convention) while `--json` keeps the signed values.

mod report;

use std::collections::{BTreeMap, BTreeSet};
use std::error::Error;

use chrono::NaiveDate;

use crate::db::{NovelDb, RankingRow};
use crate::platform;
use crate::report_helpers;
use crate::surge::{self, Horizon};

/// One novel's row in a surge table.
#[derive(Debug, Clone)]
pub struct SurgeRow {
    pub novel_id: i64,
    pub title: String,
    pub platform: String,
    pub author: String,
    pub latest_views: f64,
    pub surge: f64,
    pub surge_rate: f64,
}

/// Surge tables for the three horizons, each sorted by surge descending.
pub struct SurgeReport {
    pub daily: Vec<SurgeRow>,
    pub weekly: Vec<SurgeRow>,
    pub monthly: Vec<SurgeRow>,
}

/// Everything one daily report shows.
pub struct DailyReport {
    pub date: NaiveDate,
    pub rankings: Vec<(String, Vec<RankingRow>)>,
    pub surge: SurgeReport,
}

/// Keep only rows that actually grew. The calculator returns signed
/// values; hiding declines and stalls is purely a display policy.
pub fn positive_only(rows: &[SurgeRow]) -> Vec<SurgeRow> {
    rows.iter().filter(|row| row.surge > 0.0).cloned().collect()
}

/// Group ranking rows by canonical platform, in display order.
pub fn group_rankings(rows: Vec<RankingRow>) -> Vec<(String, Vec<RankingRow>)> {
    let mut groups: BTreeMap<String, Vec<RankingRow>> = BTreeMap::new();
    for row in rows {
        let canonical = platform::normalize(Some(&row.platform));
        groups.entry(canonical).or_default().push(row);
    }

    let seen: BTreeSet<String> = groups.keys().cloned().collect();
    platform::display_order(&seen)
        .into_iter()
        .filter_map(|name| groups.remove(&name).map(|rows| (name, rows)))
        .collect()
}

/// Assemble surge tables for every tracked novel at `base_date`.
pub fn build_surge_report(
    db: &NovelDb,
    base_date: NaiveDate,
) -> Result<SurgeReport, Box<dyn Error>> {
    let mut daily = Vec::new();
    let mut weekly = Vec::new();
    let mut monthly = Vec::new();

    for novel in db.all_novels()? {
        let observations = db.observations(novel.id)?;
        if observations.is_empty() {
            continue;
        }
        let canonical = platform::normalize(novel.platform.as_deref());

        for (horizon, rows) in [
            (Horizon::Daily, &mut daily),
            (Horizon::Weekly, &mut weekly),
            (Horizon::Monthly, &mut monthly),
        ] {
            if let Some(surge) = surge::compute(&observations, base_date, horizon) {
                rows.push(SurgeRow {
                    novel_id: novel.id,
                    title: novel.title.clone(),
                    platform: canonical.clone(),
                    author: novel.author.clone(),
                    latest_views: surge.latest_views,
                    surge: surge.surge,
                    surge_rate: surge.surge_rate,
                });
            }
        }
    }

    for rows in [&mut daily, &mut weekly, &mut monthly] {
        rows.sort_by(|a, b| b.surge.total_cmp(&a.surge));
    }

    Ok(SurgeReport {
        daily,
        weekly,
        monthly,
    })
}

/// Print the report for `date`, defaulting to the latest collected date.
pub fn run(db: &NovelDb, date: Option<NaiveDate>, json: bool) -> Result<(), Box<dyn Error>> {
    let date = match date {
        Some(date) => date,
        None => db
            .latest_ranking_date()?
            .ok_or("no ranking data in this database")?,
    };

    let rankings = group_rankings(db.rankings_by_date(date)?);
    let surge = build_surge_report(db, date)?;
    let report = DailyReport {
        date,
        rankings,
        surge,
    };

    if json {
        report::print_json(&report)
    } else {
        report::print_report(&report);
        Ok(())
    }
}

/// List dates that have ranking data, newest first.
pub fn run_list(db: &NovelDb, limit: usize, json: bool) -> Result<(), Box<dyn Error>> {
    let dates = db.available_ranking_dates(limit)?;
    if json {
        let strings: Vec<String> = dates.iter().map(|d| d.to_string()).collect();
        return report_helpers::print_json_stdout(&strings);
    }

    if dates.is_empty() {
        println!("No ranking data.");
        return Ok(());
    }
    for date in dates {
        println!("{date}");
    }
    Ok(())
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
