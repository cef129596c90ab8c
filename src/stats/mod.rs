//! Single-novel view: normalized growth series, surge summary, recent
//! snapshots.

mod report;

use std::error::Error;

use crate::db::{DailyStat, Novel, NovelDb};
use crate::platform;
use crate::series::{self, BuiltSeries};
use crate::surge::{self, Horizon, Surge};

/// How many raw snapshots the recent table shows.
const RECENT_ROWS: usize = 14;

#[derive(Debug)]
pub struct NovelStats {
    pub novel: Novel,
    pub canonical_platform: String,
    pub built: BuiltSeries,
    /// Most recent raw snapshots, oldest first.
    pub recent: Vec<DailyStat>,
    pub surge_daily: Option<Surge>,
    pub surge_weekly: Option<Surge>,
    pub surge_monthly: Option<Surge>,
}

pub fn build(db: &NovelDb, novel_id: i64) -> Result<NovelStats, Box<dyn Error>> {
    let novel = db
        .novel_by_id(novel_id)?
        .ok_or_else(|| format!("novel {novel_id} not found"))?;
    let stats = db.daily_stats(novel_id)?;
    let observations: Vec<_> = stats.iter().map(|stat| (stat.date, stat.views)).collect();

    let built = series::build(novel.launch_date, &observations);

    // Surge horizons are anchored at the novel's own latest snapshot, so
    // the view stays meaningful for titles whose collection has lapsed.
    let latest_date = observations.iter().map(|(date, _)| *date).max();
    let (surge_daily, surge_weekly, surge_monthly) = match latest_date {
        Some(target) => (
            surge::compute(&observations, target, Horizon::Daily),
            surge::compute(&observations, target, Horizon::Weekly),
            surge::compute(&observations, target, Horizon::Monthly),
        ),
        None => (None, None, None),
    };

    let canonical_platform = platform::normalize(novel.platform.as_deref());
    let recent_start = stats.len().saturating_sub(RECENT_ROWS);
    Ok(NovelStats {
        novel,
        canonical_platform,
        built,
        recent: stats[recent_start..].to_vec(),
        surge_daily,
        surge_weekly,
        surge_monthly,
    })
}

pub fn run(db: &NovelDb, novel_id: i64, json: bool) -> Result<(), Box<dyn Error>> {
    let stats = build(db, novel_id)?;
    if json {
        report::print_json(&stats)
    } else {
        report::print_report(&stats);
        Ok(())
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
