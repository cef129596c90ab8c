//! Aggregate view: percentile-tier median growth per platform.
//!
//! Every novel with a known launch date is normalized onto the common
//! "days since launch" axis, ranked inside its platform by total views,
//! and folded into tier median series. One novel can be designated "mine"
//! to overlay its own series and report its percentile standing.

mod report;
pub mod tiers;

use std::collections::{BTreeMap, BTreeSet};
use std::error::Error;

use chrono::NaiveDate;

use crate::db::NovelDb;
use crate::platform;
use crate::series;
use tiers::{NovelSeries, PlatformAggregate};

/// Tier aggregates for every platform with ranked novels, display order.
pub struct AggregateStats {
    pub platforms: Vec<(String, PlatformAggregate)>,
}

/// Build tier aggregates for the whole population.
pub fn build(db: &NovelDb, my_novel_id: Option<i64>) -> Result<AggregateStats, Box<dyn Error>> {
    let novels = db.novels_with_launch_date()?;

    let mut stats_by_novel: BTreeMap<i64, Vec<(NaiveDate, f64)>> =
        novels.iter().map(|novel| (novel.id, Vec::new())).collect();
    for (novel_id, date, views) in db.all_stats_for_aggregate()? {
        if let Some(observations) = stats_by_novel.get_mut(&novel_id) {
            observations.push((date, views));
        }
    }

    let mut by_platform: BTreeMap<String, Vec<NovelSeries>> = BTreeMap::new();
    for novel in &novels {
        let Some(observations) = stats_by_novel.get(&novel.id) else {
            continue;
        };
        if observations.is_empty() {
            continue;
        }
        let built = series::build(novel.launch_date, observations);
        let canonical = platform::normalize(novel.platform.as_deref());
        by_platform.entry(canonical).or_default().push(NovelSeries {
            novel_id: novel.id,
            total_views: built.total_views,
            series: built.series,
        });
    }

    let seen: BTreeSet<String> = by_platform.keys().cloned().collect();
    let mut platforms = Vec::new();
    for name in platform::display_order(&seen) {
        let Some(list) = by_platform.remove(&name) else {
            continue;
        };
        let aggregated = tiers::aggregate(&list, my_novel_id);
        // A platform whose every novel is still at zero views has no
        // ranked population to show.
        if aggregated.total_novels == 0 {
            continue;
        }
        platforms.push((name, aggregated));
    }

    Ok(AggregateStats { platforms })
}

pub fn run(
    db: &NovelDb,
    my_novel_id: Option<i64>,
    bucket_days: u32,
    json: bool,
) -> Result<(), Box<dyn Error>> {
    let stats = build(db, my_novel_id)?;
    if json {
        report::print_json(&stats)
    } else {
        report::print_report(&stats, bucket_days);
        Ok(())
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
