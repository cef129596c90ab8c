//! Side-by-side comparison of several novels on the shared
//! days-since-launch axis.

mod report;

use std::error::Error;

use crate::db::NovelDb;
use crate::platform;
use crate::series::{self, SeriesPoint};

#[derive(Debug)]
pub struct CompareRow {
    pub novel_id: i64,
    pub title: String,
    pub platform: String,
    pub total_views: f64,
    pub series: Vec<SeriesPoint>,
}

/// Build one normalized series per requested novel, best total first.
/// An unknown id is an error; a novel without data compares as all-zero.
pub fn build(db: &NovelDb, novel_ids: &[i64]) -> Result<Vec<CompareRow>, Box<dyn Error>> {
    let mut rows = Vec::with_capacity(novel_ids.len());
    for &novel_id in novel_ids {
        let novel = db
            .novel_by_id(novel_id)?
            .ok_or_else(|| format!("novel {novel_id} not found"))?;
        let observations = db.observations(novel_id)?;
        let built = series::build(novel.launch_date, &observations);
        rows.push(CompareRow {
            novel_id,
            title: novel.title,
            platform: platform::normalize(novel.platform.as_deref()),
            total_views: built.total_views,
            series: built.series,
        });
    }
    rows.sort_by(|a, b| b.total_views.total_cmp(&a.total_views));
    Ok(rows)
}

pub fn run(db: &NovelDb, novel_ids: &[i64], json: bool) -> Result<(), Box<dyn Error>> {
    if novel_ids.len() < 2 {
        return Err("compare needs at least two novel ids".into());
    }
    let rows = build(db, novel_ids)?;
    if json {
        report::print_json(&rows)
    } else {
        report::print_report(&rows);
        Ok(())
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
