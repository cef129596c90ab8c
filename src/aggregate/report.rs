use std::collections::BTreeSet;

use serde::Serialize;

use super::AggregateStats;
use super::tiers::{PlatformAggregate, TIER_BANDS};
use crate::bucket::bucket_series;
use crate::format::{format_percent, format_views};
use crate::report_helpers::{self, separator};
use crate::series::SeriesPoint;

/// Days shown for one platform: the union of every tier's bucketed days.
fn table_days(aggregate: &PlatformAggregate, bucket_days: u32) -> Vec<u32> {
    let mut days: BTreeSet<u32> = BTreeSet::new();
    for series in tier_columns(aggregate).into_iter().flatten() {
        for point in bucket_series(series, bucket_days) {
            days.insert(point.days_since_launch);
        }
    }
    days.into_iter().collect()
}

fn tier_columns(aggregate: &PlatformAggregate) -> [Option<&[SeriesPoint]>; 5] {
    [
        Some(aggregate.top20.as_slice()),
        Some(aggregate.top40.as_slice()),
        Some(aggregate.top60.as_slice()),
        Some(aggregate.top80.as_slice()),
        aggregate.my_novel.as_deref(),
    ]
}

/// A dense series is indexed by day; days past its end have no value.
fn value_at(series: &[SeriesPoint], day: u32) -> Option<f64> {
    series.get(day as usize).map(|point| point.cumulative_views)
}

pub fn print_report(stats: &AggregateStats, bucket_days: u32) {
    if stats.platforms.is_empty() {
        println!("No novels with launch dates and view data.");
        return;
    }

    for (platform, aggregate) in &stats.platforms {
        let sep = separator(72);
        println!("{platform} ({} ranked novels)", aggregate.total_novels);
        if let Some(percentile) = aggregate.percentile_top {
            println!("your novel sits in the top {}", format_percent(percentile));
        }
        println!("{sep}");
        let mut header = format!(" {:>5}", "Day");
        for (name, _, _) in TIER_BANDS {
            header.push_str(&format!(" {:>11}", name));
        }
        header.push_str(&format!(" {:>11}", "mine"));
        println!("{header}");
        println!("{sep}");

        for day in table_days(aggregate, bucket_days) {
            let cells: Vec<String> = tier_columns(aggregate)
                .into_iter()
                .map(|column| {
                    column
                        .and_then(|series| value_at(series, day))
                        .map(format_views)
                        .unwrap_or_else(|| "-".to_string())
                })
                .collect();
            println!(
                " {:>5} {:>11} {:>11} {:>11} {:>11} {:>11}",
                day, cells[0], cells[1], cells[2], cells[3], cells[4]
            );
        }
        println!("{sep}");
        println!();
    }
    println!("Tier series are per-day medians of each percentile band, by total views.");
}

#[derive(Serialize)]
struct JsonPlatform<'a> {
    platform: &'a str,
    #[serde(flatten)]
    stats: &'a PlatformAggregate,
}

pub fn print_json(stats: &AggregateStats) -> Result<(), Box<dyn std::error::Error>> {
    let output: Vec<JsonPlatform> = stats
        .platforms
        .iter()
        .map(|(platform, aggregate)| JsonPlatform {
            platform,
            stats: aggregate,
        })
        .collect();
    report_helpers::print_json_stdout(&output)
}
