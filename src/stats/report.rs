use serde::Serialize;

use super::NovelStats;
use crate::format::{format_date_short, format_delta, format_percent, format_views};
use crate::report_helpers::{self, separator};
use crate::series::SeriesPoint;
use crate::surge::Surge;

/// Days worth calling out in the growth table, when the series reaches
/// them.
const MILESTONE_DAYS: &[u32] = &[1, 7, 14, 30, 60, 90, 180, 365];

/// Milestone days the series covers, always ending on the final day.
fn milestones(series: &[SeriesPoint]) -> Vec<u32> {
    let Some(last) = series.last() else {
        return Vec::new();
    };
    let mut days: Vec<u32> = MILESTONE_DAYS
        .iter()
        .copied()
        .filter(|day| *day < last.days_since_launch)
        .collect();
    days.push(last.days_since_launch);
    days
}

fn surge_line(label: &str, surge: &Option<Surge>) -> String {
    match surge {
        Some(s) => format!(
            "{label} {} ({})",
            format_delta(s.surge),
            format_percent(s.surge_rate)
        ),
        None => format!("{label} -"),
    }
}

pub fn print_report(stats: &NovelStats) {
    let novel = &stats.novel;
    println!("{} by {} ({})", novel.title, novel.author, stats.canonical_platform);
    match novel.launch_date {
        Some(launch) => println!("launched {launch}"),
        None => println!("launch date unknown (series starts at first snapshot)"),
    }

    if stats.built.series.is_empty() {
        println!("No view data collected yet.");
        return;
    }

    let tracked_days = stats.built.series.len() - 1;
    println!(
        "{} days tracked, total views {}",
        tracked_days,
        format_views(stats.built.total_views)
    );
    println!();

    let sep = separator(30);
    println!("{sep}");
    println!(" {:>5} {:>12}", "Day", "Views");
    println!("{sep}");
    for day in milestones(&stats.built.series) {
        if let Some(point) = stats.built.series.get(day as usize) {
            println!(" {:>5} {:>12}", day, format_views(point.cumulative_views));
        }
    }
    println!("{sep}");
    println!();

    println!("{}", surge_line("daily:  ", &stats.surge_daily));
    println!("{}", surge_line("weekly: ", &stats.surge_weekly));
    println!("{}", surge_line("monthly:", &stats.surge_monthly));
    println!();

    if !stats.recent.is_empty() {
        let sep = separator(44);
        println!("Recent snapshots");
        println!("{sep}");
        println!(" {:>6} {:>12} {:>10} {:>10}", "Date", "Views", "Change", "Revenue");
        println!("{sep}");
        let mut prev: Option<f64> = None;
        for stat in &stats.recent {
            let change = match prev {
                Some(previous) => format_delta(stat.views - previous),
                None => "-".to_string(),
            };
            let revenue = stat
                .revenue
                .map(format_views)
                .unwrap_or_else(|| "-".to_string());
            println!(
                " {:>6} {:>12} {:>10} {:>10}",
                format_date_short(stat.date),
                format_views(stat.views),
                change,
                revenue
            );
            prev = Some(stat.views);
        }
        println!("{sep}");
    }
}

#[derive(Serialize)]
struct JsonStats<'a> {
    novel_id: i64,
    title: &'a str,
    author: &'a str,
    platform: &'a str,
    launch_date: Option<String>,
    total_views: f64,
    series: &'a [SeriesPoint],
    surge_daily: &'a Option<Surge>,
    surge_weekly: &'a Option<Surge>,
    surge_monthly: &'a Option<Surge>,
}

pub fn print_json(stats: &NovelStats) -> Result<(), Box<dyn std::error::Error>> {
    let output = JsonStats {
        novel_id: stats.novel.id,
        title: &stats.novel.title,
        author: &stats.novel.author,
        platform: &stats.canonical_platform,
        launch_date: stats.novel.launch_date.map(|d| d.to_string()),
        total_views: stats.built.total_views,
        series: &stats.built.series,
        surge_daily: &stats.surge_daily,
        surge_weekly: &stats.surge_weekly,
        surge_monthly: &stats.surge_monthly,
    };
    report_helpers::print_json_stdout(&output)
}
