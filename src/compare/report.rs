use serde::Serialize;

use super::CompareRow;
use crate::format::{format_views, pad_display};
use crate::report_helpers::{self, max_column_width, separator};
use crate::series::SeriesPoint;

/// Shared day columns: early milestones that at least one novel reached,
/// plus the overall final day.
const MILESTONE_DAYS: &[u32] = &[7, 30, 90, 180, 365];

fn column_days(rows: &[CompareRow]) -> Vec<u32> {
    let max_day = rows
        .iter()
        .filter_map(|row| row.series.last())
        .map(|point| point.days_since_launch)
        .max()
        .unwrap_or(0);

    let mut days: Vec<u32> = MILESTONE_DAYS
        .iter()
        .copied()
        .filter(|day| *day < max_day)
        .collect();
    if max_day > 0 {
        days.push(max_day);
    }
    days
}

fn cell(series: &[SeriesPoint], day: u32) -> String {
    match series.get(day as usize) {
        Some(point) => format_views(point.cumulative_views),
        // This novel's coverage ends before the column day.
        None => "-".to_string(),
    }
}

pub fn print_report(rows: &[CompareRow]) {
    if rows.is_empty() {
        println!("Nothing to compare.");
        return;
    }

    let days = column_days(rows);
    let title_width = max_column_width(rows.iter().map(|r| r.title.as_str()), 10);
    let sep = separator((title_width + 14 + days.len() * 11).max(60));

    println!("Growth by days since launch");
    println!("{sep}");
    print!(" {}  {:>10}", pad_display("Title", title_width), "Total");
    for day in &days {
        print!(" {:>10}", format!("d{day}"));
    }
    println!();
    println!("{sep}");
    for row in rows {
        print!(
            " {}  {:>10}",
            pad_display(&row.title, title_width),
            format_views(row.total_views)
        );
        for day in &days {
            print!(" {:>10}", cell(&row.series, *day));
        }
        println!();
    }
    println!("{sep}");
}

#[derive(Serialize)]
struct JsonCompare<'a> {
    novel_id: i64,
    title: &'a str,
    platform: &'a str,
    total_views: f64,
    series: &'a [SeriesPoint],
}

pub fn print_json(rows: &[CompareRow]) -> Result<(), Box<dyn std::error::Error>> {
    let output: Vec<JsonCompare> = rows
        .iter()
        .map(|row| JsonCompare {
            novel_id: row.novel_id,
            title: &row.title,
            platform: &row.platform,
            total_views: row.total_views,
            series: &row.series,
        })
        .collect();
    report_helpers::print_json_stdout(&output)
}
