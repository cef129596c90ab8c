use serde::Serialize;

use super::{DailyReport, SurgeRow, positive_only};
use crate::db::RankingRow;
use crate::format::{format_percent, format_views, pad_display};
use crate::report_helpers::{self, max_column_width, separator};

pub fn print_report(report: &DailyReport) {
    println!("Report for {}", report.date);
    println!();

    if report.rankings.is_empty() {
        println!("No ranking data for this date.");
    }
    for (platform, rows) in &report.rankings {
        print_ranking_section(platform, rows);
    }

    print_surge_section("Daily surge (vs previous day)", &report.surge.daily);
    print_surge_section("Weekly surge (vs 7 days ago)", &report.surge.weekly);
    print_surge_section("Monthly surge (vs last month end)", &report.surge.monthly);
}

fn print_ranking_section(platform: &str, rows: &[RankingRow]) {
    let title_width = max_column_width(rows.iter().map(|r| r.title.as_str()), 12);
    let sep = separator((title_width + 40).max(60));

    println!("{platform}");
    println!("{sep}");
    println!(
        " {:>4}  {}  {:>12} {:>10}",
        "Rank",
        pad_display("Title", title_width),
        "Views",
        "Type"
    );
    println!("{sep}");
    for row in rows {
        let views = row.views.map(format_views).unwrap_or_else(|| "-".to_string());
        println!(
            " {:>4}  {}  {:>12} {:>10}",
            row.rank,
            pad_display(&row.title, title_width),
            views,
            row.ranking_type
        );
    }
    println!("{sep}");
    println!();
}

fn print_surge_section(heading: &str, rows: &[SurgeRow]) {
    // Declines and stalls are computed but not shown here.
    let shown = positive_only(rows);

    println!("{heading}");
    if shown.is_empty() {
        println!("  no risers");
        println!();
        return;
    }

    let title_width = max_column_width(shown.iter().map(|r| r.title.as_str()), 12);
    let sep = separator((title_width + 48).max(68));

    println!("{sep}");
    println!(
        " {}  {:>10} {:>12} {:>10} {:>8}",
        pad_display("Title", title_width),
        "Platform",
        "Views",
        "Surge",
        "Rate"
    );
    println!("{sep}");
    for row in &shown {
        println!(
            " {}  {:>10} {:>12} {:>10} {:>8}",
            pad_display(&row.title, title_width),
            row.platform,
            format_views(row.latest_views),
            format_views(row.surge),
            format_percent(row.surge_rate)
        );
    }
    println!("{sep}");
    println!();
}

#[derive(Serialize)]
struct JsonRanking<'a> {
    platform: &'a str,
    rank: i64,
    title: &'a str,
    author: Option<&'a str>,
    genre: Option<&'a str>,
    ranking_type: &'a str,
    views: Option<f64>,
    novel_id: Option<i64>,
}

#[derive(Serialize)]
struct JsonSurge<'a> {
    novel_id: i64,
    title: &'a str,
    platform: &'a str,
    author: &'a str,
    latest_views: f64,
    surge: f64,
    surge_rate: f64,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    date: String,
    rankings: Vec<JsonRanking<'a>>,
    surge_daily: Vec<JsonSurge<'a>>,
    surge_weekly: Vec<JsonSurge<'a>>,
    surge_monthly: Vec<JsonSurge<'a>>,
}

fn json_surge(rows: &[SurgeRow]) -> Vec<JsonSurge<'_>> {
    rows.iter()
        .map(|row| JsonSurge {
            novel_id: row.novel_id,
            title: &row.title,
            platform: &row.platform,
            author: &row.author,
            latest_views: row.latest_views,
            surge: row.surge,
            surge_rate: row.surge_rate,
        })
        .collect()
}

pub fn print_json(report: &DailyReport) -> Result<(), Box<dyn std::error::Error>> {
    let rankings: Vec<JsonRanking> = report
        .rankings
        .iter()
        .flat_map(|(platform, rows)| {
            rows.iter().map(move |row| JsonRanking {
                platform,
                rank: row.rank,
                title: &row.title,
                author: row.author.as_deref(),
                genre: row.genre.as_deref(),
                ranking_type: &row.ranking_type,
                views: row.views,
                novel_id: row.novel_id,
            })
        })
        .collect();

    let output = JsonReport {
        date: report.date.to_string(),
        rankings,
        surge_daily: json_surge(&report.surge.daily),
        surge_weekly: json_surge(&report.surge.weekly),
        surge_monthly: json_surge(&report.surge.monthly),
    };

    report_helpers::print_json_stdout(&output)
}
