use serde::Serialize;

use super::{NewRookie, ReadThrough, RookieReport, SectionSurge};
use crate::format::{format_delta, format_percent, format_views, pad_display};
use crate::report_helpers::{self, max_column_width, separator};

pub fn print_report(rookie_report: &RookieReport) {
    println!("Rookie monitor for {}", rookie_report.date);
    println!();

    if rookie_report.new_rookies.is_empty() {
        println!("No new rookie board entries today.");
        println!();
    } else {
        print_new_rookies(&rookie_report.new_rookies);
    }

    for (label, members) in &rookie_report.sections {
        print_section(label, members);
    }

    if !rookie_report.top_read_through.is_empty() {
        print_read_through(&rookie_report.top_read_through);
    }
}

fn print_new_rookies(rookies: &[NewRookie]) {
    let title_width = max_column_width(rookies.iter().map(|r| r.title.as_str()), 12);
    let sep = separator((title_width + 36).max(60));

    println!("New on the rookie board");
    println!("{sep}");
    println!(
        " {:>4}  {}  {:>12} {:>10}",
        "Rank",
        pad_display("Title", title_width),
        "Author",
        "Genre"
    );
    println!("{sep}");
    for rookie in rookies {
        println!(
            " {:>4}  {}  {:>12} {:>10}",
            rookie.rank,
            pad_display(&rookie.title, title_width),
            rookie.author,
            rookie.genre
        );
    }
    println!("{sep}");
    println!();
}

fn print_section(label: &str, members: &[SectionSurge]) {
    println!("{label}");
    if members.is_empty() {
        println!("  no tracked members");
        println!();
        return;
    }

    let title_width = max_column_width(members.iter().map(|m| m.title.as_str()), 12);
    let sep = separator((title_width + 46).max(68));

    println!("{sep}");
    println!(
        " {}  {:>12} {:>10} {:>8} {:>8}",
        pad_display("Title", title_width),
        "Views",
        "Surge",
        "Rate",
        "Read%"
    );
    println!("{sep}");
    for member in members {
        let read_through = member
            .read_through
            .map(format_percent)
            .unwrap_or_else(|| "-".to_string());
        println!(
            " {}  {:>12} {:>10} {:>8} {:>8}",
            pad_display(&member.title, title_width),
            format_views(member.views_today),
            format_delta(member.surge),
            format_percent(member.surge_rate),
            read_through
        );
    }
    println!("{sep}");
    println!();
}

fn print_read_through(rows: &[ReadThrough]) {
    let title_width = max_column_width(rows.iter().map(|r| r.title.as_str()), 12);
    let sep = separator((title_width + 30).max(60));

    println!("Best read-through rates");
    println!("{sep}");
    println!(
        " {}  {:>8} {:>12}",
        pad_display("Title", title_width),
        "Read%",
        "Views"
    );
    println!("{sep}");
    for row in rows {
        let views = row.views.map(format_views).unwrap_or_else(|| "-".to_string());
        println!(
            " {}  {:>8} {:>12}",
            pad_display(&row.title, title_width),
            format_percent(row.read_through),
            views
        );
    }
    println!("{sep}");
}

#[derive(Serialize)]
struct JsonNewRookie<'a> {
    rank: i64,
    title: &'a str,
    author: &'a str,
    genre: &'a str,
    novel_url: &'a str,
    novel_id: i64,
}

#[derive(Serialize)]
struct JsonSectionMember<'a> {
    novel_id: i64,
    title: &'a str,
    author: &'a str,
    views_today: f64,
    views_prev: f64,
    surge: f64,
    surge_rate: f64,
    read_through: Option<f64>,
}

#[derive(Serialize)]
struct JsonSection<'a> {
    label: &'a str,
    members: Vec<JsonSectionMember<'a>>,
}

#[derive(Serialize)]
struct JsonReadThrough<'a> {
    novel_id: i64,
    title: &'a str,
    author: &'a str,
    read_through: f64,
    views: Option<f64>,
}

#[derive(Serialize)]
struct JsonRookieReport<'a> {
    date: String,
    new_rookies: Vec<JsonNewRookie<'a>>,
    sections: Vec<JsonSection<'a>>,
    top_read_through: Vec<JsonReadThrough<'a>>,
}

pub fn print_json(rookie_report: &RookieReport) -> Result<(), Box<dyn std::error::Error>> {
    let output = JsonRookieReport {
        date: rookie_report.date.to_string(),
        new_rookies: rookie_report
            .new_rookies
            .iter()
            .map(|rookie| JsonNewRookie {
                rank: rookie.rank,
                title: &rookie.title,
                author: &rookie.author,
                genre: &rookie.genre,
                novel_url: &rookie.novel_url,
                novel_id: rookie.novel_id,
            })
            .collect(),
        sections: rookie_report
            .sections
            .iter()
            .map(|(label, members)| JsonSection {
                label,
                members: members
                    .iter()
                    .map(|member| JsonSectionMember {
                        novel_id: member.novel_id,
                        title: &member.title,
                        author: &member.author,
                        views_today: member.views_today,
                        views_prev: member.views_prev,
                        surge: member.surge,
                        surge_rate: member.surge_rate,
                        read_through: member.read_through,
                    })
                    .collect(),
            })
            .collect(),
        top_read_through: rookie_report
            .top_read_through
            .iter()
            .map(|row| JsonReadThrough {
                novel_id: row.novel_id,
                title: &row.title,
                author: &row.author,
                read_through: row.read_through,
                views: row.views,
            })
            .collect(),
    };
    report_helpers::print_json_stdout(&output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample() -> RookieReport {
        RookieReport {
            date: NaiveDate::parse_from_str("2024-03-05", "%Y-%m-%d").unwrap(),
            new_rookies: vec![NewRookie {
                rank: 2,
                title: "새로운 강자".to_string(),
                author: "kim".to_string(),
                genre: "fantasy".to_string(),
                novel_url: "https://example.com/9".to_string(),
                novel_id: 9,
            }],
            sections: vec![(
                "Rookie best".to_string(),
                vec![SectionSurge {
                    novel_id: 9,
                    title: "새로운 강자".to_string(),
                    author: "kim".to_string(),
                    views_today: 5_000.0,
                    views_prev: 2_000.0,
                    surge: 3_000.0,
                    surge_rate: 150.0,
                    read_through: Some(41.5),
                }],
            )],
            top_read_through: vec![ReadThrough {
                novel_id: 9,
                title: "새로운 강자".to_string(),
                author: "kim".to_string(),
                read_through: 41.5,
                views: Some(5_000.0),
            }],
        }
    }

    #[test]
    fn print_report_does_not_panic() {
        print_report(&sample());
    }

    #[test]
    fn print_report_empty_sections() {
        let empty = RookieReport {
            date: NaiveDate::parse_from_str("2024-03-05", "%Y-%m-%d").unwrap(),
            new_rookies: Vec::new(),
            sections: vec![("Rookie best".to_string(), Vec::new())],
            top_read_through: Vec::new(),
        };
        print_report(&empty);
    }

    #[test]
    fn print_json_does_not_panic() {
        print_json(&sample()).unwrap();
    }
}
