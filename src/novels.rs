//! Tracked-novel listing grouped by canonical platform.

use std::collections::{BTreeMap, BTreeSet};
use std::error::Error;

use serde::Serialize;

use crate::db::{Novel, NovelDb};
use crate::format::pad_display;
use crate::platform;
use crate::report_helpers::{self, max_column_width, separator};

fn grouped_novels(novels: Vec<Novel>) -> Vec<(String, Vec<Novel>)> {
    let mut groups: BTreeMap<String, Vec<Novel>> = BTreeMap::new();
    for novel in novels {
        let canonical = platform::normalize(novel.platform.as_deref());
        groups.entry(canonical).or_default().push(novel);
    }
    let seen: BTreeSet<String> = groups.keys().cloned().collect();
    platform::display_order(&seen)
        .into_iter()
        .filter_map(|name| groups.remove(&name).map(|list| (name, list)))
        .collect()
}

pub fn run(db: &NovelDb, json: bool) -> Result<(), Box<dyn Error>> {
    let grouped = grouped_novels(db.all_novels()?);

    if json {
        #[derive(Serialize)]
        struct JsonNovel<'a> {
            id: i64,
            title: &'a str,
            author: &'a str,
            platform: &'a str,
            genre: Option<&'a str>,
            launch_date: Option<String>,
            novel_url: Option<&'a str>,
        }
        let output: Vec<JsonNovel> = grouped
            .iter()
            .flat_map(|(platform, list)| {
                list.iter().map(move |novel| JsonNovel {
                    id: novel.id,
                    title: &novel.title,
                    author: &novel.author,
                    platform,
                    genre: novel.genre.as_deref(),
                    launch_date: novel.launch_date.map(|d| d.to_string()),
                    novel_url: novel.novel_url.as_deref(),
                })
            })
            .collect();
        return report_helpers::print_json_stdout(&output);
    }

    if grouped.is_empty() {
        println!("No novels in this database.");
        return Ok(());
    }

    for (platform, list) in &grouped {
        let title_width = max_column_width(list.iter().map(|n| n.title.as_str()), 12);
        let sep = separator((title_width + 36).max(60));

        println!("{platform} ({})", list.len());
        println!("{sep}");
        println!(
            " {:>5}  {}  {:>12} {:>10}",
            "Id",
            pad_display("Title", title_width),
            "Author",
            "Launched"
        );
        println!("{sep}");
        for novel in list {
            let launched = novel
                .launch_date
                .map(|d| d.to_string())
                .unwrap_or_else(|| "-".to_string());
            println!(
                " {:>5}  {}  {:>12} {:>10}",
                novel.id,
                pad_display(&novel.title, title_width),
                novel.author,
                launched
            );
        }
        println!("{sep}");
        println!();
    }
    Ok(())
}
