//! Report formatting helpers.
//!
//! View counts compact to K/M/B above four digits; rates and percentiles
//! round to one decimal everywhere. Column widths are computed in terminal
//! cells, not chars: titles and author names are frequently CJK and
//! occupy two cells per character.

use chrono::NaiveDate;
use unicode_width::UnicodeWidthStr;

/// Round to one decimal place, the convention for every rate and
/// percentile figure in reports.
pub fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

/// Compact view count: `1.2B`, `3.4M`, `12.5K`, grouped digits below 10K.
pub fn format_views(v: f64) -> String {
    let magnitude = v.abs();
    if magnitude >= 1_000_000_000.0 {
        format!("{:.1}B", v / 1_000_000_000.0)
    } else if magnitude >= 1_000_000.0 {
        format!("{:.1}M", v / 1_000_000.0)
    } else if magnitude >= 10_000.0 {
        format!("{:.1}K", v / 1_000.0)
    } else {
        group_thousands(v.round() as i64)
    }
}

/// Signed delta: `+12.5K`, `-340`.
pub fn format_delta(v: f64) -> String {
    let sign = if v >= 0.0 { "+" } else { "-" };
    format!("{sign}{}", format_views(v.abs()))
}

/// One-decimal percentage with sign carried through: `33.3%`, `-5.0%`.
pub fn format_percent(v: f64) -> String {
    format!("{v:.1}%")
}

/// `2024-03-05` → `03.05` for narrow date columns.
pub fn format_date_short(date: NaiveDate) -> String {
    date.format("%m.%d").to_string()
}

fn group_thousands(n: i64) -> String {
    let digits = n.abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if n < 0 { format!("-{grouped}") } else { grouped }
}

/// Width of a string in terminal cells.
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Left-align `s` within `width` terminal cells, padding with spaces.
/// Strings already wider than `width` are returned as-is.
pub fn pad_display(s: &str, width: usize) -> String {
    let w = display_width(s);
    if w >= width {
        s.to_string()
    } else {
        format!("{s}{}", " ".repeat(width - w))
    }
}
