//! Percentile-tier median aggregation.
//!
//! Novels on one platform are ranked by final cumulative views and cut
//! into percentile bands; each band is summarized by the per-day median of
//! its members' normalized series. Members launched at different times and
//! tracked for different spans, so every member is virtually extended over
//! the band's full day range (forward-fill, monotonic clamp) before the
//! median is taken, and the median series itself is clamped monotonic.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::format::round1;
use crate::series::SeriesPoint;
use crate::series::dense::forward_fill_monotonic;

/// Percentile bands in display order. The last band closes at 100 so the
/// four tiers partition every ranked novel; the upstream viewer cut it at
/// 80 and silently dropped the bottom fifth from all charts.
pub const TIER_BANDS: &[(&str, u32, u32)] = &[
    ("top20", 0, 20),
    ("top40", 20, 40),
    ("top60", 40, 60),
    ("top80", 60, 100),
];

/// One novel's input to aggregation.
#[derive(Debug, Clone)]
pub struct NovelSeries {
    pub novel_id: i64,
    pub total_views: f64,
    pub series: Vec<SeriesPoint>,
}

/// Tier medians for one platform.
#[derive(Debug, Clone, Serialize)]
pub struct PlatformAggregate {
    pub top20: Vec<SeriesPoint>,
    pub top40: Vec<SeriesPoint>,
    pub top60: Vec<SeriesPoint>,
    pub top80: Vec<SeriesPoint>,
    pub my_novel: Option<Vec<SeriesPoint>>,
    pub percentile_top: Option<f64>,
    pub total_novels: usize,
}

/// Slice bounds for the band `[start_pct, end_pct)` over `n` ranked
/// novels. Floor cuts with a one-past-start minimum keep every band
/// non-empty for any `n >= 1`, at the cost of overlap for very small `n`.
pub fn tier_bounds(n: usize, start_pct: u32, end_pct: u32) -> (usize, usize) {
    let start = (n * start_pct as usize / 100).min(n.saturating_sub(1));
    let end = (n * end_pct as usize / 100).max(start + 1).min(n);
    (start, end)
}

/// Median of `values`; averages the two middle values for even counts.
fn median(values: &mut [f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.sort_by(|a, b| a.total_cmp(b));
    let mid = values.len() / 2;
    if values.len() % 2 == 1 {
        values[mid]
    } else {
        (values[mid - 1] + values[mid]) / 2.0
    }
}

/// Per-day median across member series, each forward-filled over the
/// group's full day range and clamped against its own running maximum.
/// The median series is clamped monotonic as well, and anchored at (0, 0)
/// should its first point ever not be day 0.
pub fn aggregate_series(members: &[&[SeriesPoint]]) -> Vec<SeriesPoint> {
    let populated: Vec<&[SeriesPoint]> = members
        .iter()
        .copied()
        .filter(|series| !series.is_empty())
        .collect();
    if populated.is_empty() {
        return Vec::new();
    }

    let max_day = populated
        .iter()
        .flat_map(|series| series.iter())
        .map(|point| point.days_since_launch)
        .max()
        .unwrap_or(0);

    let filled: Vec<Vec<f64>> = populated
        .iter()
        .map(|series| {
            let points: BTreeMap<u32, f64> = series
                .iter()
                .map(|point| (point.days_since_launch, point.cumulative_views))
                .collect();
            forward_fill_monotonic(&points, max_day)
        })
        .collect();

    let mut aggregated = Vec::with_capacity(max_day as usize + 1);
    let mut prev_median = 0.0_f64;
    for day in 0..=max_day as usize {
        let mut column: Vec<f64> = filled.iter().map(|values| values[day]).collect();
        let day_median = median(&mut column).max(prev_median);
        prev_median = day_median;
        aggregated.push(SeriesPoint {
            days_since_launch: day as u32,
            cumulative_views: day_median,
        });
    }

    if aggregated.first().is_some_and(|p| p.days_since_launch != 0) {
        aggregated.insert(
            0,
            SeriesPoint {
                days_since_launch: 0,
                cumulative_views: 0.0,
            },
        );
    }
    aggregated
}

/// Percentile figure for a ranked novel: "this title sits in the top X%
/// of its platform by total views", one decimal. Ties all share the rank
/// of the best-placed equal total.
pub fn percentile_top(ranked: &[&NovelSeries], total_views: f64) -> Option<f64> {
    if ranked.is_empty() {
        return None;
    }
    let strictly_better = ranked.iter().filter(|n| n.total_views > total_views).count();
    Some(round1((strictly_better + 1) as f64 / ranked.len() as f64 * 100.0))
}

/// Aggregate one platform's novels into tier medians.
///
/// Novels with no recorded growth carry no signal and are dropped before
/// ranking. The sort is stable, so equal totals keep their input order.
pub fn aggregate(novels: &[NovelSeries], my_novel_id: Option<i64>) -> PlatformAggregate {
    let mut ranked: Vec<&NovelSeries> = novels
        .iter()
        .filter(|novel| novel.total_views > 0.0)
        .collect();
    ranked.sort_by(|a, b| b.total_views.total_cmp(&a.total_views));
    let n = ranked.len();

    let tier = |start_pct: u32, end_pct: u32| -> Vec<SeriesPoint> {
        if n == 0 {
            return Vec::new();
        }
        let (start, end) = tier_bounds(n, start_pct, end_pct);
        let members: Vec<&[SeriesPoint]> = ranked[start..end]
            .iter()
            .map(|novel| novel.series.as_slice())
            .collect();
        aggregate_series(&members)
    };

    let top20 = tier(0, 20);
    let top40 = tier(20, 40);
    let top60 = tier(40, 60);
    let top80 = tier(60, 100);

    let mine = my_novel_id.and_then(|id| ranked.iter().find(|novel| novel.novel_id == id));
    let (my_novel, percentile) = match mine {
        Some(novel) => (
            Some(novel.series.clone()),
            percentile_top(&ranked, novel.total_views),
        ),
        None => (None, None),
    };

    PlatformAggregate {
        top20,
        top40,
        top60,
        top80,
        my_novel,
        percentile_top: percentile,
        total_novels: n,
    }
}

#[cfg(test)]
#[path = "tiers_test.rs"]
mod tests;
