//! "Days since launch" growth series.
//!
//! Snapshots are collected per novel on irregular calendar dates, each
//! title starting on its own date and with gaps where collection skipped a
//! day. To make titles comparable, raw rows are re-keyed to whole days
//! since the novel's effective launch and expanded into a dense, monotonic
//! series anchored at (0, 0).

pub mod dense;

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

/// One point of a normalized series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub days_since_launch: u32,
    pub cumulative_views: f64,
}

/// A novel's normalized series plus its final cumulative total.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuiltSeries {
    pub total_views: f64,
    pub series: Vec<SeriesPoint>,
}

impl BuiltSeries {
    fn empty() -> Self {
        BuiltSeries {
            total_views: 0.0,
            series: Vec::new(),
        }
    }
}

/// Build the dense growth series for one novel.
///
/// Effective launch is the explicit launch date when known, else the
/// earliest observation date. Observations before launch are dropped and
/// several on one day keep the maximum value. Day 0 is pinned to 0 so
/// every series shares the same origin; the gap between launch and the
/// first collected value is bridged by linear interpolation, later gaps by
/// carrying the previous value forward, and raw decreases clamp to the
/// running maximum. `total_views` is the final day's value.
pub fn build(launch_date: Option<NaiveDate>, observations: &[(NaiveDate, f64)]) -> BuiltSeries {
    if observations.is_empty() {
        return BuiltSeries::empty();
    }

    let earliest = observations.iter().map(|(date, _)| *date).min();
    let Some(launch) = launch_date.or(earliest) else {
        return BuiltSeries::empty();
    };

    let mut by_day: BTreeMap<u32, f64> = BTreeMap::new();
    for (date, views) in observations {
        let offset = (*date - launch).num_days();
        if offset < 0 {
            continue;
        }
        let entry = by_day.entry(offset as u32).or_insert(*views);
        if *views > *entry {
            *entry = *views;
        }
    }

    // First collected day, counting a day-0 row: when day 0 itself was
    // observed there is no pre-coverage gap to interpolate.
    let Some((&first_day, &first_value)) = by_day.first_key_value() else {
        return BuiltSeries::empty();
    };

    // Day 0 is pinned to 0 below; a raw value there never contributes.
    by_day.remove(&0);
    if by_day.is_empty() {
        return BuiltSeries {
            total_views: 0.0,
            series: vec![SeriesPoint {
                days_since_launch: 0,
                cumulative_views: 0.0,
            }],
        };
    }

    let max_day = by_day.keys().next_back().copied().unwrap_or(first_day);
    let mut values = dense::forward_fill_monotonic(&by_day, max_day);

    // Launch-to-first-collection gap: a straight line from 0 up to the
    // first collected value, floored to whole views.
    for day in 1..first_day {
        values[day as usize] = (first_value * day as f64 / first_day as f64).floor();
    }

    let total_views = values.last().copied().unwrap_or(0.0);
    let series = values
        .into_iter()
        .enumerate()
        .map(|(day, cumulative_views)| SeriesPoint {
            days_since_launch: day as u32,
            cumulative_views,
        })
        .collect();

    BuiltSeries {
        total_views,
        series,
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
