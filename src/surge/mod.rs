//! Short-horizon growth deltas.
//!
//! Compares a novel's latest snapshot against the closest earlier snapshot
//! near a per-horizon lookback date. Collection does not run every day, so
//! the lookback accepts the nearest observation inside a tolerance window
//! instead of demanding an exact date. The result keeps its sign; hiding
//! declines is a display policy applied by report assembly, not here.

use chrono::{Datelike, Days, NaiveDate};
use serde::Serialize;

use crate::format::round1;

/// Comparison window for a surge computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Horizon {
    Daily,
    Weekly,
    Monthly,
}

impl Horizon {
    /// Date the prior observation should sit near: yesterday, a week ago,
    /// or the last day of the previous calendar month.
    pub fn lookback(self, target: NaiveDate) -> NaiveDate {
        match self {
            Horizon::Daily => target - Days::new(1),
            Horizon::Weekly => target - Days::new(7),
            Horizon::Monthly => target.with_day(1).unwrap_or(target) - Days::new(1),
        }
    }

    /// Widest acceptable distance in days between the lookback date and
    /// the matched observation. Daily comparisons stay tight; weekly and
    /// monthly tolerate the larger gaps long-running collection shows.
    pub fn tolerance_days(self) -> i64 {
        match self {
            Horizon::Daily => 3,
            Horizon::Weekly => 10,
            Horizon::Monthly => 7,
        }
    }

}

/// Result of one surge comparison.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Surge {
    pub latest_views: f64,
    pub prior_views: f64,
    pub surge: f64,
    pub surge_rate: f64,
}

/// Observation closest to `target`, if any lands within `tolerance` days.
/// Ties keep the earlier entry in the list.
fn closest_observation(
    observations: &[(NaiveDate, f64)],
    target: NaiveDate,
    tolerance: i64,
) -> Option<(NaiveDate, f64)> {
    let mut best: Option<(i64, (NaiveDate, f64))> = None;
    for &(date, views) in observations {
        let diff = (date - target).num_days().abs();
        if diff > tolerance {
            continue;
        }
        if best.is_none_or(|(best_diff, _)| diff < best_diff) {
            best = Some((diff, (date, views)));
        }
    }
    best.map(|(_, observation)| observation)
}

/// Compute the surge for one novel's observations at `target_date`.
///
/// Returns `None` when there is no data at all, no prior observation lands
/// within the horizon's tolerance, or the matched prior is the latest
/// snapshot itself; callers report nothing rather than a zero surge.
pub fn compute(
    observations: &[(NaiveDate, f64)],
    target_date: NaiveDate,
    horizon: Horizon,
) -> Option<Surge> {
    let &(latest_date, latest_views) = observations.iter().max_by_key(|(date, _)| *date)?;
    let (prior_date, prior_views) = closest_observation(
        observations,
        horizon.lookback(target_date),
        horizon.tolerance_days(),
    )?;
    if prior_date == latest_date {
        return None;
    }

    let surge = latest_views - prior_views;
    let surge_rate = if prior_views > 0.0 {
        surge / prior_views * 100.0
    } else if surge > 0.0 {
        // Any growth from zero counts as 100%.
        100.0
    } else {
        0.0
    };

    Some(Surge {
        latest_views,
        prior_views,
        surge,
        surge_rate: round1(surge_rate),
    })
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
