//! Dense day-series normalization.
//!
//! Observations arrive as sparse (day, value) points. Charts and medians
//! need one value per day, with cumulative counts never decreasing, so
//! missing days carry the last value forward and apparent drops clamp to
//! the running maximum. Both the per-novel series builder and the tier
//! aggregator fill through this one primitive.

use std::collections::BTreeMap;

/// Expand sparse day → value points into one value per day in `0..=max_day`.
///
/// Days without a point repeat the previous value; a point below the
/// running maximum is clamped up to it. Days before the first point are 0.
/// The result always holds `max_day + 1` values.
pub fn forward_fill_monotonic(points: &BTreeMap<u32, f64>, max_day: u32) -> Vec<f64> {
    let mut filled = Vec::with_capacity(max_day as usize + 1);
    let mut prev = 0.0_f64;
    for day in 0..=max_day {
        if let Some(&v) = points.get(&day) {
            prev = prev.max(v);
        }
        filled.push(prev);
    }
    filled
}
