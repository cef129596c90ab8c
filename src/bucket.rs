//! Day-axis bucketing for long series.
//!
//! Wide views (aggregate, compare) thin a dense series down to one row per
//! bucket of elapsed days, keeping the latest row inside each bucket. The
//! day-0 anchor row is always preserved at the front so every table still
//! starts from the common (0, 0) origin.

use std::collections::BTreeMap;

use crate::series::SeriesPoint;

/// Keep one row per `bucket_days`-wide bucket (the row with the highest
/// day), preserving the day-0 row. A zero width returns the input as-is.
pub fn bucket_series(points: &[SeriesPoint], bucket_days: u32) -> Vec<SeriesPoint> {
    if bucket_days == 0 || points.is_empty() {
        return points.to_vec();
    }

    let mut day_zero: Option<SeriesPoint> = None;
    let mut by_bucket: BTreeMap<u32, SeriesPoint> = BTreeMap::new();
    for point in points {
        if point.days_since_launch == 0 {
            day_zero = Some(*point);
            continue;
        }
        let bucket = point.days_since_launch / bucket_days * bucket_days;
        let entry = by_bucket.entry(bucket).or_insert(*point);
        if point.days_since_launch > entry.days_since_launch {
            *entry = *point;
        }
    }

    let mut thinned: Vec<SeriesPoint> = by_bucket.into_values().collect();
    if let Some(anchor) = day_zero {
        thinned.insert(0, anchor);
    }
    thinned
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(days: &[(u32, f64)]) -> Vec<SeriesPoint> {
        days.iter()
            .map(|&(days_since_launch, cumulative_views)| SeriesPoint {
                days_since_launch,
                cumulative_views,
            })
            .collect()
    }

    fn days(points: &[SeriesPoint]) -> Vec<u32> {
        points.iter().map(|p| p.days_since_launch).collect()
    }

    #[test]
    fn keeps_latest_row_per_bucket() {
        let input = series(&[(0, 0.0), (3, 30.0), (6, 60.0), (8, 80.0), (14, 140.0)]);
        let out = bucket_series(&input, 7);
        // Bucket [1,7): day 6; bucket [7,14): day 8; bucket [14,21): day 14.
        assert_eq!(days(&out), vec![0, 6, 8, 14]);
    }

    #[test]
    fn day_zero_anchor_survives_wide_buckets() {
        let input = series(&[(0, 0.0), (5, 50.0), (250, 900.0)]);
        let out = bucket_series(&input, 365);
        assert_eq!(days(&out), vec![0, 250]);
        assert_eq!(out[0].cumulative_views, 0.0);
    }

    #[test]
    fn zero_width_returns_input() {
        let input = series(&[(0, 0.0), (1, 5.0), (2, 9.0)]);
        assert_eq!(bucket_series(&input, 0), input);
    }

    #[test]
    fn width_one_is_identity_for_dense_series() {
        let input = series(&[(0, 0.0), (1, 5.0), (2, 9.0)]);
        assert_eq!(bucket_series(&input, 1), input);
    }

    #[test]
    fn empty_series_stays_empty() {
        assert!(bucket_series(&[], 30).is_empty());
    }
}
