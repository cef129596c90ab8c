use super::*;

fn series(days: &[(u32, f64)]) -> Vec<SeriesPoint> {
    days.iter()
        .map(|&(days_since_launch, cumulative_views)| SeriesPoint {
            days_since_launch,
            cumulative_views,
        })
        .collect()
}

fn novel(novel_id: i64, total_views: f64, points: &[(u32, f64)]) -> NovelSeries {
    NovelSeries {
        novel_id,
        total_views,
        series: series(points),
    }
}

#[test]
fn tier_bounds_small_population_keeps_tier_non_empty() {
    // Three novels, 0-34% band: floor(3*0.34) = 1, so exactly the top
    // novel, and never an empty slice.
    assert_eq!(tier_bounds(3, 0, 34), (0, 1));
    assert_eq!(tier_bounds(1, 0, 20), (0, 1));
    assert_eq!(tier_bounds(1, 20, 40), (0, 1));
    assert_eq!(tier_bounds(2, 60, 100), (1, 2));
}

#[test]
fn tier_bounds_partition_for_larger_population() {
    // Ten novels: the four bands tile [0, 10) without gaps or overlap.
    assert_eq!(tier_bounds(10, 0, 20), (0, 2));
    assert_eq!(tier_bounds(10, 20, 40), (2, 4));
    assert_eq!(tier_bounds(10, 40, 60), (4, 6));
    assert_eq!(tier_bounds(10, 60, 100), (6, 10));
}

#[test]
fn tier_bounds_end_never_exceeds_population() {
    let (start, end) = tier_bounds(1, 60, 100);
    assert!(end <= 1);
    assert!(start < end);
}

#[test]
fn tiers_cover_all_ranked_novels_disjointly() {
    let n = 10;
    let mut seen = vec![0u32; n];
    for &(_, start_pct, end_pct) in TIER_BANDS {
        let (start, end) = tier_bounds(n, start_pct, end_pct);
        for slot in seen.iter_mut().take(end).skip(start) {
            *slot += 1;
        }
    }
    assert!(
        seen.iter().all(|&count| count == 1),
        "each ranked novel should land in exactly one tier, got {seen:?}"
    );
}

#[test]
fn aggregate_series_takes_per_day_median() {
    let a = series(&[(0, 0.0), (1, 10.0)]);
    let b = series(&[(0, 0.0), (1, 20.0), (3, 40.0)]);
    let c = series(&[(0, 0.0), (1, 30.0), (2, 60.0)]);
    let out = aggregate_series(&[&a, &b, &c]);

    let values: Vec<f64> = out.iter().map(|p| p.cumulative_views).collect();
    // Members forward-fill to day 3: a=[0,10,10,10], b=[0,20,20,40],
    // c=[0,30,60,60]; medians per day follow.
    assert_eq!(values, vec![0.0, 20.0, 20.0, 40.0]);
}

#[test]
fn aggregate_series_even_member_count_averages_middles() {
    let a = series(&[(0, 0.0), (1, 10.0)]);
    let b = series(&[(0, 0.0), (1, 30.0)]);
    let out = aggregate_series(&[&a, &b]);
    assert_eq!(out[1].cumulative_views, 20.0);
}

#[test]
fn aggregate_series_is_dense_monotonic_and_anchored() {
    let a = series(&[(0, 0.0), (2, 50.0), (9, 220.0)]);
    let b = series(&[(0, 0.0), (5, 400.0)]);
    let out = aggregate_series(&[&a, &b]);

    for (i, point) in out.iter().enumerate() {
        assert_eq!(point.days_since_launch, i as u32, "tier series must be dense");
    }
    assert!(
        out.windows(2).all(|w| w[0].cumulative_views <= w[1].cumulative_views),
        "tier series must never decrease"
    );
    assert_eq!(out[0].cumulative_views, 0.0);
}

#[test]
fn aggregate_series_empty_input() {
    assert!(aggregate_series(&[]).is_empty());
    let empty: Vec<SeriesPoint> = Vec::new();
    assert!(aggregate_series(&[&empty]).is_empty());
}

#[test]
fn aggregate_ranks_and_slices_by_total_views() {
    let novels = vec![
        novel(1, 10.0, &[(0, 0.0), (1, 10.0)]),
        novel(2, 1000.0, &[(0, 0.0), (1, 1000.0)]),
        novel(3, 500.0, &[(0, 0.0), (1, 500.0)]),
    ];
    let out = aggregate(&novels, None);

    assert_eq!(out.total_novels, 3);
    // Top band of three novels is exactly the highest-total novel.
    assert_eq!(out.top20[1].cumulative_views, 1000.0);
    assert!(out.my_novel.is_none());
    assert!(out.percentile_top.is_none());
}

#[test]
fn aggregate_excludes_novels_without_growth() {
    let novels = vec![
        novel(1, 0.0, &[(0, 0.0)]),
        novel(2, 300.0, &[(0, 0.0), (1, 300.0)]),
    ];
    let out = aggregate(&novels, Some(1));

    assert_eq!(out.total_novels, 1);
    // The zero-total novel is invisible to ranking and to "my novel".
    assert!(out.my_novel.is_none());
    assert!(out.percentile_top.is_none());
}

#[test]
fn aggregate_empty_population_yields_empty_tiers() {
    let out = aggregate(&[], Some(7));
    assert_eq!(out.total_novels, 0);
    assert!(out.top20.is_empty());
    assert!(out.top40.is_empty());
    assert!(out.top60.is_empty());
    assert!(out.top80.is_empty());
    assert!(out.percentile_top.is_none());
}

#[test]
fn aggregate_reports_my_novel_and_percentile() {
    let novels = vec![
        novel(1, 1000.0, &[(0, 0.0), (1, 1000.0)]),
        novel(2, 500.0, &[(0, 0.0), (1, 500.0)]),
        novel(3, 100.0, &[(0, 0.0), (1, 100.0)]),
    ];
    let out = aggregate(&novels, Some(2));

    let expected = series(&[(0, 0.0), (1, 500.0)]);
    assert_eq!(out.my_novel.as_deref(), Some(expected.as_slice()));
    // One strictly better novel out of three: top (1+1)/3 = 66.7%.
    assert_eq!(out.percentile_top, Some(66.7));
}

#[test]
fn percentile_of_the_single_best_is_within_bound() {
    let novels = vec![
        novel(1, 900.0, &[(0, 0.0), (1, 900.0)]),
        novel(2, 500.0, &[(0, 0.0), (1, 500.0)]),
        novel(3, 100.0, &[(0, 0.0), (1, 100.0)]),
    ];
    let out = aggregate(&novels, Some(1));
    let p = out.percentile_top.unwrap();
    assert!(p > 0.0 && p <= 100.0 / 3.0 + 0.05, "best of 3 should be ~33.3, got {p}");
    assert_eq!(p, 33.3);
}

#[test]
fn percentile_ties_share_the_best_rank() {
    let tied = [
        novel(1, 500.0, &[(0, 0.0), (1, 500.0)]),
        novel(2, 500.0, &[(0, 0.0), (1, 500.0)]),
    ];
    let ranked: Vec<&NovelSeries> = tied.iter().collect();
    // Neither novel is strictly better than the other: both are "top 50%".
    assert_eq!(percentile_top(&ranked, 500.0), Some(50.0));
}

#[test]
fn percentile_empty_population_is_undefined() {
    assert_eq!(percentile_top(&[], 100.0), None);
}
