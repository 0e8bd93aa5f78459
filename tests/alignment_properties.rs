//! Property-based tests for alignment, resampling, and the baselines.
//!
//! These tests verify invariants that should hold for all valid inputs,
//! using randomly generated series.

use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;
use std::collections::BTreeSet;
use zonecast::align::{outer_align, resample_hourly};
use zonecast::core::TimeSeries;
use zonecast::models::{Forecaster, Persistence};

fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 9, 25, 0, 0, 0).unwrap()
}

/// Build a series from minute offsets and values, labeled with `label`.
fn make_series(offsets: &[i64], values: &[f64], label: &str) -> TimeSeries {
    let timestamps: Vec<_> = offsets
        .iter()
        .map(|&m| base_time() + Duration::minutes(m))
        .collect();
    TimeSeries::new(timestamps, vec![values.to_vec()], vec![label.to_string()]).unwrap()
}

/// Strategy for strictly increasing minute offsets.
fn offsets_strategy(min_len: usize, max_len: usize) -> impl Strategy<Value = Vec<i64>> {
    prop::collection::btree_set(0i64..10_000, min_len..max_len)
        .prop_map(|set| set.into_iter().collect())
}

/// Strategy for well-behaved observation values.
fn values_strategy(len: usize) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-100.0..1000.0_f64, len)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    #[test]
    fn aligned_timestamps_are_exactly_the_union(
        offsets_a in offsets_strategy(1, 40),
        offsets_b in offsets_strategy(1, 40),
    ) {
        let a = make_series(&offsets_a, &vec![1.0; offsets_a.len()], "Solar_Z1");
        let b = make_series(&offsets_b, &vec![2.0; offsets_b.len()], "Solar_Z2");

        let aligned = outer_align(&[a, b]).unwrap();

        let expected: BTreeSet<i64> = offsets_a.iter().chain(offsets_b.iter()).copied().collect();
        prop_assert_eq!(aligned.len(), expected.len());
        for (t, minutes) in aligned.timestamps().iter().zip(expected.iter()) {
            prop_assert_eq!(*t, base_time() + Duration::minutes(*minutes));
        }
    }

    #[test]
    fn alignment_preserves_every_input_observation(
        offsets in offsets_strategy(1, 40),
    ) {
        let values: Vec<f64> = (0..offsets.len()).map(|i| i as f64 + 0.5).collect();
        let a = make_series(&offsets, &values, "Wind_Z1");
        let other = make_series(&[5, 55, 505], &[9.0, 9.0, 9.0], "Wind_Z2");

        let aligned = outer_align(&[a, other]).unwrap();
        let column = aligned.column("Wind_Z1").unwrap();

        for (offset, value) in offsets.iter().zip(values.iter()) {
            let t = base_time() + Duration::minutes(*offset);
            let row = aligned.timestamps().iter().position(|u| *u == t).unwrap();
            prop_assert_eq!(column[row], *value);
        }
    }

    #[test]
    fn hourly_buckets_average_their_raw_points(
        offsets in offsets_strategy(2, 60),
    ) {
        let values = (0..offsets.len()).map(|i| i as f64).collect::<Vec<_>>();
        let series = make_series(&offsets, &values, "Temp_Z1");

        let hourly = resample_hourly(&series).unwrap();
        let column = hourly.column("Temp_Z1").unwrap();

        for (b, bucket_start) in hourly.timestamps().iter().enumerate() {
            let bucket_end = *bucket_start + Duration::hours(1);
            let in_bucket: Vec<f64> = series
                .timestamps()
                .iter()
                .zip(values.iter())
                .filter(|(t, _)| **t >= *bucket_start && **t < bucket_end)
                .map(|(_, v)| *v)
                .collect();

            if in_bucket.is_empty() {
                prop_assert!(column[b].is_nan());
            } else {
                let mean = in_bucket.iter().sum::<f64>() / in_bucket.len() as f64;
                prop_assert!((column[b] - mean).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn hourly_grid_is_gap_free(
        offsets in offsets_strategy(2, 60),
    ) {
        let series = make_series(&offsets, &vec![1.0; offsets.len()], "Temp_Z1");
        let hourly = resample_hourly(&series).unwrap();

        for pair in hourly.timestamps().windows(2) {
            prop_assert_eq!(pair[1] - pair[0], Duration::hours(1));
        }
    }

    #[test]
    fn persistence_forecast_is_constant_at_the_last_observation(
        raw in (2usize..50).prop_flat_map(|len| values_strategy(len)),
        horizon in 1usize..30,
    ) {
        let offsets: Vec<i64> = (0..raw.len() as i64).collect();
        let series = make_series(&offsets, &raw, "Solar_interp");

        let mut model = Persistence::new();
        model.fit(&series).unwrap();
        let forecast = model.predict(horizon).unwrap();

        prop_assert_eq!(forecast.horizon(), horizon);
        let last = *raw.last().unwrap();
        for p in forecast.values() {
            prop_assert_eq!(*p, last);
        }
    }
}
