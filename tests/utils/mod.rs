#![allow(dead_code)]

use ceilometer_analysis::{nearest_heights, BackscatterProfile, HeightPairs};
use chrono::{NaiveDate, NaiveDateTime};
use metfor::{Meters, Quantity};

pub fn approx_equal(val1: f64, val2: f64, eps: f64) -> bool {
    (val1 - val2).abs() < eps
}

pub fn meters(vals: &[f64]) -> Vec<Meters> {
    vals.iter().cloned().map(Meters).collect()
}

/// Lowest 70 levels of a UKV-like model grid, spacing grows with height.
pub fn ukv_levels() -> Vec<Meters> {
    (0..70)
        .map(|k| k as f64)
        .map(|k| Meters(5.0 + (50.0 * k + 10.0 * k * (k - 1.0)) / 3.0))
        .collect()
}

/// CL31 range-gates, 10 m apart starting 30 m above the model surface.
pub fn cl31_gates() -> Vec<Meters> {
    (0..770).map(|i| Meters(30.0 + 10.0 * i as f64)).collect()
}

/// Hourly valid times for one day.
pub fn hourly_times(day: NaiveDate) -> Vec<NaiveDateTime> {
    (0..24).map(|h| day.and_hms_opt(h, 0, 0).unwrap()).collect()
}

/// Backscatter that decays exponentially with height, scaled per hour.
pub fn decaying_profile(
    times: Vec<NaiveDateTime>,
    heights: Vec<Meters>,
    scale: f64,
) -> BackscatterProfile {
    let rows: Vec<Vec<f64>> = (0..times.len())
        .map(|t| {
            heights
                .iter()
                .map(|h| {
                    scale * (1.0 + t as f64 / 24.0) * 1.0e-5 * (-h.unpack() / 1000.0).exp()
                })
                .collect()
        })
        .collect();

    BackscatterProfile::from_rows(times, heights, &rows).unwrap()
}

/// Assert the invariants every set of pairs must hold.
pub fn check_invariants(
    pairs: &HeightPairs,
    model: &[Meters],
    obs: &[Meters],
    max_height: Meters,
) {
    let n = pairs.len();
    assert_eq!(pairs.obs_indices().len(), n);
    assert_eq!(pairs.model_indices().len(), n);
    assert_eq!(pairs.values().len(), n);
    assert_eq!(pairs.diffs().len(), n);

    for p in pairs.iter() {
        assert!(p.value <= max_height, "value above max height");
        assert_eq!(obs[p.obs_index], p.value);
        assert_eq!(model[p.model_index] - obs[p.obs_index], p.diff);
    }

    // Model indexes are strictly increasing, each level is used at most once.
    assert!(pairs.model_indices().windows(2).all(|w| w[0] < w[1]));

    // No gate is repeated at either end.
    if n > 1 {
        let idx = pairs.obs_indices();
        assert_ne!(idx[0], idx[1]);
        assert_ne!(idx[n - 1], idx[n - 2]);
    }

    let again = nearest_heights(model, obs, max_height).unwrap();
    assert_eq!(&again, pairs, "not deterministic");
}

#[allow(unused_macros)]
macro_rules! check_pairing {
    ($test_name:ident, $model:expr, $obs:expr, $max_height:expr) => {
        #[test]
        fn $test_name() {
            let model: Vec<metfor::Meters> = $model;
            let obs: Vec<metfor::Meters> = $obs;
            let max_height = metfor::Meters($max_height);

            let pairs = ceilometer_analysis::nearest_heights(&model, &obs, max_height).unwrap();
            utils::check_invariants(&pairs, &model, &obs, max_height);

            // A cut above the top gate removes nothing beyond the de-duplication.
            let top = obs[obs.len() - 1];
            let uncut = ceilometer_analysis::nearest_heights(&model, &obs, top).unwrap();
            let kept = uncut
                .values()
                .iter()
                .filter(|&&v| v <= max_height)
                .count();
            assert_eq!(kept, pairs.len());
        }
    };
}
