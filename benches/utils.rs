#![allow(dead_code)]

use ceilometer_analysis::BackscatterProfile;
use chrono::NaiveDate;
use metfor::{Meters, Quantity};

pub fn ukv_levels() -> Vec<Meters> {
    (0..70)
        .map(|k| k as f64)
        .map(|k| Meters(5.0 + (50.0 * k + 10.0 * k * (k - 1.0)) / 3.0))
        .collect()
}

pub fn cl31_gates() -> Vec<Meters> {
    (0..770).map(|i| Meters(30.0 + 10.0 * i as f64)).collect()
}

pub fn day_profile(heights: Vec<Meters>, scale: f64) -> BackscatterProfile {
    let day = NaiveDate::from_ymd_opt(2016, 5, 4).unwrap();
    let times: Vec<_> = (0..24).map(|h| day.and_hms_opt(h, 0, 0).unwrap()).collect();

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
