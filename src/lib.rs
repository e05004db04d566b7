#![warn(missing_docs)]
//! Functions and data types for comparing ceilometer backscatter observations with model
//! forecasts, and for describing the humidity dependence of aerosol optical properties.
//!
//! The center of the crate is [`nearest_heights`], which pairs model levels with ceilometer
//! range-gates so the two can be compared height for height.

//
// API
//
pub use crate::{
    comparison::{compare_profiles, HourComparison, HourlyStatistics, StatKey, StatSummary},
    config::ComparisonConfig,
    dates::{parse_day, parse_day_list},
    error::{AnalysisError, Result},
    interpolation::linear_interpolate,
    keys::{Metric, OpticalQuantity},
    nearest::{nearest, nearest_all, NearestMatch},
    pairing::{nearest_heights, HeightPair, HeightPairs},
    profile::BackscatterProfile,
    statistics::{
        count_finite_pairs, mean_bias_error, nan_mean, nan_std, rmse, spearman,
        RankCorrelation, MIN_CORRELATION_PAIRS,
    },
};

pub mod frh;

//
// Internal use only
//

// Modules
mod comparison;
mod config;
mod dates;
mod error;
mod interpolation;
mod keys;
mod nearest;
mod pairing;
mod profile;
mod statistics;
mod utility;
