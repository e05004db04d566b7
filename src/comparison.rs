//! Compare model and observed backscatter profiles at each time, and gather the results by site,
//! statistic, and hour of the day.
//!
//! Profiles are height matched with [`nearest_heights`], so each time row is reduced to the same
//! set of (model level, gate) pairs before any statistic is computed. Daily results are then
//! collected into a [`HourlyStatistics`] owned by the caller, which can be summarized into a mean
//! and standard deviation for every hour.
use crate::{
    config::ComparisonConfig,
    error::{AnalysisError, Result},
    keys::Metric,
    pairing::nearest_heights,
    profile::BackscatterProfile,
    statistics::{count_finite_pairs, mean_bias_error, nan_mean, nan_std, rmse, spearman},
};
use chrono::{NaiveDateTime, Timelike};
use itertools::{izip, Itertools};
use optional::{none, Optioned};
use std::collections::BTreeMap;
use tracing::{debug, trace};

/// Statistics for one time row of a model/observation comparison.
#[derive(Debug, Clone, PartialEq)]
pub struct HourComparison {
    /// Valid time of the row.
    pub time: NaiveDateTime,
    /// Number of height pairs where both model and observation were finite.
    pub num_pairs: usize,
    values: Vec<(Metric, Optioned<f64>)>,
}

impl HourComparison {
    /// Hour of the day, 0-23.
    #[inline]
    pub fn hour(&self) -> u32 {
        self.time.hour()
    }

    /// Value of a statistic, none if it was not requested or there was not enough data.
    pub fn get(&self, metric: Metric) -> Optioned<f64> {
        self.values
            .iter()
            .find(|(m, _)| *m == metric)
            .map(|&(_, val)| val)
            .unwrap_or_else(none)
    }

    /// Iterate over the computed statistics.
    pub fn iter(&self) -> impl Iterator<Item = (Metric, Optioned<f64>)> + '_ {
        self.values.iter().cloned()
    }
}

/// Compare model and observed backscatter for one site, row by row.
///
/// Heights are paired with [`nearest_heights`] using `config.max_height()`. Both profiles must
/// have the same number of time rows. Correlation, its p-value, log difference and RMSE are
/// computed on log10 backscatter, the mean bias error on the linear values. A statistic is none
/// when its series has fewer than `config.min_pairs()` finite pairs.
pub fn compare_profiles(
    model: &BackscatterProfile,
    obs: &BackscatterProfile,
    config: &ComparisonConfig,
) -> Result<Vec<HourComparison>> {
    if model.num_times() != obs.num_times() {
        return Err(AnalysisError::ShapeMismatch {
            expected: model.num_times(),
            found: obs.num_times(),
        });
    }

    let pairs = nearest_heights(model.height(), obs.height(), config.max_height())?;
    debug!(pairs = pairs.len(), times = model.num_times(), "comparing profiles");

    izip!(model.rows(), obs.rows())
        .map(|((time, mod_row), (_, obs_row))| {
            let mod_y = pairs.select_model(mod_row)?;
            let obs_x = pairs.select_obs(obs_row)?;
            compare_row(time, &mod_y, &obs_x, config)
        })
        .collect()
}

fn compare_row(
    time: NaiveDateTime,
    mod_y: &[f64],
    obs_x: &[f64],
    config: &ComparisonConfig,
) -> Result<HourComparison> {
    let num_pairs = count_finite_pairs(mod_y, obs_x)?;

    // Non-positive backscatter becomes -inf or NaN here and drops out as non-finite.
    let log_mod: Vec<f64> = mod_y.iter().map(|v| v.log10()).collect();
    let log_obs: Vec<f64> = obs_x.iter().map(|v| v.log10()).collect();
    let log_pairs = count_finite_pairs(&log_mod, &log_obs)?;

    let enough = |metric: Metric| {
        let pairs = match metric {
            Metric::MeanBiasError => num_pairs,
            _ => log_pairs,
        };
        pairs >= config.min_pairs()
    };

    if log_pairs < config.min_pairs() {
        trace!(%time, num_pairs, log_pairs, "not enough pairs for log10 statistics");
    }

    let wants_rank = config
        .metrics()
        .iter()
        .any(|&m| (m == Metric::Correlation || m == Metric::PValue) && enough(m));
    let rank = if wants_rank {
        Some(spearman(&log_obs, &log_mod)?)
    } else {
        None
    };

    let values = config
        .metrics()
        .iter()
        .map(|&metric| -> Result<(Metric, Optioned<f64>)> {
            if !enough(metric) {
                return Ok((metric, none()));
            }

            let val = match metric {
                Metric::Correlation => rank.map(|rho| rho.r).unwrap_or_else(none),
                Metric::PValue => rank.map(|rho| rho.p).unwrap_or_else(none),
                Metric::LogDifference => mean_bias_error(&log_mod, &log_obs)?,
                Metric::Rmse => rmse(&log_mod, &log_obs)?,
                Metric::MeanBiasError => mean_bias_error(mod_y, obs_x)?,
            };
            Ok((metric, val))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(HourComparison {
        time,
        num_pairs,
        values,
    })
}

/// Key for one series of accumulated statistics.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StatKey {
    /// Site identifier.
    pub site: String,
    /// The statistic.
    pub metric: Metric,
    /// Hour of the day, 0-23.
    pub hour: u32,
}

impl StatKey {
    /// Create a new key.
    pub fn new<S: Into<String>>(site: S, metric: Metric, hour: u32) -> Self {
        StatKey {
            site: site.into(),
            metric,
            hour,
        }
    }
}

/// Mean and spread of one accumulated series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatSummary {
    /// Mean of the finite values.
    pub mean: Optioned<f64>,
    /// Population standard deviation of the finite values.
    pub std_dev: Optioned<f64>,
    /// Number of finite values.
    pub count: usize,
}

/// Statistics gathered over many days, keyed by site, statistic, and hour.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HourlyStatistics {
    series: BTreeMap<StatKey, Vec<f64>>,
}

impl HourlyStatistics {
    /// Create an empty collection.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one day of comparisons for a site.
    ///
    /// Missing values are stored as NaN, so every recorded day shows up in the series even when
    /// its statistic could not be computed.
    pub fn record(&mut self, site: &str, comparisons: &[HourComparison]) {
        for cmp in comparisons {
            let hour = cmp.hour();
            for (metric, val) in cmp.iter() {
                self.series
                    .entry(StatKey::new(site, metric, hour))
                    .or_insert_with(Vec::new)
                    .push(val.into_option().unwrap_or(std::f64::NAN));
            }
        }
    }

    /// The values recorded under `key`, one per recorded day.
    pub fn values(&self, key: &StatKey) -> Option<&[f64]> {
        self.series.get(key).map(|v| v.as_slice())
    }

    /// Sites with recorded statistics, sorted.
    pub fn sites(&self) -> Vec<&str> {
        self.series
            .keys()
            .map(|k| k.site.as_str())
            .dedup()
            .collect()
    }

    /// Number of series.
    #[inline]
    pub fn len(&self) -> usize {
        self.series.len()
    }

    /// True if nothing has been recorded.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Iterate over every series in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&StatKey, &[f64])> {
        self.series.iter().map(|(k, v)| (k, v.as_slice()))
    }

    /// Mean, standard deviation and count of every series.
    pub fn summarize(&self) -> BTreeMap<StatKey, StatSummary> {
        self.series
            .iter()
            .map(|(key, vals)| {
                let summary = StatSummary {
                    mean: nan_mean(vals),
                    std_dev: nan_std(vals),
                    count: vals.iter().filter(|v| v.is_finite()).count(),
                };
                (key.clone(), summary)
            })
            .collect()
    }
}
