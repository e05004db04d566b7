//! Summary statistics that skip missing values.
//!
//! Missing data is marked with NaN, the same marker `Optioned<f64>` uses for none. Functions of
//! two series drop a position if either value is not finite. A result that cannot be computed,
//! for example the mean of nothing, comes back as none rather than as an error.
use crate::error::{AnalysisError, Result};
use itertools::Itertools;
use optional::{none, some, Optioned};
use statrs::distribution::{ContinuousCDF, StudentsT};
use std::cmp::Ordering;

/// Fewest finite pairs a rank correlation is computed from.
pub const MIN_CORRELATION_PAIRS: usize = 3;

/// Mean of the finite values.
pub fn nan_mean(data: &[f64]) -> Optioned<f64> {
    let (sum, n) = data
        .iter()
        .filter(|v| v.is_finite())
        .fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));

    if n == 0 {
        none()
    } else {
        some(sum / n as f64)
    }
}

/// Population standard deviation (N denominator) of the finite values.
pub fn nan_std(data: &[f64]) -> Optioned<f64> {
    let mean = match nan_mean(data).into_option() {
        Some(mean) => mean,
        None => return none(),
    };

    let finite = || data.iter().filter(|v| v.is_finite());
    let n = finite().count() as f64;
    let var = finite().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n;

    some(var.sqrt())
}

/// Number of positions where both series are finite.
pub fn count_finite_pairs(x: &[f64], y: &[f64]) -> Result<usize> {
    Ok(finite_pairs(x, y)?.count())
}

/// Mean of `model - obs`.
pub fn mean_bias_error(model: &[f64], obs: &[f64]) -> Result<Optioned<f64>> {
    let diffs: Vec<f64> = finite_pairs(model, obs)?.map(|(m, o)| m - o).collect();
    Ok(nan_mean(&diffs))
}

/// Root mean square error of `model` against `obs`.
pub fn rmse(model: &[f64], obs: &[f64]) -> Result<Optioned<f64>> {
    let sq_err: Vec<f64> = finite_pairs(model, obs)?
        .map(|(m, o)| (m - o) * (m - o))
        .collect();
    Ok(nan_mean(&sq_err).map_t(f64::sqrt))
}

/// A rank correlation coefficient and its two-sided p-value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankCorrelation {
    /// Correlation coefficient, -1 to 1.
    pub r: Optioned<f64>,
    /// Probability of a correlation at least this strong from uncorrelated data.
    pub p: Optioned<f64>,
}

impl RankCorrelation {
    fn missing() -> Self {
        RankCorrelation {
            r: none(),
            p: none(),
        }
    }
}

/// Spearman rank correlation coefficient and its p-value.
///
/// Tied values get the average of the ranks they span. The p-value is two-sided and comes from
/// `t = r * sqrt((n - 2) / (1 - r^2))` on `n - 2` degrees of freedom. Both are none when there
/// are fewer than [`MIN_CORRELATION_PAIRS`] finite pairs or when either series is constant.
///
/// # Examples
///
/// ```rust
/// use ceilometer_analysis::spearman;
///
/// let rho = spearman(&[1.0, 2.0, 3.0, 4.0, 5.0], &[5.0, 6.0, 7.0, 8.0, 7.0]).unwrap();
/// assert!((rho.r.unpack() - 0.820_782_681_668_123_3).abs() < 1.0e-12);
/// assert!((rho.p.unpack() - 0.088_587_005_313_543_8).abs() < 1.0e-9);
/// ```
pub fn spearman(x: &[f64], y: &[f64]) -> Result<RankCorrelation> {
    let (xs, ys): (Vec<f64>, Vec<f64>) = finite_pairs(x, y)?.unzip();

    if xs.len() < MIN_CORRELATION_PAIRS {
        return Ok(RankCorrelation::missing());
    }

    let r = match pearson(&ranks(&xs), &ranks(&ys)).into_option() {
        Some(r) => r,
        None => return Ok(RankCorrelation::missing()),
    };

    Ok(RankCorrelation {
        r: some(r),
        p: t_test_p_value(r, xs.len()),
    })
}

// Two-sided p-value of a correlation coefficient from n samples, n >= 3.
fn t_test_p_value(r: f64, n: usize) -> Optioned<f64> {
    let freedom = (n - 2) as f64;

    let denom = 1.0 - r * r;
    if denom <= 0.0 {
        return some(0.0);
    }
    let t = r * (freedom / denom).sqrt();

    match StudentsT::new(0.0, 1.0, freedom) {
        Ok(dist) => some((2.0 * (1.0 - dist.cdf(t.abs()))).max(0.0)),
        Err(_) => none(),
    }
}

fn finite_pairs<'a>(
    x: &'a [f64],
    y: &'a [f64],
) -> Result<impl Iterator<Item = (f64, f64)> + 'a> {
    if x.len() != y.len() {
        return Err(AnalysisError::LengthMismatch {
            left: x.len(),
            right: y.len(),
        });
    }

    Ok(x.iter()
        .zip(y)
        .filter(|(a, b)| a.is_finite() && b.is_finite())
        .map(|(&a, &b)| (a, b)))
}

fn pearson(x: &[f64], y: &[f64]) -> Optioned<f64> {
    debug_assert_eq!(x.len(), y.len());

    let n = x.len() as f64;
    let mean_x = x.iter().sum::<f64>() / n;
    let mean_y = y.iter().sum::<f64>() / n;

    let (cov, var_x, var_y) =
        x.iter()
            .zip(y)
            .fold((0.0, 0.0, 0.0), |(cov, var_x, var_y), (xi, yi)| {
                let dx = xi - mean_x;
                let dy = yi - mean_y;
                (cov + dx * dy, var_x + dx * dx, var_y + dy * dy)
            });

    let denom = (var_x * var_y).sqrt();
    if denom == 0.0 {
        return none();
    }

    some(cov / denom)
}

// 1-based ranks, ties share the mean of their ranks.
fn ranks(vals: &[f64]) -> Vec<f64> {
    let order: Vec<usize> = (0..vals.len())
        .sorted_by(|&a, &b| vals[a].partial_cmp(&vals[b]).unwrap_or(Ordering::Equal))
        .collect();

    let mut ranks = vec![0.0; vals.len()];
    let mut start = 0;
    while start < order.len() {
        let mut end = start + 1;
        while end < order.len() && vals[order[end]] == vals[order[start]] {
            end += 1;
        }

        // Positions start..end hold ranks start+1..=end
        let avg = (start + 1 + end) as f64 / 2.0;
        for &i in &order[start..end] {
            ranks[i] = avg;
        }

        start = end;
    }

    ranks
}
