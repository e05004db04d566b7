//! Humidity dependence, f(RH), of aerosol optical properties.
//!
//! f(RH) is the ratio of an optical property at some relative humidity to its dry value. Curves
//! come from Mie-scattering lookup tables, are interpolated onto a finer RH grid, mixed by
//! relative volume of each species, and binned by RH and by the fraction of a chosen species.
use crate::{
    error::{AnalysisError, Result},
    interpolation::linear_interpolate,
    keys::OpticalQuantity,
    statistics::nan_mean,
};
use itertools::{izip, Itertools};
use optional::Optioned;

/// One row of a Mie-scattering lookup table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MieRecord {
    /// Relative humidity as a fraction, 0-1.
    pub rh: f64,
    /// Absorption efficiency.
    pub absorption: f64,
    /// Scattering efficiency.
    pub scattering: f64,
}

/// Pull one optical quantity out of a lookup table.
pub fn optical_quantity(records: &[MieRecord], quantity: OpticalQuantity) -> Vec<f64> {
    records
        .iter()
        .map(|rec| match quantity {
            OpticalQuantity::Extinction => rec.absorption + rec.scattering,
            OpticalQuantity::Scattering => rec.scattering,
            OpticalQuantity::Absorption => rec.absorption,
        })
        .collect()
}

/// Ratio of each value to the first (dry) value.
///
/// # Examples
///
/// ```rust
/// use ceilometer_analysis::frh::f_rh;
///
/// assert_eq!(f_rh(&[2.0, 3.0, 8.0]).unwrap(), vec![1.0, 1.5, 4.0]);
/// assert!(f_rh(&[0.0, 1.0]).is_err());
/// ```
pub fn f_rh(q: &[f64]) -> Result<Vec<f64>> {
    let dry = *q.first().ok_or(AnalysisError::EmptyAxis)?;
    if !dry.is_finite() || dry == 0.0 {
        return Err(AnalysisError::NonFiniteValue);
    }

    Ok(q.iter().map(|v| v / dry).collect())
}

/// Interpolate a curve onto new x values, none where that would be extrapolation.
pub fn interpolate(xs: &[f64], ys: &[f64], targets: &[f64]) -> Result<Vec<Optioned<f64>>> {
    if xs.len() != ys.len() {
        return Err(AnalysisError::LengthMismatch {
            left: xs.len(),
            right: ys.len(),
        });
    }

    Ok(targets
        .iter()
        .map(|&tgt| linear_interpolate(xs, ys, tgt))
        .collect())
}

/// Weighted sum of curves, each paired with its relative volume.
///
/// Used to build the f(RH) of an aerosol mixture from the curves of its species.
pub fn mix(components: &[(&[f64], f64)]) -> Result<Vec<f64>> {
    let len = components
        .first()
        .map(|(curve, _)| curve.len())
        .ok_or(AnalysisError::EmptyAxis)?;

    if let Some((curve, _)) = components.iter().find(|(curve, _)| curve.len() != len) {
        return Err(AnalysisError::LengthMismatch {
            left: len,
            right: curve.len(),
        });
    }

    let mut mixed = vec![0.0; len];
    for (curve, weight) in components {
        for (acc, val) in mixed.iter_mut().zip(curve.iter()) {
            *acc += val * weight;
        }
    }

    Ok(mixed)
}

/// Values falling in one RH bin and one species-fraction bin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RhBin {
    /// Bottom of the RH bin, inclusive.
    pub rh_start: f64,
    /// Top of the RH bin, exclusive.
    pub rh_end: f64,
    /// Bottom of the fraction bin, inclusive.
    pub fraction_start: f64,
    /// Top of the fraction bin, exclusive. Infinite for the last bin.
    pub fraction_end: f64,
    /// Number of finite values in the bin.
    pub count: usize,
    /// Mean of the finite values in the bin.
    pub mean: Optioned<f64>,
}

/// Split samples into RH bins, then each RH bin into species-fraction bins.
///
/// `rh`, `values` and `fraction` are parallel. Bins are `[start, next start)`. The last RH bin
/// ends at `rh_end` and the last fraction bin has no upper limit. Results are ordered by RH bin,
/// then by fraction bin.
pub fn bin_by_rh_and_fraction(
    rh: &[f64],
    values: &[f64],
    fraction: &[f64],
    rh_starts: &[f64],
    rh_end: f64,
    fraction_starts: &[f64],
) -> Result<Vec<RhBin>> {
    if rh.len() != values.len() {
        return Err(AnalysisError::LengthMismatch {
            left: rh.len(),
            right: values.len(),
        });
    }
    if rh.len() != fraction.len() {
        return Err(AnalysisError::LengthMismatch {
            left: rh.len(),
            right: fraction.len(),
        });
    }

    let rh_bins = bin_edges(rh_starts, rh_end)?;
    let fraction_bins = bin_edges(fraction_starts, std::f64::INFINITY)?;

    let bins = rh_bins
        .iter()
        .cartesian_product(fraction_bins.iter())
        .map(|(&(rh_lo, rh_hi), &(frac_lo, frac_hi))| {
            let in_bin: Vec<f64> = izip!(rh, fraction, values)
                .filter(|&(&r, &f, _)| r >= rh_lo && r < rh_hi && f >= frac_lo && f < frac_hi)
                .map(|(_, _, &v)| v)
                .collect();

            RhBin {
                rh_start: rh_lo,
                rh_end: rh_hi,
                fraction_start: frac_lo,
                fraction_end: frac_hi,
                count: in_bin.iter().filter(|v| v.is_finite()).count(),
                mean: nan_mean(&in_bin),
            }
        })
        .collect();

    Ok(bins)
}

fn bin_edges(starts: &[f64], end: f64) -> Result<Vec<(f64, f64)>> {
    let last = *starts.last().ok_or(AnalysisError::InvalidBins)?;

    let ascending = starts.iter().tuple_windows().all(|(a, b)| a < b);
    if !ascending || !(last < end) || starts.iter().any(|s| !s.is_finite()) {
        return Err(AnalysisError::InvalidBins);
    }

    Ok(starts
        .iter()
        .cloned()
        .zip(starts.iter().skip(1).cloned().chain(std::iter::once(end)))
        .collect())
}
