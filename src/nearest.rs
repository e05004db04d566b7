//! Nearest-neighbour lookup in a sorted height axis.

use crate::error::{AnalysisError, Result};
use metfor::{Meters, Quantity};

/// The closest value in a sorted axis to some target height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearestMatch {
    /// The matched value from the axis.
    pub value: Meters,
    /// Index of the matched value in the axis.
    pub index: usize,
    /// Signed difference, `target - value`. Positive when the target is above its match.
    pub diff: Meters,
}

/// Find the value in `sorted` closest to `target`.
///
/// Assumes `sorted` is ascending. When two values are equally close the lower index wins, so the
/// result is deterministic.
///
/// # Examples
///
/// ```rust
/// use ceilometer_analysis::nearest;
/// use metfor::Meters;
///
/// let gates = [Meters(0.0), Meters(10.0), Meters(20.0)];
/// let found = nearest(&gates, Meters(14.0)).unwrap();
/// assert_eq!(found.index, 1);
/// assert_eq!(found.value, Meters(10.0));
/// assert_eq!(found.diff, Meters(4.0));
/// ```
pub fn nearest(sorted: &[Meters], target: Meters) -> Result<NearestMatch> {
    if sorted.is_empty() {
        return Err(AnalysisError::EmptyAxis);
    }

    // First index with a value >= target, the match is this one or the one below it.
    let upper = sorted.partition_point(|&h| h < target);

    let index = if upper == 0 {
        0
    } else if upper == sorted.len() {
        upper - 1
    } else {
        let below = (target - sorted[upper - 1]).unpack().abs();
        let above = (sorted[upper] - target).unpack().abs();
        if below <= above {
            upper - 1
        } else {
            upper
        }
    };

    let value = sorted[index];

    Ok(NearestMatch {
        value,
        index,
        diff: target - value,
    })
}

/// Find the nearest value in `sorted` for every height in `targets`.
pub fn nearest_all(sorted: &[Meters], targets: &[Meters]) -> Result<Vec<NearestMatch>> {
    targets.iter().map(|&tgt| nearest(sorted, tgt)).collect()
}
