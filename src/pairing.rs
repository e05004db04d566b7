//! Pair model levels with ceilometer range-gates.
//!
//! Each model level is matched to its nearest gate. Model and observation axes start and end at
//! different heights, so several levels at either end can land on the same gate. Those runs at
//! the two ends are reduced to the single closest pair. Any duplicate in the interior of the
//! match sequence is left alone. Finally, pairs whose gate sits above a maximum height are cut.
use crate::{
    error::{AnalysisError, Result},
    nearest::{nearest_all, NearestMatch},
    utility::validate_axis,
};
use itertools::izip;
use metfor::{Meters, Quantity};
use std::{cmp::Ordering, iter::once, ops::Range};
use tracing::{debug, warn};

/// One model level paired with one observation gate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeightPair {
    /// Index into the model height axis.
    pub model_index: usize,
    /// Index into the observation height axis.
    pub obs_index: usize,
    /// Height of the matched observation gate.
    pub value: Meters,
    /// Model height minus observation height.
    pub diff: Meters,
}

/// Parallel, positionally aligned results of [`nearest_heights`].
///
/// Element `k` of every sequence describes the same (model level, observation gate) pair.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HeightPairs {
    obs_idx: Vec<usize>,
    mod_idx: Vec<usize>,
    values: Vec<Meters>,
    diff: Vec<Meters>,

    // Lengths of the axes these pairs were built from.
    model_len: usize,
    obs_len: usize,
}

impl HeightPairs {
    /// Indexes into the observation axis.
    #[inline]
    pub fn obs_indices(&self) -> &[usize] {
        &self.obs_idx
    }

    /// Indexes into the model axis.
    #[inline]
    pub fn model_indices(&self) -> &[usize] {
        &self.mod_idx
    }

    /// Heights of the matched observation gates.
    #[inline]
    pub fn values(&self) -> &[Meters] {
        &self.values
    }

    /// Model height minus matched observation height for each pair.
    #[inline]
    pub fn diffs(&self) -> &[Meters] {
        &self.diff
    }

    /// Number of pairs.
    #[inline]
    pub fn len(&self) -> usize {
        self.obs_idx.len()
    }

    /// True if every pair was removed.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.obs_idx.is_empty()
    }

    /// Iterate over the pairs as rows.
    pub fn iter(&self) -> impl Iterator<Item = HeightPair> + '_ {
        izip!(&self.mod_idx, &self.obs_idx, &self.values, &self.diff).map(
            |(&model_index, &obs_index, &value, &diff)| HeightPair {
                model_index,
                obs_index,
                value,
                diff,
            },
        )
    }

    /// Pull the paired model columns out of one row of a time × height grid.
    pub fn select_model<T: Copy>(&self, row: &[T]) -> Result<Vec<T>> {
        select(row, self.model_len, &self.mod_idx)
    }

    /// Pull the paired observation columns out of one row of a time × height grid.
    pub fn select_obs<T: Copy>(&self, row: &[T]) -> Result<Vec<T>> {
        select(row, self.obs_len, &self.obs_idx)
    }
}

fn select<T: Copy>(row: &[T], expected: usize, idx: &[usize]) -> Result<Vec<T>> {
    if row.len() != expected {
        return Err(AnalysisError::ShapeMismatch {
            expected,
            found: row.len(),
        });
    }

    Ok(idx.iter().map(|&i| row[i]).collect())
}

/// Get the nearest observation gate to each model level, keeping unique pairs at or below
/// `max_height`.
///
/// Both axes must be non-empty and strictly ascending. An observation axis with a single gate is
/// accepted, but every level maps to it and only one pair can survive. A `max_height` of
/// positive infinity keeps every pair, NaN is an error.
///
/// # Examples
///
/// ```rust
/// use ceilometer_analysis::nearest_heights;
/// use metfor::Meters;
///
/// let model = [Meters(1.0), Meters(2.0), Meters(60.0)];
/// let obs = [Meters(0.0), Meters(50.0), Meters(100.0)];
///
/// let pairs = nearest_heights(&model, &obs, Meters(70.0)).unwrap();
/// assert_eq!(pairs.model_indices(), &[0, 2]);
/// assert_eq!(pairs.obs_indices(), &[0, 1]);
///
/// let pairs = nearest_heights(&model, &obs, Meters(40.0)).unwrap();
/// assert_eq!(pairs.len(), 1);
/// ```
pub fn nearest_heights(
    model_heights: &[Meters],
    obs_heights: &[Meters],
    max_height: Meters,
) -> Result<HeightPairs> {
    validate_axis(model_heights)?;
    validate_axis(obs_heights)?;
    if max_height.unpack().is_nan() {
        return Err(AnalysisError::NonFiniteValue);
    }

    if obs_heights.len() == 1 {
        warn!("single observation gate, all model levels collapse onto one pair");
    }

    let matches = nearest_all(obs_heights, model_heights)?;
    let unique = unique_pairs(&matches);
    debug!(
        model_levels = model_heights.len(),
        unique = unique.len(),
        "removed duplicate pairs at the ends of the match sequence"
    );

    let mut pairs = HeightPairs {
        model_len: model_heights.len(),
        obs_len: obs_heights.len(),
        ..HeightPairs::default()
    };

    unique
        .into_iter()
        .map(|i| (i, matches[i]))
        // Remove pairs where the gate is above the max allowed height
        .filter(|(_, m)| m.value <= max_height)
        .for_each(|(i, m)| {
            pairs.obs_idx.push(m.index);
            pairs.mod_idx.push(i);
            pairs.values.push(m.value);
            pairs.diff.push(m.diff);
        });

    debug!(
        pairs = pairs.len(),
        max_height = max_height.unpack(),
        "height cut applied"
    );

    Ok(pairs)
}

/// Model indexes that survive removal of duplicate gates at both ends of the match sequence.
///
/// `matches` must come from an ascending model axis, so gate indexes never decrease.
fn unique_pairs(matches: &[NearestMatch]) -> Vec<usize> {
    debug_assert!(!matches.is_empty());

    let len = matches.len();
    let first_gate = matches[0].index;
    let last_gate = matches[len - 1].index;

    let lead_len = matches
        .iter()
        .take_while(|m| m.index == first_gate)
        .count();

    // Every level landed on the same gate.
    if lead_len == len {
        return vec![closest_in(matches, 0..len)];
    }

    let trail_len = matches
        .iter()
        .rev()
        .take_while(|m| m.index == last_gate)
        .count();

    once(closest_in(matches, 0..lead_len))
        .chain(lead_len..(len - trail_len))
        .chain(once(closest_in(matches, (len - trail_len)..len)))
        .collect()
}

/// Index within `range` of the smallest absolute difference, first one on ties.
fn closest_in(matches: &[NearestMatch], range: Range<usize>) -> usize {
    let start = range.start;
    range
        .min_by(|&a, &b| {
            let da = matches[a].diff.unpack().abs();
            let db = matches[b].diff.unpack().abs();
            da.partial_cmp(&db).unwrap_or(Ordering::Equal)
        })
        .unwrap_or(start)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::utility::test_tools::*;

    fn unpacked(vals: &[Meters]) -> Vec<f64> {
        vals.iter().map(|v| v.unpack()).collect()
    }

    #[test]
    fn test_no_duplicates() {
        let model = meters(&[0.0, 50.0, 150.0]);
        let obs = meters(&[0.0, 10.0, 20.0, 100.0, 200.0]);

        let pairs = nearest_heights(&model, &obs, Meters(1000.0)).unwrap();

        assert_eq!(pairs.obs_indices(), &[0, 2, 3]);
        assert_eq!(pairs.model_indices(), &[0, 1, 2]);
        assert_eq!(unpacked(pairs.values()), vec![0.0, 20.0, 100.0]);
        assert_eq!(unpacked(pairs.diffs()), vec![0.0, 30.0, 50.0]);
    }

    #[test]
    fn test_duplicate_at_start() {
        let model = meters(&[1.0, 2.0, 60.0]);
        let obs = meters(&[0.0, 50.0, 100.0]);

        let pairs = nearest_heights(&model, &obs, Meters(1000.0)).unwrap();

        assert_eq!(pairs.model_indices(), &[0, 2]);
        assert_eq!(pairs.obs_indices(), &[0, 1]);
        assert_eq!(unpacked(pairs.values()), vec![0.0, 50.0]);
        assert_eq!(unpacked(pairs.diffs()), vec![1.0, 10.0]);
    }

    #[test]
    fn test_leading_run_below_first_gate() {
        // Model levels below the lowest gate all land on gate 0, the highest of them is closest.
        let model = meters(&[2.0, 5.0, 9.0, 21.0, 40.0]);
        let obs = meters(&[10.0, 20.0, 30.0, 40.0, 50.0]);

        let pairs = nearest_heights(&model, &obs, Meters(1000.0)).unwrap();

        assert_eq!(pairs.model_indices(), &[2, 3, 4]);
        assert_eq!(pairs.obs_indices(), &[0, 1, 3]);
    }

    #[test]
    fn test_duplicate_at_end() {
        let model = meters(&[0.0, 20.0, 45.0, 70.0, 95.0]);
        let obs = meters(&[0.0, 20.0, 40.0]);

        let pairs = nearest_heights(&model, &obs, Meters(1000.0)).unwrap();

        // 45, 70 and 95 all match the 40 m gate, 45 is the closest.
        assert_eq!(pairs.model_indices(), &[0, 1, 2]);
        assert_eq!(pairs.obs_indices(), &[0, 1, 2]);
    }

    #[test]
    fn test_interior_duplicates_kept() {
        let model = meters(&[0.0, 100.0, 104.0, 300.0]);
        let obs = meters(&[0.0, 100.0, 200.0, 300.0]);

        let pairs = nearest_heights(&model, &obs, Meters(1000.0)).unwrap();

        assert_eq!(pairs.model_indices(), &[0, 1, 2, 3]);
        assert_eq!(pairs.obs_indices(), &[0, 1, 1, 3]);
    }

    #[test]
    fn test_height_cut() {
        let model = meters(&[1.0, 2.0, 60.0]);
        let obs = meters(&[0.0, 50.0, 100.0]);

        let pairs = nearest_heights(&model, &obs, Meters(70.0)).unwrap();
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs.iter().nth(1).map(|p| p.value), Some(Meters(50.0)));

        let pairs = nearest_heights(&model, &obs, Meters(40.0)).unwrap();
        assert_eq!(pairs.model_indices(), &[0]);
        assert_eq!(pairs.obs_indices(), &[0]);
        assert_eq!(pairs.values().len(), 1);
        assert_eq!(pairs.diffs().len(), 1);
    }

    #[test]
    fn test_infinite_max_height() {
        let model = meters(&[1.0, 2.0, 60.0]);
        let obs = meters(&[0.0, 50.0, 100.0]);

        let uncut = nearest_heights(&model, &obs, Meters(std::f64::INFINITY)).unwrap();
        assert_eq!(uncut, nearest_heights(&model, &obs, Meters(1.0e6)).unwrap());
        assert_eq!(uncut.len(), 2);

        let pairs = nearest_heights(&model, &obs, Meters(std::f64::NEG_INFINITY)).unwrap();
        assert!(pairs.is_empty());
    }

    #[test]
    fn test_everything_cut() {
        let pairs = nearest_heights(&meters(&[500.0]), &meters(&[600.0]), Meters(100.0)).unwrap();

        assert!(pairs.is_empty());
        assert!(pairs.obs_indices().is_empty());
        assert!(pairs.model_indices().is_empty());
        assert!(pairs.values().is_empty());
        assert!(pairs.diffs().is_empty());
    }

    #[test]
    fn test_single_gate_collapses() {
        let model = meters(&[10.0, 40.0, 55.0, 90.0]);
        let obs = meters(&[50.0]);

        let pairs = nearest_heights(&model, &obs, Meters(1000.0)).unwrap();

        assert_eq!(pairs.model_indices(), &[2]);
        assert_eq!(pairs.obs_indices(), &[0]);
    }

    #[test]
    fn test_single_model_level() {
        let pairs = nearest_heights(&meters(&[33.0]), &meters(&[0.0, 30.0]), Meters(100.0)).unwrap();
        assert_eq!(pairs.model_indices(), &[0]);
        assert_eq!(pairs.obs_indices(), &[1]);
    }

    #[test]
    fn test_invalid_input() {
        let good = meters(&[0.0, 10.0]);

        assert_eq!(
            nearest_heights(&[], &good, Meters(10.0)),
            Err(AnalysisError::EmptyAxis)
        );
        assert_eq!(
            nearest_heights(&good, &[], Meters(10.0)),
            Err(AnalysisError::EmptyAxis)
        );
        assert_eq!(
            nearest_heights(&meters(&[10.0, 0.0]), &good, Meters(10.0)),
            Err(AnalysisError::NonAscendingAxis { index: 1 })
        );
        assert_eq!(
            nearest_heights(&good, &good, Meters(std::f64::NAN)),
            Err(AnalysisError::NonFiniteValue)
        );
    }

    #[test]
    fn test_select() {
        let model = meters(&[1.0, 2.0, 60.0]);
        let obs = meters(&[0.0, 50.0, 100.0]);
        let pairs = nearest_heights(&model, &obs, Meters(1000.0)).unwrap();

        assert_eq!(pairs.select_model(&[1.0, 2.0, 3.0]).unwrap(), vec![1.0, 3.0]);
        assert_eq!(pairs.select_obs(&['a', 'b', 'c']).unwrap(), vec!['a', 'b']);
        assert_eq!(
            pairs.select_obs(&[1.0, 2.0]),
            Err(AnalysisError::ShapeMismatch {
                expected: 3,
                found: 2
            })
        );
    }
}
