use crate::error::{AnalysisError, Result};
use metfor::{Meters, Quantity};

/// Check that a height axis is non-empty, finite, and strictly ascending.
pub(crate) fn validate_axis(axis: &[Meters]) -> Result<()> {
    if axis.is_empty() {
        return Err(AnalysisError::EmptyAxis);
    }

    if axis.iter().any(|h| !h.unpack().is_finite()) {
        return Err(AnalysisError::NonFiniteValue);
    }

    match axis.windows(2).position(|pair| pair[1] <= pair[0]) {
        Some(i) => Err(AnalysisError::NonAscendingAxis { index: i + 1 }),
        None => Ok(()),
    }
}
