//! Error types for the ceilometer-analysis crate.

/// Error type for the crate.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AnalysisError {
    /// A height axis or data series that is required for this analysis is empty.
    #[error("Empty axis, cannot do analysis.")]
    EmptyAxis,
    /// A height axis is not strictly ascending.
    #[error("Axis is not strictly ascending at index {index}.")]
    NonAscendingAxis {
        /// Index of the first value that is not greater than its predecessor.
        index: usize,
    },
    /// A NaN or infinite value where a finite one is required.
    #[error("Non-finite value where a finite value is required.")]
    NonFiniteValue,
    /// Two parallel series have different lengths.
    #[error("Length mismatch between parallel series: {left} != {right}.")]
    LengthMismatch {
        /// Length of the first series.
        left: usize,
        /// Length of the second series.
        right: usize,
    },
    /// A data grid does not have the shape implied by its axes.
    #[error("Grid shape mismatch: expected {expected} values, found {found}.")]
    ShapeMismatch {
        /// Number of values implied by the axes.
        expected: usize,
        /// Number of values actually present.
        found: usize,
    },
    /// A date string could not be parsed as `YYYYMMDD`.
    #[error("Invalid date string: {input:?}.")]
    InvalidDate {
        /// The string that failed to parse.
        input: String,
    },
    /// Bin edges are empty or not ascending.
    #[error("Invalid bin edges.")]
    InvalidBins,
}

/// Shorthand for results.
pub type Result<T> = ::std::result::Result<T, AnalysisError>;
