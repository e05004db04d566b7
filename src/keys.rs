//! Enums used as keys for selecting statistics and optical quantities.
use strum_macros::{AsRefStr, Display, EnumIter};

/// Statistics computed when comparing model and observed backscatter at one time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumIter, AsRefStr)]
pub enum Metric {
    /// Spearman rank correlation of log10 backscatter.
    #[strum(serialize = "r")]
    Correlation,
    /// Two-sided p-value of the rank correlation.
    #[strum(serialize = "p")]
    PValue,
    /// Mean of log10(model) - log10(observed).
    #[strum(serialize = "diff")]
    LogDifference,
    /// Root mean square error of log10 backscatter.
    #[strum(serialize = "RMSE")]
    Rmse,
    /// Mean bias error, model minus observed, in linear units.
    #[strum(serialize = "MBE")]
    MeanBiasError,
}

/// Optical property taken from a Mie-scattering lookup table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum OpticalQuantity {
    /// Absorption plus scattering.
    #[strum(serialize = "extinction")]
    Extinction,
    /// Scattering only.
    #[strum(serialize = "scattering")]
    Scattering,
    /// Absorption only.
    #[strum(serialize = "absorption")]
    Absorption,
}
