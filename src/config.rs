//! Options for comparing model and observed backscatter.
use crate::keys::Metric;
use metfor::Meters;
use strum::IntoEnumIterator;

/// Settings for [`compare_profiles`](crate::compare_profiles).
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonConfig {
    max_height: Meters,
    metrics: Vec<Metric>,
    min_pairs: usize,
}

impl Default for ComparisonConfig {
    fn default() -> Self {
        ComparisonConfig {
            max_height: Meters(2000.0),
            metrics: Metric::iter().collect(),
            min_pairs: 3,
        }
    }
}

impl ComparisonConfig {
    /// Create a config with the default values: pairs up to 2000 m, every metric, and at least
    /// 3 finite pairs per time.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method for the highest observation gate that is compared.
    #[inline]
    pub fn with_max_height(self, max_height: Meters) -> Self {
        Self { max_height, ..self }
    }

    /// Builder method for the statistics to compute.
    pub fn with_metrics<I>(self, metrics: I) -> Self
    where
        I: IntoIterator<Item = Metric>,
    {
        let mut metrics: Vec<Metric> = metrics.into_iter().collect();
        metrics.sort();
        metrics.dedup();

        Self { metrics, ..self }
    }

    /// Builder method for the fewest finite pairs a time needs before it gets statistics.
    ///
    /// Pairs are counted on the series each statistic uses, so log10 statistics only count
    /// pairs with positive backscatter.
    #[inline]
    pub fn with_min_pairs(self, min_pairs: usize) -> Self {
        Self { min_pairs, ..self }
    }

    /// The highest observation gate that is compared.
    #[inline]
    pub fn max_height(&self) -> Meters {
        self.max_height
    }

    /// Statistics to compute, in a fixed order.
    #[inline]
    pub fn metrics(&self) -> &[Metric] {
        &self.metrics
    }

    /// Fewest finite pairs a time needs before it gets statistics.
    #[inline]
    pub fn min_pairs(&self) -> usize {
        self.min_pairs
    }
}
