//! Data type to store a time × height grid of backscatter for one site.

use crate::{
    error::{AnalysisError, Result},
    utility::validate_axis,
};
use chrono::NaiveDateTime;
use metfor::Meters;

/// Backscatter at a single site, from a ceilometer or from a forward operator run on model output.
///
/// Rows are times and columns are heights. Missing values are NaN.
#[derive(Clone, Debug, PartialEq)]
pub struct BackscatterProfile {
    time: Vec<NaiveDateTime>,
    height: Vec<Meters>,
    // Row major, time.len() rows of height.len() values.
    backscatter: Vec<f64>,
}

impl BackscatterProfile {
    /// Create a new profile.
    ///
    /// `backscatter` is row major with one row per time. The height axis must be strictly
    /// ascending.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ceilometer_analysis::BackscatterProfile;
    /// use chrono::NaiveDate;
    /// use metfor::Meters;
    ///
    /// let t0 = NaiveDate::from_ymd_opt(2016, 5, 4).unwrap().and_hms_opt(0, 0, 0).unwrap();
    /// let profile = BackscatterProfile::new(
    ///     vec![t0],
    ///     vec![Meters(10.0), Meters(20.0)],
    ///     vec![1.0e-6, 2.0e-6],
    /// )
    /// .unwrap();
    /// assert_eq!(profile.row(0), Some(&[1.0e-6, 2.0e-6][..]));
    ///
    /// assert!(BackscatterProfile::new(vec![t0], vec![Meters(10.0)], vec![]).is_err());
    /// ```
    pub fn new(
        time: Vec<NaiveDateTime>,
        height: Vec<Meters>,
        backscatter: Vec<f64>,
    ) -> Result<Self> {
        validate_axis(&height)?;

        let expected = time.len() * height.len();
        if backscatter.len() != expected {
            return Err(AnalysisError::ShapeMismatch {
                expected,
                found: backscatter.len(),
            });
        }

        Ok(BackscatterProfile {
            time,
            height,
            backscatter,
        })
    }

    /// Build a profile from one row of values per time.
    pub fn from_rows(
        time: Vec<NaiveDateTime>,
        height: Vec<Meters>,
        rows: &[Vec<f64>],
    ) -> Result<Self> {
        if let Some(bad) = rows.iter().find(|row| row.len() != height.len()) {
            return Err(AnalysisError::ShapeMismatch {
                expected: height.len(),
                found: bad.len(),
            });
        }

        let backscatter = rows.iter().flatten().cloned().collect();
        Self::new(time, height, backscatter)
    }

    /// Valid times, one per row.
    #[inline]
    pub fn time(&self) -> &[NaiveDateTime] {
        &self.time
    }

    /// Height of each column.
    #[inline]
    pub fn height(&self) -> &[Meters] {
        &self.height
    }

    /// Number of time rows.
    #[inline]
    pub fn num_times(&self) -> usize {
        self.time.len()
    }

    /// Backscatter at every height for one time.
    pub fn row(&self, t: usize) -> Option<&[f64]> {
        if t >= self.time.len() {
            return None;
        }

        let width = self.height.len();
        Some(&self.backscatter[t * width..(t + 1) * width])
    }

    /// Iterate over the rows along with their valid time.
    pub fn rows(&self) -> impl Iterator<Item = (NaiveDateTime, &[f64])> + '_ {
        self.time
            .iter()
            .cloned()
            .zip(self.backscatter.chunks(self.height.len()))
    }
}
