//! Day lists given as `YYYYMMDD` strings.
use crate::error::{AnalysisError, Result};
use chrono::NaiveDate;

/// Parse a single `YYYYMMDD` day.
///
/// # Examples
///
/// ```rust
/// use ceilometer_analysis::parse_day;
/// use chrono::NaiveDate;
///
/// assert_eq!(parse_day("20160504").unwrap(), NaiveDate::from_ymd_opt(2016, 5, 4).unwrap());
/// assert!(parse_day("2016-05-04").is_err());
/// ```
pub fn parse_day(day: &str) -> Result<NaiveDate> {
    let day = day.trim();

    if day.len() != 8 || !day.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AnalysisError::InvalidDate {
            input: day.to_owned(),
        });
    }

    NaiveDate::parse_from_str(day, "%Y%m%d").map_err(|_| AnalysisError::InvalidDate {
        input: day.to_owned(),
    })
}

/// Parse a list of `YYYYMMDD` days, failing on the first bad entry.
pub fn parse_day_list<I, S>(days: I) -> Result<Vec<NaiveDate>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    days.into_iter().map(|d| parse_day(d.as_ref())).collect()
}
