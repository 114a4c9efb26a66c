//! Reporting windows.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use super::error::BalanceError;

/// A half-open interval `[start, end)` of instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl DateWindow {
    /// Creates a window.
    ///
    /// # Errors
    ///
    /// Returns `BalanceError::InvalidRange` if `end` precedes `start`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, BalanceError> {
        if end < start {
            return Err(BalanceError::invalid_range(format!(
                "end {end} is before start {start}"
            )));
        }
        Ok(Self { start, end })
    }

    /// Parses both bounds from query-string values.
    ///
    /// # Errors
    ///
    /// Returns `BalanceError::InvalidRange` if either bound is missing or
    /// unparsable, or if the window is inverted.
    pub fn parse(start: Option<&str>, end: Option<&str>) -> Result<Self, BalanceError> {
        let start = parse_bound("start", start)?;
        let end = parse_bound("end", end)?;
        Self::new(start, end)
    }

    /// Inclusive lower bound.
    #[must_use]
    pub const fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// Exclusive upper bound.
    #[must_use]
    pub const fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Returns true if `ts` falls inside the window.
    #[must_use]
    pub fn contains(&self, ts: DateTime<Utc>) -> bool {
        self.start <= ts && ts < self.end
    }
}

/// Parses an RFC 3339 timestamp or a `YYYY-MM-DD` date (midnight UTC).
///
/// # Errors
///
/// Returns `BalanceError::InvalidRange` when `raw` is absent, blank or unparsable.
pub fn parse_bound(name: &str, raw: Option<&str>) -> Result<DateTime<Utc>, BalanceError> {
    let raw = raw
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| BalanceError::invalid_range(format!("{name} is required")))?;

    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(|date| date.and_time(NaiveTime::MIN).and_utc())
        .map_err(|_| BalanceError::invalid_range(format!("{name} '{raw}' is not a date")))
}
