//! Calendar date windows for catalog searches

use chrono::{Duration, NaiveDate};

use crate::errors::{SrError, SrResult};

/// First day Sentinel-2 surface reflectance products are available
pub const EARLIEST_TARGET_DATE: (i32, u32, u32) = (2017, 3, 23);

/// Smallest and largest accepted search windows, in days
pub const MIN_WINDOW_DAYS: u32 = 15;
pub const MAX_WINDOW_DAYS: u32 = 180;
pub const DEFAULT_WINDOW_DAYS: u32 = 60;

/// A search window of calendar dates
///
/// `start` is inclusive and `end` is exclusive when rendered as a catalog
/// interval, the same convention the catalog's date filter uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Create a range, rejecting `start > end`
    pub fn new(start: NaiveDate, end: NaiveDate) -> SrResult<Self> {
        if start > end {
            return Err(SrError::InvalidDateRange(format!("start {} is after end {}", start, end)));
        }
        Ok(DateRange { start, end })
    }

    /// Symmetric window around a centre date
    ///
    /// Each side gets `window_days / 2` days (integer division), so an odd
    /// window loses one day.
    pub fn around(center: NaiveDate, window_days: u32) -> SrResult<Self> {
        let half = Duration::days(i64::from(window_days / 2));
        let start = center.checked_sub_signed(half)
            .ok_or_else(|| SrError::InvalidDateRange(format!("{} - {} days underflows", center, window_days / 2)))?;
        let end = center.checked_add_signed(half)
            .ok_or_else(|| SrError::InvalidDateRange(format!("{} + {} days overflows", center, window_days / 2)))?;
        Self::new(start, end)
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Length of the window in days
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    /// RFC 3339 interval for STAC `datetime` filters
    pub fn to_interval(&self) -> String {
        format!("{}T00:00:00Z/{}T00:00:00Z", self.start.format("%Y-%m-%d"), self.end.format("%Y-%m-%d"))
    }
}

/// Parse a `YYYY-MM-DD` date
pub fn parse_date(value: &str) -> SrResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|e| SrError::InvalidDateRange(format!("'{}' is not a YYYY-MM-DD date: {}", value, e)))
}

/// Check a target date lies between the first available capture and `today`
pub fn validate_target_date(date: NaiveDate, today: NaiveDate) -> SrResult<NaiveDate> {
    let (y, m, d) = EARLIEST_TARGET_DATE;
    let earliest = NaiveDate::from_ymd_opt(y, m, d)
        .ok_or_else(|| SrError::InvalidDateRange("invalid earliest date constant".to_string()))?;

    if date < earliest || date > today {
        return Err(SrError::InvalidDateRange(format!(
            "target date {} must be between {} and {}",
            date, earliest, today
        )));
    }
    Ok(date)
}

/// Check a search window length
pub fn validate_window(window_days: u32) -> SrResult<u32> {
    if !(MIN_WINDOW_DAYS..=MAX_WINDOW_DAYS).contains(&window_days) {
        return Err(SrError::InvalidDateRange(format!(
            "time window must be between {} and {} days, got {}",
            MIN_WINDOW_DAYS, MAX_WINDOW_DAYS, window_days
        )));
    }
    Ok(window_days)
}
