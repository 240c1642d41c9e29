//! Date-range filtering for video records
//!
//! The report covers an inclusive range of calendar dates. Upload timestamps
//! are normalized to naive UTC by the fetching layer, so the comparison here
//! is purely on the calendar date of the timestamp: both the start and end
//! day are included in full.
//!
//! # Examples
//!
//! ```
//! use ytstat::filters::DateRange;
//! use chrono::NaiveDate;
//!
//! let range = DateRange::new(
//!     NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
//!     NaiveDate::from_ymd_opt(2024, 6, 30).unwrap(),
//! )
//! .unwrap();
//!
//! let ts = NaiveDate::from_ymd_opt(2024, 6, 30)
//!     .unwrap()
//!     .and_hms_opt(23, 59, 59)
//!     .unwrap();
//! assert!(range.contains(&ts));
//! ```

use crate::error::{Result, YtstatError};
use chrono::{NaiveDate, NaiveDateTime};

/// Inclusive calendar-date range for report filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    /// Start date (inclusive)
    pub since: NaiveDate,
    /// End date (inclusive)
    pub until: NaiveDate,
}

impl DateRange {
    /// Create a new range, validating that `since` does not exceed `until`
    pub fn new(since: NaiveDate, until: NaiveDate) -> Result<Self> {
        if since > until {
            return Err(YtstatError::Config(format!(
                "start date {since} is after end date {until}"
            )));
        }
        Ok(Self { since, until })
    }

    /// Check whether a naive UTC timestamp falls inside the range
    ///
    /// Both boundaries are inclusive: a video published at 00:00 on the
    /// start date or anywhere on the end date is retained.
    pub fn contains(&self, published_at: &NaiveDateTime) -> bool {
        let date = published_at.date();
        date >= self.since && date <= self.until
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} .. {}", self.since, self.until)
    }
}
