use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::core::{AppError, Result};

/// Inclusive calendar-date window used to restrict reports
///
/// All timestamps are UTC; a record belongs to the window when its UTC
/// calendar date falls between `start` and `end` (both inclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Create a date range, rejecting `start > end`
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(AppError::input_shape(format!(
                "start date ({}) must be before or equal to end date ({})",
                start, end
            )));
        }
        Ok(Self { start, end })
    }

    /// Parse ISO 8601 bounds (`YYYY-MM-DD`, or a full RFC 3339 timestamp
    /// whose UTC date is used)
    pub fn parse(start: &str, end: &str) -> Result<Self> {
        Self::new(parse_iso_date(start)?, parse_iso_date(end)?)
    }

    /// The calendar month `year-month`
    pub fn month(year: i32, month: u32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(AppError::input_shape(format!(
                "month must be between 1 and 12, got {}",
                month
            )));
        }
        let start = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
            AppError::input_shape(format!("invalid year/month: {}-{:02}", year, month))
        })?;
        let next = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)
        };
        let end = next
            .and_then(|d| d.pred_opt())
            .ok_or_else(|| {
                AppError::input_shape(format!("invalid year/month: {}-{:02}", year, month))
            })?;
        Self::new(start, end)
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Whether the timestamp's UTC date lies within the range
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        let date = at.date_naive();
        date >= self.start && date <= self.end
    }
}

/// `true` when `range` is `None` or contains `at`
pub fn within(range: Option<&DateRange>, at: DateTime<Utc>) -> bool {
    range.map_or(true, |r| r.contains(at))
}

fn parse_iso_date(value: &str) -> Result<NaiveDate> {
    let trimmed = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date);
    }
    DateTime::parse_from_rfc3339(trimmed)
        .map(|dt| dt.with_timezone(&Utc).date_naive())
        .map_err(|_| AppError::input_shape(format!("invalid ISO 8601 date: '{}'", value)))
}
