use chrono::{DateTime, Datelike, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Period size for trend analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Day,
    Week,
    Month,
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Granularity::Day => write!(f, "day"),
            Granularity::Week => write!(f, "week"),
            Granularity::Month => write!(f, "month"),
        }
    }
}

impl std::str::FromStr for Granularity {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "day" | "daily" => Ok(Granularity::Day),
            "week" | "weekly" => Ok(Granularity::Week),
            "month" | "monthly" => Ok(Granularity::Month),
            _ => Err(format!("Invalid granularity: {}", s)),
        }
    }
}

/// Sortable key of one period
///
/// Weeks are numbered within their month: week 1 holds the days up to the
/// first Saturday, so the key is `ceil((day + weekday_of_first) / 7)` with
/// Sunday as weekday 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PeriodKey {
    Day(NaiveDate),
    Week { year: i32, month: u32, week: u32 },
    Month { year: i32, month: u32 },
}

impl PeriodKey {
    pub fn for_timestamp(at: DateTime<Utc>, granularity: Granularity) -> Self {
        Self::for_date(at.date_naive(), granularity)
    }

    pub fn for_date(date: NaiveDate, granularity: Granularity) -> Self {
        match granularity {
            Granularity::Day => PeriodKey::Day(date),
            Granularity::Week => PeriodKey::Week {
                year: date.year(),
                month: date.month(),
                week: (date.day() + first_weekday_offset(date)).div_ceil(7),
            },
            Granularity::Month => PeriodKey::Month {
                year: date.year(),
                month: date.month(),
            },
        }
    }
}

impl fmt::Display for PeriodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeriodKey::Day(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            PeriodKey::Week { year, month, week } => write!(f, "{}-{:02}-W{}", year, month, week),
            PeriodKey::Month { year, month } => write!(f, "{}-{:02}", year, month),
        }
    }
}

impl Serialize for PeriodKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

fn first_weekday_offset(date: NaiveDate) -> u32 {
    date.with_day(1)
        .map(|first| first.weekday().num_days_from_sunday())
        .unwrap_or(0)
}

/// One period of a trend series
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeSeriesPoint {
    pub period: PeriodKey,
    /// Gross amount of eligible records
    pub revenue: Decimal,
    /// Commission of eligible records
    pub commission: Decimal,
    /// Every record in the period, whatever its status or eligibility
    pub transaction_count: u64,
    pub completed_count: u64,
    /// Percent change of revenue against the previous point
    pub growth_rate: Decimal,
    /// Trailing mean of revenue; daily series only, once the window is full
    pub moving_average: Option<Decimal>,
    pub cumulative_revenue: Decimal,
    pub revenue_per_transaction: Decimal,
    /// Completed records as a percentage of all records
    pub success_rate: Decimal,
}
