use std::collections::BTreeMap;

use rust_decimal::Decimal;
use tracing::debug;

use crate::config::AnalyticsConfig;
use crate::core::date_range::{self, DateRange};
use crate::core::{money, AppError, Result};
use crate::modules::timeseries::models::{Granularity, PeriodKey, TimeSeriesPoint};
use crate::modules::transactions::TransactionRecord;

#[derive(Debug, Clone, Default)]
struct PeriodAccumulator {
    revenue: Decimal,
    commission: Decimal,
    total: u64,
    completed: u64,
}

impl PeriodAccumulator {
    fn add(mut self, record: &TransactionRecord) -> Result<Self> {
        self.total += 1;
        if record.is_completed() {
            self.completed += 1;
        }
        if record.is_revenue_eligible {
            self.revenue = money::add(self.revenue, record.gross_amount, "period revenue")?;
            self.commission = money::add(
                self.commission,
                record.applied_commission_amount,
                "period commission",
            )?;
        }
        Ok(self)
    }
}

/// Buckets records into day/week/month periods and derives trend metrics
///
/// Stateless apart from its limits; every call rebuilds the series from the
/// records it is given.
#[derive(Debug, Clone)]
pub struct TimeSeriesBucketer {
    daily_points: usize,
    weekly_points: usize,
    monthly_points: usize,
    moving_average_window: usize,
}

impl TimeSeriesBucketer {
    pub fn new(config: &AnalyticsConfig) -> Self {
        Self {
            daily_points: config.daily_points,
            weekly_points: config.weekly_points,
            monthly_points: config.monthly_points,
            moving_average_window: config.moving_average_window.max(1),
        }
    }

    /// Maximum number of points returned for a granularity
    pub fn limit(&self, granularity: Granularity) -> usize {
        match granularity {
            Granularity::Day => self.daily_points,
            Granularity::Week => self.weekly_points,
            Granularity::Month => self.monthly_points,
        }
    }

    /// Build the ascending series for `records`
    ///
    /// Derived metrics are computed over the full history before the series
    /// is cut down to the most recent `limit(granularity)` points, so
    /// cumulative revenue still reflects dropped periods.
    ///
    /// # Errors
    /// `AppError::InputShape` when a sum or ratio leaves the decimal range
    pub fn bucket<'a, I>(&self, records: I, granularity: Granularity) -> Result<Vec<TimeSeriesPoint>>
    where
        I: IntoIterator<Item = &'a TransactionRecord>,
    {
        let periods = records.into_iter().try_fold(
            BTreeMap::new(),
            |mut acc: BTreeMap<PeriodKey, PeriodAccumulator>, record| {
                let key = PeriodKey::for_timestamp(record.occurred_at, granularity);
                let period = acc.entry(key).or_default();
                *period = std::mem::take(period).add(record)?;
                Ok::<_, AppError>(acc)
            },
        )?;

        let revenues: Vec<Decimal> = periods.values().map(|p| p.revenue).collect();
        let mut cumulative = Decimal::ZERO;

        let points: Vec<TimeSeriesPoint> = periods
            .into_iter()
            .enumerate()
            .map(|(i, (period, acc))| -> Result<TimeSeriesPoint> {
                cumulative = money::add(cumulative, acc.revenue, "cumulative revenue")?;
                Ok(TimeSeriesPoint {
                    period,
                    revenue: acc.revenue,
                    commission: acc.commission,
                    transaction_count: acc.total,
                    completed_count: acc.completed,
                    growth_rate: growth_rate(&revenues, i)?,
                    moving_average: match granularity {
                        Granularity::Day => {
                            trailing_mean(&revenues, i, self.moving_average_window)?
                        }
                        _ => None,
                    },
                    cumulative_revenue: cumulative,
                    revenue_per_transaction: money::mean(acc.revenue, acc.total),
                    success_rate: money::percentage(
                        Decimal::from(acc.completed),
                        Decimal::from(acc.total),
                    )?,
                })
            })
            .collect::<Result<_>>()?;

        let limit = self.limit(granularity);
        let skip = points.len().saturating_sub(limit);

        debug!(
            "Bucketed {} {} periods, returning {}",
            points.len(),
            granularity,
            points.len() - skip
        );

        Ok(points.into_iter().skip(skip).collect())
    }

    /// `bucket` restricted to records inside `range`
    pub fn bucket_in_range<'a, I>(
        &self,
        records: I,
        granularity: Granularity,
        range: Option<&DateRange>,
    ) -> Result<Vec<TimeSeriesPoint>>
    where
        I: IntoIterator<Item = &'a TransactionRecord>,
    {
        self.bucket(
            records
                .into_iter()
                .filter(|r| date_range::within(range, r.occurred_at)),
            granularity,
        )
    }
}

impl Default for TimeSeriesBucketer {
    fn default() -> Self {
        Self::new(&AnalyticsConfig::default())
    }
}

/// Percent change from the previous value; zero for the first point or a zero base
fn growth_rate(values: &[Decimal], i: usize) -> Result<Decimal> {
    if i == 0 {
        return Ok(Decimal::ZERO);
    }
    let previous = values[i - 1];
    if previous.is_zero() {
        return Ok(Decimal::ZERO);
    }
    values[i]
        .checked_sub(previous)
        .and_then(|change| change.checked_div(previous))
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .ok_or_else(|| AppError::input_shape("growth rate exceeds the supported decimal range"))
}

fn trailing_mean(values: &[Decimal], i: usize, window: usize) -> Result<Option<Decimal>> {
    if i + 1 < window {
        return Ok(None);
    }
    let sum = values[i + 1 - window..=i]
        .iter()
        .try_fold(Decimal::ZERO, |acc, v| money::add(acc, *v, "moving average window"))?;
    Ok(Some(money::mean(sum, window as u64)))
}
