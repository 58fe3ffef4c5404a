use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::{money, Result};
use crate::modules::transactions::TransactionRecord;

/// Running sums for one group during a single aggregation pass
///
/// Amounts are kept at full precision; nothing is rounded here.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregationBucket {
    commission: Decimal,
    revenue: Decimal,
    revenue_after_costs: Decimal,
    count: u64,
}

impl AggregationBucket {
    /// Fold one record into the bucket
    ///
    /// # Errors
    /// `AppError::InputShape` when a running sum leaves the decimal range
    pub fn add(self, record: &TransactionRecord) -> Result<Self> {
        Ok(Self {
            commission: money::add(
                self.commission,
                record.applied_commission_amount,
                "commission total",
            )?,
            revenue: money::add(self.revenue, record.gross_amount, "revenue total")?,
            revenue_after_costs: money::add(
                self.revenue_after_costs,
                record.revenue_after_costs,
                "revenue after costs total",
            )?,
            count: self.count + 1,
        })
    }

    pub fn finish(self) -> GroupTotals {
        GroupTotals {
            commission_total: self.commission,
            revenue_total: self.revenue,
            revenue_after_costs_total: self.revenue_after_costs,
            transaction_count: self.count,
            average_commission: money::mean(self.commission, self.count),
        }
    }
}

/// Totals for one group of eligible records
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupTotals {
    pub commission_total: Decimal,
    pub revenue_total: Decimal,
    pub revenue_after_costs_total: Decimal,
    pub transaction_count: u64,
    pub average_commission: Decimal,
}

impl GroupTotals {
    pub fn is_empty(&self) -> bool {
        self.transaction_count == 0
    }
}

/// One chart-ready row of a breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupBreakdown {
    pub key: String,
    pub totals: GroupTotals,
}
