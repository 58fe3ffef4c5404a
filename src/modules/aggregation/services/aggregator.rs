use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{AppError, Result};
use crate::modules::aggregation::models::{AggregationBucket, GroupBreakdown, GroupTotals};
use crate::modules::transactions::TransactionRecord;

/// A field records can be grouped by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Actor,
    Organization,
    PaymentChannel,
}

impl Dimension {
    pub fn key_of<'a>(&self, record: &'a TransactionRecord) -> &'a str {
        match self {
            Dimension::Actor => &record.actor_id,
            Dimension::Organization => &record.organization_id,
            Dimension::PaymentChannel => &record.payment_channel_id,
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dimension::Actor => write!(f, "actor"),
            Dimension::Organization => write!(f, "organization"),
            Dimension::PaymentChannel => write!(f, "payment_channel"),
        }
    }
}

/// Groups eligible records and totals commission, revenue and counts per group
///
/// Each call folds into fresh per-call buckets, so one aggregator can serve
/// concurrent callers over the same snapshot.
#[derive(Debug, Clone, Copy, Default)]
pub struct TransactionAggregator;

impl TransactionAggregator {
    pub fn new() -> Self {
        Self
    }

    /// Group eligible records by `key_fn` in a single pass
    ///
    /// Ineligible records are skipped silently.
    ///
    /// # Errors
    /// `AppError::InputShape` when a group's sums leave the decimal range
    pub fn aggregate<'a, I, K, F>(&self, records: I, key_fn: F) -> Result<BTreeMap<K, GroupTotals>>
    where
        I: IntoIterator<Item = &'a TransactionRecord>,
        K: Ord,
        F: Fn(&TransactionRecord) -> K,
    {
        let buckets = records
            .into_iter()
            .filter(|r| r.is_revenue_eligible)
            .try_fold(BTreeMap::new(), |mut acc: BTreeMap<K, AggregationBucket>, r| {
                let bucket = acc.entry(key_fn(r)).or_default();
                *bucket = std::mem::take(bucket).add(r)?;
                Ok::<_, AppError>(acc)
            })?;

        debug!("Aggregated records into {} groups", buckets.len());

        Ok(buckets
            .into_iter()
            .map(|(key, bucket)| (key, bucket.finish()))
            .collect())
    }

    /// Flat grouping by one dimension
    pub fn by_dimension<'a, I>(
        &self,
        records: I,
        dimension: Dimension,
    ) -> Result<BTreeMap<String, GroupTotals>>
    where
        I: IntoIterator<Item = &'a TransactionRecord>,
    {
        self.aggregate(records, |r| dimension.key_of(r).to_string())
    }

    /// Grouping by a composite key, one component per dimension in order
    pub fn by_dimensions<'a, I>(
        &self,
        records: I,
        dimensions: &[Dimension],
    ) -> Result<BTreeMap<Vec<String>, GroupTotals>>
    where
        I: IntoIterator<Item = &'a TransactionRecord>,
    {
        self.aggregate(records, |r| {
            dimensions
                .iter()
                .map(|d| d.key_of(r).to_string())
                .collect::<Vec<_>>()
        })
    }

    /// Totals over every eligible record
    pub fn totals<'a, I>(&self, records: I) -> Result<GroupTotals>
    where
        I: IntoIterator<Item = &'a TransactionRecord>,
    {
        Ok(records
            .into_iter()
            .filter(|r| r.is_revenue_eligible)
            .try_fold(AggregationBucket::default(), |bucket, r| bucket.add(r))?
            .finish())
    }

    /// Groups by `dimension`, ordered by commission descending
    ///
    /// Equal commissions keep key order. `limit` keeps only the first N rows.
    pub fn breakdown<'a, I>(
        &self,
        records: I,
        dimension: Dimension,
        limit: Option<usize>,
    ) -> Result<Vec<GroupBreakdown>>
    where
        I: IntoIterator<Item = &'a TransactionRecord>,
    {
        let mut rows: Vec<GroupBreakdown> = self
            .by_dimension(records, dimension)?
            .into_iter()
            .map(|(key, totals)| GroupBreakdown { key, totals })
            .collect();

        rows.sort_by(|a, b| b.totals.commission_total.cmp(&a.totals.commission_total));

        if let Some(limit) = limit {
            rows.truncate(limit);
        }
        Ok(rows)
    }
}
