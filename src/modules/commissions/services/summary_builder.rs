use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::config::AnalyticsConfig;
use crate::core::date_range::{self, DateRange};
use crate::core::{money, AppError, Result};
use crate::modules::aggregation::{Dimension, TransactionAggregator};
use crate::modules::commissions::models::{
    ActorComparison, ActorRanking, ActorSummary, ComparisonAggregate, InactiveActor,
    MonthlyStatement,
};
use crate::modules::commissions::services::CommissionRuleEngine;
use crate::modules::transactions::TransactionRecord;

/// Builds per-actor summaries, monthly statements and rankings
///
/// Works on caller-supplied snapshots; nothing is cached between calls.
pub struct CommissionSummaryBuilder {
    aggregator: TransactionAggregator,
    top_organizations: usize,
}

impl CommissionSummaryBuilder {
    pub fn new(config: &AnalyticsConfig) -> Self {
        Self {
            aggregator: TransactionAggregator::new(),
            top_organizations: config.top_organizations,
        }
    }

    /// Totals for one actor, optionally restricted to a date window
    ///
    /// # Errors
    /// `AppError::InputShape` when `actor_id` is blank
    pub fn summarize_actor(
        &self,
        records: &[TransactionRecord],
        actor_id: &str,
        range: Option<&DateRange>,
    ) -> Result<ActorSummary> {
        Self::require_actor_id(actor_id)?;

        let totals = self.aggregator.totals(Self::actor_records(records, actor_id, range))?;
        let summary = ActorSummary::from_totals(actor_id, &totals)?;

        if summary.is_empty() {
            warn!("No eligible activity for actor {} in {:?}", actor_id, range);
        }

        Ok(summary)
    }

    /// Statement for one actor and calendar month
    ///
    /// # Errors
    /// `AppError::InputShape` for a blank actor id or a month outside 1..=12
    pub fn generate_statement(
        &self,
        records: &[TransactionRecord],
        actor_id: &str,
        year: i32,
        month: u32,
    ) -> Result<MonthlyStatement> {
        Self::require_actor_id(actor_id)?;
        let period = DateRange::month(year, month)?;

        info!(
            "Generating commission statement: actor={}, period={}-{:02}",
            actor_id, year, month
        );

        let in_period: Vec<&TransactionRecord> =
            Self::actor_records(records, actor_id, Some(&period)).collect();

        let totals = self.aggregator.totals(in_period.iter().copied())?;
        let summary = ActorSummary::from_totals(actor_id, &totals)?;
        let payment_channels = self.aggregator.breakdown(
            in_period.iter().copied(),
            Dimension::PaymentChannel,
            None,
        )?;
        let top_organizations = self.aggregator.breakdown(
            in_period.iter().copied(),
            Dimension::Organization,
            Some(self.top_organizations),
        )?;

        if summary.is_empty() {
            warn!(
                "Empty commission statement for actor {} in {}-{:02}",
                actor_id, year, month
            );
        }

        Ok(MonthlyStatement {
            year,
            month,
            period,
            summary,
            payment_channels,
            top_organizations,
        })
    }

    /// Every actor with eligible activity in the window, ranked by commission
    ///
    /// Ranks are 1-based positions after a stable descending sort; actors with
    /// equal commission keep actor-id order.
    ///
    /// # Errors
    /// `AppError::InputShape` when totals leave the decimal range
    pub fn compare_actors(
        &self,
        records: &[TransactionRecord],
        range: Option<&DateRange>,
    ) -> Result<ActorComparison> {
        let by_actor = self.aggregator.aggregate(
            records
                .iter()
                .filter(|r| date_range::within(range, r.occurred_at)),
            |r| r.actor_id.clone(),
        )?;

        let mut summaries = by_actor
            .iter()
            .map(|(actor_id, totals)| ActorSummary::from_totals(actor_id.as_str(), totals))
            .collect::<Result<Vec<_>>>()?;
        summaries.sort_by(|a, b| b.total_commission.cmp(&a.total_commission));

        let aggregate = summaries.iter().try_fold(
            ComparisonAggregate {
                actor_count: summaries.len(),
                ..ComparisonAggregate::default()
            },
            |acc, s| {
                Ok::<_, AppError>(ComparisonAggregate {
                    total_commission: money::add(
                        acc.total_commission,
                        s.total_commission,
                        "commission total",
                    )?,
                    total_revenue: money::add(acc.total_revenue, s.total_revenue, "revenue total")?,
                    total_transactions: acc.total_transactions + s.total_transactions,
                    average_efficiency: money::add(
                        acc.average_efficiency,
                        s.efficiency,
                        "efficiency total",
                    )?,
                    ..acc
                })
            },
        )?;
        let aggregate = ComparisonAggregate {
            average_efficiency: money::mean(aggregate.average_efficiency, summaries.len() as u64),
            ..aggregate
        };

        let rankings = summaries
            .into_iter()
            .enumerate()
            .map(|(i, summary)| ActorRanking {
                rank: i + 1,
                summary,
            })
            .collect::<Vec<_>>();

        info!("Ranked {} actors by commission", rankings.len());

        Ok(ActorComparison {
            rankings,
            aggregate,
        })
    }

    /// Actors present in `records` with no eligible activity inside the window
    ///
    /// The last transaction time is taken over each actor's full history.
    /// Results are ordered by actor id.
    pub fn find_inactive(
        &self,
        records: &[TransactionRecord],
        range: Option<&DateRange>,
    ) -> Vec<InactiveActor> {
        let last_seen = records.iter().fold(
            BTreeMap::new(),
            |mut acc: BTreeMap<&str, DateTime<Utc>>, r| {
                acc.entry(r.actor_id.as_str())
                    .and_modify(|at| *at = (*at).max(r.occurred_at))
                    .or_insert(r.occurred_at);
                acc
            },
        );

        let active: BTreeSet<&str> = records
            .iter()
            .filter(|r| r.is_revenue_eligible && date_range::within(range, r.occurred_at))
            .map(|r| r.actor_id.as_str())
            .collect();

        let inactive: Vec<InactiveActor> = last_seen
            .into_iter()
            .filter(|(actor_id, _)| !active.contains(actor_id))
            .map(|(actor_id, last_transaction_at)| InactiveActor {
                actor_id: actor_id.to_string(),
                last_transaction_at,
            })
            .collect();

        info!(
            "Found {} inactive actors out of {}",
            inactive.len(),
            inactive.len() + active.len()
        );

        inactive
    }

    /// Total commission paid across the window, for headline figures
    pub fn total_commission(
        &self,
        records: &[TransactionRecord],
        range: Option<&DateRange>,
    ) -> Result<Decimal> {
        let totals = self.aggregator.totals(
            records
                .iter()
                .filter(|r| date_range::within(range, r.occurred_at)),
        )?;
        Ok(totals.commission_total)
    }

    /// Commission each actor would earn under `engine`'s tier table
    ///
    /// Recomputed from the gross amount of every eligible record in the
    /// window, ignoring the commission applied upstream. Ordered by actor id.
    ///
    /// # Errors
    /// `AppError::InputShape` when a per-actor sum leaves the decimal range
    pub fn tiered_commission(
        &self,
        records: &[TransactionRecord],
        engine: &CommissionRuleEngine,
        range: Option<&DateRange>,
    ) -> Result<BTreeMap<String, Decimal>> {
        records
            .iter()
            .filter(|r| r.is_revenue_eligible && date_range::within(range, r.occurred_at))
            .try_fold(BTreeMap::new(), |mut acc: BTreeMap<String, Decimal>, r| {
                let total = acc.entry(r.actor_id.clone()).or_insert(Decimal::ZERO);
                *total = money::add(
                    *total,
                    engine.commission_for(r.gross_amount),
                    "tiered commission",
                )?;
                Ok(acc)
            })
    }

    fn actor_records<'a>(
        records: &'a [TransactionRecord],
        actor_id: &'a str,
        range: Option<&'a DateRange>,
    ) -> impl Iterator<Item = &'a TransactionRecord> + 'a {
        records
            .iter()
            .filter(move |r| r.actor_id == actor_id && date_range::within(range, r.occurred_at))
    }

    fn require_actor_id(actor_id: &str) -> Result<()> {
        if actor_id.trim().is_empty() {
            return Err(AppError::input_shape("actor id cannot be empty"));
        }
        Ok(())
    }
}

impl Default for CommissionSummaryBuilder {
    fn default() -> Self {
        Self::new(&AnalyticsConfig::default())
    }
}
