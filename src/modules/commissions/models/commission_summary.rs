use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::core::{money, DateRange, Result};
use crate::modules::aggregation::{GroupBreakdown, GroupTotals};

/// Commission performance of one actor over a window
///
/// A window without eligible records yields an all-zero summary.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ActorSummary {
    pub actor_id: String,
    pub total_commission: Decimal,
    /// Gross amount of eligible records
    pub total_revenue: Decimal,
    pub total_transactions: u64,
    pub average_commission: Decimal,
    /// Commission as a percentage of revenue after costs
    pub commission_rate: Decimal,
    pub revenue_after_costs: Decimal,
    /// Commission as a percentage of gross revenue
    pub efficiency: Decimal,
}

impl ActorSummary {
    /// # Errors
    /// `AppError::InputShape` when a ratio leaves the decimal range
    pub fn from_totals(actor_id: impl Into<String>, totals: &GroupTotals) -> Result<Self> {
        Ok(Self {
            actor_id: actor_id.into(),
            total_commission: totals.commission_total,
            total_revenue: totals.revenue_total,
            total_transactions: totals.transaction_count,
            average_commission: totals.average_commission,
            commission_rate: money::percentage(
                totals.commission_total,
                totals.revenue_after_costs_total,
            )?,
            revenue_after_costs: totals.revenue_after_costs_total,
            efficiency: money::percentage(totals.commission_total, totals.revenue_total)?,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.total_transactions == 0
    }

    /// Copy with every monetary and percentage field rounded for display
    pub fn rounded(&self) -> Self {
        Self {
            actor_id: self.actor_id.clone(),
            total_commission: money::round_money(self.total_commission),
            total_revenue: money::round_money(self.total_revenue),
            total_transactions: self.total_transactions,
            average_commission: money::round_money(self.average_commission),
            commission_rate: money::round_money(self.commission_rate),
            revenue_after_costs: money::round_money(self.revenue_after_costs),
            efficiency: money::round_money(self.efficiency),
        }
    }
}

/// Monthly commission statement for one actor
#[derive(Debug, Clone, Serialize)]
pub struct MonthlyStatement {
    pub year: i32,
    pub month: u32,
    /// Calendar bounds of the statement month (inclusive)
    pub period: DateRange,
    pub summary: ActorSummary,
    /// Commission per payment channel, largest first
    pub payment_channels: Vec<GroupBreakdown>,
    /// Organizations that generated the most commission, largest first
    pub top_organizations: Vec<GroupBreakdown>,
}

/// Position of one actor in a comparison
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActorRanking {
    /// 1-based position after sorting by commission
    pub rank: usize,
    pub summary: ActorSummary,
}

/// Figures across all ranked actors
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ComparisonAggregate {
    pub actor_count: usize,
    pub total_commission: Decimal,
    pub total_revenue: Decimal,
    pub total_transactions: u64,
    /// Mean of the per-actor efficiencies
    pub average_efficiency: Decimal,
}

/// Actors ranked by commission, plus the combined figures
#[derive(Debug, Clone, Default, Serialize)]
pub struct ActorComparison {
    pub rankings: Vec<ActorRanking>,
    pub aggregate: ComparisonAggregate,
}

impl ActorComparison {
    pub fn is_empty(&self) -> bool {
        self.rankings.is_empty()
    }

    pub fn ranking_of(&self, actor_id: &str) -> Option<&ActorRanking> {
        self.rankings.iter().find(|r| r.summary.actor_id == actor_id)
    }
}

/// An actor with history but no eligible activity in the window
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InactiveActor {
    pub actor_id: String,
    /// Latest transaction over the actor's full history, eligible or not
    pub last_transaction_at: DateTime<Utc>,
}
