use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Completion status of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompletionStatus {
    /// Payment settled
    Completed,

    /// Payment failed
    Failed,

    /// Awaiting confirmation
    Pending,
}

impl Default for CompletionStatus {
    fn default() -> Self {
        CompletionStatus::Pending
    }
}

impl std::fmt::Display for CompletionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompletionStatus::Completed => write!(f, "completed"),
            CompletionStatus::Failed => write!(f, "failed"),
            CompletionStatus::Pending => write!(f, "pending"),
        }
    }
}

impl std::str::FromStr for CompletionStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "completed" => Ok(CompletionStatus::Completed),
            "failed" => Ok(CompletionStatus::Failed),
            "pending" => Ok(CompletionStatus::Pending),
            _ => Err(format!("Invalid completion status: {}", s)),
        }
    }
}

/// A single commission-bearing transaction, as delivered by the retrieval layer
///
/// Records are immutable snapshots; the engine never mutates them. Field names
/// follow the camelCase shape of the upstream analytics payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    /// Commission-earning party (employee or partner)
    pub actor_id: String,

    /// Organization the transaction was made for
    pub organization_id: String,

    /// Payment channel (gateway, card network, wallet...)
    pub payment_channel_id: String,

    /// Amount charged before costs
    pub gross_amount: Decimal,

    /// Amount left after processing costs
    pub revenue_after_costs: Decimal,

    /// Commission actually paid out for this transaction
    pub applied_commission_amount: Decimal,

    /// Commission rate that was applied, as a fraction (0..=1)
    pub applied_commission_percentage: Decimal,

    /// Only eligible records contribute to totals
    pub is_revenue_eligible: bool,

    pub occurred_at: DateTime<Utc>,

    pub completion_status: CompletionStatus,
}

impl TransactionRecord {
    /// Create a completed, eligible record whose commission is
    /// `gross_amount × commission_percentage` and whose revenue after costs
    /// equals the gross amount
    pub fn new(
        actor_id: impl Into<String>,
        organization_id: impl Into<String>,
        payment_channel_id: impl Into<String>,
        gross_amount: Decimal,
        commission_percentage: Decimal,
        occurred_at: DateTime<Utc>,
    ) -> Self {
        Self {
            actor_id: actor_id.into(),
            organization_id: organization_id.into(),
            payment_channel_id: payment_channel_id.into(),
            gross_amount,
            revenue_after_costs: gross_amount,
            applied_commission_amount: gross_amount * commission_percentage,
            applied_commission_percentage: commission_percentage,
            is_revenue_eligible: true,
            occurred_at,
            completion_status: CompletionStatus::Completed,
        }
    }

    pub fn with_revenue_after_costs(mut self, revenue_after_costs: Decimal) -> Self {
        self.revenue_after_costs = revenue_after_costs;
        self
    }

    pub fn with_status(mut self, status: CompletionStatus) -> Self {
        self.completion_status = status;
        self
    }

    pub fn with_eligibility(mut self, eligible: bool) -> Self {
        self.is_revenue_eligible = eligible;
        self
    }

    pub fn is_completed(&self) -> bool {
        self.completion_status == CompletionStatus::Completed
    }
}
