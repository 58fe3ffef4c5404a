use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One tier of a commission table
///
/// `max_amount: None` means the tier is unbounded above.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommissionRule {
    pub min_amount: Decimal,
    pub max_amount: Option<Decimal>,
    pub rate: Decimal,
}

impl CommissionRule {
    pub fn new(min_amount: Decimal, max_amount: Decimal, rate: Decimal) -> Self {
        Self {
            min_amount,
            max_amount: Some(max_amount),
            rate,
        }
    }

    /// A tier covering everything from `min_amount` upward
    pub fn unbounded(min_amount: Decimal, rate: Decimal) -> Self {
        Self {
            min_amount,
            max_amount: None,
            rate,
        }
    }

    /// Tier membership: `[min, max)`, or `[min, max]` when `closed_upper` is set
    pub fn contains(&self, amount: Decimal, closed_upper: bool) -> bool {
        if amount < self.min_amount {
            return false;
        }
        match self.max_amount {
            None => true,
            Some(max) if closed_upper => amount <= max,
            Some(max) => amount < max,
        }
    }
}
