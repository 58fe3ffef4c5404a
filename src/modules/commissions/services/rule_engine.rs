use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::core::{AppError, Result};
use crate::modules::commissions::models::CommissionRule;
use crate::modules::transactions::ValidationReport;

/// Resolves tiered commission rates from an amount-range table
#[derive(Debug, Clone)]
pub struct CommissionRuleEngine {
    /// Sorted ascending by `min_amount`, validated at construction
    rules: Vec<CommissionRule>,
}

impl CommissionRuleEngine {
    /// Build an engine over a validated tier table
    ///
    /// # Errors
    /// `AppError::RuleSetViolation` listing every problem with the table
    pub fn new(rules: Vec<CommissionRule>) -> Result<Self> {
        let report = Self::validate_rule_set(&rules);
        if !report.is_valid {
            warn!("Rejected commission rule set: {:?}", report.errors);
            return Err(AppError::RuleSetViolation(report.errors));
        }

        Ok(Self {
            rules: Self::sorted(&rules),
        })
    }

    pub fn rules(&self) -> &[CommissionRule] {
        &self.rules
    }

    /// Rate for `amount` under this engine's table
    pub fn rate_for(&self, amount: Decimal) -> Decimal {
        Self::match_sorted(amount, &self.rules)
    }

    /// Commission for `amount` under this engine's table (unrounded)
    pub fn commission_for(&self, amount: Decimal) -> Decimal {
        amount * self.rate_for(amount)
    }

    /// Rate of the tier containing `amount`, or zero when none does
    ///
    /// Tiers are matched after sorting by `min_amount`. Every tier is half-open
    /// `[min, max)` except the last, which is closed `[min, max]`.
    pub fn apply_rules(amount: Decimal, rules: &[CommissionRule]) -> Decimal {
        Self::match_sorted(amount, &Self::sorted(rules))
    }

    /// `amount × apply_rules(amount, rules)`, unrounded
    pub fn calculate_commission(amount: Decimal, rules: &[CommissionRule]) -> Decimal {
        amount * Self::apply_rules(amount, rules)
    }

    /// Check a tier table for completeness and consistency
    ///
    /// Collects every violation: out-of-range rates and amounts, empty ranges,
    /// misplaced unbounded tiers, a non-zero start, and each gap or overlap
    /// between neighbouring tiers.
    pub fn validate_rule_set(rules: &[CommissionRule]) -> ValidationReport {
        let mut errors = Vec::new();

        if rules.is_empty() {
            errors.push("At least one commission rule is required".to_string());
            return ValidationReport::from_errors(errors);
        }

        for (i, rule) in rules.iter().enumerate() {
            let n = i + 1;
            if rule.rate < Decimal::ZERO || rule.rate > Decimal::ONE {
                errors.push(format!("Rule {}: rate {} is outside [0, 1]", n, rule.rate));
            }
            if rule.min_amount < Decimal::ZERO {
                errors.push(format!(
                    "Rule {}: minimum amount {} cannot be negative",
                    n, rule.min_amount
                ));
            }
            if let Some(max) = rule.max_amount {
                if max < Decimal::ZERO {
                    errors.push(format!("Rule {}: maximum amount {} cannot be negative", n, max));
                }
                if rule.min_amount >= max {
                    errors.push(format!(
                        "Rule {}: minimum amount {} must be less than maximum amount {}",
                        n, rule.min_amount, max
                    ));
                }
            }
        }

        let sorted = Self::sorted(rules);

        if sorted[0].min_amount != Decimal::ZERO {
            errors.push(format!(
                "Rules must start at 0, first tier starts at {}",
                sorted[0].min_amount
            ));
        }

        for pair in sorted.windows(2) {
            let (current, next) = (&pair[0], &pair[1]);
            match current.max_amount {
                None => errors.push(format!(
                    "Unbounded tier starting at {} must be the last tier",
                    current.min_amount
                )),
                Some(max) if max < next.min_amount => {
                    errors.push(format!("Gap between {} and {}", max, next.min_amount))
                }
                Some(max) if max > next.min_amount => errors.push(format!(
                    "Overlap between tier ending at {} and tier starting at {}",
                    max, next.min_amount
                )),
                Some(_) => {}
            }
        }

        ValidationReport::from_errors(errors)
    }

    fn sorted(rules: &[CommissionRule]) -> Vec<CommissionRule> {
        let mut sorted = rules.to_vec();
        sorted.sort_by(|a, b| a.min_amount.cmp(&b.min_amount));
        sorted
    }

    fn match_sorted(amount: Decimal, sorted: &[CommissionRule]) -> Decimal {
        let last = sorted.len().saturating_sub(1);
        let rate = sorted
            .iter()
            .enumerate()
            .find(|(i, rule)| rule.contains(amount, *i == last))
            .map(|(_, rule)| rule.rate);

        match rate {
            Some(rate) => rate,
            None => {
                debug!("No commission tier matches amount {}", amount);
                Decimal::ZERO
            }
        }
    }
}
