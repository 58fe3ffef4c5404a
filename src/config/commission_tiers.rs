use crate::core::{AppError, Result};
use crate::modules::commissions::{CommissionRule, CommissionRuleEngine};
use serde::Deserialize;
use std::env;

/// Optional commission tier table supplied through `COMMISSION_TIERS`
///
/// The variable holds a JSON array such as
/// `[{"minAmount":0,"maxAmount":1000,"rate":0.05},{"minAmount":1000,"maxAmount":null,"rate":0.06}]`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommissionTierConfig {
    pub rules: Option<Vec<CommissionRule>>,
}

impl CommissionTierConfig {
    pub fn from_env() -> Result<Self> {
        match env::var("COMMISSION_TIERS") {
            Ok(raw) => Self::from_json(&raw),
            Err(_) => Ok(Self::default()),
        }
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let rules: Vec<CommissionRule> = serde_json::from_str(raw)
            .map_err(|e| AppError::Configuration(format!("Invalid COMMISSION_TIERS: {}", e)))?;
        Ok(Self { rules: Some(rules) })
    }

    /// Reject a configured table that would not pass rule-set validation
    pub fn validate(&self) -> Result<()> {
        if let Some(rules) = &self.rules {
            let report = CommissionRuleEngine::validate_rule_set(rules);
            if !report.is_valid {
                return Err(AppError::Configuration(format!(
                    "COMMISSION_TIERS is invalid: {}",
                    report.errors.join("; ")
                )));
            }
        }
        Ok(())
    }

    /// Engine over the configured table, if one is configured
    pub fn engine(&self) -> Result<Option<CommissionRuleEngine>> {
        self.rules
            .clone()
            .map(CommissionRuleEngine::new)
            .transpose()
    }
}
