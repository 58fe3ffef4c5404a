use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::core::{AppError, Result};
use crate::modules::transactions::models::TransactionRecord;

/// Outcome of a validation pass: every violated rule is listed, not just the first
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

impl ValidationReport {
    pub fn from_errors(errors: Vec<String>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
        }
    }
}

/// A shape-correct record that failed validation
#[derive(Debug, Clone, Serialize)]
pub struct RejectedRecord {
    /// Position in the raw input
    pub index: usize,
    pub record: TransactionRecord,
    pub report: ValidationReport,
}

/// Result of ingesting a raw batch
#[derive(Debug, Clone, Default, Serialize)]
pub struct IngestionOutcome {
    pub accepted: Vec<TransactionRecord>,
    pub rejected: Vec<RejectedRecord>,
}

/// Single gate between raw upstream payloads and the analytics services
pub struct Validator;

impl Validator {
    pub fn new() -> Self {
        Self
    }

    /// Check a record's numeric and identity invariants
    ///
    /// Never fails; an invalid record produces a report listing every problem.
    pub fn validate(&self, record: &TransactionRecord) -> ValidationReport {
        let mut errors = Vec::new();

        Self::check_non_negative("grossAmount", record.gross_amount, &mut errors);
        Self::check_non_negative("revenueAfterCosts", record.revenue_after_costs, &mut errors);
        Self::check_non_negative(
            "appliedCommissionAmount",
            record.applied_commission_amount,
            &mut errors,
        );

        let rate = record.applied_commission_percentage;
        if rate < Decimal::ZERO || rate > Decimal::ONE {
            errors.push(format!(
                "appliedCommissionPercentage must be between 0 and 1, got {}",
                rate
            ));
        }

        if record.actor_id.trim().is_empty() {
            errors.push("actorId cannot be empty".to_string());
        }
        if record.organization_id.trim().is_empty() {
            errors.push("organizationId cannot be empty".to_string());
        }

        ValidationReport::from_errors(errors)
    }

    /// Deserialize and validate a raw batch
    ///
    /// # Errors
    /// Returns `AppError::InputShape` for the first value that does not match the
    /// record schema. Shape-correct records that break an invariant are returned
    /// in `rejected` instead.
    pub fn ingest(&self, raw: Vec<serde_json::Value>) -> Result<IngestionOutcome> {
        let total = raw.len();
        let mut outcome = IngestionOutcome::default();

        for (index, value) in raw.into_iter().enumerate() {
            let record: TransactionRecord = serde_json::from_value(value).map_err(|e| {
                AppError::input_shape(format!("record {} does not match schema: {}", index, e))
            })?;

            let report = self.validate(&record);
            if report.is_valid {
                outcome.accepted.push(record);
            } else {
                outcome.rejected.push(RejectedRecord {
                    index,
                    record,
                    report,
                });
            }
        }

        if outcome.rejected.is_empty() {
            info!("Ingested {} transaction records", total);
        } else {
            warn!(
                "Ingested {} of {} transaction records ({} rejected)",
                outcome.accepted.len(),
                total,
                outcome.rejected.len()
            );
        }

        Ok(outcome)
    }

    /// Parse a JSON array document and ingest it
    pub fn ingest_json(&self, document: &str) -> Result<IngestionOutcome> {
        let value: serde_json::Value = serde_json::from_str(document)?;
        match value {
            serde_json::Value::Array(items) => self.ingest(items),
            other => Err(AppError::input_shape(format!(
                "expected a JSON array of transaction records, got {}",
                json_kind(&other)
            ))),
        }
    }

    fn check_non_negative(field: &str, amount: Decimal, errors: &mut Vec<String>) {
        if amount < Decimal::ZERO {
            errors.push(format!("{} cannot be negative, got {}", field, amount));
        }
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
