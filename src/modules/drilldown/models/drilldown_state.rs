use std::fmt;
use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;

use crate::modules::transactions::TransactionRecord;

/// Label of the first breadcrumb entry
pub const ROOT_LABEL: &str = "Root";
pub const ORGANIZATIONS_LABEL: &str = "Organizations";
pub const PAYMENT_CHANNELS_LABEL: &str = "Payment Channels";

/// Current depth of a drill-down view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DrillDownLevel {
    Overview,
    Organization,
    PaymentChannel,
    Transaction,
}

impl fmt::Display for DrillDownLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrillDownLevel::Overview => write!(f, "Overview"),
            DrillDownLevel::Organization => write!(f, "Organization"),
            DrillDownLevel::PaymentChannel => write!(f, "PaymentChannel"),
            DrillDownLevel::Transaction => write!(f, "Transaction"),
        }
    }
}

/// Snapshot of a drill-down view
///
/// States are replaced whole on every transition, never patched field by field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DrillDownState {
    pub level: DrillDownLevel,
    pub selected_organization: Option<String>,
    pub selected_payment_channel: Option<String>,
    pub selected_date: Option<NaiveDate>,
    pub breadcrumb: Vec<String>,
    /// Records visible at this level
    #[serde(skip)]
    pub working_set: Arc<Vec<TransactionRecord>>,
}

impl DrillDownState {
    /// The initial view over a full snapshot
    pub fn overview(snapshot: Arc<Vec<TransactionRecord>>) -> Self {
        Self {
            level: DrillDownLevel::Overview,
            selected_organization: None,
            selected_payment_channel: None,
            selected_date: None,
            breadcrumb: vec![ROOT_LABEL.to_string()],
            working_set: snapshot,
        }
    }

    pub fn working_set(&self) -> &[TransactionRecord] {
        &self.working_set
    }

    pub fn is_overview(&self) -> bool {
        self.level == DrillDownLevel::Overview
    }
}
