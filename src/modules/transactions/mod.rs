pub mod models;
pub mod services;

pub use models::{CompletionStatus, TransactionRecord};
pub use services::{IngestionOutcome, RejectedRecord, ValidationReport, Validator};
