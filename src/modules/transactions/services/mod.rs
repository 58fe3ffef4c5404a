pub mod validator;

pub use validator::{IngestionOutcome, RejectedRecord, ValidationReport, Validator};
