mod transaction_record;

pub use transaction_record::{CompletionStatus, TransactionRecord};
