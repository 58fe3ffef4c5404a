pub mod models;
pub mod services;

pub use models::{AggregationBucket, GroupBreakdown, GroupTotals};
pub use services::{Dimension, TransactionAggregator};
