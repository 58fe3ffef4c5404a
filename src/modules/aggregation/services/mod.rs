pub mod aggregator;

pub use aggregator::{Dimension, TransactionAggregator};
