mod group_totals;

pub use group_totals::{AggregationBucket, GroupBreakdown, GroupTotals};
