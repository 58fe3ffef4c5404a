mod commission_rule;
mod commission_summary;

pub use commission_rule::CommissionRule;
pub use commission_summary::{
    ActorComparison, ActorRanking, ActorSummary, ComparisonAggregate, InactiveActor,
    MonthlyStatement,
};
