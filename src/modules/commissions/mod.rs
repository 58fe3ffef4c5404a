pub mod models;
pub mod services;

pub use models::{
    ActorComparison, ActorRanking, ActorSummary, CommissionRule, ComparisonAggregate,
    InactiveActor, MonthlyStatement,
};
pub use services::{CommissionRuleEngine, CommissionSummaryBuilder};
