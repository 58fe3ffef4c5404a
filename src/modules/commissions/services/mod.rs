pub mod rule_engine;
pub mod summary_builder;

pub use rule_engine::CommissionRuleEngine;
pub use summary_builder::CommissionSummaryBuilder;
