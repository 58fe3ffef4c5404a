pub mod aggregation;
pub mod commissions;
pub mod drilldown;
pub mod timeseries;
pub mod transactions;
