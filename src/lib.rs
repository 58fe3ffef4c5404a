//! Commission Analytics Engine Library
//!
//! Turns flat transaction snapshots into commission summaries, rankings,
//! tiered-rate evaluations, trend series and drill-down views. Everything here
//! is synchronous and free of I/O; callers supply the records.

pub mod config;
pub mod core;
pub mod modules;

// Re-export commonly used types
pub use modules::aggregation;
pub use modules::commissions;
pub use modules::drilldown;
pub use modules::timeseries;
pub use modules::transactions;

pub use crate::core::{AppError, DateRange, Result};
