pub mod models;
pub mod services;

pub use models::{DrillDownLevel, DrillDownState};
pub use services::{DrillDownNavigator, ViewBreakdown};
