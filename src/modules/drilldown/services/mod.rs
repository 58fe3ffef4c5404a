pub mod navigator;

pub use navigator::{DrillDownNavigator, ViewBreakdown};
