pub mod models;
pub mod services;

pub use models::{Granularity, PeriodKey, TimeSeriesPoint};
pub use services::TimeSeriesBucketer;
