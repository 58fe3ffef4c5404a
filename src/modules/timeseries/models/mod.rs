mod time_series_point;

pub use time_series_point::{Granularity, PeriodKey, TimeSeriesPoint};
