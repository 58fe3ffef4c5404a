pub mod bucketer;

pub use bucketer::TimeSeriesBucketer;
