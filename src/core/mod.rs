//! Core data structures for zone time series.

mod forecast;
mod time_series;

pub use forecast::Forecast;
pub use time_series::{MissingValuePolicy, TimeSeries};
