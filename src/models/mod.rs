//! Forecasting baselines.

mod autoregressive;
mod persistence;
mod traits;

pub use autoregressive::AutoRegressive;
pub use persistence::Persistence;
pub use traits::Forecaster;
