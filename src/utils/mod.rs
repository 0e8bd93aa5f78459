//! Utility functions shared by the models and evaluation stages.

pub mod ols;
pub mod stats;

pub use ols::{least_squares, LeastSquaresFit};
