//! Multi-zone weather station analysis pipeline.
//!
//! Reads per-zone weather station CSV exports with differing separators,
//! aligns them on a shared timeline, aggregates across zones, and compares an
//! autoregressive forecast against a persistence baseline over a daytime
//! evaluation window. Charts are rendered for the zone overview and for each
//! forecast comparison.

pub mod align;
pub mod config;
pub mod core;
pub mod error;
pub mod eval;
pub mod ingest;
pub mod models;
pub mod plot;
pub mod utils;

pub use error::{Result, WeatherError};
