//! Pipeline configuration.

use std::path::PathBuf;

use crate::eval::EvalConfig;
use crate::ingest::ZoneSource;

/// Full configuration for one report run: which zone exports to read, how to
/// evaluate, and where to write output.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub zones: Vec<ZoneSource>,
    pub eval: EvalConfig,
    pub output_dir: PathBuf,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            zones: vec![
                ZoneSource::new(
                    "Z1",
                    "Cajicá (Urban)",
                    "Z1_CAJICA_ambient-weather-20250322-20250925.csv",
                    b',',
                ),
                ZoneSource::new(
                    "Z2",
                    "La Giralda (River Basin)",
                    "Z2_GIRALDA_ambient-weather-20250322-20250925.csv",
                    b';',
                ),
                ZoneSource::new(
                    "Z3",
                    "Oikos (Transitional)",
                    "Z3_OIKOS_ambient-weather-20250322-20250925.csv",
                    b';',
                ),
            ],
            eval: EvalConfig::default(),
            output_dir: PathBuf::from("."),
        }
    }
}
