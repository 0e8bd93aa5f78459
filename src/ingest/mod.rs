//! Ingestion of per-zone weather station CSV exports.

mod describe;
mod reader;

pub use describe::{describe, print_summary, ColumnSummary};
pub use reader::{read_zone_series, ZoneSource};

/// Measured variables exported by the weather stations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variable {
    Temperature,
    Humidity,
    Solar,
    Wind,
    Rain,
    Pressure,
}

impl Variable {
    /// All variables, in station export order.
    pub const ALL: [Variable; 6] = [
        Variable::Temperature,
        Variable::Humidity,
        Variable::Solar,
        Variable::Wind,
        Variable::Rain,
        Variable::Pressure,
    ];

    /// CSV header used by the station export.
    pub fn header(&self) -> &'static str {
        match self {
            Variable::Temperature => "Outdoor Temperature (°C)",
            Variable::Humidity => "Humidity (%)",
            Variable::Solar => "Solar Radiation (W/m^2)",
            Variable::Wind => "Wind Speed (m/sec)",
            Variable::Rain => "Daily Rain (mm)",
            Variable::Pressure => "Relative Pressure (mmHg)",
        }
    }

    /// Short column name used after per-zone renaming.
    pub fn short_name(&self) -> &'static str {
        match self {
            Variable::Temperature => "Temp",
            Variable::Humidity => "Hum",
            Variable::Solar => "Solar",
            Variable::Wind => "Wind",
            Variable::Rain => "Rain",
            Variable::Pressure => "Pres",
        }
    }

    /// Display name with unit, used for plot axes and panel titles.
    pub fn display_name(&self) -> &'static str {
        match self {
            Variable::Temperature => "Outdoor Temperature (°C)",
            Variable::Humidity => "Humidity (%)",
            Variable::Solar => "Solar Radiation (W/m^2)",
            Variable::Wind => "Wind Speed (m/s)",
            Variable::Rain => "Daily Rain (mm)",
            Variable::Pressure => "Relative Pressure (mmHg)",
        }
    }
}
