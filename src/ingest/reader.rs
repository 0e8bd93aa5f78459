//! CSV reading for one weather station zone.

use std::collections::HashMap;
use std::fs::File;
use std::path::PathBuf;

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use csv::ReaderBuilder;
use log::{debug, info, warn};

use crate::core::TimeSeries;
use crate::error::{Result, WeatherError};
use crate::ingest::Variable;

/// Header of the timestamp column in the station exports.
const DATE_COLUMN: &str = "Date";

/// Accepted timestamp formats, tried in order.
const TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M",
];

/// One weather station site and how to read its export.
#[derive(Debug, Clone)]
pub struct ZoneSource {
    /// Short tag used as a column suffix, e.g. "Z1".
    pub tag: String,
    /// Human-readable site name, e.g. "Cajicá (Urban)".
    pub name: String,
    /// Path to the CSV export.
    pub path: PathBuf,
    /// Field delimiter; the export separator varies by source.
    pub delimiter: u8,
}

impl ZoneSource {
    pub fn new(
        tag: impl Into<String>,
        name: impl Into<String>,
        path: impl Into<PathBuf>,
        delimiter: u8,
    ) -> Self {
        Self {
            tag: tag.into(),
            name: name.into(),
            path: path.into(),
            delimiter,
        }
    }
}

/// Read one zone's export into a labeled time series.
///
/// Columns are restricted to the known variable set and renamed
/// `{Short}_{tag}`; absent variable columns are tolerated and skipped. Rows
/// with unparseable timestamps are dropped, unparseable numeric fields become
/// NaN. Rows are sorted by timestamp and exact-duplicate timestamps collapse
/// to the first occurrence.
pub fn read_zone_series(source: &ZoneSource) -> Result<TimeSeries> {
    let file = File::open(&source.path).map_err(|e| WeatherError::Io {
        path: source.path.clone(),
        source: e,
    })?;

    let mut reader = ReaderBuilder::new()
        .delimiter(source.delimiter)
        .from_reader(file);

    let headers = reader
        .headers()
        .map_err(|e| WeatherError::Csv {
            path: source.path.clone(),
            source: e,
        })?
        .clone();

    let mut header_map: HashMap<&str, usize> = HashMap::new();
    for (index, header) in headers.iter().enumerate() {
        header_map.insert(header.trim(), index);
    }

    let date_index = *header_map
        .get(DATE_COLUMN)
        .ok_or_else(|| WeatherError::ColumnNotFound(DATE_COLUMN.to_string()))?;

    let present: Vec<(Variable, usize)> = Variable::ALL
        .iter()
        .filter_map(|v| header_map.get(v.header()).map(|&i| (*v, i)))
        .collect();
    if present.is_empty() {
        return Err(WeatherError::ColumnNotFound(format!(
            "no known variable columns in {}",
            source.path.display()
        )));
    }

    let mut rows: Vec<(DateTime<Utc>, Vec<f64>)> = Vec::new();
    let mut dropped = 0usize;

    for record in reader.records() {
        let record = record.map_err(|e| WeatherError::Csv {
            path: source.path.clone(),
            source: e,
        })?;

        let timestamp = match record.get(date_index).and_then(parse_timestamp) {
            Some(t) => t,
            None => {
                dropped += 1;
                continue;
            }
        };

        let values: Vec<f64> = present
            .iter()
            .map(|&(_, index)| parse_value(record.get(index)))
            .collect();

        rows.push((timestamp, values));
    }

    rows.sort_by_key(|(t, _)| *t);
    let before = rows.len();
    rows.dedup_by_key(|(t, _)| *t);
    let duplicates = before - rows.len();
    if duplicates > 0 {
        warn!(
            "{}: collapsed {} duplicate timestamps",
            source.tag, duplicates
        );
    }
    if dropped > 0 {
        debug!("{}: dropped {} rows with bad timestamps", source.tag, dropped);
    }

    let timestamps: Vec<DateTime<Utc>> = rows.iter().map(|(t, _)| *t).collect();
    let columns: Vec<Vec<f64>> = (0..present.len())
        .map(|c| rows.iter().map(|(_, values)| values[c]).collect())
        .collect();
    let labels: Vec<String> = present
        .iter()
        .map(|(variable, _)| format!("{}_{}", variable.short_name(), source.tag))
        .collect();

    info!(
        "{}: read {} rows, {} columns from {}",
        source.tag,
        timestamps.len(),
        labels.len(),
        source.path.display()
    );

    TimeSeries::new(timestamps, columns, labels)
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    for format in TIMESTAMP_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }
    None
}

fn parse_value(raw: Option<&str>) -> f64 {
    let trimmed = match raw {
        Some(s) => s.trim(),
        None => return f64::NAN,
    };
    if trimmed.is_empty() {
        return f64::NAN;
    }
    // Some exports use a comma decimal separator.
    trimmed
        .parse::<f64>()
        .or_else(|_| trimmed.replace(',', ".").parse::<f64>())
        .unwrap_or(f64::NAN)
}
