//! TimeSeries data structure for representing zone observations.

use crate::error::{Result, WeatherError};
use chrono::{DateTime, Duration, Utc};

/// Policy for handling missing values (NaN/Inf).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MissingValuePolicy {
    /// Drop observations with missing values.
    Drop,
    /// Fill with a specific value.
    Fill(f64),
    /// Return error if missing values found.
    Error,
}

/// A timestamp-indexed series with one or more labeled columns.
///
/// Values are stored column-major: `values[column][observation]`. Missing
/// readings are represented as `f64::NAN`, never zero.
#[derive(Debug, Clone)]
pub struct TimeSeries {
    timestamps: Vec<DateTime<Utc>>,
    values: Vec<Vec<f64>>,
    labels: Vec<String>,
    cadence: Option<Duration>,
}

impl TimeSeries {
    /// Create a new TimeSeries with labeled columns.
    ///
    /// Timestamps must be strictly increasing and every column must have the
    /// same length as the timestamp vector. Labels may be empty, otherwise
    /// there must be exactly one per column.
    pub fn new(
        timestamps: Vec<DateTime<Utc>>,
        values: Vec<Vec<f64>>,
        labels: Vec<String>,
    ) -> Result<Self> {
        for i in 1..timestamps.len() {
            if timestamps[i] <= timestamps[i - 1] {
                return Err(WeatherError::TimestampError(
                    "timestamps must be strictly increasing".to_string(),
                ));
            }
        }

        for column in &values {
            if column.len() != timestamps.len() {
                return Err(WeatherError::DimensionMismatch {
                    expected: timestamps.len(),
                    got: column.len(),
                });
            }
        }

        if !labels.is_empty() && labels.len() != values.len() {
            return Err(WeatherError::DimensionMismatch {
                expected: values.len(),
                got: labels.len(),
            });
        }

        Ok(Self {
            timestamps,
            values,
            labels,
            cadence: None,
        })
    }

    /// Create a simple unlabeled univariate time series.
    pub fn univariate(timestamps: Vec<DateTime<Utc>>, values: Vec<f64>) -> Result<Self> {
        Self::new(timestamps, vec![values], vec![])
    }

    /// Get the number of observations.
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    /// Check if the series is empty.
    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// Get the number of columns.
    pub fn dimensions(&self) -> usize {
        self.values.len()
    }

    /// Get timestamps.
    pub fn timestamps(&self) -> &[DateTime<Utc>] {
        &self.timestamps
    }

    /// Get values for a specific column index.
    pub fn values(&self, column: usize) -> Result<&[f64]> {
        self.values
            .get(column)
            .map(|v| v.as_slice())
            .ok_or(WeatherError::IndexOutOfBounds {
                index: column,
                size: self.values.len(),
            })
    }

    /// Get primary (first column) values.
    pub fn primary_values(&self) -> &[f64] {
        self.values.first().map(|v| v.as_slice()).unwrap_or(&[])
    }

    /// Get all columns.
    pub fn columns(&self) -> &[Vec<f64>] {
        &self.values
    }

    /// Get column labels.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Find the index of a column by label.
    pub fn label_index(&self, label: &str) -> Option<usize> {
        self.labels.iter().position(|l| l == label)
    }

    /// Get values for a column by label.
    pub fn column(&self, label: &str) -> Result<&[f64]> {
        let index = self
            .label_index(label)
            .ok_or_else(|| WeatherError::ColumnNotFound(label.to_string()))?;
        self.values(index)
    }

    /// Get the fixed cadence marker, if one has been set.
    pub fn cadence(&self) -> Option<Duration> {
        self.cadence
    }

    /// Mark the series as having a fixed cadence.
    pub fn set_cadence(&mut self, cadence: Duration) {
        self.cadence = Some(cadence);
    }

    /// Extract a half-open observation range `[start, end)`.
    pub fn slice(&self, start: usize, end: usize) -> Result<TimeSeries> {
        if start > end {
            return Err(WeatherError::InvalidParameter(
                "start must be <= end".to_string(),
            ));
        }
        if end > self.len() {
            return Err(WeatherError::IndexOutOfBounds {
                index: end,
                size: self.len(),
            });
        }

        Ok(TimeSeries {
            timestamps: self.timestamps[start..end].to_vec(),
            values: self
                .values
                .iter()
                .map(|column| column[start..end].to_vec())
                .collect(),
            labels: self.labels.clone(),
            cadence: self.cadence,
        })
    }

    /// Keep only the observations whose timestamp satisfies the predicate.
    pub fn retain_times<F>(&self, mut predicate: F) -> TimeSeries
    where
        F: FnMut(&DateTime<Utc>) -> bool,
    {
        let kept: Vec<usize> = (0..self.len())
            .filter(|&i| predicate(&self.timestamps[i]))
            .collect();

        TimeSeries {
            timestamps: kept.iter().map(|&i| self.timestamps[i]).collect(),
            values: self
                .values
                .iter()
                .map(|column| kept.iter().map(|&i| column[i]).collect())
                .collect(),
            labels: self.labels.clone(),
            cadence: self.cadence,
        }
    }

    /// Check if the series has missing values (NaN or Inf).
    pub fn has_missing_values(&self) -> bool {
        self.values
            .iter()
            .any(|column| column.iter().any(|v| v.is_nan() || v.is_infinite()))
    }

    /// Return a sanitized copy with missing values handled.
    pub fn sanitized(&self, policy: MissingValuePolicy) -> Result<TimeSeries> {
        match policy {
            MissingValuePolicy::Error => {
                if self.has_missing_values() {
                    return Err(WeatherError::MissingValues);
                }
                Ok(self.clone())
            }
            MissingValuePolicy::Drop => {
                let valid: Vec<usize> = (0..self.len())
                    .filter(|&i| {
                        self.values
                            .iter()
                            .all(|column| !column[i].is_nan() && !column[i].is_infinite())
                    })
                    .collect();

                Ok(TimeSeries {
                    timestamps: valid.iter().map(|&i| self.timestamps[i]).collect(),
                    values: self
                        .values
                        .iter()
                        .map(|column| valid.iter().map(|&i| column[i]).collect())
                        .collect(),
                    labels: self.labels.clone(),
                    cadence: self.cadence,
                })
            }
            MissingValuePolicy::Fill(fill_value) => {
                let values: Vec<Vec<f64>> = self
                    .values
                    .iter()
                    .map(|column| {
                        column
                            .iter()
                            .map(|&v| {
                                if v.is_nan() || v.is_infinite() {
                                    fill_value
                                } else {
                                    v
                                }
                            })
                            .collect()
                    })
                    .collect();

                Ok(TimeSeries {
                    timestamps: self.timestamps.clone(),
                    values,
                    labels: self.labels.clone(),
                    cadence: self.cadence,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn make_timestamps(n: usize) -> Vec<DateTime<Utc>> {
        (0..n)
            .map(|i| Utc.with_ymd_and_hms(2025, 9, 25, i as u32, 0, 0).unwrap())
            .collect()
    }

    #[test]
    fn constructs_univariate_series() {
        let timestamps = make_timestamps(5);
        let values = vec![1.0, 2.0, 3.0, 4.0, 5.0];

        let ts = TimeSeries::univariate(timestamps.clone(), values.clone()).unwrap();

        assert_eq!(ts.len(), 5);
        assert!(!ts.is_empty());
        assert_eq!(ts.dimensions(), 1);
        assert_eq!(ts.primary_values(), &values);
        assert_eq!(ts.timestamps(), &timestamps);
    }

    #[test]
    fn constructs_labeled_multivariate_series() {
        let timestamps = make_timestamps(3);
        let values = vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]];
        let labels = vec!["Solar_Z1".to_string(), "Wind_Z1".to_string()];

        let ts = TimeSeries::new(timestamps, values, labels).unwrap();

        assert_eq!(ts.dimensions(), 2);
        assert_eq!(ts.column("Solar_Z1").unwrap(), &[1.0, 2.0, 3.0]);
        assert_eq!(ts.column("Wind_Z1").unwrap(), &[4.0, 5.0, 6.0]);
        assert_eq!(ts.label_index("Wind_Z1"), Some(1));
        assert!(matches!(
            ts.column("Temp_Z1"),
            Err(WeatherError::ColumnNotFound(_))
        ));
    }

    #[test]
    fn rejects_non_increasing_timestamps() {
        let timestamps = vec![
            Utc.with_ymd_and_hms(2025, 9, 25, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2025, 9, 25, 2, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2025, 9, 25, 1, 0, 0).unwrap(), // goes backward
        ];
        let result = TimeSeries::univariate(timestamps, vec![1.0, 2.0, 3.0]);
        assert!(matches!(result, Err(WeatherError::TimestampError(_))));

        let timestamps = vec![
            Utc.with_ymd_and_hms(2025, 9, 25, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2025, 9, 25, 1, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2025, 9, 25, 1, 0, 0).unwrap(), // duplicate
        ];
        let result = TimeSeries::univariate(timestamps, vec![1.0, 2.0, 3.0]);
        assert!(matches!(result, Err(WeatherError::TimestampError(_))));
    }

    #[test]
    fn rejects_mismatched_column_lengths() {
        let timestamps = make_timestamps(3);
        let result = TimeSeries::new(timestamps.clone(), vec![vec![1.0, 2.0]], vec![]);
        assert!(matches!(
            result,
            Err(WeatherError::DimensionMismatch { expected: 3, got: 2 })
        ));

        let result = TimeSeries::new(
            timestamps,
            vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]],
            vec!["only_one".to_string()],
        );
        assert!(matches!(result, Err(WeatherError::DimensionMismatch { .. })));
    }

    #[test]
    fn slice_preserves_labels_and_cadence() {
        let timestamps = make_timestamps(5);
        let mut ts = TimeSeries::new(
            timestamps,
            vec![vec![1.0, 2.0, 3.0, 4.0, 5.0]],
            vec!["Temp_Z1".to_string()],
        )
        .unwrap();
        ts.set_cadence(Duration::hours(1));

        let sliced = ts.slice(1, 4).unwrap();

        assert_eq!(sliced.len(), 3);
        assert_eq!(sliced.primary_values(), &[2.0, 3.0, 4.0]);
        assert_eq!(sliced.labels(), &["Temp_Z1"]);
        assert_eq!(sliced.cadence(), Some(Duration::hours(1)));
    }

    #[test]
    fn slice_validates_bounds() {
        let ts = TimeSeries::univariate(make_timestamps(3), vec![1.0, 2.0, 3.0]).unwrap();

        assert!(matches!(
            ts.slice(2, 1),
            Err(WeatherError::InvalidParameter(_))
        ));
        assert!(matches!(
            ts.slice(0, 4),
            Err(WeatherError::IndexOutOfBounds { index: 4, size: 3 })
        ));
    }

    #[test]
    fn retain_times_filters_by_predicate() {
        let timestamps = make_timestamps(6);
        let ts =
            TimeSeries::univariate(timestamps, vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();

        let filtered = ts.retain_times(|t| {
            use chrono::Timelike;
            t.hour() >= 2 && t.hour() <= 4
        });

        assert_eq!(filtered.len(), 3);
        assert_eq!(filtered.primary_values(), &[2.0, 3.0, 4.0]);
    }

    #[test]
    fn sanitizes_missing_values() {
        let timestamps = make_timestamps(5);
        let values = vec![1.0, f64::NAN, 3.0, f64::INFINITY, 5.0];
        let ts = TimeSeries::univariate(timestamps, values).unwrap();
        assert!(ts.has_missing_values());

        let dropped = ts.sanitized(MissingValuePolicy::Drop).unwrap();
        assert_eq!(dropped.len(), 3);
        assert_eq!(dropped.primary_values(), &[1.0, 3.0, 5.0]);

        let filled = ts.sanitized(MissingValuePolicy::Fill(0.0)).unwrap();
        assert_eq!(filled.len(), 5);
        assert_eq!(filled.primary_values(), &[1.0, 0.0, 3.0, 0.0, 5.0]);

        let result = ts.sanitized(MissingValuePolicy::Error);
        assert!(matches!(result, Err(WeatherError::MissingValues)));
    }

    #[test]
    fn empty_series_is_valid() {
        let ts = TimeSeries::univariate(vec![], vec![]).unwrap();
        assert!(ts.is_empty());
        assert!(!ts.has_missing_values());
    }
}
