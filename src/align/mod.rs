//! Timeline alignment, hourly resampling, and spatial aggregation.

use std::collections::{BTreeMap, HashSet};

use chrono::{DateTime, Duration, DurationRound, Utc};
use log::debug;

use crate::core::TimeSeries;
use crate::error::{Result, WeatherError};

/// Outer-join several series on their timestamps.
///
/// The result's timestamp set is the union of the inputs' timestamp sets; a
/// series with no reading at a union timestamp contributes NaN there. Column
/// labels are concatenated in input order and must be unique.
pub fn outer_align(series: &[TimeSeries]) -> Result<TimeSeries> {
    if series.is_empty() {
        return Err(WeatherError::EmptyData);
    }

    let mut positions: BTreeMap<DateTime<Utc>, usize> = BTreeMap::new();
    for ts in series {
        for t in ts.timestamps() {
            positions.entry(*t).or_insert(0);
        }
    }
    for (slot, position) in positions.values_mut().zip(0..) {
        *slot = position;
    }
    let union: Vec<DateTime<Utc>> = positions.keys().copied().collect();

    let mut labels: Vec<String> = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();
    for ts in series {
        for label in ts.labels() {
            labels.push(label.clone());
        }
    }
    for label in &labels {
        if !seen.insert(label) {
            return Err(WeatherError::InvalidParameter(format!(
                "duplicate column label after alignment: {}",
                label
            )));
        }
    }

    let mut columns: Vec<Vec<f64>> = Vec::with_capacity(labels.len());
    for ts in series {
        for column in ts.columns() {
            let mut aligned = vec![f64::NAN; union.len()];
            for (i, t) in ts.timestamps().iter().enumerate() {
                aligned[positions[t]] = column[i];
            }
            columns.push(aligned);
        }
    }

    debug!(
        "aligned {} series onto {} union timestamps",
        series.len(),
        union.len()
    );

    TimeSeries::new(union, columns, labels)
}

/// Resample a series to hourly buckets by mean aggregation.
///
/// Every hour between the first and last bucket appears in the output, even
/// when empty. A bucket's value is the arithmetic mean of the non-NaN raw
/// points falling in that hour; a bucket with no valid points is NaN.
pub fn resample_hourly(series: &TimeSeries) -> Result<TimeSeries> {
    if series.is_empty() {
        return Err(WeatherError::EmptyData);
    }

    let hour = Duration::hours(1);
    let floor = |t: &DateTime<Utc>| {
        t.duration_trunc(hour)
            .map_err(|e| WeatherError::TimestampError(e.to_string()))
    };

    let first = floor(&series.timestamps()[0])?;
    let last = floor(&series.timestamps()[series.len() - 1])?;
    let buckets = ((last - first).num_hours() + 1) as usize;

    let grid: Vec<DateTime<Utc>> = (0..buckets)
        .map(|i| first + Duration::hours(i as i64))
        .collect();

    let mut columns: Vec<Vec<f64>> = Vec::with_capacity(series.dimensions());
    for column in series.columns() {
        let mut sums = vec![0.0; buckets];
        let mut counts = vec![0usize; buckets];
        for (i, t) in series.timestamps().iter().enumerate() {
            let value = column[i];
            if value.is_nan() || value.is_infinite() {
                continue;
            }
            let bucket = (floor(t)? - first).num_hours() as usize;
            sums[bucket] += value;
            counts[bucket] += 1;
        }
        columns.push(
            (0..buckets)
                .map(|b| {
                    if counts[b] > 0 {
                        sums[b] / counts[b] as f64
                    } else {
                        f64::NAN
                    }
                })
                .collect(),
        );
    }

    let mut resampled = TimeSeries::new(grid, columns, series.labels().to_vec())?;
    resampled.set_cadence(hour);
    Ok(resampled)
}

/// Unweighted mean across zones for one variable.
///
/// Averages all columns whose label starts with `{prefix}_`, skipping NaN
/// entries per row; rows where every zone is missing stay NaN. With three
/// fixed observation points and no interior geometry this is the spatial
/// aggregate, not an interpolation.
pub fn spatial_mean(series: &TimeSeries, prefix: &str, out_label: &str) -> Result<TimeSeries> {
    let wanted = format!("{}_", prefix);
    let selected: Vec<usize> = series
        .labels()
        .iter()
        .enumerate()
        .filter(|(_, label)| label.starts_with(&wanted))
        .map(|(i, _)| i)
        .collect();

    if selected.is_empty() {
        return Err(WeatherError::ColumnNotFound(format!("{}_*", prefix)));
    }

    let mut averaged = Vec::with_capacity(series.len());
    for row in 0..series.len() {
        let mut sum = 0.0;
        let mut count = 0usize;
        for &c in &selected {
            let value = series.columns()[c][row];
            if value.is_finite() {
                sum += value;
                count += 1;
            }
        }
        averaged.push(if count > 0 {
            sum / count as f64
        } else {
            f64::NAN
        });
    }

    let mut out = TimeSeries::new(
        series.timestamps().to_vec(),
        vec![averaged],
        vec![out_label.to_string()],
    )?;
    if let Some(cadence) = series.cadence() {
        out.set_cadence(cadence);
    }
    Ok(out)
}
