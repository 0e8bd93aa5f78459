//! Chart rendering for zone overviews and forecast comparisons.

use std::path::Path;

use chrono::{DateTime, NaiveDateTime, Utc};
use log::info;
use plotters::coord::types::RangedDateTime;
use plotters::prelude::*;

use crate::core::TimeSeries;
use crate::error::{Result, WeatherError};
use crate::ingest::{Variable, ZoneSource};

/// One line color per zone, in zone order.
pub const ZONE_COLORS: [RGBColor; 3] = [
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
];

const ACTUAL_COLOR: RGBColor = RGBColor(31, 119, 180);
const AR_COLOR: RGBColor = RGBColor(255, 127, 14);
const PERSISTENCE_COLOR: RGBColor = RGBColor(44, 160, 44);

fn plot_err<E: std::fmt::Display>(e: E) -> WeatherError {
    WeatherError::Plot(e.to_string())
}

/// Pad a y range by 10%, or by a unit when the data is flat.
fn padded_range(values: &[f64]) -> (f64, f64) {
    let (mut low, mut high) = (f64::INFINITY, f64::NEG_INFINITY);
    for &v in values {
        if v.is_finite() {
            low = low.min(v);
            high = high.max(v);
        }
    }
    if !low.is_finite() {
        return (0.0, 1.0);
    }
    let padding = if (high - low).abs() > 1e-6 {
        (high - low) * 0.1
    } else {
        1.0
    };
    (low - padding, high + padding)
}

/// Split a series into contiguous finite runs so gaps stay visible instead of
/// being bridged by a line.
fn finite_segments(
    timestamps: &[DateTime<Utc>],
    values: &[f64],
) -> Vec<Vec<(NaiveDateTime, f64)>> {
    let mut segments = Vec::new();
    let mut current: Vec<(NaiveDateTime, f64)> = Vec::new();
    for (t, &v) in timestamps.iter().zip(values.iter()) {
        if v.is_finite() {
            current.push((t.naive_utc(), v));
        } else if !current.is_empty() {
            segments.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        segments.push(current);
    }
    segments
}

/// Render an actual-versus-forecast comparison chart.
pub fn forecast_chart(
    path: &Path,
    title: &str,
    y_label: &str,
    timestamps: &[DateTime<Utc>],
    actual: &[f64],
    ar: &[f64],
    ar_label: &str,
    persistence: &[f64],
) -> Result<()> {
    if timestamps.is_empty() {
        return Err(WeatherError::EmptyData);
    }

    let root = BitMapBackend::new(path, (1024, 600)).into_drawing_area();
    root.fill(&WHITE).map_err(plot_err)?;

    let min_dt = timestamps[0].naive_utc();
    let mut max_dt = timestamps[timestamps.len() - 1].naive_utc();
    if max_dt <= min_dt {
        max_dt = min_dt + chrono::Duration::minutes(1);
    }

    let mut extent: Vec<f64> = Vec::new();
    extent.extend_from_slice(actual);
    extent.extend_from_slice(ar);
    extent.extend_from_slice(persistence);
    let (y_low, y_high) = padded_range(&extent);

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 28))
        .margin(12)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(RangedDateTime::from(min_dt..max_dt), y_low..y_high)
        .map_err(plot_err)?;

    chart
        .configure_mesh()
        .x_desc("Time")
        .y_desc(y_label)
        .x_label_formatter(&|dt: &NaiveDateTime| dt.format("%H:%M").to_string())
        .light_line_style(BLACK.mix(0.15))
        .draw()
        .map_err(plot_err)?;

    let series = [
        ("Actual", actual, ACTUAL_COLOR),
        (ar_label, ar, AR_COLOR),
        ("Persistence", persistence, PERSISTENCE_COLOR),
    ];
    for (label, values, color) in series {
        let mut first = true;
        for segment in finite_segments(timestamps, values) {
            let drawn = chart
                .draw_series(LineSeries::new(segment, color.stroke_width(2)))
                .map_err(plot_err)?;
            if first {
                drawn
                    .label(label.to_string())
                    .legend(move |(x, y)| {
                        PathElement::new(vec![(x, y), (x + 16, y)], color.stroke_width(2))
                    });
                first = false;
            }
        }
    }

    chart
        .configure_series_labels()
        .border_style(BLACK)
        .background_style(WHITE.mix(0.8))
        .draw()
        .map_err(plot_err)?;

    root.present().map_err(plot_err)?;
    info!("wrote forecast chart {}", path.display());
    Ok(())
}

/// Render the six-panel zone overview grid, one panel per variable with one
/// line per zone.
pub fn zone_grid(path: &Path, hourly: &TimeSeries, zones: &[ZoneSource]) -> Result<()> {
    if hourly.is_empty() {
        return Err(WeatherError::EmptyData);
    }

    let root = BitMapBackend::new(path, (1600, 1800)).into_drawing_area();
    root.fill(&WHITE).map_err(plot_err)?;
    let panels = root.split_evenly((3, 2));

    let min_dt = hourly.timestamps()[0].naive_utc();
    let mut max_dt = hourly.timestamps()[hourly.len() - 1].naive_utc();
    if max_dt <= min_dt {
        max_dt = min_dt + chrono::Duration::hours(1);
    }

    for (panel, variable) in panels.iter().zip(Variable::ALL.iter()) {
        // Columns present for this variable, one per zone.
        let mut lines: Vec<(&ZoneSource, &[f64], RGBColor)> = Vec::new();
        let mut extent: Vec<f64> = Vec::new();
        for (zone_index, zone) in zones.iter().enumerate() {
            let label = format!("{}_{}", variable.short_name(), zone.tag);
            if let Ok(values) = hourly.column(&label) {
                extent.extend_from_slice(values);
                lines.push((zone, values, ZONE_COLORS[zone_index % ZONE_COLORS.len()]));
            }
        }
        if lines.is_empty() {
            continue;
        }
        let (y_low, y_high) = padded_range(&extent);

        let mut chart = ChartBuilder::on(panel)
            .caption(variable.display_name(), ("sans-serif", 22))
            .margin(10)
            .x_label_area_size(35)
            .y_label_area_size(55)
            .build_cartesian_2d(RangedDateTime::from(min_dt..max_dt), y_low..y_high)
            .map_err(plot_err)?;

        chart
            .configure_mesh()
            .x_label_formatter(&|dt: &NaiveDateTime| dt.format("%m-%d").to_string())
            .light_line_style(BLACK.mix(0.15))
            .draw()
            .map_err(plot_err)?;

        for (zone, values, color) in lines {
            let mut first = true;
            for segment in finite_segments(hourly.timestamps(), values) {
                let drawn = chart
                    .draw_series(LineSeries::new(segment, color.stroke_width(1)))
                    .map_err(plot_err)?;
                if first {
                    drawn.label(zone.name.clone()).legend(move |(x, y)| {
                        PathElement::new(vec![(x, y), (x + 16, y)], color.stroke_width(2))
                    });
                    first = false;
                }
            }
        }

        chart
            .configure_series_labels()
            .border_style(BLACK)
            .background_style(WHITE.mix(0.8))
            .draw()
            .map_err(plot_err)?;
    }

    root.present().map_err(plot_err)?;
    info!("wrote zone overview grid {}", path.display());
    Ok(())
}
