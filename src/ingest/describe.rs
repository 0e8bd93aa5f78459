//! Descriptive statistics for an ingested zone series.

use crate::core::TimeSeries;
use crate::utils::stats;

/// Per-column summary statistics, computed over non-missing values.
#[derive(Debug, Clone)]
pub struct ColumnSummary {
    pub label: String,
    /// Number of non-missing observations.
    pub count: usize,
    /// Number of missing observations.
    pub missing: usize,
    pub mean: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
}

/// Summarize every column of a series.
pub fn describe(series: &TimeSeries) -> Vec<ColumnSummary> {
    series
        .columns()
        .iter()
        .enumerate()
        .map(|(index, column)| {
            let valid: Vec<f64> = column.iter().copied().filter(|v| v.is_finite()).collect();
            let label = series
                .labels()
                .get(index)
                .cloned()
                .unwrap_or_else(|| format!("col{}", index));

            ColumnSummary {
                label,
                count: valid.len(),
                missing: column.len() - valid.len(),
                mean: stats::mean(&valid),
                std_dev: stats::std_dev(&valid),
                min: stats::min(&valid),
                max: stats::max(&valid),
            }
        })
        .collect()
}

/// Print a per-zone summary table with the series' date range.
pub fn print_summary(zone_name: &str, series: &TimeSeries) {
    println!("--- Data Description for {} ---", zone_name);

    if series.is_empty() {
        println!("(no rows)");
        println!();
        return;
    }

    let first = series.timestamps()[0];
    let last = series.timestamps()[series.len() - 1];
    println!("Rows: {}   From {} to {}", series.len(), first, last);
    println!(
        "{:<12} {:>8} {:>8} {:>10} {:>10} {:>10} {:>10}",
        "Column", "Count", "Missing", "Mean", "Std", "Min", "Max"
    );
    for summary in describe(series) {
        println!(
            "{:<12} {:>8} {:>8} {:>10.2} {:>10.2} {:>10.2} {:>10.2}",
            summary.label,
            summary.count,
            summary.missing,
            summary.mean,
            summary.std_dev,
            summary.min,
            summary.max
        );
    }
    println!();
}
