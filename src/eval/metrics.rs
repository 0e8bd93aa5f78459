//! Forecast accuracy metrics.

use crate::error::{Result, WeatherError};
use crate::utils::stats;

/// Floor applied to |actual| in the MAPE denominator so zero readings
/// (night-time solar, calm wind) do not blow the ratio up.
const MAPE_FLOOR: f64 = 1e-9;

/// Accuracy scores for one forecast against observed values.
///
/// Errors are `actual - predicted` throughout, so a positive bias means the
/// model under-predicts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForecastScores {
    /// Mean absolute error.
    pub mae: f64,
    /// Root mean squared error.
    pub rmse: f64,
    /// Coefficient of determination.
    pub r_squared: f64,
    /// Mean error; positive when the model under-predicts.
    pub bias: f64,
    /// Mean absolute percentage error, in percent, with a floored denominator.
    pub mape: f64,
    /// Sample standard deviation of the errors.
    pub sde: f64,
}

/// Score a forecast against the observed values.
pub fn score_forecast(actual: &[f64], predicted: &[f64]) -> Result<ForecastScores> {
    if actual.is_empty() {
        return Err(WeatherError::EmptyData);
    }
    if actual.len() != predicted.len() {
        return Err(WeatherError::DimensionMismatch {
            expected: actual.len(),
            got: predicted.len(),
        });
    }

    let n = actual.len() as f64;
    let errors: Vec<f64> = actual
        .iter()
        .zip(predicted.iter())
        .map(|(a, p)| a - p)
        .collect();

    let mae = errors.iter().map(|e| e.abs()).sum::<f64>() / n;
    let mse = errors.iter().map(|e| e * e).sum::<f64>() / n;
    let rmse = mse.sqrt();
    let bias = errors.iter().sum::<f64>() / n;

    let mean_actual = actual.iter().sum::<f64>() / n;
    let ss_res = errors.iter().map(|e| e * e).sum::<f64>();
    let ss_tot = actual
        .iter()
        .map(|a| {
            let d = a - mean_actual;
            d * d
        })
        .sum::<f64>();
    // A constant actual series carries no variance to explain.
    let r_squared = if ss_tot == 0.0 { 1.0 } else { 1.0 - ss_res / ss_tot };

    let mape = actual
        .iter()
        .zip(errors.iter())
        .map(|(a, e)| e.abs() / a.abs().max(MAPE_FLOOR))
        .sum::<f64>()
        / n
        * 100.0;

    let sde = stats::std_dev(&errors);

    Ok(ForecastScores {
        mae,
        rmse,
        r_squared,
        bias,
        mape,
        sde,
    })
}
