//! Persistence forecasting baseline.
//!
//! The persistence method forecasts the last observed value for every step of
//! the horizon. It is the reference any other short-horizon model has to beat.

use crate::core::{Forecast, TimeSeries};
use crate::error::{Result, WeatherError};
use crate::models::Forecaster;

/// Persistence forecaster that repeats the last observation.
#[derive(Debug, Clone, Default)]
pub struct Persistence {
    last_value: Option<f64>,
    fitted: Option<Vec<f64>>,
    residuals: Option<Vec<f64>>,
}

impl Persistence {
    pub fn new() -> Self {
        Self::default()
    }

    /// The anchor value repeated across the horizon, once fitted.
    pub fn anchor(&self) -> Option<f64> {
        self.last_value
    }
}

impl Forecaster for Persistence {
    fn fit(&mut self, series: &TimeSeries) -> Result<()> {
        let values = series.primary_values();
        let last = match values.last() {
            Some(v) => *v,
            None => return Err(WeatherError::EmptyData),
        };
        self.last_value = Some(last);

        // Fitted values are shifted history (y_hat[t] = y[t-1])
        let mut fitted = Vec::with_capacity(values.len());
        fitted.push(f64::NAN); // First fitted value is undefined
        fitted.extend_from_slice(&values[..values.len() - 1]);
        self.fitted = Some(fitted);

        // Residuals are first differences (y[t] - y[t-1])
        let residuals: Vec<f64> = (0..values.len())
            .map(|i| {
                if i == 0 {
                    f64::NAN
                } else {
                    values[i] - values[i - 1]
                }
            })
            .collect();
        self.residuals = Some(residuals);

        Ok(())
    }

    fn predict(&self, horizon: usize) -> Result<Forecast> {
        let last = self.last_value.ok_or(WeatherError::FitRequired)?;

        if horizon == 0 {
            return Ok(Forecast::new());
        }

        Ok(Forecast::from_values(vec![last; horizon]))
    }

    fn fitted_values(&self) -> Option<&[f64]> {
        self.fitted.as_deref()
    }

    fn residuals(&self) -> Option<&[f64]> {
        self.residuals.as_deref()
    }

    fn name(&self) -> &str {
        "Persistence"
    }
}
