//! Autoregressive forecasting baseline.
//!
//! Fits an AR(p) model with intercept by ordinary least squares on the lagged
//! design matrix and predicts forward by iterating the recursion. Missing
//! values are rejected at fit time; the caller decides how to sanitize them.

use crate::core::{Forecast, TimeSeries};
use crate::error::{Result, WeatherError};
use crate::models::Forecaster;
use crate::utils::least_squares;

/// Autoregressive forecaster with a fixed lag order.
#[derive(Debug, Clone)]
pub struct AutoRegressive {
    lags: usize,
    display_name: String,
    intercept: Option<f64>,
    /// coefficients[k] multiplies the value at lag k+1.
    coefficients: Option<Vec<f64>>,
    /// Last `lags` training observations, oldest first.
    history: Option<Vec<f64>>,
    fitted: Option<Vec<f64>>,
    residuals: Option<Vec<f64>>,
}

impl AutoRegressive {
    pub fn new(lags: usize) -> Self {
        Self {
            lags,
            display_name: format!("AR({})", lags),
            intercept: None,
            coefficients: None,
            history: None,
            fitted: None,
            residuals: None,
        }
    }

    /// The configured lag order.
    pub fn lags(&self) -> usize {
        self.lags
    }

    /// Fitted AR coefficients, lag 1 first.
    pub fn coefficients(&self) -> Option<&[f64]> {
        self.coefficients.as_deref()
    }

    /// Fitted intercept.
    pub fn intercept(&self) -> Option<f64> {
        self.intercept
    }
}

impl Forecaster for AutoRegressive {
    fn fit(&mut self, series: &TimeSeries) -> Result<()> {
        if self.lags == 0 {
            return Err(WeatherError::InvalidParameter(
                "lag order must be at least 1".to_string(),
            ));
        }

        let values = series.primary_values();
        let n = values.len();
        if n == 0 {
            return Err(WeatherError::EmptyData);
        }
        // Need at least one more equation than parameters.
        let needed = self.lags + 2;
        if n < needed {
            return Err(WeatherError::InsufficientData { needed, got: n });
        }
        if values.iter().any(|v| v.is_nan() || v.is_infinite()) {
            return Err(WeatherError::MissingValues);
        }

        // Targets are y[lags..]; the column for lag k holds y[t-k].
        let targets = values[self.lags..].to_vec();
        let columns: Vec<Vec<f64>> = (1..=self.lags)
            .map(|k| values[self.lags - k..n - k].to_vec())
            .collect();

        let fit = least_squares(&targets, &columns)?;

        let mut fitted = vec![f64::NAN; self.lags];
        let mut residuals = vec![f64::NAN; self.lags];
        for t in self.lags..n {
            let row: Vec<f64> = (1..=self.lags).map(|k| values[t - k]).collect();
            let prediction = fit.evaluate(&row);
            fitted.push(prediction);
            residuals.push(values[t] - prediction);
        }

        self.history = Some(values[n - self.lags..].to_vec());
        self.intercept = Some(fit.intercept);
        self.coefficients = Some(fit.coefficients);
        self.fitted = Some(fitted);
        self.residuals = Some(residuals);

        Ok(())
    }

    fn predict(&self, horizon: usize) -> Result<Forecast> {
        let intercept = self.intercept.ok_or(WeatherError::FitRequired)?;
        let coefficients = self.coefficients.as_ref().ok_or(WeatherError::FitRequired)?;
        let history = self.history.as_ref().ok_or(WeatherError::FitRequired)?;

        if horizon == 0 {
            return Ok(Forecast::new());
        }

        let mut buffer = history.clone();
        let mut predictions = Vec::with_capacity(horizon);
        for _ in 0..horizon {
            let mut next = intercept;
            for (k, coefficient) in coefficients.iter().enumerate() {
                next += coefficient * buffer[buffer.len() - 1 - k];
            }
            buffer.push(next);
            predictions.push(next);
        }

        Ok(Forecast::from_values(predictions))
    }

    fn fitted_values(&self) -> Option<&[f64]> {
        self.fitted.as_deref()
    }

    fn residuals(&self) -> Option<&[f64]> {
        self.residuals.as_deref()
    }

    fn name(&self) -> &str {
        &self.display_name
    }
}
