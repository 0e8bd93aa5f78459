//! Daytime-window forecast evaluation.
//!
//! Runs the AR and persistence baselines over one day's daytime observations
//! of a series, holding out the trailing block as the test set, and scores
//! both forecasts against the held-out values.

mod metrics;

pub use metrics::{score_forecast, ForecastScores};

use chrono::{DateTime, NaiveDate, Timelike, Utc};
use log::info;

use crate::core::{MissingValuePolicy, TimeSeries};
use crate::error::{Result, WeatherError};
use crate::models::{AutoRegressive, Forecaster, Persistence};

/// Evaluation settings for one daytime window.
#[derive(Debug, Clone)]
pub struct EvalConfig {
    /// Calendar day the window is cut from.
    pub day: NaiveDate,
    /// First hour of the window, inclusive.
    pub start_hour: u32,
    /// Last hour of the window, inclusive.
    pub end_hour: u32,
    /// Lag order of the autoregressive baseline.
    pub lags: usize,
    /// Trailing observations held out as the test set.
    pub test_points: usize,
    /// The window must hold strictly more observations than this.
    pub min_samples: usize,
    /// How missing values in the window are handled before fitting.
    pub missing_policy: MissingValuePolicy,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            day: NaiveDate::from_ymd_opt(2025, 9, 25).expect("valid date literal"),
            start_hour: 7,
            end_hour: 17,
            lags: 3,
            test_points: 24,
            min_samples: 30,
            missing_policy: MissingValuePolicy::Fill(0.0),
        }
    }
}

/// Cut the observations falling on `day` between `start_hour` and `end_hour`
/// inclusive.
pub fn daytime_window(
    series: &TimeSeries,
    day: NaiveDate,
    start_hour: u32,
    end_hour: u32,
) -> TimeSeries {
    series.retain_times(|t| {
        t.date_naive() == day && t.hour() >= start_hour && t.hour() <= end_hour
    })
}

/// Results of evaluating both baselines on one series.
#[derive(Debug, Clone)]
pub struct SeriesEvaluation {
    /// Name of the evaluated series.
    pub series: String,
    /// Timestamps of the held-out test block.
    pub timestamps: Vec<DateTime<Utc>>,
    /// Observed test values.
    pub actual: Vec<f64>,
    /// AR forecast over the test block.
    pub autoregressive: Vec<f64>,
    /// Persistence forecast over the test block.
    pub persistence: Vec<f64>,
    pub ar_scores: ForecastScores,
    pub persistence_scores: ForecastScores,
    /// Lag order used by the AR baseline.
    pub lags: usize,
}

/// Fit and score both baselines on a univariate daytime series.
///
/// The trailing `test_points` observations are held out; both models are fit
/// on everything before them and predict the full held-out horizon.
pub fn evaluate(series: &TimeSeries, name: &str, config: &EvalConfig) -> Result<SeriesEvaluation> {
    let n = series.len();
    if n <= config.min_samples {
        return Err(WeatherError::InsufficientData {
            needed: config.min_samples + 1,
            got: n,
        });
    }
    if config.test_points == 0 || config.test_points >= n {
        return Err(WeatherError::InvalidParameter(format!(
            "test block of {} points does not fit in {} observations",
            config.test_points, n
        )));
    }

    let clean = series.sanitized(config.missing_policy)?;
    // Dropping rows can shrink the window below the floor or below the
    // test block, so both checks run again on the cleaned length.
    if clean.len() <= config.min_samples {
        return Err(WeatherError::InsufficientData {
            needed: config.min_samples + 1,
            got: clean.len(),
        });
    }
    if config.test_points >= clean.len() {
        return Err(WeatherError::InvalidParameter(format!(
            "test block of {} points does not fit in {} observations",
            config.test_points,
            clean.len()
        )));
    }
    let n = clean.len();
    let split = n - config.test_points;

    let train = clean.slice(0, split)?;
    let test = clean.slice(split, n)?;

    let mut ar = AutoRegressive::new(config.lags);
    ar.fit(&train)?;
    let ar_forecast = ar.predict(config.test_points)?;

    let mut persistence = Persistence::new();
    persistence.fit(&train)?;
    let persistence_forecast = persistence.predict(config.test_points)?;

    let actual = test.primary_values().to_vec();
    let ar_scores = score_forecast(&actual, ar_forecast.values())?;
    let persistence_scores = score_forecast(&actual, persistence_forecast.values())?;

    info!(
        "{}: {} train / {} test points, AR({}) rmse {:.3}, persistence rmse {:.3}",
        name,
        split,
        config.test_points,
        config.lags,
        ar_scores.rmse,
        persistence_scores.rmse
    );

    Ok(SeriesEvaluation {
        series: name.to_string(),
        timestamps: test.timestamps().to_vec(),
        actual,
        autoregressive: ar_forecast.into_values(),
        persistence: persistence_forecast.into_values(),
        ar_scores,
        persistence_scores,
        lags: config.lags,
    })
}

/// Print the scores of several evaluations as one comparison table.
pub fn print_score_table(evaluations: &[SeriesEvaluation], config: &EvalConfig) {
    println!(
        "=== Forecast Performance ({:02}:00-{:02}:00, {}) ===",
        config.start_hour, config.end_hour, config.day
    );
    println!(
        "{:<14} {:<12} {:>8} {:>8} {:>8} {:>8} {:>10} {:>8}",
        "Series", "Model", "MAE", "RMSE", "R2", "Bias", "MAPE(%)", "SDE"
    );
    for evaluation in evaluations {
        let rows = [
            (format!("AR({})", evaluation.lags), &evaluation.ar_scores),
            ("Persistence".to_string(), &evaluation.persistence_scores),
        ];
        for (model, scores) in rows {
            println!(
                "{:<14} {:<12} {:>8.3} {:>8.3} {:>8.3} {:>8.3} {:>10.1} {:>8.3}",
                evaluation.series,
                model,
                scores.mae,
                scores.rmse,
                scores.r_squared,
                scores.bias,
                scores.mape,
                scores.sde
            );
        }
    }
    println!();
}
