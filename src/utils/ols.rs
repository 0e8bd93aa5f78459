//! Ordinary least squares fitting for the autoregressive baseline.
//!
//! The design matrix is passed as a slice of columns, which matches how the
//! lagged regressors are laid out. The normal equations are solved with a
//! Cholesky decomposition after adding a small ridge term to the diagonal.

use crate::error::{Result, WeatherError};

/// Coefficients and intercept of a least-squares fit.
#[derive(Debug, Clone)]
pub struct LeastSquaresFit {
    /// One coefficient per design column, in input order.
    pub coefficients: Vec<f64>,
    /// Intercept term.
    pub intercept: f64,
}

impl LeastSquaresFit {
    /// Evaluate the fitted linear model for one observation.
    ///
    /// `row` must contain one value per design column.
    pub fn evaluate(&self, row: &[f64]) -> f64 {
        self.intercept
            + self
                .coefficients
                .iter()
                .zip(row.iter())
                .map(|(c, x)| c * x)
                .sum::<f64>()
    }
}

/// Fit `y = intercept + X @ coefficients` where `columns` are the columns of X.
pub fn least_squares(y: &[f64], columns: &[Vec<f64>]) -> Result<LeastSquaresFit> {
    let n = y.len();

    if n == 0 {
        return Err(WeatherError::InsufficientData { needed: 1, got: 0 });
    }

    for column in columns {
        if column.len() != n {
            return Err(WeatherError::DimensionMismatch {
                expected: n,
                got: column.len(),
            });
        }
    }

    if columns.is_empty() {
        // No regressors, the mean is the least-squares intercept.
        let intercept = y.iter().sum::<f64>() / n as f64;
        return Ok(LeastSquaresFit {
            coefficients: vec![],
            intercept,
        });
    }

    let k = columns.len();
    let num_params = k + 1;

    // Accumulate X'X and X'y with the intercept as the leading column.
    let mut xtx = vec![vec![0.0; num_params]; num_params];
    let mut xty = vec![0.0; num_params];

    for obs in 0..n {
        let y_obs = y[obs];

        xtx[0][0] += 1.0;
        for j in 0..k {
            let xj = columns[j][obs];
            xtx[0][j + 1] += xj;
            xtx[j + 1][0] += xj;
        }
        for i in 0..k {
            let xi = columns[i][obs];
            for j in 0..k {
                xtx[i + 1][j + 1] += xi * columns[j][obs];
            }
        }

        xty[0] += y_obs;
        for i in 0..k {
            xty[i + 1] += columns[i][obs] * y_obs;
        }
    }

    // Small ridge term keeps the system positive definite.
    for i in 0..num_params {
        xtx[i][i] += 1e-8;
    }

    let beta = solve_symmetric(&xtx, &xty).ok_or_else(|| {
        WeatherError::InvalidParameter(
            "least squares failed: matrix not positive definite".into(),
        )
    })?;

    Ok(LeastSquaresFit {
        intercept: beta[0],
        coefficients: beta[1..].to_vec(),
    })
}

/// Solve A @ x = b for symmetric positive definite A via Cholesky.
fn solve_symmetric(a: &[Vec<f64>], b: &[f64]) -> Option<Vec<f64>> {
    let n = b.len();
    if n == 0 || a.len() != n {
        return None;
    }

    // A = L @ L'
    let mut l = vec![vec![0.0; n]; n];
    for i in 0..n {
        for j in 0..=i {
            let mut sum = a[i][j];
            for k in 0..j {
                sum -= l[i][k] * l[j][k];
            }

            if i == j {
                if sum <= 0.0 {
                    return None;
                }
                l[i][j] = sum.sqrt();
            } else {
                l[i][j] = sum / l[j][j];
            }
        }
    }

    // Forward substitution: L @ y = b
    let mut y = vec![0.0; n];
    for i in 0..n {
        let mut sum = b[i];
        for j in 0..i {
            sum -= l[i][j] * y[j];
        }
        y[i] = sum / l[i][i];
    }

    // Backward substitution: L' @ x = y
    let mut x = vec![0.0; n];
    for i in (0..n).rev() {
        let mut sum = y[i];
        for j in (i + 1)..n {
            sum -= l[j][i] * x[j];
        }
        x[i] = sum / l[i][i];
    }

    Some(x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn fits_simple_linear_relation() {
        // y = 2 + 3*x
        let y = vec![5.0, 8.0, 11.0, 14.0, 17.0];
        let x = vec![1.0, 2.0, 3.0, 4.0, 5.0];

        let fit = least_squares(&y, &[x]).unwrap();

        assert_relative_eq!(fit.intercept, 2.0, epsilon = 1e-6);
        assert_eq!(fit.coefficients.len(), 1);
        assert_relative_eq!(fit.coefficients[0], 3.0, epsilon = 1e-6);
    }

    #[test]
    fn fits_multiple_columns() {
        // y = 1 + 2*x1 + 3*x2, non-collinear columns
        let x1 = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];
        let x2 = vec![0.5, 2.5, 1.0, 3.0, 1.5, 3.5, 2.0, 4.0];
        let y: Vec<f64> = x1
            .iter()
            .zip(x2.iter())
            .map(|(a, b)| 1.0 + 2.0 * a + 3.0 * b)
            .collect();

        let fit = least_squares(&y, &[x1, x2]).unwrap();

        assert_relative_eq!(fit.intercept, 1.0, epsilon = 1e-4);
        assert_relative_eq!(fit.coefficients[0], 2.0, epsilon = 1e-4);
        assert_relative_eq!(fit.coefficients[1], 3.0, epsilon = 1e-4);
    }

    #[test]
    fn no_columns_returns_mean_intercept() {
        let y = vec![2.0, 4.0, 6.0, 8.0, 10.0];
        let fit = least_squares(&y, &[]).unwrap();

        assert_relative_eq!(fit.intercept, 6.0, epsilon = 1e-10);
        assert!(fit.coefficients.is_empty());
    }

    #[test]
    fn evaluate_applies_coefficients() {
        let y = vec![5.0, 8.0, 11.0, 14.0, 17.0];
        let x = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let fit = least_squares(&y, &[x]).unwrap();

        assert_relative_eq!(fit.evaluate(&[6.0]), 20.0, epsilon = 1e-6);
        assert_relative_eq!(fit.evaluate(&[7.0]), 23.0, epsilon = 1e-6);
    }

    #[test]
    fn rejects_dimension_mismatch() {
        let y = vec![1.0, 2.0, 3.0];
        let x = vec![1.0, 2.0];
        assert!(matches!(
            least_squares(&y, &[x]),
            Err(WeatherError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn rejects_empty_target() {
        assert!(matches!(
            least_squares(&[], &[]),
            Err(WeatherError::InsufficientData { .. })
        ));
    }
}
