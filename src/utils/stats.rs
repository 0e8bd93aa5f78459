//! Statistical utility functions.

/// Calculate the mean of a slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Calculate the variance of a slice (sample variance with n-1 denominator).
pub fn variance(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return f64::NAN;
    }
    let m = mean(values);
    let sum_sq: f64 = values.iter().map(|x| (x - m).powi(2)).sum();
    sum_sq / (values.len() - 1) as f64
}

/// Calculate the sample standard deviation of a slice.
pub fn std_dev(values: &[f64]) -> f64 {
    variance(values).sqrt()
}

/// Minimum of a slice, NaN if empty.
pub fn min(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::NAN, |acc, v| {
        if acc.is_nan() || v < acc {
            v
        } else {
            acc
        }
    })
}

/// Maximum of a slice, NaN if empty.
pub fn max(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::NAN, |acc, v| {
        if acc.is_nan() || v > acc {
            v
        } else {
            acc
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn mean_of_values() {
        assert_relative_eq!(mean(&[1.0, 2.0, 3.0, 4.0]), 2.5, epsilon = 1e-10);
        assert!(mean(&[]).is_nan());
    }

    #[test]
    fn sample_variance_uses_n_minus_one() {
        // Known: variance of [2, 4, 4, 4, 5, 5, 7, 9] with n-1 is 32/7
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_relative_eq!(variance(&values), 32.0 / 7.0, epsilon = 1e-10);
        assert!(variance(&[1.0]).is_nan());
    }

    #[test]
    fn std_dev_of_constant_is_zero() {
        assert_relative_eq!(std_dev(&[3.0, 3.0, 3.0]), 0.0, epsilon = 1e-10);
    }

    #[test]
    fn min_max_over_slice() {
        let values = [3.0, 1.0, 4.0, 1.5];
        assert_relative_eq!(min(&values), 1.0, epsilon = 1e-10);
        assert_relative_eq!(max(&values), 4.0, epsilon = 1e-10);
        assert!(min(&[]).is_nan());
        assert!(max(&[]).is_nan());
    }
}
