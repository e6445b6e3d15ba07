//! Forecast error metrics

use crate::{MathError, Result};
use serde::{Deserialize, Serialize};

/// Error metrics for forecast evaluation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ErrorMetrics {
    /// Mean Absolute Error
    pub mae: f64,
    /// Mean Squared Error
    pub mse: f64,
    /// Root Mean Squared Error
    pub rmse: f64,
    /// Number of evaluated points
    pub n_samples: usize,
}

impl ErrorMetrics {
    /// Calculate all error metrics for a forecast against actual values
    pub fn calculate(actual: &[f64], predicted: &[f64]) -> Result<Self> {
        let mae = mean_absolute_error(actual, predicted)?;
        let mse = mean_squared_error(actual, predicted)?;
        Ok(Self {
            mae,
            mse,
            rmse: mse.sqrt(),
            n_samples: actual.len(),
        })
    }
}

/// Mean absolute error: (1/n) * Σ|actual - predicted|
pub fn mean_absolute_error(actual: &[f64], predicted: &[f64]) -> Result<f64> {
    check_lengths(actual, predicted)?;

    let sum: f64 = actual
        .iter()
        .zip(predicted)
        .map(|(a, p)| (a - p).abs())
        .sum();

    Ok(sum / actual.len() as f64)
}

/// Mean squared error: (1/n) * Σ(actual - predicted)²
pub fn mean_squared_error(actual: &[f64], predicted: &[f64]) -> Result<f64> {
    check_lengths(actual, predicted)?;

    let sum: f64 = actual
        .iter()
        .zip(predicted)
        .map(|(a, p)| (a - p).powi(2))
        .sum();

    Ok(sum / actual.len() as f64)
}

fn check_lengths(actual: &[f64], predicted: &[f64]) -> Result<()> {
    if actual.len() != predicted.len() {
        return Err(MathError::DimensionMismatch {
            expected: actual.len(),
            got: predicted.len(),
        });
    }
    if actual.is_empty() {
        return Err(MathError::InsufficientData(
            "Cannot compute an error metric over zero points".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_regression_metrics() {
        let actual = vec![10.0, 20.0, 30.0, 40.0, 50.0];
        let predicted = vec![12.0, 18.0, 33.0, 37.0, 52.0];

        let metrics = ErrorMetrics::calculate(&actual, &predicted).unwrap();
        assert_abs_diff_eq!(metrics.mae, 2.4, epsilon = 1e-12);
        assert_abs_diff_eq!(metrics.mse, 6.0, epsilon = 1e-12);
        assert_abs_diff_eq!(metrics.rmse, 6.0_f64.sqrt(), epsilon = 1e-12);
        assert_eq!(metrics.n_samples, 5);

        assert_eq!(mean_absolute_error(&actual, &predicted).unwrap(), metrics.mae);
        assert_eq!(mean_squared_error(&actual, &predicted).unwrap(), metrics.mse);
    }

    #[test]
    fn test_perfect_forecast_has_zero_error() {
        let values = vec![101.5, 99.0, 250.25];
        assert_eq!(mean_absolute_error(&values, &values).unwrap(), 0.0);
    }

    #[test]
    fn test_mae_is_symmetric_and_non_negative() {
        let a = vec![1.0, -3.0, 7.5];
        let b = vec![-2.0, 4.0, 7.0];
        let ab = mean_absolute_error(&a, &b).unwrap();
        let ba = mean_absolute_error(&b, &a).unwrap();
        assert!(ab >= 0.0);
        assert_eq!(ab, ba);
    }

    #[test]
    fn test_error_handling() {
        let empty: Vec<f64> = vec![];
        assert!(matches!(
            mean_absolute_error(&empty, &empty),
            Err(MathError::InsufficientData(_))
        ));
        assert!(matches!(
            ErrorMetrics::calculate(&[1.0, 2.0], &[1.0]),
            Err(MathError::DimensionMismatch {
                expected: 2,
                got: 1
            })
        ));
    }
}
