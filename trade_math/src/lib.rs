//! # Trade Math
//!
//! Numeric building blocks for price forecasting.
//! This crate provides the pure calculations the forecasting pipeline is made
//! of, with no knowledge of files, dates or configuration:
//!
//! - [`moving_averages`]: shifted trailing means over an ordered series
//! - [`regression`]: ordinary least squares with an intercept
//! - [`metrics`]: forecast error metrics (MAE, MSE, RMSE)

use thiserror::Error;

pub mod metrics;
pub mod moving_averages;
pub mod regression;

pub use metrics::{mean_absolute_error, mean_squared_error, ErrorMetrics};
pub use moving_averages::trailing_means;
pub use regression::LinearRegression;

/// Errors that can occur in trading-related calculations
#[derive(Error, Debug)]
pub enum MathError {
    #[error("Insufficient data for calculation: {0}")]
    InsufficientData(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    #[error("Model has not been fitted yet")]
    NotFitted,

    #[error("Calculation error: {0}")]
    CalculationError(String),
}

/// Result type for trading math operations
pub type Result<T> = std::result::Result<T, MathError>;
