//! Error types for the close_forecast crate

use chrono::NaiveDate;
use std::fmt;
use thiserror::Error;
use trade_math::MathError;

/// Side of a chronological train/test split
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Partition {
    Train,
    Test,
}

impl fmt::Display for Partition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Partition::Train => write!(f, "train"),
            Partition::Test => write!(f, "test"),
        }
    }
}

/// Custom error types for the close_forecast crate
#[derive(Debug, Error)]
pub enum ForecastError {
    /// Malformed date or price, or a required column is missing
    #[error("Parse error: {0}")]
    ParseError(String),

    /// The cutoff date left one side of the split without rows
    #[error("Empty {side} partition for cutoff {cutoff}")]
    EmptyPartition { side: Partition, cutoff: NaiveDate },

    /// Error from invalid parameters
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Error from the numeric kernels
    #[error("Model error: {0}")]
    Model(#[from] MathError),

    /// Error from the CSV reader
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Error from IO operations
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error from decoding a configuration document
    #[error("Config error: {0}")]
    ConfigError(#[from] serde_json::Error),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, ForecastError>;
