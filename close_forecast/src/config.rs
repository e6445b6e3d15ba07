//! Pipeline configuration
//!
//! Every field has a default matching the historical S&P 500 setup, so
//! `PipelineConfig::default()` is what the `predict` binary runs with. A JSON
//! document can override any subset of fields.

use crate::error::{ForecastError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Trailing windows, in rows, for the rolling-mean features
pub const DEFAULT_WINDOWS: [usize; 3] = [5, 30, 365];

pub const DEFAULT_DATE_COLUMN: &str = "Date";
pub const DEFAULT_CLOSE_COLUMN: &str = "Close";

/// Rows dated on or before this day are dropped from the dataset
pub const HISTORY_START: NaiveDate = match NaiveDate::from_ymd_opt(1951, 1, 2) {
    Some(date) => date,
    None => panic!("invalid history start date"),
};

/// First day of the evaluation period
pub const TEST_CUTOFF: NaiveDate = match NaiveDate::from_ymd_opt(2013, 1, 1) {
    Some(date) => date,
    None => panic!("invalid test cutoff date"),
};

/// Settings for a single prediction run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Header of the date column (matched case-insensitively)
    pub date_column: String,
    /// Header of the close price column (matched case-insensitively)
    pub close_column: String,
    /// Window sizes of the trailing-mean features
    pub windows: Vec<usize>,
    /// Only rows dated strictly after this day are kept
    pub history_start: NaiveDate,
    /// Rows before this date train the model, rows on or after it test it
    pub cutoff: NaiveDate,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            date_column: DEFAULT_DATE_COLUMN.to_string(),
            close_column: DEFAULT_CLOSE_COLUMN.to_string(),
            windows: DEFAULT_WINDOWS.to_vec(),
            history_start: HISTORY_START,
            cutoff: TEST_CUTOFF,
        }
    }
}

impl PipelineConfig {
    /// Parse a configuration from JSON, filling absent fields with defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a JSON configuration file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn with_cutoff(mut self, cutoff: NaiveDate) -> Self {
        self.cutoff = cutoff;
        self
    }

    pub fn with_history_start(mut self, history_start: NaiveDate) -> Self {
        self.history_start = history_start;
        self
    }

    pub fn with_windows(mut self, windows: Vec<usize>) -> Self {
        self.windows = windows;
        self
    }

    pub fn with_columns(mut self, date_column: &str, close_column: &str) -> Self {
        self.date_column = date_column.to_string();
        self.close_column = close_column.to_string();
        self
    }

    /// Check that the settings describe a runnable pipeline
    pub fn validate(&self) -> Result<()> {
        if self.windows.is_empty() {
            return Err(ForecastError::InvalidParameter(
                "At least one feature window is required".to_string(),
            ));
        }
        if self.windows.contains(&0) {
            return Err(ForecastError::InvalidParameter(
                "Feature windows must be positive".to_string(),
            ));
        }
        for (i, window) in self.windows.iter().enumerate() {
            if self.windows[..i].contains(window) {
                return Err(ForecastError::InvalidParameter(format!(
                    "Feature window {} is listed more than once",
                    window
                )));
            }
        }
        if self.date_column.trim().is_empty() || self.close_column.trim().is_empty() {
            return Err(ForecastError::InvalidParameter(
                "Column names must not be empty".to_string(),
            ));
        }
        if self.cutoff <= self.history_start {
            return Err(ForecastError::InvalidParameter(format!(
                "Cutoff {} must fall after the history start {}",
                self.cutoff, self.history_start
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PipelineConfig::default();
        assert_eq!(config.windows, vec![5, 30, 365]);
        assert_eq!(config.history_start, NaiveDate::from_ymd_opt(1951, 1, 2).unwrap());
        assert_eq!(config.cutoff, NaiveDate::from_ymd_opt(2013, 1, 1).unwrap());
        assert_eq!(config.date_column, "Date");
        assert_eq!(config.close_column, "Close");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_overrides() {
        let cutoff = NaiveDate::from_ymd_opt(2020, 6, 1).unwrap();
        let config = PipelineConfig::default()
            .with_cutoff(cutoff)
            .with_windows(vec![2, 4])
            .with_columns("timestamp", "price");

        assert_eq!(config.cutoff, cutoff);
        assert_eq!(config.windows, vec![2, 4]);
        assert_eq!(config.date_column, "timestamp");
        assert_eq!(config.close_column, "price");
    }

    #[test]
    fn test_validation_failures() {
        let base = PipelineConfig::default();

        assert!(base.clone().with_windows(vec![]).validate().is_err());
        assert!(base.clone().with_windows(vec![5, 0]).validate().is_err());
        assert!(base.clone().with_windows(vec![5, 30, 5]).validate().is_err());
        assert!(base
            .clone()
            .with_cutoff(NaiveDate::from_ymd_opt(1950, 1, 1).unwrap())
            .validate()
            .is_err());
        assert!(base.with_columns("", "Close").validate().is_err());
    }
}
