//! # Close Forecast
//!
//! Predicts daily closing prices from trailing moving averages of earlier
//! closes with an ordinary least-squares model.
//!
//! ## Pipeline
//!
//! 1. **Load**: read date and close columns from a CSV and sort by date
//! 2. **Featurize**: the mean close over the previous 5, 30 and 365 rows,
//!    never including the row itself
//! 3. **Split**: rows before a cutoff date train the model, the rest test it
//! 4. **Fit and evaluate**: least squares on the training rows, mean absolute
//!    error on the test rows
//!
//! ## Quick Start
//!
//! ```no_run
//! use close_forecast::{run_pipeline, PipelineConfig};
//!
//! let report = run_pipeline("sphist.csv", &PipelineConfig::default())?;
//! println!("{}", report.summary_line());
//! # Ok::<(), close_forecast::ForecastError>(())
//! ```
//!
//! Each stage is usable on its own:
//!
//! ```
//! use chrono::NaiveDate;
//! use close_forecast::utils::linear_trend_records;
//! use close_forecast::{build_dataset, split_by_date, ClosePriceModel};
//!
//! let start = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
//! let records = linear_trend_records(start, 60, 100.0, 1.0);
//! let dataset = build_dataset(&records, &[5, 10], start).unwrap();
//! let split = split_by_date(dataset, NaiveDate::from_ymd_opt(2000, 2, 10).unwrap()).unwrap();
//!
//! let model = ClosePriceModel::fit(&split.train).unwrap();
//! let evaluation = model.evaluate(&split.test).unwrap();
//! assert!(evaluation.metrics.mae < 1e-6);
//! ```

pub mod config;
pub mod data;
pub mod error;
pub mod features;
pub mod model;
pub mod pipeline;
pub mod split;
pub mod utils;

// Re-export commonly used types
pub use crate::config::PipelineConfig;
pub use crate::data::{DataLoader, Record};
pub use crate::error::{ForecastError, Partition, Result};
pub use crate::features::{build_dataset, build_feature_rows, Dataset, FeatureRow, Sample};
pub use crate::model::{ClosePriceModel, Evaluation};
pub use crate::pipeline::{run_on_records, run_pipeline, PipelineReport};
pub use crate::split::{split_by_date, TrainTestSplit};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_info() {
        assert_eq!(NAME, "close_forecast");
        assert!(!VERSION.is_empty());
    }
}
