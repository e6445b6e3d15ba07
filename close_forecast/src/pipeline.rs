//! End-to-end prediction run: load, featurize, split, fit, evaluate

use crate::config::PipelineConfig;
use crate::data::{DataLoader, Record};
use crate::error::Result;
use crate::features::build_dataset;
use crate::model::ClosePriceModel;
use crate::split::split_by_date;
use log::info;
use serde::Serialize;
use std::path::Path;
use trade_math::ErrorMetrics;

/// Outcome of a prediction run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineReport {
    pub feature_names: Vec<String>,
    pub weights: Vec<f64>,
    pub intercept: f64,
    pub train_rows: usize,
    pub test_rows: usize,
    /// R² of the fit on the training rows
    pub train_r_squared: f64,
    /// Errors of the predictions on the test rows
    pub metrics: ErrorMetrics,
}

impl PipelineReport {
    pub fn mean_absolute_error(&self) -> f64 {
        self.metrics.mae
    }

    /// The single line the `predict` binary prints
    pub fn summary_line(&self) -> String {
        format!("Mean absolute error: {}", self.metrics.mae)
    }
}

/// Run the full pipeline on the CSV file at `path`
pub fn run_pipeline<P: AsRef<Path>>(path: P, config: &PipelineConfig) -> Result<PipelineReport> {
    config.validate()?;
    let records = DataLoader::from_config(config).load_csv(path)?;
    run_on_records(records, config)
}

/// Run the pipeline on records already in memory
///
/// Records are sorted by date first, so callers may pass them in any order.
pub fn run_on_records(mut records: Vec<Record>, config: &PipelineConfig) -> Result<PipelineReport> {
    config.validate()?;
    records.sort_by_key(|r| r.date);

    let dataset = build_dataset(&records, &config.windows, config.history_start)?;
    info!(
        "Built {} fully featured rows from {} records",
        dataset.len(),
        records.len()
    );

    let split = split_by_date(dataset, config.cutoff)?;
    let model = ClosePriceModel::fit(&split.train)?;
    let evaluation = model.evaluate(&split.test)?;

    Ok(PipelineReport {
        feature_names: model.feature_names().to_vec(),
        weights: model.weights().to_vec(),
        intercept: model.intercept(),
        train_rows: split.train.len(),
        test_rows: split.test.len(),
        train_r_squared: model.r_squared(),
        metrics: evaluation.metrics,
    })
}
