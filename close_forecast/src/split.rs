//! Chronological train/test split

use crate::error::{ForecastError, Partition, Result};
use crate::features::Dataset;
use chrono::NaiveDate;
use log::info;

/// Training and evaluation halves of a dataset
#[derive(Debug, Clone, PartialEq)]
pub struct TrainTestSplit {
    /// Rows dated before the cutoff
    pub train: Dataset,
    /// Rows dated on or after the cutoff
    pub test: Dataset,
}

/// Split `dataset` at `cutoff`: rows dated before it train, the rest test.
///
/// Row order is preserved on both sides. Fails with
/// [`ForecastError::EmptyPartition`] when either side ends up empty.
pub fn split_by_date(dataset: Dataset, cutoff: NaiveDate) -> Result<TrainTestSplit> {
    let feature_names = dataset.feature_names().to_vec();
    let (train, test): (Vec<_>, Vec<_>) = dataset
        .into_samples()
        .into_iter()
        .partition(|sample| sample.date < cutoff);

    if train.is_empty() {
        return Err(ForecastError::EmptyPartition {
            side: Partition::Train,
            cutoff,
        });
    }
    if test.is_empty() {
        return Err(ForecastError::EmptyPartition {
            side: Partition::Test,
            cutoff,
        });
    }

    info!(
        "Split at {}: {} training rows, {} test rows",
        cutoff,
        train.len(),
        test.len()
    );

    Ok(TrainTestSplit {
        train: Dataset::from_samples(feature_names.clone(), train),
        test: Dataset::from_samples(feature_names, test),
    })
}
