//! Rolling-mean feature engineering
//!
//! Each feature is the mean close over a trailing window of strictly earlier
//! rows, so no feature ever includes the close it is used to predict.

use crate::data::Record;
use crate::error::{ForecastError, Result};
use chrono::NaiveDate;
use log::debug;
use nalgebra::{DMatrix, DVector};
use trade_math::trailing_means;

/// Name of the feature averaging the previous `window` closes
pub fn feature_name(window: usize) -> String {
    format!("past{}", window)
}

/// A record's date and close alongside its trailing means, one per window.
///
/// A feature is `None` when fewer rows than its window precede the record.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRow {
    pub date: NaiveDate,
    pub close: f64,
    pub features: Vec<Option<f64>>,
}

impl FeatureRow {
    /// Whether every feature is defined
    pub fn is_complete(&self) -> bool {
        self.features.iter().all(Option::is_some)
    }
}

/// A fully featured row, ready for fitting or evaluation
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub date: NaiveDate,
    pub close: f64,
    pub features: Vec<f64>,
}

/// Compute the trailing-mean features of every record.
///
/// `records` must be sorted ascending by date. The output has one row per
/// record, in the same order.
pub fn build_feature_rows(records: &[Record], windows: &[usize]) -> Result<Vec<FeatureRow>> {
    if let Some(pair) = records.windows(2).find(|pair| pair[1].date < pair[0].date) {
        return Err(ForecastError::InvalidParameter(format!(
            "Records must be sorted by date, found {} after {}",
            pair[1].date, pair[0].date
        )));
    }

    let closes: Vec<f64> = records.iter().map(|r| r.close).collect();
    let columns = windows
        .iter()
        .map(|&window| trailing_means(&closes, window))
        .collect::<std::result::Result<Vec<_>, _>>()?;

    for (window, column) in windows.iter().zip(&columns) {
        debug!(
            "{}: {} of {} rows defined",
            feature_name(*window),
            column.iter().filter(|v| v.is_some()).count(),
            column.len()
        );
    }

    let rows = records
        .iter()
        .enumerate()
        .map(|(i, record)| FeatureRow {
            date: record.date,
            close: record.close,
            features: columns.iter().map(|column| column[i]).collect(),
        })
        .collect();

    Ok(rows)
}

/// Ordered rows whose features are all defined
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    feature_names: Vec<String>,
    samples: Vec<Sample>,
}

impl Dataset {
    /// Keep the rows dated strictly after `history_start` whose features are
    /// all defined.
    pub fn from_feature_rows(
        rows: Vec<FeatureRow>,
        feature_names: Vec<String>,
        history_start: NaiveDate,
    ) -> Self {
        let total = rows.len();
        let samples: Vec<Sample> = rows
            .into_iter()
            .filter(|row| row.date > history_start)
            .filter_map(|row| {
                let features = row.features.into_iter().collect::<Option<Vec<f64>>>()?;
                Some(Sample {
                    date: row.date,
                    close: row.close,
                    features,
                })
            })
            .collect();

        debug!(
            "Kept {} of {} rows after {} with complete features",
            samples.len(),
            total,
            history_start
        );

        Self {
            feature_names,
            samples,
        }
    }

    pub(crate) fn from_samples(feature_names: Vec<String>, samples: Vec<Sample>) -> Self {
        Self {
            feature_names,
            samples,
        }
    }

    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn into_samples(self) -> Vec<Sample> {
        self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.samples.first().map(|s| s.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.samples.last().map(|s| s.date)
    }

    /// Feature values as a matrix with one row per sample
    pub fn feature_matrix(&self) -> DMatrix<f64> {
        DMatrix::from_fn(self.samples.len(), self.feature_names.len(), |i, j| {
            self.samples[i].features[j]
        })
    }

    /// Close prices, the regression target
    pub fn targets(&self) -> DVector<f64> {
        DVector::from_iterator(self.samples.len(), self.samples.iter().map(|s| s.close))
    }

    pub fn closes(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.close).collect()
    }
}

/// Compute features for `records` and keep the fully featured rows after
/// `history_start`.
pub fn build_dataset(
    records: &[Record],
    windows: &[usize],
    history_start: NaiveDate,
) -> Result<Dataset> {
    let rows = build_feature_rows(records, windows)?;
    let names = windows.iter().map(|&w| feature_name(w)).collect();
    Ok(Dataset::from_feature_rows(rows, names, history_start))
}
