//! Least-squares close price model

use crate::error::{ForecastError, Result};
use crate::features::Dataset;
use log::info;
use serde::Serialize;
use trade_math::{ErrorMetrics, LinearRegression, MathError};

/// Predictions on an evaluation set together with their error metrics
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    pub predictions: Vec<f64>,
    pub metrics: ErrorMetrics,
}

/// Linear model mapping trailing-mean features to the close price
#[derive(Debug, Clone)]
pub struct ClosePriceModel {
    feature_names: Vec<String>,
    regression: LinearRegression,
    weights: Vec<f64>,
    intercept: f64,
    r_squared: f64,
}

impl ClosePriceModel {
    /// Fit ordinary least squares on the training rows
    pub fn fit(train: &Dataset) -> Result<Self> {
        let mut regression = LinearRegression::new();
        regression.fit(&train.feature_matrix(), &train.targets())?;

        let weights = regression
            .coefficients()
            .ok_or(MathError::NotFitted)?
            .to_vec();
        let intercept = regression.intercept().ok_or(MathError::NotFitted)?;
        let r_squared = regression.r_squared().ok_or(MathError::NotFitted)?;

        let terms: Vec<String> = train
            .feature_names()
            .iter()
            .zip(&weights)
            .map(|(name, w)| format!("{}={:.6}", name, w))
            .collect();
        info!(
            "Fitted on {} rows: {}, intercept={:.6}, R²={:.6}",
            train.len(),
            terms.join(", "),
            intercept,
            r_squared
        );

        Ok(Self {
            feature_names: train.feature_names().to_vec(),
            regression,
            weights,
            intercept,
            r_squared,
        })
    }

    /// Predict the close of every row in `data`
    pub fn predict(&self, data: &Dataset) -> Result<Vec<f64>> {
        if data.feature_names() != self.feature_names.as_slice() {
            return Err(ForecastError::InvalidParameter(format!(
                "Model was fitted on features {:?} but got {:?}",
                self.feature_names,
                data.feature_names()
            )));
        }

        let predictions = self.regression.predict(&data.feature_matrix())?;
        Ok(predictions.iter().copied().collect())
    }

    /// Predict `test` and measure the error against its actual closes
    pub fn evaluate(&self, test: &Dataset) -> Result<Evaluation> {
        let predictions = self.predict(test)?;
        let metrics = ErrorMetrics::calculate(&test.closes(), &predictions)?;
        info!(
            "Evaluated {} rows: MAE={:.6}, RMSE={:.6}",
            metrics.n_samples, metrics.mae, metrics.rmse
        );
        Ok(Evaluation {
            predictions,
            metrics,
        })
    }

    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    /// Fitted weight of each feature, in feature order
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    /// R² on the training rows
    pub fn r_squared(&self) -> f64 {
        self.r_squared
    }
}
