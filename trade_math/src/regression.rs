//! Ordinary least squares regression
//!
//! Features and target are centered on their means before solving, and the
//! intercept is recovered afterwards from those means. The centered problem
//! is solved through the normal equations `CᵀC w = Cᵀy`, applying the
//! pseudo-inverse of the small symmetric matrix `CᵀC` from its
//! eigendecomposition. Rank-deficient designs (for example perfectly
//! collinear moving averages on a pure trend) still produce the minimal-norm
//! least-squares solution instead of an error.

use crate::{MathError, Result};
use log::{debug, warn};
use nalgebra::{DMatrix, DVector};

/// Linear regression model fitted with ordinary least squares
#[derive(Debug, Clone, Default)]
pub struct LinearRegression {
    /// Coefficients (weights) for each feature
    coefficients: Option<DVector<f64>>,
    /// Intercept (bias) term
    intercept: Option<f64>,
    /// Numerical rank of the centered design matrix
    rank: Option<usize>,
    /// R-squared on the fitting data
    r_squared: Option<f64>,
}

impl LinearRegression {
    /// Create an unfitted model
    pub fn new() -> Self {
        Self::default()
    }

    /// Fit the model to `x` (one row per observation) and target `y`.
    ///
    /// Eigenvalues of the centered Gram matrix below
    /// `max(rows, cols) * f64::EPSILON * largest_eigenvalue` are treated as
    /// zero.
    pub fn fit(&mut self, x: &DMatrix<f64>, y: &DVector<f64>) -> Result<()> {
        let (n_rows, n_features) = x.shape();
        if n_rows != y.len() {
            return Err(MathError::DimensionMismatch {
                expected: n_rows,
                got: y.len(),
            });
        }
        if n_rows == 0 {
            return Err(MathError::InsufficientData(
                "Cannot fit a regression on zero observations".to_string(),
            ));
        }
        if n_features == 0 {
            return Err(MathError::InvalidInput(
                "Design matrix has no feature columns".to_string(),
            ));
        }

        let x_means = DVector::from_iterator(n_features, x.column_iter().map(|c| c.mean()));
        let y_mean = y.mean();

        let mut centered = x.clone();
        for (j, mean) in x_means.iter().enumerate() {
            centered.column_mut(j).add_scalar_mut(-mean);
        }
        let y_centered = y.add_scalar(-y_mean);

        // Constant features carry no information; they get zero weight.
        let (weights, rank) = if centered.iter().all(|v| *v == 0.0) {
            (DVector::zeros(n_features), 0)
        } else {
            solve_centered(centered, &y_centered)?
        };
        if rank < n_features {
            warn!(
                "Design matrix is rank deficient ({} of {} columns), using the minimal-norm solution",
                rank, n_features
            );
        }

        let intercept = y_mean - x_means.dot(&weights);

        let fitted = (x * &weights).add_scalar(intercept);
        let ss_res: f64 = (y - &fitted).iter().map(|r| r * r).sum();
        let ss_tot: f64 = y_centered.iter().map(|d| d * d).sum();

        self.coefficients = Some(weights);
        self.intercept = Some(intercept);
        self.rank = Some(rank);
        self.r_squared = Some(r_squared(ss_res, ss_tot));

        Ok(())
    }

    /// Predict the target for each row of `x`
    pub fn predict(&self, x: &DMatrix<f64>) -> Result<DVector<f64>> {
        let coefficients = self.coefficients.as_ref().ok_or(MathError::NotFitted)?;
        let intercept = self.intercept.ok_or(MathError::NotFitted)?;

        if x.ncols() != coefficients.len() {
            return Err(MathError::DimensionMismatch {
                expected: coefficients.len(),
                got: x.ncols(),
            });
        }

        Ok((x * coefficients).add_scalar(intercept))
    }

    /// Fitted weights, one per feature column
    pub fn coefficients(&self) -> Option<&[f64]> {
        self.coefficients.as_ref().map(|c| c.as_slice())
    }

    pub fn intercept(&self) -> Option<f64> {
        self.intercept
    }

    pub fn rank(&self) -> Option<usize> {
        self.rank
    }

    /// Coefficient of determination on the data the model was fitted to
    pub fn r_squared(&self) -> Option<f64> {
        self.r_squared
    }

    pub fn is_fitted(&self) -> bool {
        self.coefficients.is_some()
    }
}

/// Minimal-norm least-squares solution of `x * w = y` with the numerical
/// rank of `x`.
///
/// The Gram matrix `xᵀx` is only `cols × cols`, so its eigendecomposition is
/// cheap and stays accurate when the columns of `x` are collinear up to
/// rounding noise.
fn solve_centered(x: DMatrix<f64>, y: &DVector<f64>) -> Result<(DVector<f64>, usize)> {
    let (n_rows, n_features) = x.shape();
    let gram = x.tr_mul(&x);
    let xty = x.tr_mul(y);

    let eigen = gram.symmetric_eigen();
    let lambda_max = eigen.eigenvalues.iter().cloned().fold(0.0_f64, f64::max);
    let tolerance = n_rows.max(n_features) as f64 * f64::EPSILON * lambda_max;
    debug!(
        "Gram eigenvalues {:?}, tolerance {:e}",
        eigen.eigenvalues.as_slice(),
        tolerance
    );

    let mut weights = DVector::zeros(n_features);
    let mut rank = 0;
    for (i, &lambda) in eigen.eigenvalues.iter().enumerate() {
        if lambda <= tolerance {
            continue;
        }
        let direction = eigen.eigenvectors.column(i);
        weights.axpy(direction.dot(&xty) / lambda, &direction, 1.0);
        rank += 1;
    }

    if weights.iter().any(|w| !w.is_finite()) {
        return Err(MathError::CalculationError(
            "Least squares produced non-finite weights".to_string(),
        ));
    }

    Ok((weights, rank))
}

// A constant target has no variance to explain: a perfect fit scores 1, anything else 0.
fn r_squared(ss_res: f64, ss_tot: f64) -> f64 {
    if ss_tot == 0.0 {
        if ss_res == 0.0 {
            1.0
        } else {
            0.0
        }
    } else {
        1.0 - ss_res / ss_tot
    }
}
