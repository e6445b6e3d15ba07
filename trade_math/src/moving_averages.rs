//! Trailing moving averages
//!
//! The averages in this module are shifted by one observation: the value at
//! index `i` is computed from the `window` values strictly before `i`, so a
//! feature built from it never sees the observation it is used to predict.

use crate::{MathError, Result};

/// Simple moving average of the `window` values preceding each index.
///
/// The output has one entry per input value. Index `i` holds the mean of
/// `values[i - window..i]`, or `None` while fewer than `window` predecessors
/// exist.
///
/// # Examples
///
/// ```
/// use trade_math::trailing_means;
///
/// let means = trailing_means(&[2.0, 4.0, 6.0, 8.0], 2).unwrap();
/// assert_eq!(means, vec![None, None, Some(3.0), Some(5.0)]);
/// ```
pub fn trailing_means(values: &[f64], window: usize) -> Result<Vec<Option<f64>>> {
    if window == 0 {
        return Err(MathError::InvalidInput(
            "Window must be greater than zero".to_string(),
        ));
    }

    let means = (0..values.len())
        .map(|i| {
            if i < window {
                None
            } else {
                Some(values[i - window..i].iter().sum::<f64>() / window as f64)
            }
        })
        .collect();

    Ok(means)
}
