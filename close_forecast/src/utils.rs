//! Synthetic daily series for tests and demos

use crate::data::Record;
use crate::error::{ForecastError, Result};
use chrono::{Days, NaiveDate};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

/// Daily records on consecutive calendar days whose close moves by `step`
/// per day, starting at `first_close`.
pub fn linear_trend_records(
    start: NaiveDate,
    days: usize,
    first_close: f64,
    step: f64,
) -> Vec<Record> {
    (0..days)
        .map(|i| synthetic_record(start + Days::new(i as u64), first_close + step * i as f64))
        .collect()
}

/// Like [`linear_trend_records`] with Gaussian noise added to each close.
///
/// The same `seed` always produces the same series.
pub fn noisy_trend_records(
    start: NaiveDate,
    days: usize,
    first_close: f64,
    step: f64,
    noise_std: f64,
    seed: u64,
) -> Result<Vec<Record>> {
    let noise = Normal::new(0.0, noise_std).map_err(|e| {
        ForecastError::InvalidParameter(format!("Invalid noise level {}: {}", noise_std, e))
    })?;
    let mut rng = StdRng::seed_from_u64(seed);

    Ok(linear_trend_records(start, days, first_close, step)
        .into_iter()
        .map(|record| {
            let close = record.close + noise.sample(&mut rng);
            synthetic_record(record.date, close)
        })
        .collect())
}

fn synthetic_record(date: NaiveDate, close: f64) -> Record {
    Record {
        date,
        open: Some(close),
        high: Some(close + 1.0),
        low: Some(close - 1.0),
        close,
        volume: Some(1_000_000.0),
    }
}
