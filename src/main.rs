//! Predicts S&P 500 closes from trailing averages and reports the error on
//! the held-out period.
//!
//! Reads `sphist.csv` from the working directory and prints a single line.
//! Set `RUST_LOG=info` to see the stages on stderr.

use anyhow::Context;
use close_forecast::{run_pipeline, PipelineConfig, NAME, VERSION};
use log::info;

const DATA_FILE: &str = "sphist.csv";

fn main() -> anyhow::Result<()> {
    env_logger::init();

    info!("{} {}", NAME, VERSION);

    let config = PipelineConfig::default();
    info!(
        "Windows {:?}, history after {}, test from {}",
        config.windows, config.history_start, config.cutoff
    );

    let report = run_pipeline(DATA_FILE, &config)
        .with_context(|| format!("failed to predict closes from {}", DATA_FILE))?;

    println!("{}", report.summary_line());
    Ok(())
}
