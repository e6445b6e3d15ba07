use chrono::{Days, NaiveDate};
use close_forecast::utils::noisy_trend_records;
use close_forecast::{run_on_records, PipelineConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Three years of a slowly rising, noisy daily close
    let start = NaiveDate::from_ymd_opt(2010, 1, 1).ok_or("invalid start date")?;
    let records = noisy_trend_records(start, 3 * 365, 1000.0, 0.8, 12.0, 42)?;
    println!("Generated {} daily records", records.len());

    // Hold out the last six months
    let config = PipelineConfig::default().with_cutoff(start + Days::new(3 * 365 - 182));
    let report = run_on_records(records, &config)?;

    println!(
        "Trained on {} rows, tested on {} rows",
        report.train_rows, report.test_rows
    );
    for (name, weight) in report.feature_names.iter().zip(&report.weights) {
        println!("  {:8} {:>10.6}", name, weight);
    }
    println!("  {:8} {:>10.6}", "intercept", report.intercept);
    println!("Training R²: {:.4}", report.train_r_squared);
    println!("RMSE: {:.4}", report.metrics.rmse);
    println!("{}", report.summary_line());

    Ok(())
}
