use chrono::NaiveDate;
use close_forecast::{ForecastError, Partition};
use std::io;
use trade_math::MathError;

#[test]
fn test_error_conversion() {
    let io_error = io::Error::new(io::ErrorKind::NotFound, "file not found");
    assert!(matches!(
        ForecastError::from(io_error),
        ForecastError::IoError(_)
    ));

    let math_error = MathError::NotFitted;
    assert!(matches!(
        ForecastError::from(math_error),
        ForecastError::Model(MathError::NotFitted)
    ));

    let json_error = serde_json::from_str::<u32>("x").unwrap_err();
    assert!(matches!(
        ForecastError::from(json_error),
        ForecastError::ConfigError(_)
    ));
}

#[test]
fn test_error_display() {
    let error = ForecastError::ParseError("Invalid date 'x' at line 2".to_string());
    assert_eq!(error.to_string(), "Parse error: Invalid date 'x' at line 2");

    let error = ForecastError::EmptyPartition {
        side: Partition::Train,
        cutoff: NaiveDate::from_ymd_opt(2013, 1, 1).unwrap(),
    };
    assert_eq!(error.to_string(), "Empty train partition for cutoff 2013-01-01");

    let io_error = io::Error::new(io::ErrorKind::PermissionDenied, "permission denied");
    let error_string = ForecastError::from(io_error).to_string();
    assert!(error_string.contains("IO error"));
    assert!(error_string.contains("permission denied"));
}
