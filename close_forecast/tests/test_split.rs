use chrono::{Days, NaiveDate};
use close_forecast::config::{DEFAULT_WINDOWS, HISTORY_START};
use close_forecast::utils::linear_trend_records;
use close_forecast::{build_dataset, split_by_date, Dataset, ForecastError, Partition};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2005, 3, 1).unwrap()
}

fn dataset(days: usize) -> Dataset {
    let records = linear_trend_records(start(), days, 100.0, 1.0);
    build_dataset(&records, &DEFAULT_WINDOWS, HISTORY_START).unwrap()
}

#[rstest]
#[case(366)]
#[case(380)]
#[case(399)]
fn test_split_is_disjoint_and_ordered(#[case] cutoff_day: u64) {
    let cutoff = start() + Days::new(cutoff_day);
    let data = dataset(400);
    let total = data.len();

    let split = split_by_date(data, cutoff).unwrap();

    assert_eq!(split.train.len() + split.test.len(), total);
    assert!(split.train.last_date().unwrap() < cutoff);
    assert!(cutoff <= split.test.first_date().unwrap());
    for half in [&split.train, &split.test] {
        assert!(half.samples().windows(2).all(|w| w[0].date < w[1].date));
        assert_eq!(half.feature_names(), split.train.feature_names());
    }
}

#[test]
fn test_cutoff_day_goes_to_test() {
    let cutoff = start() + Days::new(380);
    let split = split_by_date(dataset(400), cutoff).unwrap();

    assert_eq!(split.train.len(), 15);
    assert_eq!(split.test.len(), 20);
    assert_eq!(split.test.first_date(), Some(cutoff));
}

#[test]
fn test_empty_train_partition() {
    let cutoff = start() + Days::new(365);
    match split_by_date(dataset(400), cutoff) {
        Err(ForecastError::EmptyPartition { side, cutoff: c }) => {
            assert_eq!(side, Partition::Train);
            assert_eq!(c, cutoff);
        }
        other => panic!("Expected EmptyPartition, got {:?}", other),
    }
}

#[test]
fn test_empty_test_partition() {
    let cutoff = start() + Days::new(400);
    let err = split_by_date(dataset(400), cutoff).unwrap_err();
    assert!(matches!(
        err,
        ForecastError::EmptyPartition {
            side: Partition::Test,
            ..
        }
    ));
    assert!(err.to_string().contains("test"));
}

#[test]
fn test_empty_dataset_reports_train_first() {
    let cutoff = start() + Days::new(10);
    let err = split_by_date(dataset(100), cutoff).unwrap_err();
    assert!(matches!(
        err,
        ForecastError::EmptyPartition {
            side: Partition::Train,
            ..
        }
    ));
}
