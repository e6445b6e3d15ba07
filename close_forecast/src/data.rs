//! Loading daily price records from CSV

use crate::config::{PipelineConfig, DEFAULT_CLOSE_COLUMN, DEFAULT_DATE_COLUMN};
use crate::error::{ForecastError, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use csv::{ReaderBuilder, StringRecord};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// One trading day of price data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Trading date
    pub date: NaiveDate,
    /// Open price
    pub open: Option<f64>,
    /// High price
    pub high: Option<f64>,
    /// Low price
    pub low: Option<f64>,
    /// Close price
    pub close: f64,
    /// Traded volume
    pub volume: Option<f64>,
}

impl Record {
    /// Create a record carrying only a date and a close price
    pub fn new(date: NaiveDate, close: f64) -> Self {
        Self {
            date,
            open: None,
            high: None,
            low: None,
            close,
            volume: None,
        }
    }
}

/// Positions of the recognised columns in a CSV header
#[derive(Debug, Clone, Copy)]
struct ColumnLayout {
    date: usize,
    close: usize,
    open: Option<usize>,
    high: Option<usize>,
    low: Option<usize>,
    volume: Option<usize>,
}

/// Data loader for daily price records
#[derive(Debug, Clone)]
pub struct DataLoader {
    date_column: String,
    close_column: String,
}

impl Default for DataLoader {
    fn default() -> Self {
        Self {
            date_column: DEFAULT_DATE_COLUMN.to_string(),
            close_column: DEFAULT_CLOSE_COLUMN.to_string(),
        }
    }
}

impl DataLoader {
    /// Create a loader looking for the default `Date` and `Close` columns
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a loader using the column names of a pipeline configuration
    pub fn from_config(config: &PipelineConfig) -> Self {
        Self {
            date_column: config.date_column.clone(),
            close_column: config.close_column.clone(),
        }
    }

    /// Load records from a CSV file, sorted ascending by date
    pub fn load_csv<P: AsRef<Path>>(&self, path: P) -> Result<Vec<Record>> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let records = self.load_reader(file)?;
        info!("Loaded {} records from {}", records.len(), path.display());
        Ok(records)
    }

    /// Load records from any CSV source with a header row, sorted ascending by date
    ///
    /// Rows sharing a date keep their order from the source.
    pub fn load_reader<R: Read>(&self, reader: R) -> Result<Vec<Record>> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let layout = self.detect_columns(reader.headers()?)?;
        debug!("Detected column layout {:?}", layout);

        let mut records = Vec::new();
        for (i, row) in reader.records().enumerate() {
            // Header is line 1
            let line = i + 2;
            records.push(parse_row(&row?, &layout, line)?);
        }

        records.sort_by_key(|r| r.date);
        Ok(records)
    }

    /// Detect the required and optional columns in a header row
    fn detect_columns(&self, headers: &StringRecord) -> Result<ColumnLayout> {
        let date = find_column(headers, &self.date_column).ok_or_else(|| {
            ForecastError::ParseError(format!("Missing required column '{}'", self.date_column))
        })?;
        let close = find_column(headers, &self.close_column).ok_or_else(|| {
            ForecastError::ParseError(format!(
                "Missing required column '{}'",
                self.close_column
            ))
        })?;

        Ok(ColumnLayout {
            date,
            close,
            open: find_column(headers, "open"),
            high: find_column(headers, "high"),
            low: find_column(headers, "low"),
            volume: find_column(headers, "volume"),
        })
    }
}

/// Find a column by exact case-insensitive name, falling back to the first
/// header that contains the name.
fn find_column(headers: &StringRecord, name: &str) -> Option<usize> {
    let wanted = name.trim().to_lowercase();
    headers
        .iter()
        .position(|h| h.trim().to_lowercase() == wanted)
        .or_else(|| {
            headers
                .iter()
                .position(|h| h.to_lowercase().contains(&wanted))
        })
}

fn parse_row(row: &StringRecord, layout: &ColumnLayout, line: usize) -> Result<Record> {
    let raw_date = row.get(layout.date).ok_or_else(|| {
        ForecastError::ParseError(format!("Missing date field at line {}", line))
    })?;
    let date = parse_date(raw_date).ok_or_else(|| {
        ForecastError::ParseError(format!("Invalid date '{}' at line {}", raw_date, line))
    })?;

    let raw_close = row.get(layout.close).ok_or_else(|| {
        ForecastError::ParseError(format!("Missing close field at line {}", line))
    })?;
    let close = raw_close
        .parse::<f64>()
        .ok()
        .filter(|c| c.is_finite())
        .ok_or_else(|| {
            ForecastError::ParseError(format!(
                "Invalid close price '{}' at line {}",
                raw_close, line
            ))
        })?;

    Ok(Record {
        date,
        open: optional_field(row, layout.open, "open", line),
        high: optional_field(row, layout.high, "high", line),
        low: optional_field(row, layout.low, "low", line),
        close,
        volume: optional_field(row, layout.volume, "volume", line),
    })
}

// Optional columns never fail a load; an unreadable value is logged and dropped.
fn optional_field(row: &StringRecord, index: Option<usize>, name: &str, line: usize) -> Option<f64> {
    let raw = row.get(index?)?;
    if raw.is_empty() {
        return None;
    }
    match raw.parse::<f64>() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("Ignoring invalid {} value '{}' at line {}", name, raw, line);
            None
        }
    }
}

/// Parse a calendar date in one of the accepted formats.
///
/// Timestamps are accepted too; only their date part is kept.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
                .map(|dt| dt.date())
        })
        .or_else(|| {
            DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|dt| dt.date_naive())
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_date_formats() {
        assert_eq!(parse_date("2015-12-07"), Some(ymd(2015, 12, 7)));
        assert_eq!(parse_date("2015/12/07"), Some(ymd(2015, 12, 7)));
        assert_eq!(parse_date("12/07/2015"), Some(ymd(2015, 12, 7)));
        assert_eq!(parse_date("2015-12-07 16:00:00"), Some(ymd(2015, 12, 7)));
        assert_eq!(parse_date("2015-12-07T16:00:00"), Some(ymd(2015, 12, 7)));
        assert_eq!(parse_date("2015-12-07T16:00:00Z"), Some(ymd(2015, 12, 7)));
        assert_eq!(parse_date(" 2015-12-07 "), Some(ymd(2015, 12, 7)));
        assert_eq!(parse_date("07.12.2015"), None);
        assert_eq!(parse_date("2015-13-01"), None);
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn test_find_column_prefers_exact_match() {
        let headers = StringRecord::from(vec!["Date", "Adj Close", "Close", "Volume"]);
        assert_eq!(find_column(&headers, "Close"), Some(2));
        assert_eq!(find_column(&headers, "date"), Some(0));
        assert_eq!(find_column(&headers, "open"), None);

        let headers = StringRecord::from(vec!["trade_date", "close_price"]);
        assert_eq!(find_column(&headers, "Date"), Some(0));
        assert_eq!(find_column(&headers, "Close"), Some(1));
    }

    #[test]
    fn test_unparseable_optional_field_is_dropped() {
        let csv = "Date,Open,Close\n2020-01-02,abc,10.5\n";
        let records = DataLoader::new().load_reader(csv.as_bytes()).unwrap();
        assert_eq!(records[0].open, None);
        assert_eq!(records[0].close, 10.5);
    }
}
