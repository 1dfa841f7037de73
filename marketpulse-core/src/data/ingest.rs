//! CSV bar ingestion.
//!
//! Reads `timestamp,open,high,low,close,volume` rows into `Bar`s. This is
//! the only I/O in the crate; everything downstream of it is a pure
//! computation. Timestamps are RFC 3339. Rows are taken in file order —
//! the non-decreasing-timestamp contract is the supplier's responsibility,
//! but grossly malformed rows are rejected here.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use thiserror::Error;

use crate::domain::Bar;

#[derive(Debug, Error)]
pub enum DataError {
    #[error("failed to read bar file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("row {row}: {reason}")]
    BadRow { row: usize, reason: String },
    #[error("no bars in input")]
    Empty,
}

#[derive(Debug, Deserialize)]
struct BarRow {
    timestamp: DateTime<Utc>,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: f64,
}

/// Load a bar sequence from a CSV file with a header row.
pub fn load_bars(path: impl AsRef<Path>) -> Result<Vec<Bar>, DataError> {
    let mut reader = csv::Reader::from_path(path.as_ref())?;
    let mut bars = Vec::new();

    for (i, record) in reader.deserialize::<BarRow>().enumerate() {
        let row = record?;
        let bar = Bar {
            timestamp: row.timestamp,
            open: row.open,
            high: row.high,
            low: row.low,
            close: row.close,
            volume: row.volume,
        };
        if bar.is_void() {
            return Err(DataError::BadRow {
                row: i + 1,
                reason: "non-finite price field".into(),
            });
        }
        if bar.high < bar.low {
            return Err(DataError::BadRow {
                row: i + 1,
                reason: format!("high {} below low {}", bar.high, bar.low),
            });
        }
        bars.push(bar);
    }

    if bars.is_empty() {
        return Err(DataError::Empty);
    }
    Ok(bars)
}
