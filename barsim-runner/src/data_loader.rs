//! CSV bar loading and validation.
//!
//! Produces the contract the engine assumes and never re-checks: a
//! non-empty, strictly date-ascending, duplicate-free sequence of validated
//! bars. Anything short of that is a `LoadError` with row context.
//!
//! Expected header: `date,open,high,low,close,volume`, dates in ISO
//! `YYYY-MM-DD`, prices as decimal strings.

use std::fs::File;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

use barsim_core::domain::{Bar, BarError};

/// Errors from the data loading layer.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to open {}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("invalid bar at row {row}: {source}")]
    InvalidBar {
        row: usize,
        #[source]
        source: BarError,
    },

    #[error("duplicate date {date} at row {row}")]
    DuplicateDate { date: NaiveDate, row: usize },

    #[error("bars out of ascending date order at row {row}")]
    OutOfOrder { row: usize },

    #[error("no bar data in {}", path.display())]
    Empty { path: PathBuf },
}

/// One raw CSV record, before bar validation.
#[derive(Debug, Deserialize)]
struct BarRow {
    date: NaiveDate,
    open: Decimal,
    high: Decimal,
    low: Decimal,
    close: Decimal,
    volume: u64,
}

/// Load and validate the full bar sequence from a CSV file.
pub fn load_bars(path: &Path) -> Result<Vec<Bar>, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = csv::Reader::from_reader(file);

    let mut bars: Vec<Bar> = Vec::new();
    for (i, record) in reader.deserialize::<BarRow>().enumerate() {
        // Row 1 is the header, so data rows start at 2.
        let row = i + 2;
        let raw = record?;

        if let Some(prev) = bars.last() {
            if raw.date == prev.date() {
                return Err(LoadError::DuplicateDate {
                    date: raw.date,
                    row,
                });
            }
            if raw.date < prev.date() {
                return Err(LoadError::OutOfOrder { row });
            }
        }

        let bar = Bar::new(raw.date, raw.open, raw.high, raw.low, raw.close, raw.volume)
            .map_err(|source| LoadError::InvalidBar { row, source })?;
        bars.push(bar);
    }

    if bars.is_empty() {
        return Err(LoadError::Empty {
            path: path.to_path_buf(),
        });
    }

    Ok(bars)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_well_formed_bars() {
        let file = write_csv(
            "date,open,high,low,close,volume\n\
             2024-01-02,100,105,98,103,50000\n\
             2024-01-03,103,104.5,101.25,102,40000\n",
        );
        let bars = load_bars(file.path()).unwrap();
        assert_eq!(bars.len(), 2);
        assert_eq!(bars[0].date(), NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
        assert_eq!(bars[1].low(), Decimal::new(10125, 2));
    }

    #[test]
    fn rejects_missing_file() {
        let err = load_bars(Path::new("/nonexistent/bars.csv")).unwrap_err();
        assert!(matches!(err, LoadError::Open { .. }));
    }

    #[test]
    fn rejects_empty_data() {
        let file = write_csv("date,open,high,low,close,volume\n");
        let err = load_bars(file.path()).unwrap_err();
        assert!(matches!(err, LoadError::Empty { .. }));
    }

    #[test]
    fn rejects_duplicate_dates_with_row_context() {
        let file = write_csv(
            "date,open,high,low,close,volume\n\
             2024-01-02,100,105,98,103,50000\n\
             2024-01-02,103,104,101,102,40000\n",
        );
        let err = load_bars(file.path()).unwrap_err();
        assert!(matches!(err, LoadError::DuplicateDate { row: 3, .. }));
    }

    #[test]
    fn rejects_unsorted_dates() {
        let file = write_csv(
            "date,open,high,low,close,volume\n\
             2024-01-03,100,105,98,103,50000\n\
             2024-01-02,103,104,101,102,40000\n",
        );
        let err = load_bars(file.path()).unwrap_err();
        assert!(matches!(err, LoadError::OutOfOrder { row: 3 }));
    }

    #[test]
    fn rejects_invalid_bar_geometry() {
        // high below close
        let file = write_csv(
            "date,open,high,low,close,volume\n\
             2024-01-02,100,101,98,103,50000\n",
        );
        let err = load_bars(file.path()).unwrap_err();
        assert!(matches!(err, LoadError::InvalidBar { row: 2, .. }));
    }

    #[test]
    fn rejects_malformed_rows() {
        let file = write_csv(
            "date,open,high,low,close,volume\n\
             2024-01-02,abc,105,98,103,50000\n",
        );
        let err = load_bars(file.path()).unwrap_err();
        assert!(matches!(err, LoadError::Csv(_)));
    }
}
