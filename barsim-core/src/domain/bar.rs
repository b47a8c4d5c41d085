//! Bar — one day's OHLCV observation, validated at construction.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

/// Errors rejected by [`Bar::new`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BarError {
    #[error("all prices must be > 0")]
    NonPositivePrice,
    #[error("high {high} is below max(open, close)")]
    HighBelowBody { high: Decimal },
    #[error("low {low} is above min(open, close)")]
    LowAboveBody { low: Decimal },
    #[error("high {high} is below low {low}")]
    HighBelowLow { high: Decimal, low: Decimal },
}

/// Daily OHLCV bar for the single simulated instrument.
///
/// Fields are private: the only way to obtain a `Bar` is through [`Bar::new`],
/// which enforces the price-geometry invariants. There is deliberately no
/// `Deserialize` impl — that would be a construction path that skips
/// validation. Once constructed, a bar is never mutated; the engine only
/// ever borrows bars from the input sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Bar {
    date: NaiveDate,
    open: Decimal,
    high: Decimal,
    low: Decimal,
    close: Decimal,
    volume: u64,
}

impl Bar {
    /// Construct a validated bar.
    ///
    /// Invariants: all prices > 0, `low <= min(open, close)`,
    /// `high >= max(open, close)`, `low <= high`. Volume is non-negative by
    /// type.
    pub fn new(
        date: NaiveDate,
        open: Decimal,
        high: Decimal,
        low: Decimal,
        close: Decimal,
        volume: u64,
    ) -> Result<Self, BarError> {
        if open <= Decimal::ZERO
            || high <= Decimal::ZERO
            || low <= Decimal::ZERO
            || close <= Decimal::ZERO
        {
            return Err(BarError::NonPositivePrice);
        }
        if high < open.max(close) {
            return Err(BarError::HighBelowBody { high });
        }
        if low > open.min(close) {
            return Err(BarError::LowAboveBody { low });
        }
        if high < low {
            return Err(BarError::HighBelowLow { high, low });
        }
        Ok(Self {
            date,
            open,
            high,
            low,
            close,
            volume,
        })
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn open(&self) -> Decimal {
        self.open
    }

    pub fn high(&self) -> Decimal {
        self.high
    }

    pub fn low(&self) -> Decimal {
        self.low
    }

    pub fn close(&self) -> Decimal {
        self.close
    }

    pub fn volume(&self) -> u64 {
        self.volume
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()
    }

    #[test]
    fn valid_bar_constructs() {
        let bar = Bar::new(date(), dec!(100), dec!(105), dec!(98), dec!(103), 50_000).unwrap();
        assert_eq!(bar.close(), dec!(103));
        assert_eq!(bar.volume(), 50_000);
    }

    #[test]
    fn rejects_non_positive_price() {
        let err = Bar::new(date(), dec!(0), dec!(105), dec!(98), dec!(103), 0).unwrap_err();
        assert_eq!(err, BarError::NonPositivePrice);

        let err = Bar::new(date(), dec!(100), dec!(105), dec!(-1), dec!(103), 0).unwrap_err();
        assert_eq!(err, BarError::NonPositivePrice);
    }

    #[test]
    fn rejects_high_below_body() {
        let err = Bar::new(date(), dec!(100), dec!(99), dec!(98), dec!(98.5), 0).unwrap_err();
        assert!(matches!(err, BarError::HighBelowBody { .. }));
    }

    #[test]
    fn rejects_low_above_body() {
        let err = Bar::new(date(), dec!(100), dec!(105), dec!(101), dec!(103), 0).unwrap_err();
        assert!(matches!(err, BarError::LowAboveBody { .. }));
    }

    #[test]
    fn flat_bar_is_valid() {
        // open == high == low == close is a degenerate but legal bar
        let bar = Bar::new(date(), dec!(10), dec!(10), dec!(10), dec!(10), 0);
        assert!(bar.is_ok());
    }

    #[test]
    fn serializes_all_fields() {
        let bar = Bar::new(date(), dec!(100), dec!(105), dec!(98), dec!(103), 50_000).unwrap();
        let value = serde_json::to_value(&bar).unwrap();
        assert_eq!(value["date"], "2024-01-02");
        assert_eq!(value["close"], "103");
        assert_eq!(value["volume"], 50_000);
    }
}
