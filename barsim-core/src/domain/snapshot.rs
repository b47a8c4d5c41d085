//! PortfolioSnapshot — bar-close valuation of the portfolio.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

/// State of the portfolio at one bar close.
///
/// The snapshot sequence is the equity curve and the sole input to the
/// metrics engine. The accounting identity holds for every snapshot:
/// `equity == cash + position_value` and
/// `position_value == position_quantity × close`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PortfolioSnapshot {
    pub date: NaiveDate,
    pub cash: Decimal,
    pub position_quantity: u64,
    /// Position market value at this bar's close.
    pub position_value: Decimal,
    /// cash + position_value.
    pub equity: Decimal,
    /// Cumulative realized P&L since the start of the run.
    pub realized_pnl: Decimal,
}
