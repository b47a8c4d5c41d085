//! Order — an intent to trade, resolved against the next bar.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Direction of an executed market transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderSide {
    Buy,
    Sell,
}

/// Which price of the fill bar an order executes against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FillTiming {
    /// Fill at the next bar's open price.
    NextOpen,
    /// Fill at the next bar's close price.
    NextClose,
}

/// An order intent produced by the order builder from a non-HOLD signal.
///
/// Dated at the decision bar; always resolved against the bar that follows
/// it (the no-lookahead guarantee). Consumed immediately by the execution
/// model and not persisted beyond that.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Order {
    pub side: OrderSide,
    /// Number of units to transact; always > 0 (enforced by the builder).
    pub quantity: u64,
    /// Index of the decision bar.
    pub decision_index: usize,
    /// Date of the decision bar.
    pub decision_date: NaiveDate,
    pub timing: FillTiming,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_timing_serializes_screaming_snake() {
        assert_eq!(
            serde_json::to_string(&FillTiming::NextOpen).unwrap(),
            "\"NEXT_OPEN\""
        );
        assert_eq!(
            serde_json::to_string(&FillTiming::NextClose).unwrap(),
            "\"NEXT_CLOSE\""
        );
    }
}
