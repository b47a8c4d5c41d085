//! Trade — the immutable record of a filled order.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use super::order::OrderSide;

/// A filled order, as appended to the portfolio's trade log.
///
/// `fill_price` is the post-slippage execution price. `net_cash_impact` is
/// the signed amount actually posted to cash (negative for a BUY), already
/// rounded to currency precision — the single point where rounding happens.
/// Replaying the trade log through a fresh portfolio therefore reproduces
/// cash exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Trade {
    /// Date of the fill bar (not the decision bar).
    pub date: NaiveDate,
    pub side: OrderSide,
    pub quantity: u64,
    /// Execution price after adverse slippage adjustment.
    pub fill_price: Decimal,
    /// Fixed fee charged for this trade.
    pub fee: Decimal,
    /// Modelled friction cost: |fill_price − base_price| × quantity.
    pub slippage_cost: Decimal,
    /// fill_price × quantity, before costs.
    pub gross_notional: Decimal,
    /// Signed cash delta posted to the portfolio, rounded half-even.
    pub net_cash_impact: Decimal,
}

impl Trade {
    /// Fee plus slippage cost.
    pub fn transaction_cost(&self) -> Decimal {
        self.fee + self.slippage_cost
    }
}
