//! Execution model — resolves an order against its fill bar.
//!
//! Slippage is directional and always adverse: buyers pay above the base
//! price, sellers receive below it. The fee is a fixed amount per trade,
//! not per unit. All arithmetic stays in `Decimal`; the only rounding in
//! the whole engine happens here, when the signed cash impact is computed.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::domain::{Bar, FillTiming, Order, OrderSide, Trade};

/// Fractional digits of the cash currency.
pub const CASH_DECIMALS: u32 = 2;

const BPS_DENOMINATOR: u32 = 10_000;

/// Round an amount to currency precision, banker's rounding.
///
/// Applied exactly once per trade, to the net cash impact. Fill prices,
/// notionals, and cost-basis arithmetic keep full precision.
pub fn round_cash(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(CASH_DECIMALS, RoundingStrategy::MidpointNearestEven)
}

/// Converts orders into trades using the configured friction model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecutionModel {
    fee_per_trade: Decimal,
    slippage_bps: Decimal,
}

impl ExecutionModel {
    pub fn new(fee_per_trade: Decimal, slippage_bps: Decimal) -> Self {
        Self {
            fee_per_trade,
            slippage_bps,
        }
    }

    pub fn frictionless() -> Self {
        Self::new(Decimal::ZERO, Decimal::ZERO)
    }

    /// Fill `order` against `fill_bar` — the bar *after* the decision bar.
    ///
    /// The base price is the fill bar's open or close per the order's timing;
    /// slippage shifts it against the trader; the fixed fee is folded into
    /// the net cash impact (subtracted from cash on BUY, from proceeds on
    /// SELL).
    pub fn fill(&self, order: &Order, fill_bar: &Bar) -> Trade {
        let base_price = match order.timing {
            FillTiming::NextOpen => fill_bar.open(),
            FillTiming::NextClose => fill_bar.close(),
        };

        let slip_rate = self.slippage_bps / Decimal::from(BPS_DENOMINATOR);
        let fill_price = match order.side {
            OrderSide::Buy => base_price * (Decimal::ONE + slip_rate),
            OrderSide::Sell => base_price * (Decimal::ONE - slip_rate),
        };

        let quantity = Decimal::from(order.quantity);
        let slippage_cost = (fill_price - base_price).abs() * quantity;
        let gross_notional = fill_price * quantity;

        let net_cash_impact = match order.side {
            OrderSide::Buy => round_cash(-(gross_notional + self.fee_per_trade)),
            OrderSide::Sell => round_cash(gross_notional - self.fee_per_trade),
        };

        Trade {
            date: fill_bar.date(),
            side: order.side,
            quantity: order.quantity,
            fill_price,
            fee: self.fee_per_trade,
            slippage_cost,
            gross_notional,
            net_cash_impact,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn fill_bar() -> Bar {
        Bar::new(
            NaiveDate::from_ymd_opt(2024, 1, 3).unwrap(),
            dec!(100),
            dec!(102),
            dec!(99),
            dec!(101),
            10_000,
        )
        .unwrap()
    }

    fn order(side: OrderSide, quantity: u64, timing: FillTiming) -> Order {
        Order {
            side,
            quantity,
            decision_index: 0,
            decision_date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            timing,
        }
    }

    #[test]
    fn frictionless_buy_fills_at_open() {
        let model = ExecutionModel::frictionless();
        let trade = model.fill(&order(OrderSide::Buy, 10, FillTiming::NextOpen), &fill_bar());
        assert_eq!(trade.fill_price, dec!(100));
        assert_eq!(trade.slippage_cost, Decimal::ZERO);
        assert_eq!(trade.net_cash_impact, dec!(-1000.00));
    }

    #[test]
    fn close_timing_uses_close_price() {
        let model = ExecutionModel::frictionless();
        let trade = model.fill(
            &order(OrderSide::Sell, 5, FillTiming::NextClose),
            &fill_bar(),
        );
        assert_eq!(trade.fill_price, dec!(101));
        assert_eq!(trade.net_cash_impact, dec!(505.00));
    }

    #[test]
    fn buy_slippage_raises_price() {
        // 10 bps on 100 → 100.10
        let model = ExecutionModel::new(Decimal::ZERO, dec!(10));
        let trade = model.fill(&order(OrderSide::Buy, 100, FillTiming::NextOpen), &fill_bar());
        assert_eq!(trade.fill_price, dec!(100.10));
        assert_eq!(trade.slippage_cost, dec!(10.00));
    }

    #[test]
    fn sell_slippage_lowers_price() {
        let model = ExecutionModel::new(Decimal::ZERO, dec!(10));
        let trade = model.fill(&order(OrderSide::Sell, 100, FillTiming::NextOpen), &fill_bar());
        assert_eq!(trade.fill_price, dec!(99.90));
        assert_eq!(trade.slippage_cost, dec!(10.00));
    }

    #[test]
    fn fee_is_per_trade_not_per_unit() {
        let model = ExecutionModel::new(dec!(2.50), Decimal::ZERO);
        let buy = model.fill(&order(OrderSide::Buy, 10, FillTiming::NextOpen), &fill_bar());
        assert_eq!(buy.net_cash_impact, dec!(-1002.50));

        let sell = model.fill(&order(OrderSide::Sell, 10, FillTiming::NextOpen), &fill_bar());
        assert_eq!(sell.net_cash_impact, dec!(997.50));
    }

    #[test]
    fn cash_posting_rounds_half_even() {
        assert_eq!(round_cash(dec!(1.005)), dec!(1.00));
        assert_eq!(round_cash(dec!(1.015)), dec!(1.02));
        assert_eq!(round_cash(dec!(-1.005)), dec!(-1.00));
    }
}
