//! Order builder — turns a non-HOLD signal into at most one order intent.
//!
//! Position sizing is an injected constant: every order is for the
//! configured fixed quantity. A BUY is always buildable (long-only
//! accumulation cannot go negative); a SELL is only buildable when the
//! position covers the full order quantity.

use super::diagnostics::RejectReason;
use super::SimulationConfig;
use crate::domain::{Order, OrderSide, Position, Signal, SignalKind};

/// Build the order implied by `signal`, dated at the decision bar.
///
/// HOLD builds nothing. An oversell builds nothing and reports
/// [`RejectReason::InsufficientPosition`] — the caller records it and the
/// simulation continues.
pub fn build_order(
    signal: &Signal,
    position: &Position,
    config: &SimulationConfig,
) -> Result<Option<Order>, RejectReason> {
    let side = match signal.kind {
        SignalKind::Hold => return Ok(None),
        SignalKind::Buy => OrderSide::Buy,
        SignalKind::Sell => OrderSide::Sell,
    };

    if side == OrderSide::Sell && position.quantity() < config.order_quantity {
        return Err(RejectReason::InsufficientPosition {
            requested: config.order_quantity,
            held: position.quantity(),
        });
    }

    Ok(Some(Order {
        side,
        quantity: config.order_quantity,
        decision_index: signal.bar_index,
        decision_date: signal.date,
        timing: config.fill_timing,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FillTiming;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn config() -> SimulationConfig {
        SimulationConfig {
            initial_cash: dec!(10_000),
            order_quantity: 3,
            fee_per_trade: dec!(0),
            slippage_bps: dec!(0),
            fill_timing: FillTiming::NextOpen,
        }
    }

    fn signal(kind: SignalKind) -> Signal {
        Signal {
            kind,
            bar_index: 7,
            date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
        }
    }

    #[test]
    fn hold_builds_nothing() {
        let order = build_order(&signal(SignalKind::Hold), &Position::flat(), &config()).unwrap();
        assert!(order.is_none());
    }

    #[test]
    fn buy_is_dated_at_decision_bar() {
        let order = build_order(&signal(SignalKind::Buy), &Position::flat(), &config())
            .unwrap()
            .unwrap();
        assert_eq!(order.side, OrderSide::Buy);
        assert_eq!(order.quantity, 3);
        assert_eq!(order.decision_index, 7);
        assert_eq!(
            order.decision_date,
            NaiveDate::from_ymd_opt(2024, 1, 10).unwrap()
        );
    }

    #[test]
    fn sell_requires_covering_position() {
        let mut position = Position::flat();
        position.add(2, dec!(100));
        let err = build_order(&signal(SignalKind::Sell), &position, &config()).unwrap_err();
        assert_eq!(
            err,
            RejectReason::InsufficientPosition {
                requested: 3,
                held: 2
            }
        );
    }

    #[test]
    fn covered_sell_builds() {
        let mut position = Position::flat();
        position.add(5, dec!(100));
        let order = build_order(&signal(SignalKind::Sell), &position, &config())
            .unwrap()
            .unwrap();
        assert_eq!(order.side, OrderSide::Sell);
        assert_eq!(order.quantity, 3);
    }
}
