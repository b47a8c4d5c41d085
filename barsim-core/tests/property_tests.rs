//! Property tests for engine invariants.
//!
//! Uses proptest to verify, over generated price walks and configs:
//! 1. One snapshot per bar after the seed bar, no gaps
//! 2. Cash is never negative and the position is never short
//! 3. The equity accounting identity holds at every snapshot
//! 4. Replaying the trade log reproduces the final snapshot
//! 5. Every applied trade respects the adverse-slippage direction

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;

use barsim_core::domain::{Bar, FillTiming, OrderSide};
use barsim_core::engine::{run, Portfolio, SimulationConfig};
use barsim_core::strategy::SmaCrossover;

fn bars_from_cents(closes_cents: &[i64]) -> Vec<Bar> {
    let base = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    closes_cents
        .iter()
        .enumerate()
        .map(|(i, &cents)| {
            let close = Decimal::new(cents, 2);
            Bar::new(
                base + chrono::Duration::days(i as i64),
                close,
                close,
                close,
                close,
                1_000,
            )
            .unwrap()
        })
        .collect()
}

fn arb_closes() -> impl Strategy<Value = Vec<i64>> {
    prop::collection::vec(100_i64..50_000, 2..60)
}

fn arb_windows() -> impl Strategy<Value = (usize, usize)> {
    (1_usize..5).prop_flat_map(|fast| (Just(fast), fast + 1..12))
}

fn arb_config() -> impl Strategy<Value = SimulationConfig> {
    (
        10_000_i64..10_000_000,
        1_u64..5,
        0_i64..500,
        0_i64..100,
        prop::bool::ANY,
    )
        .prop_map(|(cash_cents, quantity, fee_cents, slippage_bps, on_open)| {
            SimulationConfig {
                initial_cash: Decimal::new(cash_cents, 2),
                order_quantity: quantity,
                fee_per_trade: Decimal::new(fee_cents, 2),
                slippage_bps: Decimal::from(slippage_bps),
                fill_timing: if on_open {
                    FillTiming::NextOpen
                } else {
                    FillTiming::NextClose
                },
            }
        })
}

proptest! {
    #[test]
    fn snapshots_cover_every_bar_after_seed(
        closes in arb_closes(),
        (fast, slow) in arb_windows(),
        config in arb_config(),
    ) {
        let bars = bars_from_cents(&closes);
        let strategy = SmaCrossover::new(fast, slow).unwrap();
        let output = run(&bars, &strategy, &config).unwrap();

        prop_assert_eq!(output.snapshots.len(), bars.len() - 1);
        for (snapshot, bar) in output.snapshots.iter().zip(&bars[1..]) {
            prop_assert_eq!(snapshot.date, bar.date());
        }
    }

    #[test]
    fn cash_and_position_never_negative(
        closes in arb_closes(),
        (fast, slow) in arb_windows(),
        config in arb_config(),
    ) {
        let bars = bars_from_cents(&closes);
        let strategy = SmaCrossover::new(fast, slow).unwrap();
        let output = run(&bars, &strategy, &config).unwrap();

        for snapshot in &output.snapshots {
            // position_quantity is u64, so long-only holds by type; cash is
            // the invariant that needs the overdraw guard.
            prop_assert!(snapshot.cash >= Decimal::ZERO);
        }
    }

    #[test]
    fn equity_identity_holds_at_every_snapshot(
        closes in arb_closes(),
        (fast, slow) in arb_windows(),
        config in arb_config(),
    ) {
        let bars = bars_from_cents(&closes);
        let strategy = SmaCrossover::new(fast, slow).unwrap();
        let output = run(&bars, &strategy, &config).unwrap();

        for (snapshot, bar) in output.snapshots.iter().zip(&bars[1..]) {
            let marked = Decimal::from(snapshot.position_quantity) * bar.close();
            prop_assert_eq!(snapshot.position_value, marked);
            prop_assert_eq!(snapshot.equity, snapshot.cash + marked);
        }
    }

    #[test]
    fn replay_reproduces_final_snapshot(
        closes in arb_closes(),
        (fast, slow) in arb_windows(),
        config in arb_config(),
    ) {
        let bars = bars_from_cents(&closes);
        let strategy = SmaCrossover::new(fast, slow).unwrap();
        let output = run(&bars, &strategy, &config).unwrap();

        let mut replay = Portfolio::new(config.initial_cash);
        for trade in &output.trades {
            replay.apply_trade(trade).unwrap();
        }
        replay.mark_to_market(bars.last().unwrap());

        prop_assert_eq!(
            replay.equity_curve().last().unwrap(),
            output.snapshots.last().unwrap()
        );
    }

    #[test]
    fn trade_records_are_internally_consistent(
        closes in arb_closes(),
        (fast, slow) in arb_windows(),
        config in arb_config(),
    ) {
        let bars = bars_from_cents(&closes);
        let strategy = SmaCrossover::new(fast, slow).unwrap();
        let output = run(&bars, &strategy, &config).unwrap();

        for trade in &output.trades {
            prop_assert!(trade.slippage_cost >= Decimal::ZERO);
            prop_assert_eq!(
                trade.gross_notional,
                trade.fill_price * Decimal::from(trade.quantity)
            );
            // A BUY always pays cash out; a SELL never receives more than
            // its notional (the fee only subtracts).
            match trade.side {
                OrderSide::Buy => prop_assert!(trade.net_cash_impact < Decimal::ZERO),
                OrderSide::Sell => {
                    prop_assert!(trade.net_cash_impact <= trade.gross_notional);
                }
            }
        }
    }
}
