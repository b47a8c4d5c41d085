//! Simulation engine — the synchronous fold over the bar sequence.
//!
//! For each bar `i` in `1..N`: the strategy reads `bars[0..=i-1]` and
//! decides at bar `i-1`; the order builder sizes at most one order dated at
//! that bar; the execution model fills it against bar `i`; the portfolio
//! applies the trade (or records a rejection) and marks to market at bar
//! `i`'s close. One snapshot per bar after the seed bar, no gaps.

pub mod diagnostics;
pub mod execution;
pub mod order_builder;
pub mod portfolio;

pub use diagnostics::{Diagnostic, RejectReason};
pub use execution::{round_cash, ExecutionModel, CASH_DECIMALS};
pub use order_builder::build_order;
pub use portfolio::Portfolio;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{Bar, FillTiming, OrderSide, PortfolioSnapshot, Signal, Trade};
use crate::strategy::Strategy;

/// Errors from simulation parameter validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimConfigError {
    #[error("initial cash must be > 0")]
    NonPositiveCash,
    #[error("order quantity must be > 0")]
    ZeroQuantity,
    #[error("fee per trade must be >= 0")]
    NegativeFee,
    #[error("slippage must be >= 0 basis points")]
    NegativeSlippage,
}

/// Immutable parameters of one simulation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub initial_cash: Decimal,
    /// Fixed quantity per order; sizing is out of engine scope.
    pub order_quantity: u64,
    pub fee_per_trade: Decimal,
    pub slippage_bps: Decimal,
    pub fill_timing: FillTiming,
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<(), SimConfigError> {
        if self.initial_cash <= Decimal::ZERO {
            return Err(SimConfigError::NonPositiveCash);
        }
        if self.order_quantity == 0 {
            return Err(SimConfigError::ZeroQuantity);
        }
        if self.fee_per_trade < Decimal::ZERO {
            return Err(SimConfigError::NegativeFee);
        }
        if self.slippage_bps < Decimal::ZERO {
            return Err(SimConfigError::NegativeSlippage);
        }
        Ok(())
    }
}

/// Everything a run produces, in timestamp order.
#[derive(Debug, Clone, Serialize)]
pub struct SimulationOutput {
    /// One snapshot per bar after the seed bar.
    pub snapshots: Vec<PortfolioSnapshot>,
    /// Applied trades, ordered by fill date.
    pub trades: Vec<Trade>,
    /// Skipped steps, ordered by decision date.
    pub diagnostics: Vec<Diagnostic>,
}

/// Run the simulation over a validated, chronologically ordered bar slice.
///
/// The bar sequence is assumed pre-validated by the loader (ordering,
/// duplicates, bar geometry); the engine performs no redundant checks.
/// Nothing halts the run except exhaustion of the bars: every rejected or
/// unfillable order becomes a [`Diagnostic`] and the fold continues.
pub fn run(
    bars: &[Bar],
    strategy: &dyn Strategy,
    config: &SimulationConfig,
) -> Result<SimulationOutput, SimConfigError> {
    config.validate()?;

    let execution = ExecutionModel::new(config.fee_per_trade, config.slippage_bps);
    let mut portfolio = Portfolio::new(config.initial_cash);
    let mut diagnostics = Vec::new();

    for i in 1..bars.len() {
        let decision_bar = &bars[i - 1];
        let signal = Signal {
            kind: strategy.signal_at(bars, i - 1),
            bar_index: i - 1,
            date: decision_bar.date(),
        };

        match build_order(&signal, portfolio.position(), config) {
            Ok(Some(order)) => {
                let trade = execution.fill(&order, &bars[i]);
                if let Err(reason) = portfolio.apply_trade(&trade) {
                    diagnostics.push(Diagnostic {
                        decision_index: order.decision_index,
                        decision_date: order.decision_date,
                        side: order.side,
                        reason,
                    });
                }
            }
            Ok(None) => {}
            Err(reason) => diagnostics.push(Diagnostic {
                decision_index: signal.bar_index,
                decision_date: signal.date,
                side: OrderSide::Sell,
                reason,
            }),
        }

        portfolio.mark_to_market(&bars[i]);
    }

    // The final bar still gets a decision, but there is no bar left to fill
    // against; a would-be order is surfaced instead of silently dropped.
    if let Some(last) = bars.len().checked_sub(1) {
        let signal = Signal {
            kind: strategy.signal_at(bars, last),
            bar_index: last,
            date: bars[last].date(),
        };
        match build_order(&signal, portfolio.position(), config) {
            Ok(Some(order)) => diagnostics.push(Diagnostic {
                decision_index: order.decision_index,
                decision_date: order.decision_date,
                side: order.side,
                reason: RejectReason::UnfillableOrder,
            }),
            Ok(None) => {}
            Err(reason) => diagnostics.push(Diagnostic {
                decision_index: signal.bar_index,
                decision_date: signal.date,
                side: OrderSide::Sell,
                reason,
            }),
        }
    }

    let (trades, snapshots) = portfolio.into_records();
    Ok(SimulationOutput {
        snapshots,
        trades,
        diagnostics,
    })
}
