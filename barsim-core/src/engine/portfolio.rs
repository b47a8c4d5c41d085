//! Portfolio — the single evolving state of cash + position.
//!
//! Owns the append-only trade log and the equity curve. The accounting
//! identity `equity == cash + quantity × close` must hold at every
//! snapshot; cash and position quantity never go negative.

use rust_decimal::Decimal;

use super::diagnostics::RejectReason;
use crate::domain::{Bar, OrderSide, PortfolioSnapshot, Position, Trade};

/// Cash + position state machine, advanced one trade or one bar at a time.
#[derive(Debug, Clone)]
pub struct Portfolio {
    cash: Decimal,
    initial_cash: Decimal,
    position: Position,
    realized_pnl: Decimal,
    trades: Vec<Trade>,
    equity_curve: Vec<PortfolioSnapshot>,
}

impl Portfolio {
    pub fn new(initial_cash: Decimal) -> Self {
        Self {
            cash: initial_cash,
            initial_cash,
            position: Position::flat(),
            realized_pnl: Decimal::ZERO,
            trades: Vec::new(),
            equity_curve: Vec::new(),
        }
    }

    pub fn cash(&self) -> Decimal {
        self.cash
    }

    pub fn initial_cash(&self) -> Decimal {
        self.initial_cash
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn realized_pnl(&self) -> Decimal {
        self.realized_pnl
    }

    pub fn trades(&self) -> &[Trade] {
        &self.trades
    }

    pub fn equity_curve(&self) -> &[PortfolioSnapshot] {
        &self.equity_curve
    }

    /// Apply a filled trade to cash and position.
    ///
    /// On rejection (a BUY that would overdraw cash, or a SELL exceeding the
    /// held quantity) the portfolio is left byte-identical to its prior
    /// state — the step simply becomes a gap in the trade log.
    pub fn apply_trade(&mut self, trade: &Trade) -> Result<(), RejectReason> {
        match trade.side {
            OrderSide::Buy => {
                let cash_after = self.cash + trade.net_cash_impact;
                if cash_after < Decimal::ZERO {
                    return Err(RejectReason::InsufficientCash {
                        required: -trade.net_cash_impact,
                        available: self.cash,
                    });
                }
                self.cash = cash_after;
                self.position.add(trade.quantity, trade.fill_price);
            }
            OrderSide::Sell => {
                // A fixed fee larger than the sale proceeds would overdraw
                // cash, so the floor applies to sells as well.
                let cash_after = self.cash + trade.net_cash_impact;
                if cash_after < Decimal::ZERO {
                    return Err(RejectReason::InsufficientCash {
                        required: -trade.net_cash_impact,
                        available: self.cash,
                    });
                }
                let realized = self
                    .position
                    .reduce(trade.quantity, trade.fill_price)
                    .ok_or(RejectReason::InsufficientPosition {
                        requested: trade.quantity,
                        held: self.position.quantity(),
                    })?;
                self.cash = cash_after;
                self.realized_pnl += realized;
            }
        }
        self.trades.push(trade.clone());
        Ok(())
    }

    /// Value the portfolio at a bar close and append the snapshot.
    ///
    /// Purely derived: mutates neither cash nor position. Called once per
    /// bar, every bar after the seed bar, so the equity curve has no gaps.
    pub fn mark_to_market(&mut self, bar: &Bar) {
        let position_value = self.position.market_value(bar.close());
        self.equity_curve.push(PortfolioSnapshot {
            date: bar.date(),
            cash: self.cash,
            position_quantity: self.position.quantity(),
            position_value,
            equity: self.cash + position_value,
            realized_pnl: self.realized_pnl,
        });
    }

    /// Consume the portfolio, yielding the trade log and equity curve.
    pub fn into_records(self) -> (Vec<Trade>, Vec<PortfolioSnapshot>) {
        (self.trades, self.equity_curve)
    }
}
