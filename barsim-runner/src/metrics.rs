//! Performance metrics — pure functions over the equity curve and trade log.
//!
//! Accounting figures (total return, per-trade averages) stay in `Decimal`;
//! statistical figures (volatility, Sharpe, drawdown) are `f64`. Every
//! metric is defined for a snapshot sequence of length 0 or 1: degenerate
//! inputs yield zeros or `None`, never a panic or a division by zero.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use barsim_core::domain::{OrderSide, PortfolioSnapshot, Position, Trade};

/// Return periods assumed per calendar year for annualization.
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Aggregate performance and risk metrics for a single run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsReport {
    /// (final equity − initial equity) / initial equity.
    pub total_return: Decimal,
    /// Per-bar returns compounded and scaled to a year.
    pub annualized_return: f64,
    /// Population standard deviation of per-bar returns × √252.
    pub annualized_volatility: f64,
    /// Mean per-bar return / per-bar volatility × √252, zero risk-free rate.
    /// `None` when the curve is too short or variance is zero.
    pub sharpe: Option<f64>,
    /// Largest peak-to-trough decline, as a non-positive fraction.
    pub max_drawdown: f64,
    /// Fraction of closing trades with positive realized P&L.
    pub win_rate: f64,
    /// Number of applied trades (both sides).
    pub trade_count: usize,
    /// Total traded notional / initial cash / years.
    pub turnover: f64,
    /// Mean realized P&L of winning closes; `None` if there were none.
    pub average_win: Option<Decimal>,
    /// Mean realized P&L of losing closes; `None` if there were none.
    pub average_loss: Option<Decimal>,
    /// True when the curve is too short for return statistics.
    pub insufficient_data: bool,
}

impl MetricsReport {
    /// Compute all metrics from a completed run.
    pub fn compute(
        snapshots: &[PortfolioSnapshot],
        trades: &[Trade],
        initial_cash: Decimal,
    ) -> Self {
        let returns = bar_returns(snapshots);
        let insufficient_data = returns.is_empty();

        let volatility_per_bar = population_std(&returns);
        let sharpe = if returns.is_empty() || volatility_per_bar == 0.0 {
            None
        } else {
            Some(mean(&returns) / volatility_per_bar * TRADING_DAYS_PER_YEAR.sqrt())
        };

        let pnls = realized_pnls(trades);
        let (average_win, average_loss) = average_win_loss(&pnls);

        Self {
            total_return: total_return(snapshots),
            annualized_return: annualized_return(snapshots),
            annualized_volatility: volatility_per_bar * TRADING_DAYS_PER_YEAR.sqrt(),
            sharpe,
            max_drawdown: max_drawdown(snapshots),
            win_rate: win_rate(&pnls),
            trade_count: trades.len(),
            turnover: turnover(trades, initial_cash, returns.len()),
            average_win,
            average_loss,
            insufficient_data,
        }
    }
}

// ─── Individual metric functions ────────────────────────────────────

/// Overall growth of the equity curve as a `Decimal` fraction.
///
/// Zero for curves shorter than two snapshots or a non-positive start.
pub fn total_return(snapshots: &[PortfolioSnapshot]) -> Decimal {
    let (Some(first), Some(last)) = (snapshots.first(), snapshots.last()) else {
        return Decimal::ZERO;
    };
    if snapshots.len() < 2 || first.equity <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    (last.equity - first.equity) / first.equity
}

/// Compounded per-bar growth scaled to 252 trading days.
pub fn annualized_return(snapshots: &[PortfolioSnapshot]) -> f64 {
    if snapshots.len() < 2 {
        return 0.0;
    }
    let first = snapshots[0].equity.to_f64().unwrap_or(0.0);
    let last = snapshots[snapshots.len() - 1].equity.to_f64().unwrap_or(0.0);
    if first <= 0.0 || last <= 0.0 {
        return 0.0;
    }
    let periods = (snapshots.len() - 1) as f64;
    (last / first).powf(TRADING_DAYS_PER_YEAR / periods) - 1.0
}

/// Per-bar simple returns: ΔEquity / PriorEquity.
///
/// Empty for curves shorter than two snapshots. A zero prior equity
/// contributes a zero return rather than a division by zero.
pub fn bar_returns(snapshots: &[PortfolioSnapshot]) -> Vec<f64> {
    snapshots
        .windows(2)
        .map(|pair| {
            let prev = pair[0].equity.to_f64().unwrap_or(0.0);
            let curr = pair[1].equity.to_f64().unwrap_or(0.0);
            if prev > 0.0 {
                (curr - prev) / prev
            } else {
                0.0
            }
        })
        .collect()
}

/// Largest peak-to-trough decline as a non-positive fraction, in one pass.
pub fn max_drawdown(snapshots: &[PortfolioSnapshot]) -> f64 {
    let Some(first) = snapshots.first() else {
        return 0.0;
    };
    let mut peak = first.equity;
    let mut worst = Decimal::ZERO;

    for snapshot in snapshots {
        if snapshot.equity > peak {
            peak = snapshot.equity;
        }
        if peak > Decimal::ZERO {
            let drawdown = (snapshot.equity - peak) / peak;
            if drawdown < worst {
                worst = drawdown;
            }
        }
    }
    worst.to_f64().unwrap_or(0.0)
}

/// Fraction of closing trades with positive realized P&L; zero when none.
pub fn win_rate(realized: &[Decimal]) -> f64 {
    if realized.is_empty() {
        return 0.0;
    }
    let wins = realized.iter().filter(|pnl| **pnl > Decimal::ZERO).count();
    wins as f64 / realized.len() as f64
}

/// Mean winning and losing realized P&L; `None` for an empty side.
pub fn average_win_loss(realized: &[Decimal]) -> (Option<Decimal>, Option<Decimal>) {
    let wins: Vec<Decimal> = realized
        .iter()
        .copied()
        .filter(|pnl| *pnl > Decimal::ZERO)
        .collect();
    let losses: Vec<Decimal> = realized
        .iter()
        .copied()
        .filter(|pnl| *pnl < Decimal::ZERO)
        .collect();

    let mean_of = |values: &[Decimal]| {
        if values.is_empty() {
            None
        } else {
            Some(values.iter().sum::<Decimal>() / Decimal::from(values.len() as u64))
        }
    };
    (mean_of(&wins), mean_of(&losses))
}

/// Annual turnover: total traded notional / initial cash / years.
pub fn turnover(trades: &[Trade], initial_cash: Decimal, return_periods: usize) -> f64 {
    if trades.is_empty() || initial_cash <= Decimal::ZERO || return_periods == 0 {
        return 0.0;
    }
    let notional: Decimal = trades.iter().map(|t| t.gross_notional).sum();
    let years = return_periods as f64 / TRADING_DAYS_PER_YEAR;
    let ratio = (notional / initial_cash).to_f64().unwrap_or(0.0);
    ratio / years
}

/// Per-close realized P&L, replayed from the trade log alone.
///
/// Walks the log with a fresh average-cost position, so the result depends
/// on nothing but the trades — the equity curve is not consulted.
pub fn realized_pnls(trades: &[Trade]) -> Vec<Decimal> {
    let mut position = Position::flat();
    let mut pnls = Vec::new();

    for trade in trades {
        match trade.side {
            OrderSide::Buy => position.add(trade.quantity, trade.fill_price),
            OrderSide::Sell => {
                if let Some(realized) = position.reduce(trade.quantity, trade.fill_price) {
                    pnls.push(realized);
                }
            }
        }
    }
    pnls
}

// ─── Helpers ────────────────────────────────────────────────────────

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation (σ, not the sample estimator).
fn population_std(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}
