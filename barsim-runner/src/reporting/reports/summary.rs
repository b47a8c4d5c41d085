//! Summary statistics for reports.

use rust_decimal::prelude::ToPrimitive;

use crate::runner::BacktestResult;

#[derive(Debug, Clone)]
pub struct SummaryStats {
    pub total_return: f64,
    pub sharpe: Option<f64>,
    pub max_drawdown: f64,
    pub win_rate: f64,
    pub trade_count: usize,
    pub skipped_steps: usize,
}

impl SummaryStats {
    pub fn from_result(result: &BacktestResult) -> Self {
        Self {
            total_return: result.metrics.total_return.to_f64().unwrap_or(0.0),
            sharpe: result.metrics.sharpe,
            max_drawdown: result.metrics.max_drawdown,
            win_rate: result.metrics.win_rate,
            trade_count: result.metrics.trade_count,
            skipped_steps: result.diagnostics.len(),
        }
    }
}
