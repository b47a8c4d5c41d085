//! Markdown report generator.

use crate::config::StrategyConfig;
use crate::reporting::artifacts::count_by_kind;
use crate::runner::BacktestResult;

use super::SummaryStats;

pub struct MarkdownReportGenerator;

impl MarkdownReportGenerator {
    pub fn generate(&self, result: &BacktestResult) -> String {
        let summary = SummaryStats::from_result(result);
        let sharpe = match summary.sharpe {
            Some(s) => format!("{s:.2}"),
            None => "n/a (insufficient data)".to_string(),
        };

        let mut report = format!(
            "# Backtest Report — {}\n\n\
Run ID: `{}`\n\n\
## Summary\n\
- Total Return: {:+.2}%\n\
- Sharpe: {}\n\
- Max Drawdown: {:+.2}%\n\
- Win Rate: {:.1}%\n\
- Trades: {}\n\
- Skipped steps: {}\n",
            result.symbol,
            result.run_id,
            summary.total_return * 100.0,
            sharpe,
            summary.max_drawdown * 100.0,
            summary.win_rate * 100.0,
            summary.trade_count,
            summary.skipped_steps,
        );

        report.push_str("\n## Config\n");
        match result.config.strategy {
            StrategyConfig::SmaCrossover {
                fast_window,
                slow_window,
            } => {
                report.push_str(&format!(
                    "- Strategy: SMA crossover (fast {fast_window}, slow {slow_window})\n"
                ));
            }
            StrategyConfig::RocMomentum { lookback } => {
                report.push_str(&format!("- Strategy: ROC momentum (lookback {lookback})\n"));
            }
        }
        report.push_str(&format!(
            "- Initial cash: {}\n\
- Order quantity: {}\n\
- Fee per trade: {}\n\
- Slippage: {} bps\n\
- Fill timing: {:?}\n",
            result.config.initial_cash,
            result.config.order_quantity,
            result.config.fee_per_trade,
            result.config.slippage_bps,
            result.config.fill_timing,
        ));

        report.push_str("\n## Metrics\n\n| Metric | Value |\n|---|---|\n");
        report.push_str(&format!(
            "| total_return | {} |\n\
| annualized_return | {:.6} |\n\
| annualized_volatility | {:.6} |\n\
| sharpe | {} |\n\
| max_drawdown | {:.6} |\n\
| win_rate | {:.4} |\n\
| trade_count | {} |\n\
| turnover | {:.4} |\n",
            result.metrics.total_return,
            result.metrics.annualized_return,
            result.metrics.annualized_volatility,
            sharpe,
            result.metrics.max_drawdown,
            result.metrics.win_rate,
            result.metrics.trade_count,
            result.metrics.turnover,
        ));

        if let (Some(first), Some(last)) =
            (result.equity_curve.first(), result.equity_curve.last())
        {
            report.push_str(&format!(
                "\n## Equity\n\
- Start equity: {}\n\
- End equity: {}\n\
- Bars: {}\n",
                first.equity,
                last.equity,
                result.bar_count,
            ));
        }

        if !result.diagnostics.is_empty() {
            report.push_str("\n## Skipped Steps\n\n| Kind | Count |\n|---|---|\n");
            for (kind, count) in count_by_kind(&result.diagnostics) {
                report.push_str(&format!("| {kind} | {count} |\n"));
            }
        }

        report.push_str(
            "\n## Notes\n\
- A position still open on the last bar is marked to market, not\n\
  liquidated: end equity includes its unrealized value.\n\
- Equity curve, trade log, and diagnostics are exported alongside this\n\
  report.\n",
        );

        report
    }
}
