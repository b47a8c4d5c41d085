//! Parameter sweep — grid search over strategy windows.
//!
//! Each configuration is an independent run with its own portfolio and its
//! own view of the shared bar slice, so runs execute in parallel on rayon
//! workers with no shared mutable state.

use rayon::prelude::*;

use barsim_core::domain::Bar;

use crate::config::{RunConfig, StrategyConfig};
use crate::runner::{run_backtest_from_bars, BacktestResult, RunError};

/// Grid of SMA crossover windows to test.
#[derive(Debug, Clone)]
pub struct ParamGrid {
    pub fast_windows: Vec<usize>,
    pub slow_windows: Vec<usize>,
}

impl ParamGrid {
    /// Default grid: fast 5/10/20 against slow 50/100/200.
    pub fn sma_default() -> Self {
        Self {
            fast_windows: vec![5, 10, 20],
            slow_windows: vec![50, 100, 200],
        }
    }

    /// Number of valid (fast < slow) combinations.
    pub fn size(&self) -> usize {
        self.fast_windows
            .iter()
            .map(|fast| self.slow_windows.iter().filter(|slow| fast < slow).count())
            .sum()
    }

    /// All valid configurations derived from `base`; invalid pairs skipped.
    pub fn generate_configs(&self, base: &RunConfig) -> Vec<RunConfig> {
        let mut configs = Vec::with_capacity(self.size());
        for &fast in &self.fast_windows {
            for &slow in &self.slow_windows {
                if fast >= slow {
                    continue;
                }
                let mut config = base.clone();
                config.strategy = StrategyConfig::SmaCrossover {
                    fast_window: fast,
                    slow_window: slow,
                };
                configs.push(config);
            }
        }
        configs
    }
}

/// Results of a sweep, in grid order.
#[derive(Debug)]
pub struct SweepResults {
    pub results: Vec<BacktestResult>,
}

impl SweepResults {
    /// Results ranked by Sharpe, best first; undefined Sharpe ranks last.
    ///
    /// Ties break on run id so the ranking is deterministic.
    pub fn ranked_by_sharpe(&self) -> Vec<&BacktestResult> {
        let mut ranked: Vec<&BacktestResult> = self.results.iter().collect();
        ranked.sort_by(|a, b| {
            let sa = a.metrics.sharpe.unwrap_or(f64::NEG_INFINITY);
            let sb = b.metrics.sharpe.unwrap_or(f64::NEG_INFINITY);
            sb.partial_cmp(&sa)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.run_id.cmp(&b.run_id))
        });
        ranked
    }

    pub fn best(&self) -> Option<&BacktestResult> {
        self.ranked_by_sharpe().into_iter().next()
    }
}

/// Run every configuration in the grid against the same bars, in parallel.
pub fn sweep(grid: &ParamGrid, base: &RunConfig, bars: &[Bar]) -> Result<SweepResults, RunError> {
    let configs = grid.generate_configs(base);
    let results: Vec<BacktestResult> = configs
        .par_iter()
        .map(|config| run_backtest_from_bars(config, bars))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(SweepResults { results })
}
