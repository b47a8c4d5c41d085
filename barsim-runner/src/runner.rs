//! Backtest runner — wires together loading, the engine, and metrics.
//!
//! Two entry points:
//! - `run_single_backtest()`: loads bars from CSV, then runs. Used by the CLI.
//! - `run_backtest_from_bars()`: takes pre-loaded bars — no I/O. Used by
//!   parameter sweeps to share one bar sequence across many runs.

use std::path::Path;

use serde::Serialize;
use thiserror::Error;

use barsim_core::domain::{Bar, PortfolioSnapshot, Trade};
use barsim_core::engine::{self, Diagnostic};

use crate::config::{ConfigError, RunConfig, RunId};
use crate::data_loader::{load_bars, LoadError};
use crate::metrics::MetricsReport;

/// Current schema version for persisted artifacts.
pub const SCHEMA_VERSION: u32 = 1;

/// Errors from the runner.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("data error: {0}")]
    Data(#[from] LoadError),
}

/// Complete result of a single backtest run.
///
/// Everything the exporter needs, as opaque serializable records: trade log
/// and equity curve in timestamp order, the metrics report, the diagnostics
/// list, and provenance (config, run id, dataset hash).
#[derive(Debug, Clone, Serialize)]
pub struct BacktestResult {
    /// Schema version for forward-compatible artifact consumers.
    pub schema_version: u32,
    pub run_id: RunId,
    pub symbol: String,
    pub config: RunConfig,
    pub metrics: MetricsReport,
    pub trades: Vec<Trade>,
    pub equity_curve: Vec<PortfolioSnapshot>,
    pub diagnostics: Vec<Diagnostic>,
    pub bar_count: usize,
    /// BLAKE3 over all bar data; identifies the dataset a result came from.
    pub dataset_hash: String,
}

/// Run a single backtest from a CSV file of bars.
pub fn run_single_backtest(config: &RunConfig, data_path: &Path) -> Result<BacktestResult, RunError> {
    let bars = load_bars(data_path)?;
    run_backtest_from_bars(config, &bars)
}

/// Run a backtest over pre-loaded bars — no I/O.
pub fn run_backtest_from_bars(config: &RunConfig, bars: &[Bar]) -> Result<BacktestResult, RunError> {
    let strategy = config.build_strategy()?;
    let sim_config = config.to_simulation_config();
    let output = engine::run(bars, strategy.as_ref(), &sim_config)
        .map_err(|e| RunError::Config(e.into()))?;

    let metrics = MetricsReport::compute(&output.snapshots, &output.trades, config.initial_cash);

    Ok(BacktestResult {
        schema_version: SCHEMA_VERSION,
        run_id: config.run_id(),
        symbol: config.symbol.clone(),
        config: config.clone(),
        metrics,
        trades: output.trades,
        equity_curve: output.snapshots,
        diagnostics: output.diagnostics,
        bar_count: bars.len(),
        dataset_hash: dataset_hash(bars),
    })
}

/// Deterministic BLAKE3 hash over all bar data.
///
/// Decimal values are hashed through their canonical string form, so the
/// hash is stable across platforms and runs.
pub fn dataset_hash(bars: &[Bar]) -> String {
    let mut hasher = blake3::Hasher::new();
    for bar in bars {
        hasher.update(bar.date().to_string().as_bytes());
        hasher.update(bar.open().to_string().as_bytes());
        hasher.update(bar.high().to_string().as_bytes());
        hasher.update(bar.low().to_string().as_bytes());
        hasher.update(bar.close().to_string().as_bytes());
        hasher.update(&bar.volume().to_le_bytes());
    }
    hasher.finalize().to_hex().to_string()
}
