//! barsim CLI — run backtests and parameter sweeps from CSV bar data.
//!
//! Commands:
//! - `run` — execute one backtest from a TOML config file or inline flags
//!   and export artifacts (equity curve, trades, diagnostics, manifest)
//! - `sweep` — grid-search SMA crossover windows over the same dataset and
//!   print a leaderboard

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use std::path::PathBuf;

use barsim_core::domain::FillTiming;
use barsim_runner::{
    export_run_with_report, load_bars, run_backtest_from_bars, sweep, BacktestResult, ParamGrid,
    RunConfig, StrategyConfig,
};

#[derive(Parser)]
#[command(name = "barsim", about = "barsim — daily-bar backtesting engine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Execute a backtest and export run artifacts.
    Run {
        /// CSV file with columns date,open,high,low,close,volume.
        #[arg(long)]
        data: PathBuf,

        /// Path to a TOML config file; overrides the inline strategy flags.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Instrument label for reports.
        #[arg(long, default_value = "AAPL")]
        symbol: String,

        /// Initial cash.
        #[arg(long, default_value = "10000")]
        cash: Decimal,

        /// Fixed quantity per order.
        #[arg(long, default_value_t = 1)]
        quantity: u64,

        /// Fixed fee per trade.
        #[arg(long, default_value = "0")]
        fee: Decimal,

        /// Slippage in basis points.
        #[arg(long, default_value = "0")]
        slippage_bps: Decimal,

        /// Fill orders on the next bar's open or close.
        #[arg(long, default_value = "open", value_parser = ["open", "close"])]
        fill_on: String,

        /// SMA crossover fast window.
        #[arg(long, default_value_t = 5)]
        fast_window: usize,

        /// SMA crossover slow window.
        #[arg(long, default_value_t = 10)]
        slow_window: usize,

        /// Output directory for run artifacts.
        #[arg(long, default_value = "output")]
        output_dir: PathBuf,

        /// Also write a markdown report next to the artifacts.
        #[arg(long, default_value_t = false)]
        report: bool,
    },
    /// Grid-search SMA windows over one dataset and print a leaderboard.
    Sweep {
        /// CSV file with columns date,open,high,low,close,volume.
        #[arg(long)]
        data: PathBuf,

        /// Fast windows to test.
        #[arg(long, value_delimiter = ',', default_values_t = [5usize, 10, 20])]
        fast: Vec<usize>,

        /// Slow windows to test.
        #[arg(long, value_delimiter = ',', default_values_t = [50usize, 100, 200])]
        slow: Vec<usize>,

        /// Instrument label for reports.
        #[arg(long, default_value = "AAPL")]
        symbol: String,

        /// Initial cash.
        #[arg(long, default_value = "10000")]
        cash: Decimal,

        /// Fixed quantity per order.
        #[arg(long, default_value_t = 1)]
        quantity: u64,

        /// Fixed fee per trade.
        #[arg(long, default_value = "0")]
        fee: Decimal,

        /// Slippage in basis points.
        #[arg(long, default_value = "0")]
        slippage_bps: Decimal,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            data,
            config,
            symbol,
            cash,
            quantity,
            fee,
            slippage_bps,
            fill_on,
            fast_window,
            slow_window,
            output_dir,
            report,
        } => {
            let run_config = match config {
                Some(path) => RunConfig::from_toml_file(&path)
                    .with_context(|| format!("loading config {}", path.display()))?,
                None => RunConfig {
                    symbol,
                    strategy: StrategyConfig::SmaCrossover {
                        fast_window,
                        slow_window,
                    },
                    initial_cash: cash,
                    order_quantity: quantity,
                    fee_per_trade: fee,
                    slippage_bps,
                    fill_timing: parse_fill_timing(&fill_on),
                },
            };
            run_cmd(&run_config, &data, &output_dir, report)
        }
        Commands::Sweep {
            data,
            fast,
            slow,
            symbol,
            cash,
            quantity,
            fee,
            slippage_bps,
        } => {
            let base = RunConfig {
                symbol,
                strategy: StrategyConfig::SmaCrossover {
                    fast_window: 5,
                    slow_window: 10,
                },
                initial_cash: cash,
                order_quantity: quantity,
                fee_per_trade: fee,
                slippage_bps,
                fill_timing: FillTiming::NextOpen,
            };
            sweep_cmd(&data, fast, slow, &base)
        }
    }
}

fn parse_fill_timing(raw: &str) -> FillTiming {
    // clap restricts the value to "open" | "close"
    if raw == "close" {
        FillTiming::NextClose
    } else {
        FillTiming::NextOpen
    }
}

fn run_cmd(config: &RunConfig, data: &PathBuf, output_dir: &PathBuf, report: bool) -> Result<()> {
    config.validate().context("invalid run configuration")?;

    let bars = load_bars(data).with_context(|| format!("loading bars from {}", data.display()))?;
    println!("Loaded {} bars from {}", bars.len(), data.display());

    let result = run_backtest_from_bars(config, &bars)?;
    print_summary(&result);

    let paths = export_run_with_report(output_dir, &result, report)?;
    let run_dir = paths
        .manifest
        .parent()
        .unwrap_or_else(|| std::path::Path::new("."));
    println!("\nArtifacts written to {}", run_dir.display());
    if let Some(report_path) = &paths.report_markdown {
        println!("Report: {}", report_path.display());
    }
    Ok(())
}

fn sweep_cmd(data: &PathBuf, fast: Vec<usize>, slow: Vec<usize>, base: &RunConfig) -> Result<()> {
    let grid = ParamGrid {
        fast_windows: fast,
        slow_windows: slow,
    };
    if grid.size() == 0 {
        bail!("sweep grid is empty: every fast window must be smaller than some slow window");
    }

    let bars = load_bars(data).with_context(|| format!("loading bars from {}", data.display()))?;
    println!(
        "Sweeping {} configurations over {} bars...",
        grid.size(),
        bars.len()
    );

    let results = sweep(&grid, base, &bars)?;

    println!("\n{:<6} {:<6} {:>8} {:>12} {:>8} {:>8}", "fast", "slow", "sharpe", "return", "trades", "skips");
    for result in results.ranked_by_sharpe() {
        let StrategyConfig::SmaCrossover {
            fast_window,
            slow_window,
        } = result.config.strategy
        else {
            continue;
        };
        let sharpe = result
            .metrics
            .sharpe
            .map(|s| format!("{s:.3}"))
            .unwrap_or_else(|| "n/a".into());
        println!(
            "{:<6} {:<6} {:>8} {:>11}% {:>8} {:>8}",
            fast_window,
            slow_window,
            sharpe,
            format!("{:.3}", result.metrics.total_return * Decimal::ONE_HUNDRED),
            result.metrics.trade_count,
            result.diagnostics.len(),
        );
    }
    Ok(())
}

fn print_summary(result: &BacktestResult) {
    println!("\nRun {}", result.run_id);
    println!("  Symbol:        {}", result.symbol);
    println!("  Trades:        {}", result.metrics.trade_count);
    println!("  Total return:  {}", result.metrics.total_return);
    match result.metrics.sharpe {
        Some(sharpe) => println!("  Sharpe:        {sharpe:.3}"),
        None => println!("  Sharpe:        n/a (insufficient data)"),
    }
    println!("  Max drawdown:  {:.4}", result.metrics.max_drawdown);
    println!("  Win rate:      {:.2}", result.metrics.win_rate);
    if !result.diagnostics.is_empty() {
        println!("  Skipped steps: {}", result.diagnostics.len());
        for diagnostic in &result.diagnostics {
            println!(
                "    bar {} ({}): {}",
                diagnostic.decision_index, diagnostic.decision_date, diagnostic.reason
            );
        }
    }
}
