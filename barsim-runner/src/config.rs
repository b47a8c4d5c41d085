//! Serializable backtest configuration.
//!
//! A `RunConfig` captures everything needed to reproduce a run: the strategy
//! and its parameters, sizing, friction model, and starting cash. Two equal
//! configs produce the same `run_id`, which names the artifact directory.

use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use barsim_core::domain::FillTiming;
use barsim_core::engine::{SimConfigError, SimulationConfig};
use barsim_core::strategy::{RocMomentum, SmaCrossover, Strategy, StrategyError};

/// Unique identifier for a backtest run (content-addressable hash).
pub type RunId = String;

/// Errors from loading or validating a run configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: Box<toml::de::Error>,
    },
    #[error("strategy: {0}")]
    Strategy(#[from] StrategyError),
    #[error("simulation: {0}")]
    Simulation(#[from] SimConfigError),
}

/// Strategy selection (serializable enum).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StrategyConfig {
    /// Fast/slow SMA crossover of closes.
    SmaCrossover { fast_window: usize, slow_window: usize },

    /// Rate-of-change momentum sign crossing.
    RocMomentum { lookback: usize },
}

/// Complete configuration for a single backtest run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Instrument label; carried through to artifacts and reports.
    pub symbol: String,
    pub strategy: StrategyConfig,
    pub initial_cash: Decimal,
    /// Fixed quantity per order.
    pub order_quantity: u64,
    #[serde(default)]
    pub fee_per_trade: Decimal,
    #[serde(default)]
    pub slippage_bps: Decimal,
    #[serde(default = "default_fill_timing")]
    pub fill_timing: FillTiming,
}

fn default_fill_timing() -> FillTiming {
    FillTiming::NextOpen
}

impl RunConfig {
    /// Load a config from a TOML file.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source: Box::new(source),
        })
    }

    /// Deterministic content hash of this configuration.
    ///
    /// Serde struct serialization has a fixed field order, so equal configs
    /// always hash identically regardless of how they were produced.
    pub fn run_id(&self) -> RunId {
        let json = serde_json::to_string(self).expect("RunConfig serialization failed");
        blake3::hash(json.as_bytes()).to_hex().to_string()
    }

    /// Check strategy and simulation parameters without running anything.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.build_strategy()?;
        self.to_simulation_config().validate()?;
        Ok(())
    }

    /// Instantiate the configured strategy.
    pub fn build_strategy(&self) -> Result<Box<dyn Strategy>, ConfigError> {
        Ok(match self.strategy {
            StrategyConfig::SmaCrossover {
                fast_window,
                slow_window,
            } => Box::new(SmaCrossover::new(fast_window, slow_window)?),
            StrategyConfig::RocMomentum { lookback } => Box::new(RocMomentum::new(lookback)?),
        })
    }

    /// The engine-facing subset of this configuration.
    pub fn to_simulation_config(&self) -> SimulationConfig {
        SimulationConfig {
            initial_cash: self.initial_cash,
            order_quantity: self.order_quantity,
            fee_per_trade: self.fee_per_trade,
            slippage_bps: self.slippage_bps,
            fill_timing: self.fill_timing,
        }
    }
}
