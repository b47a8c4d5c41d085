//! Strategy — pluggable, portfolio-agnostic signal generation.
//!
//! Strategies never see portfolio state. They map a read-only prefix of the
//! bar sequence to a directional decision, and nothing else.

pub mod roc_momentum;
pub mod sma_cross;

pub use roc_momentum::RocMomentum;
pub use sma_cross::SmaCrossover;

use thiserror::Error;

use crate::domain::{Bar, SignalKind};

/// Errors from strategy parameter validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StrategyError {
    #[error("window length must be >= 1")]
    ZeroWindow,
    #[error("slow window {slow} must be greater than fast window {fast}")]
    WindowOrder { fast: usize, slow: usize },
}

/// A pure mapping from bar history to a trading signal.
///
/// # Invariants
/// - `signal_at(bars, index)` may read only `bars[0..=index]` — no lookahead.
///   Callers verify this by truncation: the signal at `index` must be the
///   same whether or not bars beyond `index` are present in the slice.
/// - Deterministic: no wall-clock, randomness, or mutable external state.
pub trait Strategy: Send + Sync {
    /// Decide BUY/SELL/HOLD at `index` from the history `bars[0..=index]`.
    ///
    /// `index` must be a valid index into `bars`.
    fn signal_at(&self, bars: &[Bar], index: usize) -> SignalKind;

    /// Strategy name for config round-trips and report labels.
    fn name(&self) -> &str;

    /// Number of bars required before a non-HOLD signal is possible.
    ///
    /// During this warm-up period the strategy always returns HOLD.
    fn warmup_bars(&self) -> usize;
}
