//! Simple moving-average crossover strategy.
//!
//! BUY when the fast SMA of closes crosses from at-or-below the slow SMA to
//! above it between consecutive decision bars; SELL on the reverse crossing;
//! HOLD otherwise. A single crossing event fires once — staying above or
//! below the slow average does not re-signal.

use rust_decimal::Decimal;

use super::{Strategy, StrategyError};
use crate::domain::{Bar, SignalKind};

/// Fast/slow SMA crossover with `slow > fast >= 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SmaCrossover {
    fast: usize,
    slow: usize,
}

impl SmaCrossover {
    pub fn new(fast: usize, slow: usize) -> Result<Self, StrategyError> {
        if fast == 0 || slow == 0 {
            return Err(StrategyError::ZeroWindow);
        }
        if slow <= fast {
            return Err(StrategyError::WindowOrder { fast, slow });
        }
        Ok(Self { fast, slow })
    }

    pub fn fast(&self) -> usize {
        self.fast
    }

    pub fn slow(&self) -> usize {
        self.slow
    }

    /// Simple mean of the last `window` closes, or `None` during warm-up.
    fn sma(bars: &[Bar], window: usize) -> Option<Decimal> {
        if bars.len() < window {
            return None;
        }
        let sum: Decimal = bars[bars.len() - window..].iter().map(|b| b.close()).sum();
        Some(sum / Decimal::from(window as u64))
    }

    /// fast SMA − slow SMA over the given history, or `None` while the slow
    /// window is not yet full.
    fn ma_gap(&self, bars: &[Bar]) -> Option<Decimal> {
        Some(Self::sma(bars, self.fast)? - Self::sma(bars, self.slow)?)
    }
}

impl Strategy for SmaCrossover {
    fn signal_at(&self, bars: &[Bar], index: usize) -> SignalKind {
        let history = &bars[..=index];
        let Some(gap_now) = self.ma_gap(history) else {
            return SignalKind::Hold;
        };
        // At the first bar where both windows are full there is no comparable
        // prior gap; it is taken as zero, so a series that leaves warm-up
        // already above (below) its slow average fires one initial BUY (SELL).
        let gap_prev = self
            .ma_gap(&history[..history.len() - 1])
            .unwrap_or(Decimal::ZERO);

        if gap_prev <= Decimal::ZERO && gap_now > Decimal::ZERO {
            SignalKind::Buy
        } else if gap_prev >= Decimal::ZERO && gap_now < Decimal::ZERO {
            SignalKind::Sell
        } else {
            SignalKind::Hold
        }
    }

    fn name(&self) -> &str {
        "sma_crossover"
    }

    fn warmup_bars(&self) -> usize {
        self.slow
    }
}
