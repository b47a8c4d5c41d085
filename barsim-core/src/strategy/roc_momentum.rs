//! Rate-of-change momentum strategy.
//!
//! Tracks the fractional change of close over a fixed lookback. BUY when
//! momentum crosses from at-or-below zero to above zero between consecutive
//! decision bars, SELL on the reverse crossing, HOLD otherwise.

use rust_decimal::Decimal;

use super::{Strategy, StrategyError};
use crate::domain::{Bar, SignalKind};

/// Momentum sign-crossing over `lookback >= 1` bars.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RocMomentum {
    lookback: usize,
}

impl RocMomentum {
    pub fn new(lookback: usize) -> Result<Self, StrategyError> {
        if lookback == 0 {
            return Err(StrategyError::ZeroWindow);
        }
        Ok(Self { lookback })
    }

    pub fn lookback(&self) -> usize {
        self.lookback
    }

    /// close[i] / close[i − lookback] − 1, or `None` during warm-up.
    fn roc(&self, bars: &[Bar], index: usize) -> Option<Decimal> {
        let anchor = index.checked_sub(self.lookback)?;
        Some(bars[index].close() / bars[anchor].close() - Decimal::ONE)
    }
}

impl Strategy for RocMomentum {
    fn signal_at(&self, bars: &[Bar], index: usize) -> SignalKind {
        let Some(roc_now) = self.roc(bars, index) else {
            return SignalKind::Hold;
        };
        // Same warm-up convention as the SMA crossover: the first computable
        // momentum is compared against zero.
        let roc_prev = index
            .checked_sub(1)
            .and_then(|prev| self.roc(bars, prev))
            .unwrap_or(Decimal::ZERO);

        if roc_prev <= Decimal::ZERO && roc_now > Decimal::ZERO {
            SignalKind::Buy
        } else if roc_prev >= Decimal::ZERO && roc_now < Decimal::ZERO {
            SignalKind::Sell
        } else {
            SignalKind::Hold
        }
    }

    fn name(&self) -> &str {
        "roc_momentum"
    }

    fn warmup_bars(&self) -> usize {
        self.lookback + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn bars_from_closes(closes: &[Decimal]) -> Vec<Bar> {
        let base = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        closes
            .iter()
            .enumerate()
            .map(|(i, &close)| {
                Bar::new(
                    base + chrono::Duration::days(i as i64),
                    close,
                    close,
                    close,
                    close,
                    1_000,
                )
                .unwrap()
            })
            .collect()
    }

    #[test]
    fn rejects_zero_lookback() {
        assert_eq!(RocMomentum::new(0), Err(StrategyError::ZeroWindow));
    }

    #[test]
    fn holds_during_warmup() {
        let strategy = RocMomentum::new(2).unwrap();
        let bars = bars_from_closes(&[dec!(10), dec!(11)]);
        assert_eq!(strategy.signal_at(&bars, 1), SignalKind::Hold);
    }

    #[test]
    fn buy_on_momentum_turning_positive() {
        // roc(2) at index 2: 9/10 − 1 < 0; at index 3: 12/11 − 1 > 0.
        let strategy = RocMomentum::new(2).unwrap();
        let bars = bars_from_closes(&[dec!(10), dec!(11), dec!(9), dec!(12)]);
        assert_eq!(strategy.signal_at(&bars, 2), SignalKind::Sell);
        assert_eq!(strategy.signal_at(&bars, 3), SignalKind::Buy);
    }

    #[test]
    fn sustained_momentum_does_not_resignal() {
        let strategy = RocMomentum::new(1).unwrap();
        let bars = bars_from_closes(&[dec!(10), dec!(11), dec!(12), dec!(13)]);
        assert_eq!(strategy.signal_at(&bars, 1), SignalKind::Buy);
        assert_eq!(strategy.signal_at(&bars, 2), SignalKind::Hold);
        assert_eq!(strategy.signal_at(&bars, 3), SignalKind::Hold);
    }
}
