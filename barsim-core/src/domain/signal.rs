//! Signal — a strategy's directional decision for one bar.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Directional decision emitted by a strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SignalKind {
    Buy,
    Sell,
    Hold,
}

/// A signal tagged with the decision bar that produced it.
///
/// Ephemeral: produced and consumed within a single loop iteration, never
/// persisted. The order builder is its only consumer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Signal {
    pub kind: SignalKind,
    /// Index of the decision bar in the input sequence.
    pub bar_index: usize,
    /// Date of the decision bar.
    pub date: NaiveDate,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_serializes_screaming_snake() {
        assert_eq!(serde_json::to_string(&SignalKind::Buy).unwrap(), "\"BUY\"");
        assert_eq!(
            serde_json::to_string(&SignalKind::Hold).unwrap(),
            "\"HOLD\""
        );
    }
}
