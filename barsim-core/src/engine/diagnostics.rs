//! Run-level diagnostics — non-fatal skipped steps surfaced to the caller.
//!
//! Nothing in the engine halts a run except bar exhaustion. Every rejected
//! order and every unfillable end-of-sequence order lands here instead of
//! being swallowed or raised.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

use crate::domain::OrderSide;

/// Why a simulation step produced no trade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RejectReason {
    /// SELL order for more units than the position holds.
    #[error("sell of {requested} units exceeds held position of {held}")]
    InsufficientPosition { requested: u64, held: u64 },

    /// BUY whose net cash impact would drive cash negative.
    #[error("buy requires {required} but only {available} cash is available")]
    InsufficientCash {
        required: Decimal,
        available: Decimal,
    },

    /// Order decided on the final bar; there is no next bar to fill against.
    #[error("order decided on the final bar has no fill bar")]
    UnfillableOrder,
}

/// One skipped step: which decision bar, which direction, and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub decision_index: usize,
    pub decision_date: NaiveDate,
    pub side: OrderSide,
    pub reason: RejectReason,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn reject_reason_serializes_with_kind_tag() {
        let reason = RejectReason::InsufficientCash {
            required: dec!(101),
            available: dec!(100),
        };
        let value = serde_json::to_value(&reason).unwrap();
        assert_eq!(value["kind"], "INSUFFICIENT_CASH");
        assert_eq!(value["required"], "101");
    }

    #[test]
    fn reject_reason_displays_context() {
        let reason = RejectReason::InsufficientPosition {
            requested: 5,
            held: 2,
        };
        assert_eq!(
            reason.to_string(),
            "sell of 5 units exceeds held position of 2"
        );
    }
}
