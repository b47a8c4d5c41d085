//! Diagnostics export (JSON).
//!
//! Serializes the run's skipped steps plus a per-kind tally, so a reader can
//! see at a glance whether a run was starved of cash or kept trying to sell
//! a flat position.

use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::path::Path;

use barsim_core::engine::{Diagnostic, RejectReason};

use crate::runner::BacktestResult;

fn reason_label(reason: &RejectReason) -> &'static str {
    match reason {
        RejectReason::InsufficientPosition { .. } => "INSUFFICIENT_POSITION",
        RejectReason::InsufficientCash { .. } => "INSUFFICIENT_CASH",
        RejectReason::UnfillableOrder => "UNFILLABLE_ORDER",
    }
}

/// Count skipped steps by rejection kind, in stable key order.
pub fn count_by_kind(diagnostics: &[Diagnostic]) -> BTreeMap<&'static str, usize> {
    let mut counts = BTreeMap::new();
    for diagnostic in diagnostics {
        *counts.entry(reason_label(&diagnostic.reason)).or_insert(0) += 1;
    }
    counts
}

pub fn write_diagnostics_json(path: &Path, result: &BacktestResult) -> Result<()> {
    let payload = serde_json::json!({
        "run_id": result.run_id,
        "skipped_steps": result.diagnostics,
        "skipped_count": result.diagnostics.len(),
        "skipped_by_kind": count_by_kind(&result.diagnostics),
        "trade_count": result.trades.len(),
    });

    let json =
        serde_json::to_string_pretty(&payload).context("Failed to serialize diagnostics")?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write diagnostics {}", path.display()))?;
    Ok(())
}
