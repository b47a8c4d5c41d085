//! Run manifest export (JSON).

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;

use crate::metrics::MetricsReport;
use crate::runner::BacktestResult;

/// Compact identity record written alongside the full artifacts.
#[derive(Debug, Clone, Serialize)]
pub struct RunManifest {
    pub schema_version: u32,
    pub run_id: String,
    pub symbol: String,
    /// Export time; the only wall-clock value in any artifact.
    pub generated_at: chrono::DateTime<chrono::Utc>,
    pub bar_count: usize,
    pub dataset_hash: String,
    pub metrics: MetricsReport,
}

pub fn write_manifest(path: &Path, result: &BacktestResult) -> Result<()> {
    let manifest = RunManifest {
        schema_version: result.schema_version,
        run_id: result.run_id.clone(),
        symbol: result.symbol.clone(),
        generated_at: chrono::Utc::now(),
        bar_count: result.bar_count,
        dataset_hash: result.dataset_hash.clone(),
        metrics: result.metrics.clone(),
    };

    let json = serde_json::to_string_pretty(&manifest).context("Failed to serialize manifest")?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write manifest to {}", path.display()))?;
    Ok(())
}
