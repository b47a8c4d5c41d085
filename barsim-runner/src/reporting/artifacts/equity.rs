//! Equity curve export (CSV).

use anyhow::{Context, Result};
use std::fs::File;
use std::io::Write;
use std::path::Path;

use barsim_core::domain::PortfolioSnapshot;

pub fn write_equity_csv(path: &Path, equity_curve: &[PortfolioSnapshot]) -> Result<()> {
    let mut file = File::create(path)
        .with_context(|| format!("Failed to create equity CSV {}", path.display()))?;
    writeln!(
        file,
        "date,cash,position_quantity,position_value,equity,realized_pnl"
    )?;
    for snapshot in equity_curve {
        writeln!(
            file,
            "{},{},{},{},{},{}",
            snapshot.date,
            snapshot.cash,
            snapshot.position_quantity,
            snapshot.position_value,
            snapshot.equity,
            snapshot.realized_pnl
        )?;
    }
    Ok(())
}
