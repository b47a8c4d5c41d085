//! Trade log export (CSV/JSON).

use anyhow::{Context, Result};
use std::fs::File;
use std::io::Write;
use std::path::Path;

use barsim_core::domain::{OrderSide, Trade};

pub fn write_trades_csv(path: &Path, trades: &[Trade]) -> Result<()> {
    let mut file = File::create(path)
        .with_context(|| format!("Failed to create trades CSV {}", path.display()))?;

    writeln!(
        file,
        "date,side,quantity,fill_price,fee,slippage_cost,gross_notional,net_cash_impact"
    )?;

    for trade in trades {
        let side = match trade.side {
            OrderSide::Buy => "BUY",
            OrderSide::Sell => "SELL",
        };
        writeln!(
            file,
            "{},{},{},{},{},{},{},{}",
            trade.date,
            side,
            trade.quantity,
            trade.fill_price,
            trade.fee,
            trade.slippage_cost,
            trade.gross_notional,
            trade.net_cash_impact
        )?;
    }

    Ok(())
}

pub fn write_trades_json(path: &Path, trades: &[Trade]) -> Result<()> {
    let json = serde_json::to_string_pretty(trades).context("Failed to serialize trades")?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write trades JSON {}", path.display()))?;
    Ok(())
}
