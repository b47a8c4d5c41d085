//! barsim core — deterministic daily-bar trading simulation engine.
//!
//! This crate contains the pure simulation pipeline:
//! - Domain types (bars, signals, orders, trades, positions, snapshots)
//! - Strategy trait with SMA-crossover and ROC-momentum implementations
//! - Order builder (fixed-quantity sizing, long-only guard)
//! - Execution model (next-bar fills, adverse bps slippage, fixed fee)
//! - Portfolio state machine (trade application, mark-to-market)
//! - Run-level diagnostics for every skipped step
//!
//! All price and cash arithmetic uses `rust_decimal::Decimal`; identical
//! inputs always produce identical trade logs, equity curves, and
//! diagnostics. Metrics and I/O live in `barsim-runner`.

pub mod domain;
pub mod engine;
pub mod strategy;
