//! # Studio Ledger
//!
//! Cost ledger and budget tracking for the ads studio pipeline: every stage
//! that calls a billable service (copy generation, TTS, lip-synced video,
//! full pipeline runs) records what it spent here.
//!
//! ## Overview
//!
//! - Durable, append-only expense log (`expenses.json`) with running
//!   lifetime and monthly totals
//! - Advisory (never blocking) warning once monthly spend passes the limit
//! - Status snapshot, recent transactions, manual monthly reset, CSV export
//! - Typed studio configuration and per-engine cost estimates
//!
//! ## Features
//!
//! - `colors` (default): Enables terminal color output via owo-colors

/// Command-line argument parsing
pub mod cli;

/// Typed studio configuration (budget, actors, engine pricing)
pub mod config;

/// Display formatting for text and JSON output
pub mod display;

/// Ledger error kinds
pub mod error;

/// Persistent cost ledger
pub mod ledger;

/// Data models for transactions and ledger state
pub mod models;

/// Cost estimates for billable pipeline stages
pub mod pricing;

/// Utility functions for paths, formatting, and atomic writes
pub mod utils;

pub use error::{LedgerError, LedgerResult};
pub use ledger::CostLedger;
