//! Batch stock-opportunity scanner.
//!
//! Evaluates a fixed list of tickers against moving-average, RSI and
//! volume rules, computes stop-loss/target levels for the ones that
//! score high enough, and reports the result as a two-sheet workbook
//! attached to a single email.

pub mod config;
pub mod indicators;
pub mod logging;
pub mod models;
pub mod report;
pub mod scanner;
pub mod services;
pub mod signals;
