//! Financial-ratio snapshot derivation.
//!
//! The ratio calculator is the leaf component of the engine: it reduces the
//! most recent fiscal year of a [`StatementSeries`](crate::statements::StatementSeries)
//! (plus an optional market quote) to an immutable [`FinancialRatios`]
//! snapshot. Every other component consumes that snapshot; nothing feeds
//! back into it.

pub mod calculator;
pub mod types;

pub use calculator::calculate_ratios;
pub use types::FinancialRatios;
