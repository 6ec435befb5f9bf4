//! Deep Value - a value-investing analysis engine.
//!
//! Computes intrinsic-value estimates and business-quality scores for a
//! company from its reported financial statements:
//! - Financial ratios (profitability, liquidity, leverage, cash flow, growth)
//! - Two-stage discounted-cash-flow valuation with sensitivity analysis
//! - Graham Number, Graham growth formula, and the defensive checklist
//! - Five-dimension competitive-moat scoring with a durability assessment
//! - Margin-of-safety bands and a conservative multi-method combiner
//!
//! # Architecture
//!
//! ```text
//!   StatementSeries + Quote
//!             │
//!             ▼
//!       ┌──────────┐
//!       │  Ratios  │
//!       └────┬─────┘
//!            │
//!      ┌─────┴──────┬───────────┐
//!      ▼            ▼           ▼
//!   ┌───────┐  ┌────────┐  ┌──────┐
//!   │  DCF  │  │ Graham │  │ Moat │
//!   └───┬───┘  └───┬────┘  └───┬──┘
//!       └──────────┼───────────┘
//!                  ▼
//!    ┌─────────────────────────────┐
//!    │  Margin-of-safety combiner  │
//!    └─────────────────────────────┘
//!                  │
//!                  ▼
//!         ValuationSnapshot
//! ```
//!
//! Data flows one way; no component calls back into an earlier one. Every
//! operation is a synchronous, deterministic function of its inputs with no
//! I/O and no shared state, so runs for different companies can proceed
//! concurrently without coordination.
//!
//! # Key Concepts
//!
//! ## Margin of safety
//! The discount between market price and estimated intrinsic value,
//! `(value - price) / value`. The combined margin prices against the lesser
//! of the minimum and the mean of all usable estimates, so one optimistic
//! model cannot talk the verdict up.
//!
//! ## Moat
//! A durable competitive advantage protecting returns on capital. Five
//! dimensions are each scored 1 to 5, and the strongest single dimension
//! defines the overall rating.
//!
//! ## Conservative defaults
//! Unknown or invalid inputs degrade toward the pessimistic side:
//! non-positive free cash flow refuses a DCF value, a missing intrinsic
//! value classifies as overvalued, and growth estimates take a haircut
//! before entering any projection.

#![warn(clippy::all)]
#![allow(clippy::pedantic)]

pub mod dcf;
pub mod engine;
pub mod error;
pub mod graham;
pub mod metrics;
pub mod moat;
pub mod ratios;
pub mod report;
pub mod safety;
pub mod statements;

pub use dcf::{calculate_dcf, sensitivity_analysis, DcfConfig, DcfValuation, SensitivityMatrix};
pub use engine::{ValuationEngine, ValuationSnapshot};
pub use error::{Error, Result};
pub use graham::{
    analyze_graham, evaluate_defensive_criteria, graham_growth_value, graham_number,
    DefensiveChecklist, GrahamAnalysis, GrahamConfig,
};
pub use moat::{analyze_moat, MoatAnalysis, MoatRating};
pub use ratios::{calculate_ratios, FinancialRatios};
pub use report::{render_markdown, render_text};
pub use safety::{
    combined_margin_of_safety, margin_of_safety, required_drop, target_buy_price,
    CombinedMarginOfSafety, MarginOfSafety, ValuationEstimate,
};
pub use statements::{
    BalanceSheet, CashFlowStatement, FiscalYearStatements, IncomeStatement, Quote, StatementSeries,
};

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::dcf::{calculate_dcf, DcfConfig, DcfValuation};
    pub use crate::engine::{ValuationEngine, ValuationSnapshot};
    pub use crate::error::{Error, Result};
    pub use crate::graham::{analyze_graham, GrahamAnalysis, GrahamConfig};
    pub use crate::moat::{analyze_moat, MoatAnalysis, MoatRating};
    pub use crate::ratios::{calculate_ratios, FinancialRatios};
    pub use crate::safety::{combined_margin_of_safety, margin_of_safety, CombinedMarginOfSafety};
    pub use crate::statements::{Quote, StatementSeries};
}
