//! Competitive-moat scoring across five dimensions.
//!
//! Each dimension is scored 1..=5 from reported financials:
//!
//! | Dimension       | Primary signal                | Modifier                      |
//! |-----------------|-------------------------------|-------------------------------|
//! | Brand power     | Gross-margin level            | Margin stability bonus        |
//! | Cost advantage  | Operating-margin level        | Multi-year trend adjustment   |
//! | Network effect  | 5-year revenue CAGR           | Margin-expansion bonus        |
//! | Switching costs | Revenue stability             | Growth-streak + margin bonus  |
//! | Scale economies | Market-cap tier               | Revenue-per-employee bonus    |
//!
//! The overall score is the maximum across dimensions; a single dominant
//! advantage defines the moat. Durability then adjusts that score for ROE
//! and free-cash-flow consistency.

pub mod analyzer;
pub mod types;

pub use analyzer::analyze_moat;
pub use types::{
    DimensionScore, Durability, DurabilityRating, MoatAnalysis, MoatDimension, MoatRating,
};
