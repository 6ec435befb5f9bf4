//! Graham-style conservative valuation and the defensive investor checklist.
//!
//! Two classic price anchors plus a seven-point screen:
//!
//! - **Graham Number**: `sqrt(22.5 * EPS * BVPS)`, the highest price at
//!   which P/E x P/B stays under 22.5.
//! - **Growth formula**: `EPS * (8.5 + 2g) * 4.4 / Y`, the revised
//!   intrinsic-value estimate adjusted for current bond yields.
//! - **Defensive criteria**: size, financial strength, earnings stability,
//!   dividend record, earnings growth, and two price moderation tests.
//!
//! Both anchors degrade to sentinels (`0.0` / `None`) for unprofitable
//! companies rather than erroring; the checklist marks untestable
//! criteria as failed with an explanatory detail.

pub mod analyzer;
pub mod types;

pub use analyzer::{
    analyze_graham, evaluate_defensive_criteria, graham_growth_value, graham_number,
};
pub use types::{
    CriterionResult, DefensiveChecklist, DefensiveCriterion, GrahamAnalysis, GrahamConfig,
};
