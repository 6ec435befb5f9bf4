//! Margin-of-safety bands and the conservative multi-method combiner.
//!
//! A margin of safety is the discount between price and intrinsic value,
//! `(value - price) / value`, classified into fixed bands from excellent
//! (>= 50%) down to significantly overvalued (< -25%). When several
//! valuation methods disagree, [`combined_margin_of_safety`] measures the
//! price against the lesser of their minimum and their mean, so no single
//! optimistic model can talk the verdict up.

pub mod combiner;
pub mod types;

pub use combiner::{
    combined_margin_of_safety, margin_of_safety, required_drop, target_buy_price,
};
pub use types::{
    CombinedMarginOfSafety, MarginOfSafety, RequiredDrop, RiskLevel, SafetyRating,
    ValuationEstimate, ValuationStatus,
};
