//! Types for margin-of-safety classification.

use serde::{Deserialize, Serialize};

// ============================================================================
// Band enums
// ============================================================================

/// Quality of the discount between price and intrinsic value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SafetyRating {
    /// Margin >= 50%.
    Excellent,
    /// Margin >= 35%.
    Good,
    /// Margin >= 25%.
    Acceptable,
    /// Margin >= 0%.
    Fair,
    /// Margin >= -25%.
    ModeratelyOvervalued,
    /// Margin below -25%, or intrinsic value not establishable.
    SignificantlyOvervalued,
}

impl std::fmt::Display for SafetyRating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SafetyRating::Excellent => "Excellent",
            SafetyRating::Good => "Good",
            SafetyRating::Acceptable => "Acceptable",
            SafetyRating::Fair => "Fair",
            SafetyRating::ModeratelyOvervalued => "Moderately overvalued",
            SafetyRating::SignificantlyOvervalued => "Significantly overvalued",
        };
        write!(f, "{}", name)
    }
}

/// Which side of intrinsic value the market price sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValuationStatus {
    Undervalued,
    FairlyValued,
    Overvalued,
}

impl std::fmt::Display for ValuationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ValuationStatus::Undervalued => "Undervalued",
            ValuationStatus::FairlyValued => "Fairly valued",
            ValuationStatus::Overvalued => "Overvalued",
        };
        write!(f, "{}", name)
    }
}

/// Downside risk implied by the margin band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        };
        write!(f, "{}", name)
    }
}

// ============================================================================
// Results
// ============================================================================

/// Margin of safety for a single intrinsic-value estimate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarginOfSafety {
    /// Intrinsic value per share the margin was computed against.
    pub intrinsic_value: f64,
    /// Market price per share.
    pub price: f64,
    /// `(intrinsic_value - price) / intrinsic_value`; 0.0 when either
    /// input was non-positive.
    pub margin: f64,
    pub rating: SafetyRating,
    pub status: ValuationStatus,
    pub risk: RiskLevel,
    /// Fixed action text for the band the margin landed in.
    pub recommendation: String,
}

/// One named intrinsic-value estimate feeding the combiner.
///
/// `value` is `None` when the method could not produce an estimate for
/// this company (for example the growth formula on declining earnings).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValuationEstimate {
    pub method: String,
    pub value: Option<f64>,
}

impl ValuationEstimate {
    pub fn new(method: impl Into<String>, value: Option<f64>) -> Self {
        Self {
            method: method.into(),
            value,
        }
    }
}

/// Margin of safety against several estimates combined conservatively.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombinedMarginOfSafety {
    /// Methods whose estimates survived the validity filter.
    pub methods_used: Vec<String>,
    /// Methods discarded for producing no estimate or a non-positive one.
    pub methods_discarded: Vec<String>,
    /// Smallest surviving estimate, if any survived.
    pub minimum: Option<f64>,
    /// Arithmetic mean of surviving estimates, if any survived.
    pub mean: Option<f64>,
    /// The lesser of `minimum` and `mean`; what the margin is computed
    /// against.
    pub effective_intrinsic_value: Option<f64>,
    /// Margin against the effective value; -1.0 when nothing survived.
    pub margin: f64,
    pub rating: SafetyRating,
    pub status: ValuationStatus,
    pub risk: RiskLevel,
    pub recommendation: String,
}

/// How far a price must fall to reach a target entry price.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequiredDrop {
    pub price: f64,
    pub target_price: f64,
    /// `(price - target_price) / price`; negative when the price is
    /// already below target.
    pub percent_drop: f64,
    /// Whether the current price already meets the target.
    pub is_already_adequate: bool,
}
