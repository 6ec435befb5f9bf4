//! Types for competitive-moat scoring.

use serde::{Deserialize, Serialize};

// ============================================================================
// Dimensions
// ============================================================================

/// The five sources of durable competitive advantage that get scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoatDimension {
    /// Pricing power evidenced by high, stable gross margins.
    BrandPower,
    /// Structural cost edge evidenced by operating-margin level and trend.
    CostAdvantage,
    /// Value per user growing with the user base, proxied by revenue
    /// growth with expanding margins.
    NetworkEffect,
    /// Customer lock-in, proxied by highly stable and non-declining revenue.
    SwitchingCosts,
    /// Size advantages, proxied by market cap and revenue per employee.
    ScaleEconomies,
}

impl MoatDimension {
    /// All dimensions in scoring order.
    pub const ALL: [MoatDimension; 5] = [
        MoatDimension::BrandPower,
        MoatDimension::CostAdvantage,
        MoatDimension::NetworkEffect,
        MoatDimension::SwitchingCosts,
        MoatDimension::ScaleEconomies,
    ];
}

impl std::fmt::Display for MoatDimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            MoatDimension::BrandPower => "Brand power",
            MoatDimension::CostAdvantage => "Cost advantage",
            MoatDimension::NetworkEffect => "Network effect",
            MoatDimension::SwitchingCosts => "Switching costs",
            MoatDimension::ScaleEconomies => "Scale economies",
        };
        write!(f, "{}", name)
    }
}

/// One dimension's score in [1,5] with the evidence behind it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DimensionScore {
    pub dimension: MoatDimension,
    /// Clamped to [1.0, 5.0].
    pub score: f64,
    /// Human-readable observations that contributed to the score.
    pub evidence: Vec<String>,
    /// Raw metric values the evidence was derived from, as (name, value).
    pub metrics: Vec<(String, f64)>,
}

// ============================================================================
// Ratings
// ============================================================================

/// Overall moat width, derived from the strongest single dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoatRating {
    /// Overall score >= 4.0.
    Wide,
    /// Overall score >= 2.5.
    Narrow,
    /// No meaningful advantage detected.
    None,
}

impl std::fmt::Display for MoatRating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            MoatRating::Wide => "Wide",
            MoatRating::Narrow => "Narrow",
            MoatRating::None => "None",
        };
        write!(f, "{}", name)
    }
}

/// How likely the moat is to persist, from ROE and FCF consistency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DurabilityRating {
    /// Durability score < 2.5.
    Weak,
    /// Durability score in [2.5, 4.0).
    Moderate,
    /// Durability score >= 4.0.
    Strong,
}

impl std::fmt::Display for DurabilityRating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            DurabilityRating::Weak => "Weak",
            DurabilityRating::Moderate => "Moderate",
            DurabilityRating::Strong => "Strong",
        };
        write!(f, "{}", name)
    }
}

/// Durability assessment: the overall moat score adjusted for consistency
/// of returns and cash generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Durability {
    /// Clamped to [1.0, 5.0].
    pub score: f64,
    pub rating: DurabilityRating,
    /// Descriptions of each adjustment applied to the base score.
    pub adjustments: Vec<String>,
}

// ============================================================================
// Aggregate result
// ============================================================================

/// Full moat assessment: five dimension scores, the overall verdict, and
/// a durability estimate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoatAnalysis {
    /// Always five entries, in [`MoatDimension::ALL`] order.
    pub dimensions: Vec<DimensionScore>,
    /// Maximum of the five dimension scores. The strongest single
    /// advantage defines the moat; a weak average does not dilute it.
    pub overall_score: f64,
    pub rating: MoatRating,
    pub durability: Durability,
}

impl MoatAnalysis {
    /// Score for a single dimension, if present.
    pub fn dimension_score(&self, dimension: MoatDimension) -> Option<&DimensionScore> {
        self.dimensions.iter().find(|d| d.dimension == dimension)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimension_display_names() {
        assert_eq!(MoatDimension::BrandPower.to_string(), "Brand power");
        assert_eq!(MoatDimension::ScaleEconomies.to_string(), "Scale economies");
        assert_eq!(MoatRating::Wide.to_string(), "Wide");
        assert_eq!(DurabilityRating::Moderate.to_string(), "Moderate");
    }

    #[test]
    fn test_all_dimensions_are_distinct() {
        for (i, a) in MoatDimension::ALL.iter().enumerate() {
            for b in MoatDimension::ALL.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_dimension_score_lookup() {
        let analysis = MoatAnalysis {
            dimensions: vec![DimensionScore {
                dimension: MoatDimension::BrandPower,
                score: 3.5,
                evidence: vec![],
                metrics: vec![],
            }],
            overall_score: 3.5,
            rating: MoatRating::Narrow,
            durability: Durability {
                score: 3.0,
                rating: DurabilityRating::Moderate,
                adjustments: vec![],
            },
        };

        assert!(analysis.dimension_score(MoatDimension::BrandPower).is_some());
        assert!(analysis.dimension_score(MoatDimension::CostAdvantage).is_none());
    }
}
