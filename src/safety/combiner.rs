//! Margin-of-safety computation and the conservative multi-method combiner.

use tracing::debug;

use super::types::{
    CombinedMarginOfSafety, MarginOfSafety, RequiredDrop, RiskLevel, SafetyRating,
    ValuationEstimate, ValuationStatus,
};

// ============================================================================
// Constants
// ============================================================================

/// Margin at or above this is an excellent discount.
const EXCELLENT_MARGIN: f64 = 0.50;
/// Margin at or above this is a good discount.
const GOOD_MARGIN: f64 = 0.35;
/// Margin at or above this is the minimum acceptable discount.
const ACCEPTABLE_MARGIN: f64 = 0.25;
/// Margin at or above this (but negative) is moderate overvaluation.
const MODERATE_OVERVALUATION: f64 = -0.25;

/// Margin reported when no method produced a usable estimate.
const NO_ESTIMATE_MARGIN: f64 = -1.0;

const NOT_ESTABLISHABLE: &str =
    "Intrinsic value could not be established; treating the position as overvalued.";

// ============================================================================
// Single-estimate margin
// ============================================================================

/// Margin of safety of `price` against a single `intrinsic_value`.
///
/// Defined only when both inputs are positive. Anything else yields a zero
/// margin classified as significantly overvalued, never as fair.
pub fn margin_of_safety(intrinsic_value: f64, price: f64) -> MarginOfSafety {
    if intrinsic_value > 0.0 && price > 0.0 {
        let margin = (intrinsic_value - price) / intrinsic_value;
        let (rating, status, risk, recommendation) = classify(margin);
        MarginOfSafety {
            intrinsic_value,
            price,
            margin,
            rating,
            status,
            risk,
            recommendation: recommendation.to_string(),
        }
    } else {
        debug!(
            intrinsic_value,
            price, "margin undefined, defaulting to overvalued"
        );
        MarginOfSafety {
            intrinsic_value,
            price,
            margin: 0.0,
            rating: SafetyRating::SignificantlyOvervalued,
            status: ValuationStatus::Overvalued,
            risk: RiskLevel::High,
            recommendation: NOT_ESTABLISHABLE.to_string(),
        }
    }
}

// ============================================================================
// Multi-method combiner
// ============================================================================

/// Combine several named estimates into one conservative margin.
///
/// Estimates that are missing or non-positive are discarded. The margin is
/// computed against the lesser of the minimum and the mean of the
/// survivors, so the combined view is never more optimistic than the worst
/// single estimate or the average of all of them. With no survivors the
/// margin is -1.0.
pub fn combined_margin_of_safety(
    estimates: &[ValuationEstimate],
    price: f64,
) -> CombinedMarginOfSafety {
    let mut methods_used = Vec::new();
    let mut methods_discarded = Vec::new();
    let mut surviving = Vec::new();

    for estimate in estimates {
        match estimate.value {
            Some(value) if value > 0.0 => {
                methods_used.push(estimate.method.clone());
                surviving.push(value);
            }
            _ => methods_discarded.push(estimate.method.clone()),
        }
    }

    if surviving.is_empty() {
        debug!(
            discarded = methods_discarded.len(),
            "no usable estimates to combine"
        );
        let (rating, status, risk, recommendation) = classify(NO_ESTIMATE_MARGIN);
        return CombinedMarginOfSafety {
            methods_used,
            methods_discarded,
            minimum: None,
            mean: None,
            effective_intrinsic_value: None,
            margin: NO_ESTIMATE_MARGIN,
            rating,
            status,
            risk,
            recommendation: recommendation.to_string(),
        };
    }

    let minimum = surviving.iter().copied().fold(f64::INFINITY, f64::min);
    let mean = surviving.iter().sum::<f64>() / surviving.len() as f64;
    let effective = minimum.min(mean);

    let single = margin_of_safety(effective, price);
    debug!(
        methods = methods_used.len(),
        effective,
        margin = single.margin,
        "combined margin computed"
    );

    CombinedMarginOfSafety {
        methods_used,
        methods_discarded,
        minimum: Some(minimum),
        mean: Some(mean),
        effective_intrinsic_value: Some(effective),
        margin: single.margin,
        rating: single.rating,
        status: single.status,
        risk: single.risk,
        recommendation: single.recommendation,
    }
}

// ============================================================================
// Entry-price helpers
// ============================================================================

/// Price that delivers `desired_margin` of safety on `intrinsic_value`.
pub fn target_buy_price(intrinsic_value: f64, desired_margin: f64) -> f64 {
    intrinsic_value * (1.0 - desired_margin)
}

/// How far `price` must fall to reach `target_price`.
pub fn required_drop(price: f64, target_price: f64) -> RequiredDrop {
    let percent_drop = if price > 0.0 {
        (price - target_price) / price
    } else {
        0.0
    };
    RequiredDrop {
        price,
        target_price,
        percent_drop,
        is_already_adequate: price <= target_price,
    }
}

// ============================================================================
// Band classification
// ============================================================================

fn classify(margin: f64) -> (SafetyRating, ValuationStatus, RiskLevel, &'static str) {
    if margin >= EXCELLENT_MARGIN {
        (
            SafetyRating::Excellent,
            ValuationStatus::Undervalued,
            RiskLevel::Low,
            "Strong buy candidate: the price is at a deep discount to intrinsic value.",
        )
    } else if margin >= GOOD_MARGIN {
        (
            SafetyRating::Good,
            ValuationStatus::Undervalued,
            RiskLevel::Low,
            "Buy candidate: the discount comfortably covers estimation error.",
        )
    } else if margin >= ACCEPTABLE_MARGIN {
        (
            SafetyRating::Acceptable,
            ValuationStatus::Undervalued,
            RiskLevel::Medium,
            "Borderline buy: the discount meets the minimum threshold but leaves little room for error.",
        )
    } else if margin >= 0.0 {
        (
            SafetyRating::Fair,
            ValuationStatus::FairlyValued,
            RiskLevel::Medium,
            "Hold: the price sits near intrinsic value with no meaningful discount.",
        )
    } else if margin >= MODERATE_OVERVALUATION {
        (
            SafetyRating::ModeratelyOvervalued,
            ValuationStatus::Overvalued,
            RiskLevel::High,
            "Avoid at this price: the market is paying a premium over intrinsic value.",
        )
    } else {
        (
            SafetyRating::SignificantlyOvervalued,
            ValuationStatus::Overvalued,
            RiskLevel::High,
            "Avoid: the price far exceeds a conservative estimate of intrinsic value.",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_margin_bands() {
        // (intrinsic value, price, rating, status, risk)
        let test_cases = vec![
            (
                100.0,
                50.0,
                SafetyRating::Excellent,
                ValuationStatus::Undervalued,
                RiskLevel::Low,
            ),
            (
                100.0,
                60.0,
                SafetyRating::Good,
                ValuationStatus::Undervalued,
                RiskLevel::Low,
            ),
            (
                100.0,
                70.0,
                SafetyRating::Acceptable,
                ValuationStatus::Undervalued,
                RiskLevel::Medium,
            ),
            (
                100.0,
                95.0,
                SafetyRating::Fair,
                ValuationStatus::FairlyValued,
                RiskLevel::Medium,
            ),
            (
                100.0,
                110.0,
                SafetyRating::ModeratelyOvervalued,
                ValuationStatus::Overvalued,
                RiskLevel::High,
            ),
            (
                100.0,
                160.0,
                SafetyRating::SignificantlyOvervalued,
                ValuationStatus::Overvalued,
                RiskLevel::High,
            ),
        ];

        for (intrinsic, price, rating, status, risk) in test_cases {
            let result = margin_of_safety(intrinsic, price);
            assert_eq!(result.rating, rating, "price {}", price);
            assert_eq!(result.status, status, "price {}", price);
            assert_eq!(result.risk, risk, "price {}", price);
            assert!(!result.recommendation.is_empty());
        }
    }

    #[test]
    fn test_band_boundaries_are_inclusive() {
        assert_eq!(margin_of_safety(100.0, 50.0).rating, SafetyRating::Excellent);
        assert_eq!(margin_of_safety(100.0, 65.0).rating, SafetyRating::Good);
        assert_eq!(
            margin_of_safety(100.0, 75.0).rating,
            SafetyRating::Acceptable
        );
        assert_eq!(margin_of_safety(100.0, 100.0).rating, SafetyRating::Fair);
        assert_eq!(
            margin_of_safety(100.0, 125.0).rating,
            SafetyRating::ModeratelyOvervalued
        );
    }

    #[test]
    fn test_thirty_percent_margin_is_medium_risk() {
        // a 30% discount clears the minimum threshold but not the
        // comfortable one
        let result = margin_of_safety(100.0, 70.0);
        assert!((result.margin - 0.30).abs() < 1e-9);
        assert_eq!(result.status, ValuationStatus::Undervalued);
        assert_eq!(result.risk, RiskLevel::Medium);

        // mirrored 30% premium
        let result = margin_of_safety(100.0, 130.0);
        assert!((result.margin + 0.30).abs() < 1e-9);
        assert_eq!(result.status, ValuationStatus::Overvalued);
    }

    #[test]
    fn test_invalid_inputs_default_to_overvalued() {
        let test_cases = vec![(0.0, 50.0), (-10.0, 50.0), (100.0, 0.0), (100.0, -5.0)];

        for (intrinsic, price) in test_cases {
            let result = margin_of_safety(intrinsic, price);
            assert_eq!(result.margin, 0.0, "iv {} price {}", intrinsic, price);
            assert_eq!(result.status, ValuationStatus::Overvalued);
            assert_eq!(result.rating, SafetyRating::SignificantlyOvervalued);
            assert_eq!(result.risk, RiskLevel::High);
        }
    }

    #[test]
    fn test_combined_discards_invalid_estimates() {
        let estimates = vec![
            ValuationEstimate::new("dcf", Some(120.0)),
            ValuationEstimate::new("graham_number", Some(80.0)),
            ValuationEstimate::new("graham_growth", None),
            ValuationEstimate::new("ev_ebitda", Some(-5.0)),
        ];

        let result = combined_margin_of_safety(&estimates, 60.0);

        assert_eq!(result.methods_used, vec!["dcf", "graham_number"]);
        assert_eq!(result.methods_discarded, vec!["graham_growth", "ev_ebitda"]);
        assert_eq!(result.minimum, Some(80.0));
        assert_eq!(result.mean, Some(100.0));
        assert_eq!(result.effective_intrinsic_value, Some(80.0));
        // (80 - 60) / 80
        assert!((result.margin - 0.25).abs() < 1e-9);
        assert_eq!(result.rating, SafetyRating::Acceptable);
    }

    #[test]
    fn test_combined_with_no_survivors() {
        let estimates = vec![
            ValuationEstimate::new("dcf", None),
            ValuationEstimate::new("graham_number", Some(-3.0)),
        ];

        let result = combined_margin_of_safety(&estimates, 60.0);

        assert!(result.methods_used.is_empty());
        assert_eq!(result.methods_discarded.len(), 2);
        assert_eq!(result.minimum, None);
        assert_eq!(result.effective_intrinsic_value, None);
        assert_eq!(result.margin, -1.0);
        assert_eq!(result.status, ValuationStatus::Overvalued);
        assert_eq!(result.rating, SafetyRating::SignificantlyOvervalued);
    }

    #[test]
    fn test_combined_is_never_more_optimistic_than_worst_method() {
        let estimates = vec![
            ValuationEstimate::new("dcf", Some(300.0)),
            ValuationEstimate::new("graham_number", Some(100.0)),
            ValuationEstimate::new("graham_growth", Some(200.0)),
        ];

        let result = combined_margin_of_safety(&estimates, 90.0);

        // effective value pinned to the worst estimate
        assert_eq!(result.effective_intrinsic_value, Some(100.0));
        assert!((result.margin - (100.0 - 90.0) / 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_single_estimate_passes_through() {
        let estimates = vec![ValuationEstimate::new("dcf", Some(150.0))];
        let result = combined_margin_of_safety(&estimates, 75.0);

        assert_eq!(result.minimum, Some(150.0));
        assert_eq!(result.mean, Some(150.0));
        assert!((result.margin - 0.5).abs() < 1e-9);
        assert_eq!(result.rating, SafetyRating::Excellent);
    }

    #[test]
    fn test_target_buy_price() {
        assert!((target_buy_price(100.0, 0.25) - 75.0).abs() < 1e-9);
        assert!((target_buy_price(100.0, 0.50) - 50.0).abs() < 1e-9);
        assert!((target_buy_price(80.0, 0.0) - 80.0).abs() < 1e-9);
    }

    #[test]
    fn test_required_drop() {
        let drop = required_drop(100.0, 75.0);
        assert!((drop.percent_drop - 0.25).abs() < 1e-9);
        assert!(!drop.is_already_adequate);

        let adequate = required_drop(70.0, 75.0);
        assert!(adequate.percent_drop < 0.0);
        assert!(adequate.is_already_adequate);
    }
}
