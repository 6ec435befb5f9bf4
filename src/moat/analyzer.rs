//! Scoring logic for the five moat dimensions and durability.
//!
//! Every dimension maps observable financials onto a 1..=5 score through
//! three-tier thresholds plus bonuses or penalties, and records the
//! evidence it used. Nothing here touches the market price except the
//! market-cap tier inside scale economies.

use statrs::statistics::Statistics;
use tracing::debug;

use crate::metrics;
use crate::ratios::FinancialRatios;
use crate::statements::{Quote, StatementSeries};

use super::types::{
    DimensionScore, Durability, DurabilityRating, MoatAnalysis, MoatDimension, MoatRating,
};

// ============================================================================
// Constants
// ============================================================================

/// Dimension and durability scores live on this scale.
const MIN_SCORE: f64 = 1.0;
const MAX_SCORE: f64 = 5.0;

/// Overall score at or above this is a wide moat.
const WIDE_THRESHOLD: f64 = 4.0;
/// Overall score at or above this, but below wide, is a narrow moat.
const NARROW_THRESHOLD: f64 = 2.5;

/// Durability score at or above this is strong.
const STRONG_DURABILITY: f64 = 4.0;
/// Durability score at or above this, but below strong, is moderate.
const MODERATE_DURABILITY: f64 = 2.5;

/// Years of history used for the revenue-growth dimension.
const GROWTH_LOOKBACK_YEARS: usize = 5;

// ============================================================================
// Entry point
// ============================================================================

/// Score the five moat dimensions and assess durability.
///
/// The overall score is the **maximum** across dimensions, not the mean:
/// one dominant advantage is enough to hold a moat, and four irrelevant
/// dimensions must not dilute it. Quote and employee count are optional;
/// without them the scale dimension falls back to its floor.
pub fn analyze_moat(
    series: &StatementSeries,
    ratios: &FinancialRatios,
    quote: Option<&Quote>,
    employee_count: Option<f64>,
) -> MoatAnalysis {
    let dimensions = vec![
        score_brand_power(series, ratios),
        score_cost_advantage(series, ratios),
        score_network_effect(series),
        score_switching_costs(series, ratios),
        score_scale_economies(series, quote, employee_count),
    ];

    let overall_score = dimensions.iter().map(|d| d.score).fold(MIN_SCORE, f64::max);

    let rating = if overall_score >= WIDE_THRESHOLD {
        MoatRating::Wide
    } else if overall_score >= NARROW_THRESHOLD {
        MoatRating::Narrow
    } else {
        MoatRating::None
    };

    let durability = assess_durability(series, overall_score);

    debug!(
        overall_score,
        rating = %rating,
        durability = %durability.rating,
        "moat assessment complete"
    );

    MoatAnalysis {
        dimensions,
        overall_score,
        rating,
        durability,
    }
}

// ============================================================================
// Dimension scorers
// ============================================================================

/// Brand power: high gross margins mean customers pay up for the name,
/// and stable margins mean the premium holds under pressure.
fn score_brand_power(series: &StatementSeries, ratios: &FinancialRatios) -> DimensionScore {
    let gross_margin = ratios.gross_margin;
    let base = tier_score(gross_margin, 0.25, 0.40, 0.60);
    let margin_stability = metrics::stability(&series.gross_margin_history());

    let level = if base >= 4.0 {
        "premium"
    } else if base >= 3.0 {
        "strong"
    } else if base >= 2.0 {
        "modest"
    } else {
        "weak"
    };

    DimensionScore {
        dimension: MoatDimension::BrandPower,
        score: (base + margin_stability).clamp(MIN_SCORE, MAX_SCORE),
        evidence: vec![
            format!(
                "Gross margin {:.1}% indicates {} pricing power",
                gross_margin * 100.0,
                level
            ),
            format!("Gross-margin stability {:.2} across reported years", margin_stability),
        ],
        metrics: vec![
            ("gross_margin".to_string(), gross_margin),
            ("gross_margin_stability".to_string(), margin_stability),
        ],
    }
}

/// Cost advantage: the operating-margin level shows the edge today, the
/// multi-year trend shows whether it is widening or eroding.
fn score_cost_advantage(series: &StatementSeries, ratios: &FinancialRatios) -> DimensionScore {
    let operating_margin = ratios.operating_margin;
    let base = tier_score(operating_margin, 0.10, 0.20, 0.30);

    let mut evidence = vec![format!("Operating margin {:.1}%", operating_margin * 100.0)];
    let mut raw = vec![("operating_margin".to_string(), operating_margin)];

    let history = series.operating_margin_history();
    let mut trend_adjust = 0.0;
    if history.len() >= 2 {
        let latest = history[0];
        let oldest = history[history.len() - 1];
        if oldest.abs() > f64::EPSILON {
            let trend = (latest - oldest) / oldest.abs();
            trend_adjust = if trend >= 0.20 {
                1.0
            } else if trend >= 0.05 {
                0.5
            } else if trend <= -0.20 {
                -1.0
            } else if trend <= -0.05 {
                -0.5
            } else {
                0.0
            };
            let direction = if trend >= 0.0 { "widened" } else { "narrowed" };
            evidence.push(format!(
                "Operating margin {} {:.0}% relative over the reported history",
                direction,
                trend.abs() * 100.0
            ));
            raw.push(("operating_margin_trend".to_string(), trend));
        }
    }

    DimensionScore {
        dimension: MoatDimension::CostAdvantage,
        // clamp keeps the score at 1.0 even when the trend penalty would
        // push a weak base below the scale
        score: (base + trend_adjust).clamp(MIN_SCORE, MAX_SCORE),
        evidence,
        metrics: raw,
    }
}

/// Network effect: sustained high revenue growth with expanding margins is
/// the footprint of value compounding per user as the base scales.
fn score_network_effect(series: &StatementSeries) -> DimensionScore {
    let revenue = series.revenue_history();
    let growth = metrics::series_cagr(&revenue, GROWTH_LOOKBACK_YEARS);

    let mut evidence = Vec::new();
    let mut raw = Vec::new();

    let base = match growth {
        Some(rate) => {
            evidence.push(format!(
                "Revenue CAGR {:.1}% over up to {} years",
                rate * 100.0,
                GROWTH_LOOKBACK_YEARS
            ));
            raw.push(("revenue_cagr".to_string(), rate));
            tier_score(rate, 0.05, 0.10, 0.20)
        }
        None => {
            evidence.push("Insufficient revenue history to assess growth".to_string());
            MIN_SCORE
        }
    };

    let mut bonus = 0.0;
    let margins = series.operating_margin_history();
    if let Some(rate) = growth {
        if rate > 0.0 && margins.len() >= 2 && margins[0] > margins[margins.len() - 1] {
            bonus = 1.0;
            evidence.push("Margins expanding while revenue grows".to_string());
        }
    }

    DimensionScore {
        dimension: MoatDimension::NetworkEffect,
        score: (base + bonus).clamp(MIN_SCORE, MAX_SCORE),
        evidence,
        metrics: raw,
    }
}

/// Switching costs: customers who cannot leave produce revenue that never
/// wobbles. An unbroken year-over-year growth streak strengthens the signal.
fn score_switching_costs(series: &StatementSeries, ratios: &FinancialRatios) -> DimensionScore {
    let revenue = series.revenue_history();
    let revenue_stability = metrics::stability(&revenue);
    let base = tier_score(revenue_stability, 0.70, 0.85, 0.95);

    let mut evidence = vec![format!("Revenue stability {:.2}", revenue_stability)];
    let mut raw = vec![("revenue_stability".to_string(), revenue_stability)];

    let mut bonus = 0.0;
    // newest-first, so each window's first element is the later year
    if revenue.len() >= 2 && revenue.windows(2).all(|w| w[0] >= w[1]) {
        bonus += 1.0;
        evidence.push("Revenue never declined year over year".to_string());
    }
    if ratios.gross_margin >= 0.50 {
        bonus += 0.5;
        evidence.push(format!(
            "Gross margin {:.1}% supports pricing through lock-in",
            ratios.gross_margin * 100.0
        ));
        raw.push(("gross_margin".to_string(), ratios.gross_margin));
    }

    DimensionScore {
        dimension: MoatDimension::SwitchingCosts,
        score: (base + bonus).clamp(MIN_SCORE, MAX_SCORE),
        evidence,
        metrics: raw,
    }
}

/// Scale economies: sheer size and revenue per employee proxy for unit
/// costs smaller rivals cannot reach.
fn score_scale_economies(
    series: &StatementSeries,
    quote: Option<&Quote>,
    employee_count: Option<f64>,
) -> DimensionScore {
    let mut evidence = Vec::new();
    let mut raw = Vec::new();

    let base = match quote {
        Some(q) => {
            evidence.push(format!("Market cap ${:.1}B", q.market_cap / 1e9));
            raw.push(("market_cap".to_string(), q.market_cap));
            tier_score(q.market_cap, 10e9, 50e9, 200e9)
        }
        None => {
            evidence.push("Market cap unavailable; scale scored from the floor".to_string());
            MIN_SCORE
        }
    };

    let mut bonus = 0.0;
    let latest_revenue = series
        .latest()
        .and_then(|y| y.income.as_ref())
        .map(|i| i.revenue);
    if let (Some(revenue), Some(employees)) = (latest_revenue, employee_count) {
        if employees > 0.0 {
            let revenue_per_employee = revenue / employees;
            evidence.push(format!(
                "Revenue per employee ${:.0}K",
                revenue_per_employee / 1_000.0
            ));
            raw.push(("revenue_per_employee".to_string(), revenue_per_employee));
            bonus = if revenue_per_employee >= 1_000_000.0 {
                1.0
            } else if revenue_per_employee >= 500_000.0 {
                0.5
            } else {
                0.0
            };
        }
    }

    DimensionScore {
        dimension: MoatDimension::ScaleEconomies,
        score: (base + bonus).clamp(MIN_SCORE, MAX_SCORE),
        evidence,
        metrics: raw,
    }
}

// ============================================================================
// Durability
// ============================================================================

/// Start from the overall moat score and adjust for how consistently the
/// business converts its advantage into returns and cash.
fn assess_durability(series: &StatementSeries, overall_score: f64) -> Durability {
    let mut score = overall_score;
    let mut adjustments = Vec::new();

    let roe = series.roe_history();
    if !roe.is_empty() {
        let mean_roe = roe.iter().mean();
        let roe_stability = metrics::stability(&roe);
        if mean_roe >= 0.15 && roe_stability >= 0.8 {
            score += 1.0;
            adjustments.push(format!(
                "+1.0: ROE averaged {:.1}% with stability {:.2}",
                mean_roe * 100.0,
                roe_stability
            ));
        }
        if roe_stability < 0.6 {
            score -= 0.5;
            adjustments.push(format!(
                "-0.5: ROE inconsistent across history (stability {:.2})",
                roe_stability
            ));
        }
    }

    let fcf = series.fcf_history();
    if !fcf.is_empty() {
        let positive_years = fcf.iter().filter(|v| **v > 0.0).count();
        let positive_fraction = positive_years as f64 / fcf.len() as f64;
        if positive_years == fcf.len() {
            score += 0.5;
            adjustments.push(format!(
                "+0.5: free cash flow positive in all {} years",
                fcf.len()
            ));
        } else if positive_fraction < 0.8 {
            score -= 0.5;
            adjustments.push(format!(
                "-0.5: free cash flow positive in only {} of {} years",
                positive_years,
                fcf.len()
            ));
        }
    }

    let score = score.clamp(MIN_SCORE, MAX_SCORE);
    let rating = if score >= STRONG_DURABILITY {
        DurabilityRating::Strong
    } else if score >= MODERATE_DURABILITY {
        DurabilityRating::Moderate
    } else {
        DurabilityRating::Weak
    };

    Durability {
        score,
        rating,
        adjustments,
    }
}

/// Map a metric onto the 1..=4 base scale given its three tier thresholds.
fn tier_score(value: f64, tier2: f64, tier3: f64, tier4: f64) -> f64 {
    if value >= tier4 {
        4.0
    } else if value >= tier3 {
        3.0
    } else if value >= tier2 {
        2.0
    } else {
        1.0
    }
}
