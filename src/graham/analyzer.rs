//! Graham Number, Graham growth formula, and the defensive checklist.

use tracing::debug;

use super::types::{
    CriterionResult, DefensiveChecklist, DefensiveCriterion, GrahamAnalysis, GrahamConfig,
};
use crate::error::Result;
use crate::metrics;
use crate::ratios::FinancialRatios;
use crate::statements::{Quote, StatementSeries};

/// Product of Graham's 15× earnings and 1.5× book ceilings.
const GRAHAM_MULTIPLIER: f64 = 22.5;
/// P/E the growth formula grants a no-growth company.
const BASE_PE_NO_GROWTH: f64 = 8.5;
/// Extra P/E granted per whole point of growth.
const GROWTH_MULTIPLIER: f64 = 2.0;
/// AAA bond yield (percent) the 1962 formula was anchored to.
const ANCHOR_BOND_YIELD_PCT: f64 = 4.4;

const MIN_MARKET_CAP: f64 = 500_000_000.0;
const MIN_CURRENT_RATIO: f64 = 2.0;
const MIN_EPS_GROWTH: f64 = 0.33;
const MAX_PE_RATIO: f64 = 15.0;
const MAX_PB_RATIO: f64 = 1.5;
const MAX_PE_PB_PRODUCT: f64 = 22.5;
/// Lookback cap shared by the earnings-based criteria.
const EARNINGS_LOOKBACK_YEARS: usize = 5;
/// Minimum annual observations for the EPS growth estimate.
const MIN_EPS_HISTORY_YEARS: usize = 3;

/// Graham Number: sqrt(22.5 × EPS × book value per share).
///
/// A hard ceiling, not an estimate of worth: loss-making or negative-equity
/// companies get 0 rather than a partial credit.
pub fn graham_number(eps: f64, book_value_per_share: f64) -> f64 {
    if eps <= 0.0 || book_value_per_share <= 0.0 {
        return 0.0;
    }
    (GRAHAM_MULTIPLIER * eps * book_value_per_share).sqrt()
}

/// Graham growth formula: EPS × (8.5 + 2g) × 4.4 / Y.
///
/// `growth_rate` and `bond_yield` arrive as fractions and enter the formula
/// as whole-number percentages (0.10 → g = 10, 0.04 → Y = 4). `None` when
/// EPS or the yield is not positive; the value itself is floored at 0.
pub fn graham_growth_value(eps: f64, growth_rate: f64, bond_yield: f64) -> Option<f64> {
    if eps <= 0.0 || bond_yield <= 0.0 {
        return None;
    }
    let g = growth_rate * 100.0;
    let y = bond_yield * 100.0;
    let value = eps * (BASE_PE_NO_GROWTH + GROWTH_MULTIPLIER * g) * ANCHOR_BOND_YIELD_PCT / y;
    Some(value.max(0.0))
}

/// Full Graham assessment: both formula values plus the defensive checklist.
///
/// Missing statements degrade to the sentinel outputs (zero Graham Number,
/// `None` growth value, failed criteria with explanatory details) rather
/// than erroring; only an out-of-range config is a failure.
pub fn analyze_graham(
    series: &StatementSeries,
    quote: Option<&Quote>,
    ratios: &FinancialRatios,
    config: &GrahamConfig,
) -> Result<GrahamAnalysis> {
    config.validate()?;

    let latest = series.latest();
    let eps = latest
        .and_then(|y| y.income.as_ref())
        .map_or(0.0, |i| i.eps);
    let book_value_per_share = latest
        .and_then(|y| {
            let income = y.income.as_ref()?;
            let balance = y.balance.as_ref()?;
            Some(balance.book_value_per_share(income.shares_outstanding))
        })
        .unwrap_or(0.0);

    let eps_history = series.eps_history();
    let eps_cagr = if eps_history.len() >= MIN_EPS_HISTORY_YEARS {
        metrics::series_cagr(&eps_history, EARNINGS_LOOKBACK_YEARS)
    } else {
        None
    };
    let graham_growth_value = match eps_cagr {
        Some(growth) if growth > 0.0 => graham_growth_value(eps, growth, config.bond_yield),
        _ => {
            debug!("EPS growth unavailable or non-positive, growth formula not applied");
            None
        }
    };

    Ok(GrahamAnalysis {
        graham_number: graham_number(eps, book_value_per_share),
        graham_growth_value,
        eps,
        book_value_per_share,
        eps_cagr,
        bond_yield: config.bond_yield,
        checklist: evaluate_defensive_criteria(series, quote, ratios),
    })
}

/// Run all seven defensive-investor criteria.
pub fn evaluate_defensive_criteria(
    series: &StatementSeries,
    quote: Option<&Quote>,
    ratios: &FinancialRatios,
) -> DefensiveChecklist {
    DefensiveChecklist {
        criteria: vec![
            check_adequate_size(quote),
            check_financial_condition(ratios),
            check_earnings_stability(series),
            check_dividend_record(quote),
            check_earnings_growth(series),
            check_price_to_earnings(quote),
            check_price_to_assets(quote),
        ],
    }
}

fn check_adequate_size(quote: Option<&Quote>) -> CriterionResult {
    let (passed, detail) = match quote {
        Some(q) if q.market_cap >= MIN_MARKET_CAP => (
            true,
            format!(
                "market cap ${:.2}B meets the $500M minimum",
                q.market_cap / 1e9
            ),
        ),
        Some(q) => (
            false,
            format!(
                "market cap ${:.0}M below the $500M minimum",
                q.market_cap / 1e6
            ),
        ),
        None => (false, "no quote available to establish size".to_string()),
    };
    CriterionResult {
        criterion: DefensiveCriterion::AdequateSize,
        passed,
        detail,
    }
}

fn check_financial_condition(ratios: &FinancialRatios) -> CriterionResult {
    let passed = ratios.current_ratio >= MIN_CURRENT_RATIO;
    let detail = if passed {
        format!(
            "current ratio {:.2} at or above the 2.0 floor",
            ratios.current_ratio
        )
    } else {
        format!(
            "current ratio {:.2} below the 2.0 floor",
            ratios.current_ratio
        )
    };
    CriterionResult {
        criterion: DefensiveCriterion::StrongFinancialCondition,
        passed,
        detail,
    }
}

fn check_earnings_stability(series: &StatementSeries) -> CriterionResult {
    let history = series.net_income_history();
    let (passed, detail) = if history.is_empty() {
        (false, "no earnings history available".to_string())
    } else {
        let positive_years = history.iter().filter(|&&n| n > 0.0).count();
        let required = history.len().min(EARNINGS_LOOKBACK_YEARS);
        (
            positive_years >= required,
            format!(
                "positive net income in {} of {} years (needs {})",
                positive_years,
                history.len(),
                required
            ),
        )
    };
    CriterionResult {
        criterion: DefensiveCriterion::EarningsStability,
        passed,
        detail,
    }
}

fn check_dividend_record(quote: Option<&Quote>) -> CriterionResult {
    let (passed, detail) = match quote {
        Some(q) if q.pays_dividend() => (
            true,
            format!(
                "pays a dividend (yield {:.2}%)",
                q.dividend_yield.unwrap_or(0.0) * 100.0
            ),
        ),
        Some(_) => (false, "pays no dividend".to_string()),
        None => (
            false,
            "no quote available to establish a dividend record".to_string(),
        ),
    };
    CriterionResult {
        criterion: DefensiveCriterion::DividendRecord,
        passed,
        detail,
    }
}

fn check_earnings_growth(series: &StatementSeries) -> CriterionResult {
    let history = series.eps_history();
    let (passed, detail) = if history.len() < 2 {
        (false, "insufficient EPS history".to_string())
    } else {
        let span = (history.len() - 1).min(EARNINGS_LOOKBACK_YEARS);
        let start = history[span];
        let end = history[0];
        if start <= 0.0 {
            (false, format!("starting EPS {:.2} not positive", start))
        } else {
            let growth = end / start - 1.0;
            (
                growth >= MIN_EPS_GROWTH,
                format!(
                    "EPS changed {:+.0}% over {} years (needs +33%)",
                    growth * 100.0,
                    span
                ),
            )
        }
    };
    CriterionResult {
        criterion: DefensiveCriterion::EarningsGrowth,
        passed,
        detail,
    }
}

fn check_price_to_earnings(quote: Option<&Quote>) -> CriterionResult {
    let (passed, detail) = match quote.and_then(|q| q.pe_ratio) {
        Some(pe) if pe > 0.0 && pe <= MAX_PE_RATIO => {
            (true, format!("P/E {:.1} within the 15.0 ceiling", pe))
        }
        Some(pe) if pe > 0.0 => (false, format!("P/E {:.1} above the 15.0 ceiling", pe)),
        Some(pe) => (false, format!("P/E {:.1} not meaningful", pe)),
        None => (false, "no P/E available".to_string()),
    };
    CriterionResult {
        criterion: DefensiveCriterion::ModeratePriceToEarnings,
        passed,
        detail,
    }
}

fn check_price_to_assets(quote: Option<&Quote>) -> CriterionResult {
    let (passed, detail) = match quote {
        None => (false, "no quote available".to_string()),
        Some(q) => match q.pb_ratio {
            None => (false, "no P/B available".to_string()),
            Some(pb) if pb <= MAX_PB_RATIO => {
                (true, format!("P/B {:.2} within the 1.5 ceiling", pb))
            }
            Some(pb) => match q.pe_ratio {
                Some(pe) if pe > 0.0 && pe * pb <= MAX_PE_PB_PRODUCT => (
                    true,
                    format!(
                        "P/E × P/B {:.1} within the 22.5 ceiling despite P/B {:.2}",
                        pe * pb,
                        pb
                    ),
                ),
                _ => (
                    false,
                    format!("P/B {:.2} above 1.5 and P/E × P/B gives no relief", pb),
                ),
            },
        },
    };
    CriterionResult {
        criterion: DefensiveCriterion::ModeratePriceToAssets,
        passed,
        detail,
    }
}
