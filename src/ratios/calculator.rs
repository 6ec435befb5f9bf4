//! Ratio snapshot computation over the latest fiscal year.

use tracing::debug;

use super::types::FinancialRatios;
use crate::metrics;
use crate::statements::{Quote, StatementSeries};

/// Lookback cap for all growth-rate figures.
const GROWTH_LOOKBACK_YEARS: usize = 5;

/// Tax rate assumed when the effective rate cannot be estimated.
const DEFAULT_TAX_RATE: f64 = 0.25;

/// Derive the full ratio snapshot for the most recent fiscal year.
///
/// If any of the three statements is missing for the latest year the default
/// (all-zero/`None`) snapshot is returned; an incomplete filing is an
/// expected provider gap, not an error. The quote is only needed for
/// market-cap-relative figures.
pub fn calculate_ratios(series: &StatementSeries, quote: Option<&Quote>) -> FinancialRatios {
    let Some(latest) = series.latest() else {
        debug!("statement series is empty, returning default ratios");
        return FinancialRatios::default();
    };
    let (Some(income), Some(balance), Some(cash_flow)) =
        (&latest.income, &latest.balance, &latest.cash_flow)
    else {
        debug!(
            fiscal_year = latest.fiscal_year,
            "latest year statements incomplete, returning default ratios"
        );
        return FinancialRatios::default();
    };

    let tax_rate = estimate_tax_rate(income.net_income, income.operating_income);
    let nopat = income.operating_income * (1.0 - tax_rate);
    let invested_capital = balance.total_equity + balance.total_debt - balance.cash;
    let roic = if invested_capital > 0.0 {
        Some(nopat / invested_capital)
    } else {
        None
    };

    let free_cash_flow = cash_flow.free_cash_flow();
    let fcf_yield = quote.and_then(|q| {
        if q.market_cap > 0.0 {
            Some(free_cash_flow / q.market_cap)
        } else {
            None
        }
    });
    let cash_conversion = if income.net_income > 0.0 {
        Some(free_cash_flow / income.net_income)
    } else {
        None
    };
    let capex_to_depreciation = if cash_flow.depreciation > 0.0 {
        Some(cash_flow.capex / cash_flow.depreciation)
    } else {
        None
    };
    let interest_coverage = if income.interest_expense > 0.0 {
        Some(income.operating_income / income.interest_expense)
    } else {
        None
    };
    let net_debt_to_ebitda = if income.ebitda > 0.0 {
        Some(balance.net_debt() / income.ebitda)
    } else {
        None
    };

    FinancialRatios {
        gross_margin: safe_ratio(income.gross_profit, income.revenue),
        operating_margin: safe_ratio(income.operating_income, income.revenue),
        net_margin: safe_ratio(income.net_income, income.revenue),
        roe: safe_ratio(income.net_income, balance.total_equity),
        roa: safe_ratio(income.net_income, balance.total_assets),
        tax_rate,
        nopat,
        invested_capital,
        roic,
        current_ratio: safe_ratio(balance.current_assets, balance.current_liabilities),
        quick_ratio: safe_ratio(
            balance.current_assets - balance.inventory,
            balance.current_liabilities,
        ),
        debt_to_equity: safe_ratio(balance.total_debt, balance.total_equity),
        debt_to_assets: safe_ratio(balance.total_debt, balance.total_assets),
        interest_coverage,
        net_debt_to_ebitda,
        fcf_yield,
        cash_conversion,
        capex_to_depreciation,
        revenue_cagr: metrics::series_cagr(&series.revenue_history(), GROWTH_LOOKBACK_YEARS),
        eps_cagr: metrics::series_cagr(&series.eps_history(), GROWTH_LOOKBACK_YEARS),
        fcf_cagr: metrics::series_cagr(&series.fcf_history(), GROWTH_LOOKBACK_YEARS),
        net_income_cagr: metrics::series_cagr(&series.net_income_history(), GROWTH_LOOKBACK_YEARS),
    }
}

/// Numerator over denominator, 0.0 when the denominator is not positive.
fn safe_ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}

/// Effective tax rate: 1 − net income / operating income, clamped [0, 0.5].
///
/// Falls back to 25% when operating income is not positive and the implied
/// rate therefore has no meaning.
fn estimate_tax_rate(net_income: f64, operating_income: f64) -> f64 {
    if operating_income <= 0.0 {
        return DEFAULT_TAX_RATE;
    }
    (1.0 - net_income / operating_income).clamp(0.0, 0.5)
}
