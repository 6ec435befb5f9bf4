//! Ratio snapshot types.

use serde::{Deserialize, Serialize};

/// Immutable ratio snapshot derived from the most recent fiscal year.
///
/// Plain `f64` fields fall back to 0.0 when a denominator is not positive;
/// `Option<f64>` fields distinguish "not computable" from zero (the
/// values-not-exceptions contract). All fractions use decimal units
/// (0.25 = 25%). `Default` yields the all-zero/`None` snapshot returned when
/// the latest year's statements are incomplete.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FinancialRatios {
    // === Profitability ===
    /// Gross profit / revenue
    pub gross_margin: f64,
    /// Operating income / revenue
    pub operating_margin: f64,
    /// Net income / revenue
    pub net_margin: f64,
    /// Net income / total equity
    pub roe: f64,
    /// Net income / total assets
    pub roa: f64,
    /// Estimated effective tax rate, clamped [0, 0.5]
    pub tax_rate: f64,
    /// After-tax operating profit: operating income × (1 − tax rate)
    pub nopat: f64,
    /// Equity + debt − cash
    pub invested_capital: f64,
    /// NOPAT / invested capital; `None` when invested capital ≤ 0
    pub roic: Option<f64>,

    // === Liquidity ===
    /// Current assets / current liabilities
    pub current_ratio: f64,
    /// (Current assets − inventory) / current liabilities
    pub quick_ratio: f64,

    // === Solvency ===
    /// Total debt / total equity
    pub debt_to_equity: f64,
    /// Total debt / total assets
    pub debt_to_assets: f64,
    /// Operating income / interest expense; `None` with no interest expense
    pub interest_coverage: Option<f64>,
    /// (Debt − cash) / EBITDA; `None` when EBITDA ≤ 0
    pub net_debt_to_ebitda: Option<f64>,

    // === Cash-flow quality ===
    /// Free cash flow / market cap; `None` without a quote
    pub fcf_yield: Option<f64>,
    /// Free cash flow / net income; `None` unless net income > 0
    pub cash_conversion: Option<f64>,
    /// Capex / depreciation; `None` when depreciation ≤ 0
    pub capex_to_depreciation: Option<f64>,

    // === Growth (CAGR over up to 5 years) ===
    /// Revenue growth rate
    pub revenue_cagr: Option<f64>,
    /// EPS growth rate
    pub eps_cagr: Option<f64>,
    /// Free-cash-flow growth rate
    pub fcf_cagr: Option<f64>,
    /// Net-income growth rate
    pub net_income_cagr: Option<f64>,
}
