//! Financial-statement data model consumed by every engine component.
//!
//! A [`StatementSeries`] holds multi-year statement history (most recent
//! fiscal year first) as supplied by an upstream data provider; a [`Quote`]
//! holds the current market snapshot. The engine never mutates either, and
//! free cash flow is always recomputed from operating cash flow and capex
//! rather than trusted from upstream.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Per-statement records
// ============================================================================

/// Income statement for a single fiscal year.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncomeStatement {
    /// Total revenue
    pub revenue: f64,
    /// Gross profit (revenue less cost of goods sold)
    pub gross_profit: f64,
    /// Operating income
    pub operating_income: f64,
    /// Net income
    pub net_income: f64,
    /// Diluted earnings per share
    pub eps: f64,
    /// Earnings before interest, taxes, depreciation and amortization
    pub ebitda: f64,
    /// Interest expense
    pub interest_expense: f64,
    /// Diluted shares outstanding
    pub shares_outstanding: f64,
}

/// Balance sheet for a single fiscal year.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceSheet {
    /// Total assets
    pub total_assets: f64,
    /// Total liabilities
    pub total_liabilities: f64,
    /// Total shareholder equity
    pub total_equity: f64,
    /// Cash and equivalents
    pub cash: f64,
    /// Total debt (short plus long term)
    pub total_debt: f64,
    /// Inventory
    pub inventory: f64,
    /// Current assets
    pub current_assets: f64,
    /// Current liabilities
    pub current_liabilities: f64,
}

impl BalanceSheet {
    /// Net debt: total debt minus cash and equivalents.
    pub fn net_debt(&self) -> f64 {
        self.total_debt - self.cash
    }

    /// Book value per share for a given diluted share count.
    pub fn book_value_per_share(&self, shares_outstanding: f64) -> f64 {
        if shares_outstanding > 0.0 {
            self.total_equity / shares_outstanding
        } else {
            0.0
        }
    }
}

/// Cash-flow statement for a single fiscal year.
///
/// Deliberately carries no reported free-cash-flow field; FCF is derived via
/// [`CashFlowStatement::free_cash_flow`] so that providers with inconsistent
/// FCF definitions cannot skew the models.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CashFlowStatement {
    /// Cash flow from operations
    pub operating_cash_flow: f64,
    /// Capital expenditure (positive magnitude)
    pub capex: f64,
    /// Depreciation and amortization
    pub depreciation: f64,
}

impl CashFlowStatement {
    /// Free cash flow: operating cash flow minus capital expenditure.
    pub fn free_cash_flow(&self) -> f64 {
        self.operating_cash_flow - self.capex
    }
}

// ============================================================================
// Series
// ============================================================================

/// All statements reported for one fiscal year.
///
/// Each statement is independently optional; providers routinely have gaps
/// (a year with an income statement but no cash-flow filing, for example).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FiscalYearStatements {
    /// Fiscal year, e.g. 2024
    pub fiscal_year: i32,
    /// Income statement, if reported
    pub income: Option<IncomeStatement>,
    /// Balance sheet, if reported
    pub balance: Option<BalanceSheet>,
    /// Cash-flow statement, if reported
    pub cash_flow: Option<CashFlowStatement>,
}

/// Multi-year statement history, most recent fiscal year first.
///
/// Ordering is normalized on construction, so every consumer can rely on
/// index 0 being the latest reported year. All records are assumed to share
/// one reporting currency; that contract belongs to the data provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatementSeries {
    years: Vec<FiscalYearStatements>,
}

impl StatementSeries {
    /// Build a series, sorting records into descending fiscal-year order.
    pub fn new(mut years: Vec<FiscalYearStatements>) -> Self {
        years.sort_by(|a, b| b.fiscal_year.cmp(&a.fiscal_year));
        Self { years }
    }

    /// Number of fiscal years in the series.
    pub fn len(&self) -> usize {
        self.years.len()
    }

    /// Whether the series holds no years at all.
    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }

    /// All per-year records, newest first.
    pub fn years(&self) -> &[FiscalYearStatements] {
        &self.years
    }

    /// The most recent fiscal year, if any.
    pub fn latest(&self) -> Option<&FiscalYearStatements> {
        self.years.first()
    }

    /// Revenue per year (newest first), over years with an income statement.
    pub fn revenue_history(&self) -> Vec<f64> {
        self.years
            .iter()
            .filter_map(|y| y.income.as_ref().map(|i| i.revenue))
            .collect()
    }

    /// EPS per year (newest first), over years with an income statement.
    pub fn eps_history(&self) -> Vec<f64> {
        self.years
            .iter()
            .filter_map(|y| y.income.as_ref().map(|i| i.eps))
            .collect()
    }

    /// Net income per year (newest first), over years with an income statement.
    pub fn net_income_history(&self) -> Vec<f64> {
        self.years
            .iter()
            .filter_map(|y| y.income.as_ref().map(|i| i.net_income))
            .collect()
    }

    /// Recomputed free cash flow per year (newest first), over years with a
    /// cash-flow statement.
    pub fn fcf_history(&self) -> Vec<f64> {
        self.years
            .iter()
            .filter_map(|y| y.cash_flow.as_ref().map(CashFlowStatement::free_cash_flow))
            .collect()
    }

    /// Gross margin per year (newest first), over years with positive revenue.
    pub fn gross_margin_history(&self) -> Vec<f64> {
        self.years
            .iter()
            .filter_map(|y| y.income.as_ref())
            .filter(|i| i.revenue > 0.0)
            .map(|i| i.gross_profit / i.revenue)
            .collect()
    }

    /// Operating margin per year (newest first), over years with positive revenue.
    pub fn operating_margin_history(&self) -> Vec<f64> {
        self.years
            .iter()
            .filter_map(|y| y.income.as_ref())
            .filter(|i| i.revenue > 0.0)
            .map(|i| i.operating_income / i.revenue)
            .collect()
    }

    /// Return on equity per year (newest first), over years reporting both
    /// net income and positive equity.
    pub fn roe_history(&self) -> Vec<f64> {
        self.years
            .iter()
            .filter_map(|y| match (&y.income, &y.balance) {
                (Some(income), Some(balance)) if balance.total_equity > 0.0 => {
                    Some(income.net_income / balance.total_equity)
                }
                _ => None,
            })
            .collect()
    }
}

// ============================================================================
// Quote
// ============================================================================

/// Current market snapshot for a listed company.
///
/// Valuation multiples and dividend yield are optional because providers omit
/// them for loss-making or non-dividend companies; absence must stay
/// distinguishable from zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quote {
    /// Ticker symbol
    pub symbol: String,
    /// Last trade price
    pub price: f64,
    /// Market capitalization
    pub market_cap: f64,
    /// Trailing price-to-earnings ratio
    pub pe_ratio: Option<f64>,
    /// Price-to-book ratio
    pub pb_ratio: Option<f64>,
    /// Price-to-sales ratio
    pub ps_ratio: Option<f64>,
    /// Trailing dividend yield (fraction, 0.02 = 2%)
    pub dividend_yield: Option<f64>,
    /// 52-week high
    pub week_52_high: f64,
    /// 52-week low
    pub week_52_low: f64,
    /// Snapshot timestamp supplied by the provider
    pub as_of: DateTime<Utc>,
}

impl Quote {
    /// Whether the company currently pays a dividend.
    pub fn pays_dividend(&self) -> bool {
        self.dividend_yield.is_some_and(|y| y > 0.0)
    }
}
