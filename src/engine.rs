//! Valuation engine that runs every component over one company.
//!
//! # Usage
//!
//! ```ignore
//! use deep_value::{ValuationEngine, StatementSeries};
//!
//! let engine = ValuationEngine::new();
//! let snapshot = engine.analyze(&series, Some(&quote), Some(150_000.0))?;
//!
//! println!("{}", snapshot.moat.rating);
//! if let Some(safety) = &snapshot.safety {
//!     println!("margin {:.0}%", safety.margin * 100.0);
//! }
//! ```
//!
//! Each stage is also callable directly as a free function when only one
//! answer is needed; the engine adds nothing beyond ordering the calls and
//! feeding each stage's output to the next.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::dcf::{calculate_dcf, DcfConfig, DcfValuation};
use crate::error::Result;
use crate::graham::{analyze_graham, GrahamAnalysis, GrahamConfig};
use crate::moat::{analyze_moat, MoatAnalysis};
use crate::ratios::{calculate_ratios, FinancialRatios};
use crate::safety::{combined_margin_of_safety, CombinedMarginOfSafety, ValuationEstimate};
use crate::statements::{Quote, StatementSeries};

/// Method label for the DCF estimate in the combined margin.
pub const METHOD_DCF: &str = "dcf";
/// Method label for the Graham Number estimate.
pub const METHOD_GRAHAM_NUMBER: &str = "graham_number";
/// Method label for the Graham growth-formula estimate.
pub const METHOD_GRAHAM_GROWTH: &str = "graham_growth";

/// Complete output of one valuation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValuationSnapshot {
    /// Quote the run was priced against, when one was supplied.
    pub quote: Option<Quote>,
    pub ratios: FinancialRatios,
    pub dcf: DcfValuation,
    pub graham: GrahamAnalysis,
    pub moat: MoatAnalysis,
    /// Combined margin of safety; absent without a quote to price against.
    pub safety: Option<CombinedMarginOfSafety>,
}

/// Runs the full valuation pipeline: ratios, DCF, Graham, moat, and the
/// combined margin of safety.
#[derive(Debug, Clone, Default)]
pub struct ValuationEngine {
    pub dcf: DcfConfig,
    pub graham: GrahamConfig,
}

impl ValuationEngine {
    /// Engine with default DCF and Graham assumptions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine with explicit assumptions. Validation happens inside the
    /// components on each run.
    pub fn with_config(dcf: DcfConfig, graham: GrahamConfig) -> Self {
        Self { dcf, graham }
    }

    /// Run every component over one company's statements.
    ///
    /// The quote and employee count are optional: without a quote the
    /// market-dependent pieces (price-based defensive criteria, the scale
    /// market-cap tier, the combined margin) degrade or are skipped, and
    /// the snapshot's `safety` is `None`.
    pub fn analyze(
        &self,
        series: &StatementSeries,
        quote: Option<&Quote>,
        employee_count: Option<f64>,
    ) -> Result<ValuationSnapshot> {
        debug!(
            symbol = quote.map(|q| q.symbol.as_str()).unwrap_or("?"),
            years = series.len(),
            "running valuation pipeline"
        );

        let ratios = calculate_ratios(series, quote);
        let dcf = calculate_dcf(series, &self.dcf)?;
        let graham = analyze_graham(series, quote, &ratios, &self.graham)?;
        let moat = analyze_moat(series, &ratios, quote, employee_count);

        let safety = quote.map(|q| {
            let estimates = [
                ValuationEstimate::new(METHOD_DCF, Some(dcf.intrinsic_value_per_share)),
                ValuationEstimate::new(METHOD_GRAHAM_NUMBER, Some(graham.graham_number)),
                ValuationEstimate::new(METHOD_GRAHAM_GROWTH, graham.graham_growth_value),
            ];
            combined_margin_of_safety(&estimates, q.price)
        });

        Ok(ValuationSnapshot {
            quote: quote.cloned(),
            ratios,
            dcf,
            graham,
            moat,
            safety,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::safety::SafetyRating;
    use crate::statements::{
        BalanceSheet, CashFlowStatement, FiscalYearStatements, IncomeStatement,
    };
    use chrono::{TimeZone, Utc};

    fn make_year(fiscal_year: i32, scale: f64) -> FiscalYearStatements {
        FiscalYearStatements {
            fiscal_year,
            income: Some(IncomeStatement {
                revenue: 1.0e9 * scale,
                gross_profit: 0.45e9 * scale,
                operating_income: 0.25e9 * scale,
                net_income: 0.18e9 * scale,
                eps: 1.8 * scale,
                ebitda: 0.30e9 * scale,
                interest_expense: 0.01e9,
                shares_outstanding: 100.0e6,
            }),
            balance: Some(BalanceSheet {
                total_assets: 2.0e9 * scale,
                total_liabilities: 0.8e9 * scale,
                total_equity: 1.2e9 * scale,
                cash: 0.3e9 * scale,
                total_debt: 0.2e9 * scale,
                inventory: 0.1e9 * scale,
                current_assets: 0.6e9 * scale,
                current_liabilities: 0.25e9 * scale,
            }),
            cash_flow: Some(CashFlowStatement {
                operating_cash_flow: 0.22e9 * scale,
                capex: 0.05e9 * scale,
                depreciation: 0.04e9 * scale,
            }),
        }
    }

    fn make_series(years: usize, growth: f64) -> StatementSeries {
        StatementSeries::new(
            (0..years)
                .map(|i| make_year(2015 + i as i32, (1.0 + growth).powi(i as i32)))
                .collect(),
        )
    }

    fn make_quote(price: f64) -> Quote {
        Quote {
            symbol: "TEST".to_string(),
            price,
            market_cap: price * 100.0e6,
            pe_ratio: Some(price / 3.6),
            pb_ratio: Some(price / 24.0),
            ps_ratio: Some(2.0),
            dividend_yield: Some(0.02),
            week_52_high: price * 1.2,
            week_52_low: price * 0.8,
            as_of: Utc.with_ymd_and_hms(2025, 6, 2, 20, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_full_pipeline_on_healthy_company() {
        let series = make_series(10, 0.08);
        let quote = make_quote(40.0);
        let engine = ValuationEngine::new();

        let snapshot = engine.analyze(&series, Some(&quote), Some(5_000.0)).unwrap();

        assert!(snapshot.ratios.roe > 0.0);
        assert!(snapshot.dcf.is_reliable());
        assert!(snapshot.dcf.intrinsic_value_per_share > 0.0);
        assert!(snapshot.graham.graham_number > 0.0);
        assert!(snapshot.graham.graham_growth_value.is_some());
        assert_eq!(snapshot.moat.dimensions.len(), 5);

        let safety = snapshot.safety.expect("quote provided, safety expected");
        assert_eq!(safety.methods_used.len(), 3);
        assert!(safety.methods_discarded.is_empty());
        assert!(safety.margin > 0.0);
    }

    #[test]
    fn test_pipeline_without_quote() {
        let series = make_series(10, 0.08);
        let engine = ValuationEngine::new();

        let snapshot = engine.analyze(&series, None, None).unwrap();

        assert!(snapshot.quote.is_none());
        assert!(snapshot.safety.is_none());
        // fundamentals-only components still run
        assert!(snapshot.dcf.is_reliable());
        assert!(snapshot.graham.graham_number > 0.0);
        assert_eq!(snapshot.moat.dimensions.len(), 5);
        // the four market-dependent defensive criteria cannot pass
        assert!(snapshot.graham.checklist.passed_count() <= 3);
    }

    #[test]
    fn test_pipeline_propagates_config_errors() {
        let series = make_series(10, 0.08);
        let engine = ValuationEngine::with_config(
            DcfConfig {
                discount_rate: 0.50,
                ..DcfConfig::default()
            },
            GrahamConfig::default(),
        );

        let err = engine.analyze(&series, None, None).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn test_unprofitable_company_discards_every_method() {
        let series = StatementSeries::new(
            (0..5)
                .map(|i| {
                    let mut year = make_year(2020 + i, 1.0);
                    if let Some(income) = year.income.as_mut() {
                        income.net_income = -0.05e9;
                        income.eps = -0.5;
                    }
                    if let Some(cash_flow) = year.cash_flow.as_mut() {
                        cash_flow.operating_cash_flow = -0.1e9;
                    }
                    year
                })
                .collect(),
        );
        let quote = make_quote(40.0);
        let engine = ValuationEngine::new();

        let snapshot = engine.analyze(&series, Some(&quote), None).unwrap();

        assert!(!snapshot.dcf.is_reliable());
        assert_eq!(snapshot.graham.graham_number, 0.0);
        assert_eq!(snapshot.graham.graham_growth_value, None);

        let safety = snapshot.safety.unwrap();
        assert!(safety.methods_used.is_empty());
        assert_eq!(safety.methods_discarded.len(), 3);
        assert_eq!(safety.margin, -1.0);
        assert_eq!(safety.rating, SafetyRating::SignificantlyOvervalued);
    }
}
