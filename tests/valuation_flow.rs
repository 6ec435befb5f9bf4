//! End-to-end tests for the valuation pipeline.
//!
//! Drives the complete flow over synthetic statement histories:
//! statements + quote -> ratios -> DCF / Graham / moat -> combined margin
//!
//! The property blocks at the bottom check the ordering guarantees the
//! models promise: discounting harder never raises a valuation, growing
//! faster never lowers one, and the combiner never beats its own inputs.

use chrono::{TimeZone, Utc};
use proptest::prelude::*;

use deep_value::dcf::{calculate_dcf, sensitivity_analysis, DcfConfig};
use deep_value::engine::{ValuationEngine, METHOD_DCF, METHOD_GRAHAM_NUMBER};
use deep_value::safety::{
    combined_margin_of_safety, margin_of_safety, ValuationEstimate, ValuationStatus,
};
use deep_value::statements::{
    BalanceSheet, CashFlowStatement, FiscalYearStatements, IncomeStatement, Quote, StatementSeries,
};

// ============================================================================
// Test Data Generators
// ============================================================================

/// One fiscal year of internally consistent statements at the given scale.
fn statement_year(fiscal_year: i32, scale: f64) -> FiscalYearStatements {
    FiscalYearStatements {
        fiscal_year,
        income: Some(IncomeStatement {
            revenue: 2.0e9 * scale,
            gross_profit: 0.9e9 * scale,
            operating_income: 0.5e9 * scale,
            net_income: 0.36e9 * scale,
            eps: 3.6 * scale,
            ebitda: 0.6e9 * scale,
            interest_expense: 0.02e9,
            shares_outstanding: 100.0e6,
        }),
        balance: Some(BalanceSheet {
            total_assets: 4.0e9 * scale,
            total_liabilities: 1.6e9 * scale,
            total_equity: 2.4e9 * scale,
            cash: 0.6e9 * scale,
            total_debt: 0.5e9 * scale,
            inventory: 0.2e9 * scale,
            current_assets: 1.2e9 * scale,
            current_liabilities: 0.5e9 * scale,
        }),
        cash_flow: Some(CashFlowStatement {
            operating_cash_flow: 0.45e9 * scale,
            capex: 0.1e9 * scale,
            depreciation: 0.08e9 * scale,
        }),
    }
}

/// A company compounding every line item at `growth` for `years` years.
fn steady_grower(years: usize, growth: f64) -> StatementSeries {
    StatementSeries::new(
        (0..years)
            .map(|i| statement_year(2015 + i as i32, (1.0 + growth).powi(i as i32)))
            .collect(),
    )
}

fn quote_at(price: f64) -> Quote {
    Quote {
        symbol: "DV".to_string(),
        price,
        market_cap: price * 100.0e6,
        pe_ratio: Some(price / 7.0),
        pb_ratio: Some(price / 50.0),
        ps_ratio: Some(3.0),
        dividend_yield: Some(0.015),
        week_52_high: price * 1.25,
        week_52_low: price * 0.75,
        as_of: Utc.with_ymd_and_hms(2025, 6, 2, 20, 0, 0).unwrap(),
    }
}

// ============================================================================
// Pipeline Flow
// ============================================================================

#[test]
fn test_complete_valuation_flow() {
    let series = steady_grower(10, 0.10);
    let quote = quote_at(60.0);

    let snapshot = ValuationEngine::new()
        .analyze(&series, Some(&quote), Some(20_000.0))
        .unwrap();

    // one projected cash flow per configured year
    assert_eq!(
        snapshot.dcf.projected_fcf.len(),
        DcfConfig::default().projection_years
    );
    assert!(snapshot.dcf.is_reliable());
    assert!(snapshot.dcf.intrinsic_value_per_share > 0.0);

    assert!(snapshot.graham.graham_number > 0.0);
    assert!(snapshot.graham.graham_growth_value.is_some());

    assert_eq!(snapshot.moat.dimensions.len(), 5);

    let ratios = &snapshot.ratios;
    assert!(ratios.revenue_cagr.is_some());
    assert!((ratios.revenue_cagr.unwrap() - 0.10).abs() < 0.005);

    let safety = snapshot.safety.as_ref().unwrap();
    assert_eq!(safety.methods_used.len(), 3);
    assert!(safety.effective_intrinsic_value.is_some());
}

#[test]
fn test_combined_methods_carry_stable_labels() {
    let series = steady_grower(10, 0.08);
    let quote = quote_at(60.0);

    let snapshot = ValuationEngine::new()
        .analyze(&series, Some(&quote), None)
        .unwrap();

    let safety = snapshot.safety.unwrap();
    assert!(safety.methods_used.iter().any(|m| m == METHOD_DCF));
    assert!(safety.methods_used.iter().any(|m| m == METHOD_GRAHAM_NUMBER));
}

#[test]
fn test_overpriced_stock_flows_to_overvalued() {
    let series = steady_grower(10, 0.06);
    // far beyond anything the models will estimate
    let quote = quote_at(5_000.0);

    let snapshot = ValuationEngine::new()
        .analyze(&series, Some(&quote), None)
        .unwrap();

    let safety = snapshot.safety.unwrap();
    assert!(safety.margin < -0.25);
    assert_eq!(safety.status, ValuationStatus::Overvalued);
    assert!(safety.recommendation.starts_with("Avoid"));
}

#[test]
fn test_snapshot_serializes_and_round_trips() {
    let series = steady_grower(8, 0.07);
    let quote = quote_at(55.0);

    let snapshot = ValuationEngine::new()
        .analyze(&series, Some(&quote), Some(10_000.0))
        .unwrap();

    let json = serde_json::to_string(&snapshot).unwrap();
    let restored: deep_value::ValuationSnapshot = serde_json::from_str(&json).unwrap();

    assert_eq!(
        restored.dcf.intrinsic_value_per_share,
        snapshot.dcf.intrinsic_value_per_share
    );
    assert_eq!(restored.graham.graham_number, snapshot.graham.graham_number);
    assert_eq!(
        restored.safety.as_ref().unwrap().margin,
        snapshot.safety.as_ref().unwrap().margin
    );
    assert_eq!(restored.quote.unwrap().symbol, "DV");
}

#[test]
fn test_runs_are_deterministic() {
    let series = steady_grower(10, 0.09);
    let quote = quote_at(70.0);
    let engine = ValuationEngine::new();

    let first = engine.analyze(&series, Some(&quote), Some(8_000.0)).unwrap();
    let second = engine.analyze(&series, Some(&quote), Some(8_000.0)).unwrap();

    // byte-identical output for identical input
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn test_sensitivity_grid_spans_the_base_case() {
    let series = steady_grower(10, 0.08);
    let config = DcfConfig::default();

    let base = calculate_dcf(&series, &config).unwrap();
    let grid = sensitivity_analysis(&series, &config).unwrap();

    // cheapest money and fastest growth give the richest valuation
    let optimistic = grid.intrinsic_values[0][4];
    let pessimistic = grid.intrinsic_values[4][0];
    assert!(optimistic >= base.intrinsic_value_per_share);
    assert!(pessimistic <= base.intrinsic_value_per_share);
    assert!(grid
        .intrinsic_values
        .iter()
        .flatten()
        .all(|v| v.is_finite()));
}

// ============================================================================
// Ordering Properties
// ============================================================================

proptest! {
    #[test]
    fn prop_higher_discount_never_raises_value(discount in 0.05f64..0.25) {
        let series = steady_grower(10, 0.08);
        let cheap = calculate_dcf(
            &series,
            &DcfConfig { discount_rate: discount, ..DcfConfig::default() },
        )
        .unwrap();
        let dear = calculate_dcf(
            &series,
            &DcfConfig { discount_rate: discount + 0.02, ..DcfConfig::default() },
        )
        .unwrap();

        prop_assert!(
            dear.intrinsic_value_per_share <= cheap.intrinsic_value_per_share + 1e-9
        );
    }

    #[test]
    fn prop_faster_growth_never_lowers_value(growth in -0.08f64..0.20) {
        let series = steady_grower(10, 0.08);
        let slow = calculate_dcf(
            &series,
            &DcfConfig { growth_override: Some(growth), ..DcfConfig::default() },
        )
        .unwrap();
        let fast = calculate_dcf(
            &series,
            &DcfConfig { growth_override: Some(growth + 0.04), ..DcfConfig::default() },
        )
        .unwrap();

        prop_assert!(
            fast.intrinsic_value_per_share >= slow.intrinsic_value_per_share - 1e-9
        );
    }

    #[test]
    fn prop_margin_shrinks_as_price_rises(price in 1.0f64..300.0) {
        let low = margin_of_safety(150.0, price);
        let high = margin_of_safety(150.0, price + 10.0);

        prop_assert!(high.margin < low.margin);
    }

    #[test]
    fn prop_combined_never_beats_best_single_method(
        a in 10.0f64..200.0,
        b in 10.0f64..200.0,
        price in 10.0f64..150.0,
    ) {
        let estimates = [
            ValuationEstimate::new("first", Some(a)),
            ValuationEstimate::new("second", Some(b)),
        ];
        let combined = combined_margin_of_safety(&estimates, price);
        let best = margin_of_safety(a, price)
            .margin
            .max(margin_of_safety(b, price).margin);

        prop_assert!(combined.margin <= best + 1e-12);
    }
}
