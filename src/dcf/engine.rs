//! Two-stage discounted-cash-flow model.
//!
//! Stage one projects free cash flow over a configurable horizon, linearly
//! fading the first-stage growth rate into the terminal rate; stage two adds
//! a Gordon-growth terminal value. Every conservative bias is explicit: the
//! 20% haircut on estimated growth, the median over growth candidates, the
//! clamps on the operative rate, and the refusal to value companies whose
//! latest free cash flow is not positive.

use tracing::debug;

use super::types::{DcfConfig, DcfValuation, SensitivityMatrix};
use crate::error::{Error, Result};
use crate::metrics;
use crate::statements::StatementSeries;

/// Minimum annual observations for a historical growth candidate.
const MIN_GROWTH_HISTORY_YEARS: usize = 3;
/// Lookback cap for growth candidates.
const GROWTH_LOOKBACK_YEARS: usize = 5;
/// Conservative haircut multiplier applied to the estimated growth rate.
const GROWTH_HAIRCUT: f64 = 0.8;
/// Growth rate assumed when no historical candidate survives.
const DEFAULT_GROWTH_RATE: f64 = 0.05;
/// Bounds on the operative first-stage growth rate.
const MIN_GROWTH_RATE: f64 = -0.10;
const MAX_GROWTH_RATE: f64 = 0.25;
/// Minimum spread kept between discount and terminal growth rates.
const TERMINAL_GROWTH_GAP: f64 = 0.01;
/// Offsets swept along both axes of the sensitivity grid.
const SENSITIVITY_OFFSETS: [f64; 5] = [-0.02, -0.01, 0.0, 0.01, 0.02];

/// Inputs lifted from the most recent fiscal year.
struct ModelInputs {
    starting_fcf: f64,
    net_debt: f64,
    shares_outstanding: f64,
}

impl ModelInputs {
    fn from_series(series: &StatementSeries) -> Result<Self> {
        let latest = series
            .latest()
            .ok_or_else(|| Error::InsufficientData("statement series is empty".into()))?;
        let cash_flow = latest.cash_flow.as_ref().ok_or_else(|| {
            Error::InsufficientData(format!(
                "no cash-flow statement for fiscal year {}",
                latest.fiscal_year
            ))
        })?;
        let balance = latest.balance.as_ref().ok_or_else(|| {
            Error::InsufficientData(format!(
                "no balance sheet for fiscal year {}",
                latest.fiscal_year
            ))
        })?;
        let income = latest.income.as_ref().ok_or_else(|| {
            Error::InsufficientData(format!(
                "no income statement for fiscal year {}",
                latest.fiscal_year
            ))
        })?;
        if income.shares_outstanding <= 0.0 {
            return Err(Error::InsufficientData(format!(
                "non-positive shares outstanding ({}) for fiscal year {}",
                income.shares_outstanding, latest.fiscal_year
            )));
        }

        Ok(Self {
            starting_fcf: cash_flow.free_cash_flow(),
            net_debt: balance.net_debt(),
            shares_outstanding: income.shares_outstanding,
        })
    }
}

/// Run the DCF model for a statement series under the given configuration.
///
/// Returns `Err` only for out-of-range configuration or upstream data too
/// incomplete to run at all; a non-positive starting free cash flow yields
/// the zeroed refusal sentinel instead (see [`DcfValuation::is_reliable`]).
pub fn calculate_dcf(series: &StatementSeries, config: &DcfConfig) -> Result<DcfValuation> {
    config.validate()?;
    let inputs = ModelInputs::from_series(series)?;
    let (growth_rate, candidates) = operative_growth(series, config);
    Ok(run_model(
        &inputs,
        growth_rate,
        candidates,
        config.discount_rate,
        config.terminal_growth_rate,
        config.projection_years,
    ))
}

/// Recompute the full model over a 5×5 grid: the configured discount rate
/// ±0.02/±0.01 against the base run's operative growth rate ±0.02/±0.01.
///
/// Grid cells deliberately skip config re-validation (the edges of the grid
/// may leave the caller-facing ranges); every model clamp still applies, and
/// the 25 intrinsic values are returned unmodified.
pub fn sensitivity_analysis(
    series: &StatementSeries,
    config: &DcfConfig,
) -> Result<SensitivityMatrix> {
    config.validate()?;
    let inputs = ModelInputs::from_series(series)?;
    let (base_growth, _) = operative_growth(series, config);

    let discount_rates: Vec<f64> = SENSITIVITY_OFFSETS
        .iter()
        .map(|offset| config.discount_rate + offset)
        .collect();
    let growth_rates: Vec<f64> = SENSITIVITY_OFFSETS
        .iter()
        .map(|offset| base_growth + offset)
        .collect();

    let intrinsic_values = discount_rates
        .iter()
        .map(|&discount_rate| {
            growth_rates
                .iter()
                .map(|&growth_rate| {
                    run_model(
                        &inputs,
                        growth_rate,
                        Vec::new(),
                        discount_rate,
                        config.terminal_growth_rate,
                        config.projection_years,
                    )
                    .intrinsic_value_per_share
                })
                .collect()
        })
        .collect();

    Ok(SensitivityMatrix {
        discount_rates,
        growth_rates,
        intrinsic_values,
    })
}

/// First-stage growth rate before clamping, plus the surviving candidates.
fn operative_growth(series: &StatementSeries, config: &DcfConfig) -> (f64, Vec<f64>) {
    match config.growth_override {
        Some(rate) => (rate, Vec::new()),
        None => estimate_growth(series),
    }
}

/// Estimate first-stage growth from FCF, revenue and EPS history.
///
/// Each candidate CAGR needs at least three annual observations with
/// strictly positive endpoints. The median of the survivors (robust to one
/// outlier series) gets a 20% haircut; with no survivors the estimate falls
/// back to 5%.
fn estimate_growth(series: &StatementSeries) -> (f64, Vec<f64>) {
    let mut candidates = Vec::new();
    let histories = [
        series.fcf_history(),
        series.revenue_history(),
        series.eps_history(),
    ];
    for history in &histories {
        if history.len() >= MIN_GROWTH_HISTORY_YEARS {
            if let Some(rate) = metrics::series_cagr(history, GROWTH_LOOKBACK_YEARS) {
                candidates.push(rate);
            }
        }
    }

    match metrics::median(&candidates) {
        Some(median) => (median * GROWTH_HAIRCUT, candidates),
        None => {
            debug!("no usable growth history, assuming default growth");
            (DEFAULT_GROWTH_RATE, candidates)
        }
    }
}

/// Project, discount and aggregate. `growth_rate` may arrive unclamped.
fn run_model(
    inputs: &ModelInputs,
    growth_rate: f64,
    growth_candidates: Vec<f64>,
    discount_rate: f64,
    terminal_growth_rate: f64,
    projection_years: usize,
) -> DcfValuation {
    if inputs.starting_fcf <= 0.0 {
        debug!(
            starting_fcf = inputs.starting_fcf,
            "non-positive starting free cash flow, refusing to estimate"
        );
        return DcfValuation::default();
    }

    let growth_rate = growth_rate.clamp(MIN_GROWTH_RATE, MAX_GROWTH_RATE);
    let terminal_growth = terminal_growth_rate.min(discount_rate - TERMINAL_GROWTH_GAP);

    let mut projected_fcf = Vec::with_capacity(projection_years);
    let mut pv_of_fcf = 0.0;
    let mut fcf = inputs.starting_fcf;
    for year in 1..=projection_years {
        let fraction = year as f64 / projection_years as f64;
        let rate = growth_rate + (terminal_growth - growth_rate) * fraction;
        fcf *= 1.0 + rate;
        projected_fcf.push(fcf);
        pv_of_fcf += fcf / (1.0 + discount_rate).powi(year as i32);
    }

    let terminal_fcf = fcf * (1.0 + terminal_growth);
    let terminal_value = terminal_fcf / (discount_rate - terminal_growth);
    let pv_of_terminal_value = terminal_value / (1.0 + discount_rate).powi(projection_years as i32);

    let enterprise_value = pv_of_fcf + pv_of_terminal_value;
    let equity_value = enterprise_value - inputs.net_debt;
    let intrinsic_value_per_share = (equity_value / inputs.shares_outstanding).max(0.0);

    DcfValuation {
        intrinsic_value_per_share,
        pv_of_fcf,
        terminal_value,
        pv_of_terminal_value,
        enterprise_value,
        equity_value,
        projected_fcf,
        starting_fcf: inputs.starting_fcf,
        growth_rate,
        growth_candidates,
        discount_rate,
        terminal_growth_rate: terminal_growth,
        projection_years,
        net_debt: inputs.net_debt,
        shares_outstanding: inputs.shares_outstanding,
    }
}
