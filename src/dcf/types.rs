//! DCF model configuration and result types.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

const MIN_DISCOUNT_RATE: f64 = 0.01;
const MAX_DISCOUNT_RATE: f64 = 0.30;
const MIN_TERMINAL_GROWTH: f64 = 0.0;
const MAX_TERMINAL_GROWTH: f64 = 0.10;
const MIN_PROJECTION_YEARS: usize = 5;
const MAX_PROJECTION_YEARS: usize = 20;

/// Configuration for the two-stage DCF model.
///
/// All rates are annual fractions. Callers validate at the boundary via
/// [`DcfConfig::validate`]; the model itself assumes an in-range config.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DcfConfig {
    /// Discount rate, valid range [0.01, 0.30]
    pub discount_rate: f64,
    /// Perpetual growth rate of the terminal stage, valid range [0, 0.10]
    pub terminal_growth_rate: f64,
    /// Explicitly projected years, valid range [5, 20]
    pub projection_years: usize,
    /// First-stage growth rate overriding historical estimation
    pub growth_override: Option<f64>,
}

impl Default for DcfConfig {
    fn default() -> Self {
        Self {
            discount_rate: 0.10,
            terminal_growth_rate: 0.025,
            projection_years: 10,
            growth_override: None,
        }
    }
}

impl DcfConfig {
    /// Validate every field against its documented range.
    pub fn validate(&self) -> Result<()> {
        if !(MIN_DISCOUNT_RATE..=MAX_DISCOUNT_RATE).contains(&self.discount_rate) {
            return Err(Error::InvalidConfig(format!(
                "discount rate {} outside [{}, {}]",
                self.discount_rate, MIN_DISCOUNT_RATE, MAX_DISCOUNT_RATE
            )));
        }
        if !(MIN_TERMINAL_GROWTH..=MAX_TERMINAL_GROWTH).contains(&self.terminal_growth_rate) {
            return Err(Error::InvalidConfig(format!(
                "terminal growth rate {} outside [{}, {}]",
                self.terminal_growth_rate, MIN_TERMINAL_GROWTH, MAX_TERMINAL_GROWTH
            )));
        }
        if !(MIN_PROJECTION_YEARS..=MAX_PROJECTION_YEARS).contains(&self.projection_years) {
            return Err(Error::InvalidConfig(format!(
                "projection years {} outside [{}, {}]",
                self.projection_years, MIN_PROJECTION_YEARS, MAX_PROJECTION_YEARS
            )));
        }
        Ok(())
    }
}

/// Outcome of one DCF run, carrying the answer and every assumption used.
///
/// When the most recent free cash flow is not positive the model refuses to
/// estimate and `Default` (everything zeroed, empty projection) is returned;
/// [`DcfValuation::is_reliable`] distinguishes that sentinel from a genuine
/// zero-value estimate.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DcfValuation {
    /// Estimated intrinsic value per share, floored at 0
    pub intrinsic_value_per_share: f64,
    /// Present value of the explicitly projected free cash flows
    pub pv_of_fcf: f64,
    /// Gordon-growth terminal value at the projection horizon
    pub terminal_value: f64,
    /// Present value of the terminal value
    pub pv_of_terminal_value: f64,
    /// pv_of_fcf + pv_of_terminal_value
    pub enterprise_value: f64,
    /// Enterprise value minus net debt
    pub equity_value: f64,
    /// Projected free cash flow for years 1..=N
    pub projected_fcf: Vec<f64>,
    /// Most recent recomputed free cash flow, the projection base
    pub starting_fcf: f64,
    /// First-stage growth rate actually used, after haircut and clamping
    pub growth_rate: f64,
    /// Historical CAGR candidates behind the estimate; empty when the rate
    /// was overridden or defaulted
    pub growth_candidates: Vec<f64>,
    /// Discount rate used
    pub discount_rate: f64,
    /// Terminal growth rate after the discount-rate cap
    pub terminal_growth_rate: f64,
    /// Projection horizon in years
    pub projection_years: usize,
    /// Net debt subtracted from enterprise value
    pub net_debt: f64,
    /// Diluted shares behind the per-share figure
    pub shares_outstanding: f64,
}

impl DcfValuation {
    /// Whether the model produced an estimate at all.
    ///
    /// A refusal leaves every field zeroed, including the projection vector;
    /// a genuine estimate always projects at least five years.
    pub fn is_reliable(&self) -> bool {
        !self.projected_fcf.is_empty()
    }
}

/// 5×5 sensitivity grid around a base DCF run.
///
/// Diagnostic output only: it shows how fragile the point estimate is and
/// feeds no downstream decision.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensitivityMatrix {
    /// Discount rates along the row axis
    pub discount_rates: Vec<f64>,
    /// First-stage growth rates along the column axis
    pub growth_rates: Vec<f64>,
    /// Intrinsic values per share; `intrinsic_values[i][j]` pairs
    /// `discount_rates[i]` with `growth_rates[j]`
    pub intrinsic_values: Vec<Vec<f64>>,
}
