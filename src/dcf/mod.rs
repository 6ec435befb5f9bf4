//! Two-stage discounted-cash-flow valuation.
//!
//! # Model
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │ Stage 1: explicit projection (5-20 years)                       │
//! │   growth fades linearly from the first-stage rate to the        │
//! │   terminal rate; each year's FCF is discounted individually     │
//! ├─────────────────────────────────────────────────────────────────┤
//! │ Stage 2: Gordon-growth terminal value at the horizon            │
//! ├─────────────────────────────────────────────────────────────────┤
//! │ Equity bridge: enterprise value − net debt, divided by shares   │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Conservative bias is built in: estimated growth takes the median of the
//! surviving historical candidates with a 20% haircut, the operative rate is
//! clamped to [−10%, +25%], terminal growth is capped below the discount
//! rate, and a company whose latest free cash flow is not positive gets the
//! zeroed refusal sentinel rather than an extrapolated number.

pub mod engine;
pub mod types;

pub use engine::{calculate_dcf, sensitivity_analysis};
pub use types::{DcfConfig, DcfValuation, SensitivityMatrix};
