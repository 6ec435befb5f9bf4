//! Graham valuation and defensive-checklist types.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Configuration for the Graham growth formula.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrahamConfig {
    /// Current AAA corporate bond yield as a fraction (0.04 = 4%)
    pub bond_yield: f64,
}

impl Default for GrahamConfig {
    fn default() -> Self {
        Self { bond_yield: 0.04 }
    }
}

impl GrahamConfig {
    /// Validate the bond yield: a fraction strictly between 0 and 1.
    pub fn validate(&self) -> Result<()> {
        if !(self.bond_yield > 0.0 && self.bond_yield < 1.0) {
            return Err(Error::InvalidConfig(format!(
                "bond yield {} must be a fraction in (0, 1)",
                self.bond_yield
            )));
        }
        Ok(())
    }
}

/// One of Graham's seven defensive-investor criteria.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DefensiveCriterion {
    /// Market cap large enough to matter
    AdequateSize,
    /// Current ratio at or above 2
    StrongFinancialCondition,
    /// Positive net income across the available history
    EarningsStability,
    /// Currently pays a dividend
    DividendRecord,
    /// EPS up at least a third over the lookback window
    EarningsGrowth,
    /// P/E at or below 15
    ModeratePriceToEarnings,
    /// P/B at or below 1.5, or P/E × P/B at or below 22.5
    ModeratePriceToAssets,
}

impl std::fmt::Display for DefensiveCriterion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AdequateSize => write!(f, "Adequate size"),
            Self::StrongFinancialCondition => write!(f, "Strong financial condition"),
            Self::EarningsStability => write!(f, "Earnings stability"),
            Self::DividendRecord => write!(f, "Dividend record"),
            Self::EarningsGrowth => write!(f, "Earnings growth"),
            Self::ModeratePriceToEarnings => write!(f, "Moderate price-to-earnings"),
            Self::ModeratePriceToAssets => write!(f, "Moderate price-to-assets"),
        }
    }
}

/// Verdict on a single criterion with its justification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CriterionResult {
    /// Which criterion was checked
    pub criterion: DefensiveCriterion,
    /// Whether it passed
    pub passed: bool,
    /// Human-readable justification for the verdict
    pub detail: String,
}

/// The seven-point defensive-investor checklist.
///
/// A company qualifies only when every criterion passes; partial passes are
/// still reported so callers can show which checks failed and why.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefensiveChecklist {
    /// Per-criterion verdicts in fixed order
    pub criteria: Vec<CriterionResult>,
}

impl DefensiveChecklist {
    /// Number of criteria that passed.
    pub fn passed_count(&self) -> usize {
        self.criteria.iter().filter(|c| c.passed).count()
    }

    /// Whether every criterion passed.
    pub fn passes_all(&self) -> bool {
        self.criteria.iter().all(|c| c.passed)
    }

    /// Look up the verdict for one criterion.
    pub fn result(&self, criterion: DefensiveCriterion) -> Option<&CriterionResult> {
        self.criteria.iter().find(|c| c.criterion == criterion)
    }
}

/// Complete Graham engine output for one company.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrahamAnalysis {
    /// sqrt(22.5 × EPS × book value per share); 0 when either input ≤ 0
    pub graham_number: f64,
    /// Growth-formula value; `None` when EPS ≤ 0, the bond yield ≤ 0, or
    /// EPS growth is unavailable or non-positive
    pub graham_growth_value: Option<f64>,
    /// Latest diluted EPS fed into both formulas
    pub eps: f64,
    /// Book value per share behind the Graham Number
    pub book_value_per_share: f64,
    /// Historical EPS CAGR fed into the growth formula
    pub eps_cagr: Option<f64>,
    /// Bond yield assumed by the growth formula
    pub bond_yield: f64,
    /// Seven-point defensive checklist
    pub checklist: DefensiveChecklist,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_validation() {
        assert!(GrahamConfig::default().validate().is_ok());

        let test_cases = vec![0.0, -0.02, 1.0, f64::NAN];
        for bond_yield in test_cases {
            let config = GrahamConfig { bond_yield };
            assert!(
                config.validate().unwrap_err().is_invalid_config(),
                "yield {} should be rejected",
                bond_yield
            );
        }
    }

    #[test]
    fn test_checklist_helpers() {
        let checklist = DefensiveChecklist {
            criteria: vec![
                CriterionResult {
                    criterion: DefensiveCriterion::AdequateSize,
                    passed: true,
                    detail: "large enough".into(),
                },
                CriterionResult {
                    criterion: DefensiveCriterion::DividendRecord,
                    passed: false,
                    detail: "no dividend".into(),
                },
            ],
        };

        assert_eq!(checklist.passed_count(), 1);
        assert!(!checklist.passes_all());
        assert!(checklist
            .result(DefensiveCriterion::DividendRecord)
            .is_some_and(|c| !c.passed));
        assert!(checklist.result(DefensiveCriterion::EarningsGrowth).is_none());
    }
}
