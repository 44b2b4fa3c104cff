//! Tunable calculator settings.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Factor R at or above which ratio-based services fall into annex III.
pub const FACTOR_R_THRESHOLD: Decimal = dec!(0.28);

/// What to do when accumulated revenue exceeds an annex table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CeilingPolicy {
    /// Apply the table's last bracket.
    #[default]
    LastBracket,
    /// Fail with [`CalculationError::RevenueAboveCeiling`](crate::calculations::CalculationError::RevenueAboveCeiling).
    Reject,
}

impl CeilingPolicy {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "last-bracket" => Some(Self::LastBracket),
            "reject" => Some(Self::Reject),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CalculatorConfig {
    pub factor_r_threshold: Decimal,
    pub ceiling_policy: CeilingPolicy,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            factor_r_threshold: FACTOR_R_THRESHOLD,
            ceiling_policy: CeilingPolicy::default(),
        }
    }
}
