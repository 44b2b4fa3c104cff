use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::Annex;

/// Errors that can occur while classifying or computing Simples Nacional tax.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CalculationError {
    /// A monetary input was negative.
    #[error("{field} must not be negative, got {value}")]
    InvalidInput { field: &'static str, value: Decimal },

    #[error("unknown activity '{0}', expected commerce, industry or services")]
    UnknownActivity(String),

    #[error("unknown service subtype '{0}', expected factor-r, specialized or other")]
    UnknownServiceSubtype(String),

    #[error("services activity requires a service subtype")]
    MissingServiceSubtype,

    /// A Factor R service was classified without a Factor R value.
    #[error("factor R is required to classify factor-r services")]
    MissingFactorR,

    /// Both accumulated revenue and payroll were zero.
    #[error("accumulated revenue or payroll must be provided")]
    NothingToAssess,

    /// An intermediate result does not fit in a `Decimal`.
    #[error("{operation} overflows for the given amounts")]
    Overflow { operation: &'static str },

    #[error("accumulated revenue {revenue} exceeds annex {annex} ceiling of {ceiling}")]
    RevenueAboveCeiling {
        annex: Annex,
        revenue: Decimal,
        ceiling: Decimal,
    },
}

/// Turns a failed checked operation into [`CalculationError::Overflow`].
pub(crate) fn checked(
    operation: &'static str,
    value: Option<Decimal>,
) -> Result<Decimal, CalculationError> {
    value.ok_or(CalculationError::Overflow { operation })
}

/// Fails with [`CalculationError::InvalidInput`] when `value` is negative.
pub(crate) fn ensure_non_negative(
    field: &'static str,
    value: Decimal,
) -> Result<Decimal, CalculationError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(CalculationError::InvalidInput { field, value });
    }
    Ok(value)
}
