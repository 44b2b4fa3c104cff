//! Factor R: trailing-twelve-month payroll over trailing-twelve-month revenue.
//!
//! Zero inputs are special-cased so no division by zero happens and the
//! classification still lands where it should:
//!
//! | Revenue | Payroll | Factor R |
//! |---------|---------|----------|
//! | 0       | > 0     | 0.28     |
//! | > 0     | 0       | 0.01     |
//! | 0       | 0       | 0        |
//! | > 0     | > 0     | payroll / revenue (not clamped) |

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::debug;

use super::error::{CalculationError, checked, ensure_non_negative};

/// Factor R reported for a business with payroll but no revenue yet.
pub const PAYROLL_WITHOUT_REVENUE: Decimal = dec!(0.28);

/// Factor R reported for a business with revenue but no payroll.
pub const REVENUE_WITHOUT_PAYROLL: Decimal = dec!(0.01);

/// Computes Factor R from trailing-twelve-month payroll and revenue.
///
/// # Errors
///
/// * [`CalculationError::InvalidInput`] if either amount is negative.
/// * [`CalculationError::Overflow`] if the ratio does not fit in a `Decimal`.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use simples_core::calculations::compute_factor_r;
///
/// assert_eq!(compute_factor_r(dec!(50), dec!(200)).unwrap(), dec!(0.25));
/// assert_eq!(compute_factor_r(dec!(100), dec!(0)).unwrap(), dec!(0.28));
/// ```
pub fn compute_factor_r(
    payroll: Decimal,
    revenue: Decimal,
) -> Result<Decimal, CalculationError> {
    let payroll = ensure_non_negative("payroll", payroll)?;
    let revenue = ensure_non_negative("accumulated revenue", revenue)?;

    let factor_r = match (revenue.is_zero(), payroll.is_zero()) {
        (true, false) => PAYROLL_WITHOUT_REVENUE,
        (false, true) => REVENUE_WITHOUT_PAYROLL,
        (true, true) => Decimal::ZERO,
        (false, false) => checked("factor R", payroll.checked_div(revenue))?,
    };

    debug!(%payroll, %revenue, %factor_r, "computed factor R");
    Ok(factor_r)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn both_zero_is_zero() {
        assert_eq!(compute_factor_r(dec!(0), dec!(0)), Ok(dec!(0)));
    }

    #[test]
    fn payroll_without_revenue_meets_threshold() {
        assert_eq!(compute_factor_r(dec!(100), dec!(0)), Ok(dec!(0.28)));
    }

    #[test]
    fn revenue_without_payroll_fails_threshold() {
        assert_eq!(compute_factor_r(dec!(0), dec!(100)), Ok(dec!(0.01)));
    }

    #[test]
    fn ratio_of_payroll_to_revenue() {
        assert_eq!(compute_factor_r(dec!(50), dec!(200)), Ok(dec!(0.25)));
    }

    #[test]
    fn ratio_is_not_clamped_above_one() {
        assert_eq!(compute_factor_r(dec!(300), dec!(200)), Ok(dec!(1.5)));
    }

    #[test]
    fn ratio_too_large_is_an_error() {
        assert_eq!(
            compute_factor_r(dec!(1e27), dec!(0.001)),
            Err(CalculationError::Overflow {
                operation: "factor R"
            })
        );
    }

    #[test]
    fn negative_payroll_is_rejected() {
        assert_eq!(
            compute_factor_r(dec!(-1), dec!(200)),
            Err(CalculationError::InvalidInput {
                field: "payroll",
                value: dec!(-1),
            })
        );
    }

    #[test]
    fn negative_revenue_is_rejected() {
        assert!(matches!(
            compute_factor_r(dec!(10), dec!(-200)),
            Err(CalculationError::InvalidInput {
                field: "accumulated revenue",
                ..
            })
        ));
    }
}
