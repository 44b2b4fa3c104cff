//! Monthly DAS amount.

use rust_decimal::Decimal;

use super::common::{percent_of, round_half_up, share_of};
use super::error::{CalculationError, checked, ensure_non_negative};
use crate::models::RevenueDistribution;

/// Computes the DAS due for the month: `month_revenue × effective_rate / 100`,
/// rounded half-up to the cent.
///
/// # Errors
///
/// * [`CalculationError::InvalidInput`] if `month_revenue` or
///   `effective_rate` is negative.
/// * [`CalculationError::Overflow`] if the product does not fit in a `Decimal`.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use simples_core::calculations::compute_tax;
///
/// assert_eq!(compute_tax(dec!(100000), dec!(8.45)).unwrap(), dec!(8450.00));
/// ```
pub fn compute_tax(
    month_revenue: Decimal,
    effective_rate: Decimal,
) -> Result<Decimal, CalculationError> {
    let month_revenue = ensure_non_negative("month revenue", month_revenue)?;
    let effective_rate = ensure_non_negative("effective rate", effective_rate)?;

    let tax_due = checked("DAS", percent_of(month_revenue, effective_rate))?;
    Ok(round_half_up(tax_due))
}

/// Splits the month's revenue into tax and net revenue.
///
/// # Errors
///
/// Returns [`CalculationError::Overflow`] if `tax_due` is so far above
/// `month_revenue` that the net or the share does not fit in a `Decimal`.
pub fn revenue_distribution(
    month_revenue: Decimal,
    tax_due: Decimal,
) -> Result<RevenueDistribution, CalculationError> {
    Ok(RevenueDistribution {
        tax_due,
        net_revenue: checked("net revenue", month_revenue.checked_sub(tax_due))?,
        tax_share: checked("tax share", share_of(tax_due, month_revenue))?,
    })
}
