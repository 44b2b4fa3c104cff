//! Bracket lookup and effective rate.
//!
//! ```text
//! effective rate = max(0, (RBT12 × nominal rate / 100 − deduction) / RBT12 × 100)
//! ```
//!
//! The effective rate is zero when RBT12 is zero.

use rust_decimal::Decimal;
use tracing::{debug, warn};

use super::common::{max, percent_of, share_of};
use super::error::{CalculationError, checked, ensure_non_negative};
use crate::config::CeilingPolicy;
use crate::models::{Annex, AnnexTables, RateResolution};

/// Computes the effective rate for revenue taxed at `nominal_rate` with
/// `deduction` subtracted.
///
/// # Errors
///
/// Returns [`CalculationError::Overflow`] if `revenue × nominal_rate` does not
/// fit in a `Decimal`.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use simples_core::calculations::effective_rate;
///
/// assert_eq!(effective_rate(dec!(1000000), dec!(10.70), dec!(22500)), Ok(dec!(8.45)));
/// assert_eq!(effective_rate(dec!(0), dec!(10.70), dec!(22500)), Ok(dec!(0)));
/// ```
pub fn effective_rate(
    revenue: Decimal,
    nominal_rate: Decimal,
    deduction: Decimal,
) -> Result<Decimal, CalculationError> {
    if revenue.is_zero() {
        return Ok(Decimal::ZERO);
    }
    let gross = checked("effective rate", percent_of(revenue, nominal_rate))?;
    let tax = checked("effective rate", gross.checked_sub(deduction))?;
    let rate = checked("effective rate", share_of(tax, revenue))?;
    Ok(max(rate, Decimal::ZERO))
}

/// Finds the bracket for `revenue` in `annex` and computes its effective rate.
///
/// Brackets are scanned in order and the first one whose upper bound is at
/// or above `revenue` wins; the lower bound is not checked. On validated
/// tables this is the same as `lower <= revenue <= upper` for every amount
/// in whole cents. The difference is a sub-cent amount in the gap between
/// two brackets (180,000.005 in annex I), which goes to the upper bracket
/// instead of matching none. Revenue above the table is handled according
/// to `policy`.
///
/// # Errors
///
/// * [`CalculationError::InvalidInput`] if `revenue` is negative.
/// * [`CalculationError::RevenueAboveCeiling`] if `revenue` exceeds the table
///   and `policy` is [`CeilingPolicy::Reject`].
/// * [`CalculationError::Overflow`] if `revenue` is too large to apply the
///   bracket's nominal rate.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use simples_core::calculations::resolve_rate;
/// use simples_core::{Annex, AnnexTables, CeilingPolicy};
///
/// let tables = AnnexTables::default();
/// let resolution =
///     resolve_rate(&tables, dec!(1000000), Annex::I, CeilingPolicy::LastBracket).unwrap();
///
/// assert_eq!(resolution.bracket_position, 4);
/// assert_eq!(resolution.deduction, dec!(22500));
/// assert_eq!(resolution.effective_rate, dec!(8.45));
/// ```
pub fn resolve_rate(
    tables: &AnnexTables,
    revenue: Decimal,
    annex: Annex,
    policy: CeilingPolicy,
) -> Result<RateResolution, CalculationError> {
    let revenue = ensure_non_negative("accumulated revenue", revenue)?;
    let brackets = tables.get(annex).brackets();

    let found = brackets
        .iter()
        .position(|bracket| revenue <= bracket.upper);

    let (index, above_ceiling) = match found {
        Some(index) => (index, false),
        None => {
            let last = brackets.len() - 1;
            let ceiling = brackets[last].upper;
            if policy == CeilingPolicy::Reject {
                return Err(CalculationError::RevenueAboveCeiling {
                    annex,
                    revenue,
                    ceiling,
                });
            }
            warn!(%annex, %revenue, %ceiling, "revenue above annex ceiling, using last bracket");
            (last, true)
        }
    };

    let bracket = brackets[index];
    let rate = effective_rate(revenue, bracket.nominal_rate, bracket.deduction)?;

    debug!(
        %annex,
        %revenue,
        bracket = index + 1,
        nominal_rate = %bracket.nominal_rate,
        deduction = %bracket.deduction,
        effective_rate = %rate,
        "resolved rate"
    );

    Ok(RateResolution {
        annex,
        effective_rate: rate,
        deduction: bracket.deduction,
        bracket,
        bracket_position: index + 1,
        above_ceiling,
    })
}
