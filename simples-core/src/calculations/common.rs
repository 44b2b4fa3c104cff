//! Shared arithmetic helpers for the Simples Nacional calculations.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

const HUNDRED: Decimal = dec!(100);

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// Values at exactly 0.005 are rounded away from zero, which is how amounts
/// in reais are rounded on the DAS.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use simples_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(8449.994)), dec!(8449.99));
/// assert_eq!(round_half_up(dec!(8449.995)), dec!(8450.00));
/// assert_eq!(round_half_up(dec!(-12.345)), dec!(-12.35)); // Away from zero
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

/// Returns the maximum of two decimal values.
///
/// ```
/// use rust_decimal_macros::dec;
/// use simples_core::calculations::common::max;
///
/// assert_eq!(max(dec!(-3.2), dec!(0)), dec!(0));
/// ```
pub fn max(
    a: Decimal,
    b: Decimal,
) -> Decimal {
    if a > b { a } else { b }
}

/// Applies a percentage rate to an amount: `amount × rate / 100`.
///
/// Returns `None` when the product does not fit in a [`Decimal`].
///
/// ```
/// use rust_decimal::Decimal;
/// use rust_decimal_macros::dec;
/// use simples_core::calculations::common::percent_of;
///
/// assert_eq!(percent_of(dec!(1000000), dec!(10.70)), Some(dec!(107000)));
/// assert_eq!(percent_of(Decimal::MAX, dec!(30)), None);
/// ```
pub fn percent_of(
    amount: Decimal,
    rate: Decimal,
) -> Option<Decimal> {
    amount.checked_mul(rate)?.checked_div(HUNDRED)
}

/// Expresses `part` as a percentage of `whole`, or zero when `whole` is zero.
///
/// Returns `None` when the quotient does not fit in a [`Decimal`].
pub fn share_of(
    part: Decimal,
    whole: Decimal,
) -> Option<Decimal> {
    if whole.is_zero() {
        return Some(Decimal::ZERO);
    }
    part.checked_div(whole)?.checked_mul(HUNDRED)
}
