//! Annex classification.

use rust_decimal::Decimal;
use tracing::debug;

use super::error::CalculationError;
use crate::models::{Activity, Annex, ServiceSubtype};

/// Maps an activity to its annex.
///
/// `factor_r` is only read for [`ServiceSubtype::FactorR`] services, which go
/// to annex III when it reaches `threshold` and to annex V otherwise.
///
/// # Errors
///
/// Returns [`CalculationError::MissingFactorR`] when a Factor R service is
/// classified without a Factor R value.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use simples_core::calculations::classify;
/// use simples_core::{Activity, Annex, ServiceSubtype};
///
/// let services = Activity::Services(ServiceSubtype::FactorR);
///
/// assert_eq!(classify(services, Some(dec!(0.30)), dec!(0.28)).unwrap(), Annex::III);
/// assert_eq!(classify(services, Some(dec!(0.10)), dec!(0.28)).unwrap(), Annex::V);
/// ```
pub fn classify(
    activity: Activity,
    factor_r: Option<Decimal>,
    threshold: Decimal,
) -> Result<Annex, CalculationError> {
    let annex = match activity {
        Activity::Commerce => Annex::I,
        Activity::Industry => Annex::II,
        Activity::Services(ServiceSubtype::Specialized) => Annex::IV,
        Activity::Services(ServiceSubtype::Other) => Annex::V,
        Activity::Services(ServiceSubtype::FactorR) => {
            let factor_r = factor_r.ok_or(CalculationError::MissingFactorR)?;
            if factor_r >= threshold { Annex::III } else { Annex::V }
        }
    };

    debug!(%activity, ?factor_r, %annex, "classified activity");
    Ok(annex)
}
