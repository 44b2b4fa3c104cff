//! What the business would pay under each of the other annexes.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use tracing::debug;

use super::das::compute_tax;
use super::error::CalculationError;
use super::rate::resolve_rate;
use crate::config::CeilingPolicy;
use crate::models::{Annex, AnnexTables, Comparison, ComparisonEntry};

/// Computes rate and tax due for every annex except `selected`, using the
/// same revenue figures.
///
/// Each alternative is resolved independently; the result never changes the
/// selected annex's figures.
///
/// # Errors
///
/// Propagates any [`CalculationError`] from rate resolution or tax
/// computation, e.g. negative inputs or revenue above the ceiling under
/// [`CeilingPolicy::Reject`].
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use simples_core::calculations::compare;
/// use simples_core::{Annex, AnnexTables, CeilingPolicy};
///
/// let tables = AnnexTables::default();
/// let comparison =
///     compare(&tables, dec!(1000000), dec!(100000), Annex::I, CeilingPolicy::LastBracket)
///         .unwrap();
///
/// assert_eq!(comparison.entries.len(), 4);
/// assert!(!comparison.entries.contains_key(&Annex::I));
/// ```
pub fn compare(
    tables: &AnnexTables,
    accumulated_revenue: Decimal,
    month_revenue: Decimal,
    selected: Annex,
    policy: CeilingPolicy,
) -> Result<Comparison, CalculationError> {
    let selected_rate = resolve_rate(tables, accumulated_revenue, selected, policy)?;
    let selected_tax_due = compute_tax(month_revenue, selected_rate.effective_rate)?;

    let mut entries = BTreeMap::new();
    for annex in selected.others() {
        let resolution = resolve_rate(tables, accumulated_revenue, annex, policy)?;
        let tax_due = compute_tax(month_revenue, resolution.effective_rate)?;

        entries.insert(
            annex,
            ComparisonEntry {
                effective_rate: resolution.effective_rate,
                tax_due,
                difference: tax_due - selected_tax_due,
            },
        );
    }

    debug!(%selected, alternatives = entries.len(), "compared annexes");

    Ok(Comparison {
        selected,
        selected_tax_due,
        entries,
    })
}
