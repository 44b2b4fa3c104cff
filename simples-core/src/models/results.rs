use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Activity, Annex, Bracket};

/// Outcome of looking up accumulated revenue in an annex table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateResolution {
    pub annex: Annex,

    /// Effective rate as a percentage, never negative.
    pub effective_rate: Decimal,

    /// Fixed deduction of the matched bracket.
    pub deduction: Decimal,

    pub bracket: Bracket,

    /// 1-based position of the bracket inside its table.
    pub bracket_position: usize,

    /// Set when the revenue exceeded the table and the last bracket was used.
    pub above_ceiling: bool,
}

/// Tax figures for one alternative annex.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonEntry {
    pub effective_rate: Decimal,
    pub tax_due: Decimal,

    /// `tax_due` minus the selected annex's tax due. Positive means the
    /// alternative would cost more.
    pub difference: Decimal,
}

/// Side-by-side figures for every annex other than the selected one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comparison {
    pub selected: Annex,
    pub selected_tax_due: Decimal,
    pub entries: BTreeMap<Annex, ComparisonEntry>,
}

impl Comparison {
    /// The alternative with the lowest tax due, if any is cheaper than the
    /// selected annex.
    pub fn cheapest_alternative(&self) -> Option<(Annex, &ComparisonEntry)> {
        self.entries
            .iter()
            .filter(|(_, entry)| entry.difference < Decimal::ZERO)
            .min_by_key(|(_, entry)| entry.tax_due)
            .map(|(annex, entry)| (*annex, entry))
    }
}

/// How the month's revenue splits between tax and what the business keeps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevenueDistribution {
    pub tax_due: Decimal,
    pub net_revenue: Decimal,

    /// Share of the month's revenue paid as tax, as a percentage.
    pub tax_share: Decimal,
}

/// Raw inputs for one assessment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationRequest {
    pub company_name: Option<String>,
    pub activity: Activity,

    /// Gross revenue over the trailing twelve months (RBT12).
    pub accumulated_revenue: Decimal,

    /// Payroll over the trailing twelve months.
    pub payroll: Decimal,

    pub month_revenue: Decimal,
}

/// Complete result of assessing one [`CalculationRequest`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assessment {
    pub company_name: Option<String>,
    pub activity: Activity,

    /// Only computed for Factor R services.
    pub factor_r: Option<Decimal>,

    pub annex: Annex,
    pub resolution: RateResolution,
    pub accumulated_revenue: Decimal,
    pub month_revenue: Decimal,
    pub tax_due: Decimal,
    pub distribution: RevenueDistribution,
    pub comparison: Comparison,
}
