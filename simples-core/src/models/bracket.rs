use std::borrow::Cow;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::Annex;

/// Upper limit of accumulated revenue covered by every annex table.
pub const REVENUE_CEILING: Decimal = dec!(4800000);

/// Gap between one bracket's upper bound and the next one's lower bound.
const CENT: Decimal = dec!(0.01);

/// Errors raised when a bracket table breaks the coverage rules.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TableError {
    #[error("annex {0} has no brackets")]
    EmptyTable(Annex),

    #[error("annex {0} is missing from the table set")]
    MissingAnnex(Annex),

    #[error("annex {annex} must start at zero, first bracket starts at {lower}")]
    DoesNotStartAtZero { annex: Annex, lower: Decimal },

    #[error("annex {annex} bracket {position} has lower bound {lower} above upper bound {upper}")]
    InvertedBracket {
        annex: Annex,
        position: usize,
        lower: Decimal,
        upper: Decimal,
    },

    #[error(
        "annex {annex} bracket {position} starts at {lower}, expected {expected} to follow the previous bracket"
    )]
    Gap {
        annex: Annex,
        position: usize,
        lower: Decimal,
        expected: Decimal,
    },

    #[error("annex {annex} ends at {upper}, expected {expected}")]
    WrongCeiling {
        annex: Annex,
        upper: Decimal,
        expected: Decimal,
    },
}

/// One revenue range of an annex table.
///
/// Rates are percentages (`10.70` means 10.70%), deductions are in reais.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bracket {
    pub lower: Decimal,
    /// Inclusive.
    pub upper: Decimal,
    pub nominal_rate: Decimal,
    pub deduction: Decimal,
}

impl Bracket {
    pub const fn new(
        lower: Decimal,
        upper: Decimal,
        nominal_rate: Decimal,
        deduction: Decimal,
    ) -> Self {
        Self {
            lower,
            upper,
            nominal_rate,
            deduction,
        }
    }

    pub fn contains(
        &self,
        revenue: Decimal,
    ) -> bool {
        self.lower <= revenue && revenue <= self.upper
    }
}

/// Ordered brackets of a single annex.
///
/// The built-in tables borrow static data; tables loaded at runtime own
/// their brackets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnexTable {
    pub annex: Annex,
    brackets: Cow<'static, [Bracket]>,
}

impl AnnexTable {
    pub const fn from_static(
        annex: Annex,
        brackets: &'static [Bracket],
    ) -> Self {
        Self {
            annex,
            brackets: Cow::Borrowed(brackets),
        }
    }

    pub fn from_vec(
        annex: Annex,
        brackets: Vec<Bracket>,
    ) -> Self {
        Self {
            annex,
            brackets: Cow::Owned(brackets),
        }
    }

    pub fn brackets(&self) -> &[Bracket] {
        &self.brackets
    }

    /// Highest revenue the table covers.
    pub fn ceiling(&self) -> Option<Decimal> {
        self.brackets.last().map(|b| b.upper)
    }

    /// Checks that the brackets are ordered, contiguous to the cent and cover
    /// `[0, REVENUE_CEILING]`.
    pub fn validate(&self) -> Result<(), TableError> {
        let annex = self.annex;
        let first = self.brackets.first().ok_or(TableError::EmptyTable(annex))?;

        if first.lower != Decimal::ZERO {
            return Err(TableError::DoesNotStartAtZero {
                annex,
                lower: first.lower,
            });
        }

        for (index, bracket) in self.brackets.iter().enumerate() {
            if bracket.lower > bracket.upper {
                return Err(TableError::InvertedBracket {
                    annex,
                    position: index + 1,
                    lower: bracket.lower,
                    upper: bracket.upper,
                });
            }
        }

        for (index, pair) in self.brackets.windows(2).enumerate() {
            let expected = pair[0].upper + CENT;
            if pair[1].lower != expected {
                return Err(TableError::Gap {
                    annex,
                    position: index + 2,
                    lower: pair[1].lower,
                    expected,
                });
            }
        }

        let upper = self.ceiling().unwrap_or(Decimal::ZERO);
        if upper != REVENUE_CEILING {
            return Err(TableError::WrongCeiling {
                annex,
                upper,
                expected: REVENUE_CEILING,
            });
        }

        Ok(())
    }
}

/// The five annex tables used by a calculation, indexed by [`Annex`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnexTables {
    tables: [AnnexTable; 5],
}

impl AnnexTables {
    /// Builds a validated set from one table per annex, in any order.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::MissingAnnex`] if an annex has no table, or the
    /// first validation error of any table.
    pub fn new(tables: Vec<AnnexTable>) -> Result<Self, TableError> {
        let mut slots: [Option<AnnexTable>; 5] = Default::default();
        for table in tables {
            let index = table.annex.index();
            slots[index] = Some(table);
        }

        let [i, ii, iii, iv, v] = slots;
        let take = |slot: Option<AnnexTable>, annex: Annex| {
            let table = slot.ok_or(TableError::MissingAnnex(annex))?;
            table.validate()?;
            Ok::<_, TableError>(table)
        };

        Ok(Self {
            tables: [
                take(i, Annex::I)?,
                take(ii, Annex::II)?,
                take(iii, Annex::III)?,
                take(iv, Annex::IV)?,
                take(v, Annex::V)?,
            ],
        })
    }

    /// Wraps tables known to be valid, skipping validation.
    pub(crate) const fn from_trusted(tables: [AnnexTable; 5]) -> Self {
        Self { tables }
    }

    pub fn get(
        &self,
        annex: Annex,
    ) -> &AnnexTable {
        &self.tables[annex.index()]
    }

    /// Tables in annex order.
    pub fn iter(&self) -> std::slice::Iter<'_, AnnexTable> {
        self.tables.iter()
    }
}

impl Default for AnnexTables {
    fn default() -> Self {
        crate::tables::simples_2025()
    }
}
