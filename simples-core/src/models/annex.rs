use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the five Simples Nacional bracket tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Annex {
    I,
    II,
    III,
    IV,
    V,
}

impl Annex {
    /// Every annex, in table order.
    pub const ALL: [Annex; 5] = [Annex::I, Annex::II, Annex::III, Annex::IV, Annex::V];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::I => "I",
            Self::II => "II",
            Self::III => "III",
            Self::IV => "IV",
            Self::V => "V",
        }
    }

    /// Parses a roman numeral, ignoring case and surrounding whitespace.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "I" => Some(Self::I),
            "II" => Some(Self::II),
            "III" => Some(Self::III),
            "IV" => Some(Self::IV),
            "V" => Some(Self::V),
            _ => None,
        }
    }

    /// Business category the annex is meant for.
    pub fn description(&self) -> &'static str {
        match self {
            Self::I => "Commerce",
            Self::II => "Industry",
            Self::III => "Services (Factor R at or above threshold)",
            Self::IV => "Specialized services",
            Self::V => "Other services",
        }
    }

    /// Zero-based position inside [`Annex::ALL`].
    pub(crate) fn index(&self) -> usize {
        match self {
            Self::I => 0,
            Self::II => 1,
            Self::III => 2,
            Self::IV => 3,
            Self::V => 4,
        }
    }

    /// The four annexes other than `self`, in table order.
    pub fn others(self) -> impl Iterator<Item = Annex> {
        Self::ALL.into_iter().filter(move |annex| *annex != self)
    }
}

impl fmt::Display for Annex {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.pad(self.as_str())
    }
}
