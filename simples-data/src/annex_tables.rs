use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;
use simples_core::{Annex, AnnexTable, AnnexTables, Bracket, TableError};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur when loading annex bracket tables.
#[derive(Debug, Error)]
pub enum AnnexTableLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("Invalid annex '{annex}' on row {row}")]
    InvalidAnnex { annex: String, row: usize },

    #[error("Invalid bracket table: {0}")]
    Table(#[from] TableError),

    #[error("Cannot read file: {0}")]
    Io(#[from] std::io::Error),
}

impl From<csv::Error> for AnnexTableLoaderError {
    fn from(err: csv::Error) -> Self {
        AnnexTableLoaderError::CsvParse(err.to_string())
    }
}

/// A single record from the annex tables CSV file.
///
/// - `annex`: The annex roman numeral (I, II, III, IV, V)
/// - `lower`: The lowest accumulated revenue in the bracket
/// - `upper`: The highest accumulated revenue in the bracket (inclusive)
/// - `nominal_rate`: The nominal rate as a percentage (e.g., 10.70)
/// - `deduction`: The fixed deduction in reais
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct AnnexTableRecord {
    pub annex: String,
    pub lower: Decimal,
    pub upper: Decimal,
    pub nominal_rate: Decimal,
    pub deduction: Decimal,
}

/// Loader for annex bracket tables from CSV files.
///
/// A file must provide brackets for all five annexes. Rows may appear in any
/// order; each annex's brackets are sorted by lower bound before the table
/// is validated.
pub struct AnnexTableLoader;

impl AnnexTableLoader {
    /// Parse annex table records from a CSV reader.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<AnnexTableRecord>, AnnexTableLoaderError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: AnnexTableRecord = result?;
            records.push(record);
        }

        Ok(records)
    }

    /// Group records by annex and build a validated table set.
    ///
    /// # Errors
    ///
    /// * [`AnnexTableLoaderError::InvalidAnnex`] for an unknown numeral.
    /// * [`AnnexTableLoaderError::Table`] if an annex is missing or a table
    ///   has gaps, overlaps or the wrong ceiling.
    pub fn build(records: &[AnnexTableRecord]) -> Result<AnnexTables, AnnexTableLoaderError> {
        let mut groups: BTreeMap<Annex, Vec<Bracket>> = BTreeMap::new();

        for (idx, record) in records.iter().enumerate() {
            let annex =
                Annex::parse(&record.annex).ok_or_else(|| AnnexTableLoaderError::InvalidAnnex {
                    annex: record.annex.clone(),
                    row: idx + 1,
                })?;

            groups.entry(annex).or_default().push(Bracket::new(
                record.lower,
                record.upper,
                record.nominal_rate,
                record.deduction,
            ));
        }

        let tables = groups
            .into_iter()
            .map(|(annex, mut brackets)| {
                brackets.sort_by_key(|b| b.lower);
                debug!(%annex, brackets = brackets.len(), "loaded annex table");
                AnnexTable::from_vec(annex, brackets)
            })
            .collect();

        Ok(AnnexTables::new(tables)?)
    }

    /// Read, parse and build the tables stored at `path`.
    pub fn load_from_file(path: &Path) -> Result<AnnexTables, AnnexTableLoaderError> {
        let file = std::fs::File::open(path)?;
        let records = Self::parse(file)?;
        Self::build(&records)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    const HEADER: &str = "annex,lower,upper,nominal_rate,deduction\n";

    const FULL_CSV: &str = include_str!("../test-data/annex_tables_2025.csv");

    fn without_annex(annex: &str) -> String {
        FULL_CSV
            .lines()
            .filter(|line| !line.starts_with(&format!("{annex},")))
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn parse_single_record() {
        let csv = format!("{HEADER}I,720000.01,1800000,10.70,22500");

        let records = AnnexTableLoader::parse(csv.as_bytes()).expect("Failed to parse CSV");

        assert_eq!(
            records,
            vec![AnnexTableRecord {
                annex: "I".to_string(),
                lower: dec!(720000.01),
                upper: dec!(1800000),
                nominal_rate: dec!(10.70),
                deduction: dec!(22500),
            }]
        );
    }

    #[test]
    fn parse_trims_whitespace() {
        let csv = format!("{HEADER} IV , 0 , 180000 , 4.50 , 0 ");

        let records = AnnexTableLoader::parse(csv.as_bytes()).expect("Failed to parse CSV");

        assert_eq!(records[0].annex, "IV");
        assert_eq!(records[0].nominal_rate, dec!(4.50));
    }

    #[test]
    fn parse_full_file_has_six_brackets_per_annex() {
        let records = AnnexTableLoader::parse(FULL_CSV.as_bytes()).expect("Failed to parse CSV");

        assert_eq!(records.len(), 30);
        for annex in ["I", "II", "III", "IV", "V"] {
            let count = records.iter().filter(|r| r.annex == annex).count();
            assert_eq!(count, 6, "Expected 6 brackets for annex {}", annex);
        }
    }

    #[test]
    fn parse_invalid_csv_bad_decimal() {
        let csv = format!("{HEADER}I,abc,180000,4.00,0");

        let err = AnnexTableLoader::parse(csv.as_bytes()).expect_err("Should fail for invalid decimal");

        let AnnexTableLoaderError::CsvParse(msg) = err else {
            panic!("Expected CsvParse error, got: {:?}", err);
        };
        assert!(msg.contains("invalid"), "Expected 'invalid' in error, got: {}", msg);
    }

    #[test]
    fn parse_invalid_csv_missing_column() {
        let csv = "annex,lower,upper\nI,0,180000";

        let err = AnnexTableLoader::parse(csv.as_bytes()).expect_err("Should fail for missing column");

        let AnnexTableLoaderError::CsvParse(msg) = err else {
            panic!("Expected CsvParse error, got: {:?}", err);
        };
        assert!(msg.contains("missing field"), "got: {}", msg);
    }

    #[test]
    fn build_full_file_matches_builtin_tables() {
        let records = AnnexTableLoader::parse(FULL_CSV.as_bytes()).unwrap();

        let tables = AnnexTableLoader::build(&records).expect("Failed to build tables");

        assert_eq!(tables, AnnexTables::default());
    }

    #[test]
    fn build_sorts_rows_within_annex() {
        let mut records = AnnexTableLoader::parse(FULL_CSV.as_bytes()).unwrap();
        records.reverse();

        let tables = AnnexTableLoader::build(&records).expect("Failed to build tables");

        assert_eq!(tables, AnnexTables::default());
    }

    #[test]
    fn build_rejects_unknown_annex() {
        let mut records = AnnexTableLoader::parse(FULL_CSV.as_bytes()).unwrap();
        records[2].annex = "VI".to_string();

        let err = AnnexTableLoader::build(&records).expect_err("Should fail for annex VI");

        match err {
            AnnexTableLoaderError::InvalidAnnex { ref annex, row } => {
                assert_eq!(annex, "VI");
                assert_eq!(row, 3);
            }
            other => panic!("expected InvalidAnnex, got {other:?}"),
        }
    }

    #[test]
    fn build_rejects_missing_annex() {
        let csv = without_annex("III");
        let records = AnnexTableLoader::parse(csv.as_bytes()).unwrap();

        let err = AnnexTableLoader::build(&records).expect_err("Should fail without annex III");

        assert!(matches!(
            err,
            AnnexTableLoaderError::Table(TableError::MissingAnnex(Annex::III))
        ));
    }

    #[test]
    fn build_rejects_gap_between_brackets() {
        let mut records = AnnexTableLoader::parse(FULL_CSV.as_bytes()).unwrap();
        // Second bracket of annex I now starts one real late
        records[1].lower = dec!(180001.00);

        let err = AnnexTableLoader::build(&records).expect_err("Should fail for gap");

        assert!(matches!(
            err,
            AnnexTableLoaderError::Table(TableError::Gap {
                annex: Annex::I,
                position: 2,
                ..
            })
        ));
    }

    #[test]
    fn build_custom_rates_are_used() {
        let mut records = AnnexTableLoader::parse(FULL_CSV.as_bytes()).unwrap();
        records[0].nominal_rate = dec!(5.00);

        let tables = AnnexTableLoader::build(&records).unwrap();

        assert_eq!(tables.get(Annex::I).brackets()[0].nominal_rate, dec!(5.00));
    }
}
