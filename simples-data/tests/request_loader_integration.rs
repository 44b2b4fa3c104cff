//! Integration tests that exercise the loaders against on-disk fixture files.

use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;
use simples_core::{Activity, Annex, AnnexTables, ServiceSubtype, SimplesCalculator};
use simples_data::{AnnexTableLoader, requests};

fn crate_path(parts: &[&str]) -> PathBuf {
    parts
        .iter()
        .fold(Path::new(env!("CARGO_MANIFEST_DIR")).to_path_buf(), |path, part| {
            path.join(part)
        })
}

fn requests_fixture() -> PathBuf {
    crate_path(&["tests", "fixtures", "sample_requests.csv"])
}

#[test]
fn test_load_requests_fixture() {
    let requests = requests::load_from_file(&requests_fixture()).expect("fixture should load");

    assert_eq!(requests.len(), 5);
    assert_eq!(requests[1].company_name.as_deref(), Some("Metalúrgica Serra"));
    assert_eq!(requests[1].activity, Activity::Industry);
    assert_eq!(requests[1].payroll, dec!(310000.00));
    assert_eq!(requests[4].company_name, None);
    assert_eq!(
        requests[4].activity,
        Activity::Services(ServiceSubtype::Specialized)
    );
}

#[test]
fn test_load_missing_file_fails() {
    let result = requests::load_from_file(&crate_path(&["tests", "fixtures", "absent.csv"]));

    assert!(matches!(result, Err(requests::RequestLoadError::Io(_))));
}

#[test]
fn test_load_annex_tables_file() {
    let tables = AnnexTableLoader::load_from_file(&crate_path(&[
        "test-data",
        "annex_tables_2025.csv",
    ]))
    .expect("tables should load");

    assert_eq!(tables, AnnexTables::default());
}

#[test]
fn test_assess_fixture_with_loaded_tables() {
    let tables = AnnexTableLoader::load_from_file(&crate_path(&[
        "test-data",
        "annex_tables_2025.csv",
    ]))
    .unwrap();
    let calculator = SimplesCalculator::new(Default::default(), tables);
    let requests = requests::load_from_file(&requests_fixture()).unwrap();

    let annexes: Vec<_> = requests
        .iter()
        .map(|request| calculator.assess(request).unwrap().annex)
        .collect();

    // Clínica Aurora: 90,000 / 900,000 = 0.10, below the Factor R threshold
    assert_eq!(
        annexes,
        vec![Annex::I, Annex::II, Annex::III, Annex::V, Annex::IV]
    );

    let commerce = calculator.assess(&requests[0]).unwrap();
    assert_eq!(commerce.tax_due, dec!(8450.00));
}
