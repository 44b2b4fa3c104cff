//! End-to-end checks of the public calculation API against the published
//! Simples Nacional tables.

use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use simples_core::calculations::{classify, compare, compute_factor_r, compute_tax, resolve_rate};
use simples_core::{
    Activity, Annex, AnnexTables, CalculationRequest, CeilingPolicy, FACTOR_R_THRESHOLD,
    REVENUE_CEILING, ServiceSubtype, SimplesCalculator,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("debug")
        .with_test_writer()
        .try_init();
}

#[test]
fn every_table_covers_zero_to_ceiling_without_gaps() {
    let tables = AnnexTables::default();

    for table in tables.iter() {
        let brackets = table.brackets();
        assert_eq!(brackets[0].lower, Decimal::ZERO);
        assert_eq!(brackets[brackets.len() - 1].upper, REVENUE_CEILING);
        for pair in brackets.windows(2) {
            assert_eq!(pair[1].lower, pair[0].upper + dec!(0.01));
        }
    }
}

#[test]
fn zero_revenue_has_zero_rate_everywhere() {
    let tables = AnnexTables::default();

    for annex in Annex::ALL {
        let resolution =
            resolve_rate(&tables, Decimal::ZERO, annex, CeilingPolicy::LastBracket).unwrap();
        assert_eq!(resolution.effective_rate, Decimal::ZERO);
    }
}

#[test]
fn factor_r_edge_cases() {
    assert_eq!(compute_factor_r(dec!(0), dec!(0)).unwrap(), dec!(0.0));
    assert_eq!(compute_factor_r(dec!(100), dec!(0)).unwrap(), dec!(0.28));
    assert_eq!(compute_factor_r(dec!(0), dec!(100)).unwrap(), dec!(0.01));
    assert_eq!(compute_factor_r(dec!(50), dec!(200)).unwrap(), dec!(0.25));
}

#[test]
fn classification_table() {
    let cases = [
        (Activity::Commerce, None, Annex::I),
        (Activity::Industry, None, Annex::II),
        (Activity::Services(ServiceSubtype::Specialized), None, Annex::IV),
        (Activity::Services(ServiceSubtype::FactorR), Some(dec!(0.30)), Annex::III),
        (Activity::Services(ServiceSubtype::FactorR), Some(dec!(0.10)), Annex::V),
        (Activity::Services(ServiceSubtype::Other), None, Annex::V),
    ];

    for (activity, factor_r, expected) in cases {
        assert_eq!(
            classify(activity, factor_r, FACTOR_R_THRESHOLD).unwrap(),
            expected,
            "{activity}"
        );
    }
}

#[test]
fn reference_example_annex_i() {
    let tables = AnnexTables::default();

    let resolution =
        resolve_rate(&tables, dec!(1000000), Annex::I, CeilingPolicy::LastBracket).unwrap();

    assert_eq!(resolution.bracket.lower, dec!(720000.01));
    assert_eq!(resolution.bracket.upper, dec!(1800000));
    assert_eq!(resolution.bracket.nominal_rate, dec!(10.70));
    assert_eq!(resolution.deduction, dec!(22500));
    assert_eq!(resolution.effective_rate, dec!(8.45));
    assert_eq!(
        compute_tax(dec!(100000), resolution.effective_rate).unwrap(),
        dec!(8450.00)
    );
}

#[test]
fn effective_rate_is_never_negative_across_revenue_range() {
    let tables = AnnexTables::default();
    let mut revenue = Decimal::ZERO;

    while revenue <= REVENUE_CEILING {
        for annex in Annex::ALL {
            let resolution =
                resolve_rate(&tables, revenue, annex, CeilingPolicy::LastBracket).unwrap();
            assert!(
                resolution.effective_rate >= Decimal::ZERO,
                "annex {annex} at {revenue}"
            );
            assert!(resolution.effective_rate <= resolution.bracket.nominal_rate);
        }
        revenue += dec!(37500.37);
    }
}

#[test]
fn comparison_matches_independent_calls() {
    init_tracing();
    let tables = AnnexTables::default();
    let revenue = dec!(3700000);
    let month_revenue = dec!(310000);

    let comparison =
        compare(&tables, revenue, month_revenue, Annex::IV, CeilingPolicy::LastBracket).unwrap();

    assert_eq!(comparison.entries.len(), 4);
    for annex in Annex::IV.others() {
        let resolution = resolve_rate(&tables, revenue, annex, CeilingPolicy::LastBracket).unwrap();
        let entry = &comparison.entries[&annex];
        assert_eq!(entry.effective_rate, resolution.effective_rate);
        assert_eq!(
            entry.tax_due,
            compute_tax(month_revenue, resolution.effective_rate).unwrap()
        );
    }
}

#[test]
fn calculator_assessment_is_pure() {
    init_tracing();
    let calculator = SimplesCalculator::default();
    let request = CalculationRequest {
        company_name: Some("Estúdio Lume".to_string()),
        activity: Activity::Services(ServiceSubtype::FactorR),
        accumulated_revenue: dec!(420000),
        payroll: dec!(130000),
        month_revenue: dec!(38000),
    };

    let first = calculator.assess(&request).unwrap();
    let second = calculator.assess(&request).unwrap();

    assert_eq!(first, second);
    assert_eq!(first.annex, Annex::III);
    assert_eq!(first.company_name.as_deref(), Some("Estúdio Lume"));
}
