//! CSV loader for batches of calculation requests.
//!
//! ## CSV Format
//!
//! Headers are matched by name, so column order does not matter.
//!
//! | Column                | Required | Type    | Notes |
//! |-----------------------|----------|---------|-------|
//! | `company`             | no       | string  | Leave empty for an anonymous request |
//! | `activity`            | yes      | string  | `commerce`, `industry` or `services` |
//! | `service`             | no       | string  | `factor-r`, `specialized` or `other`; required for services |
//! | `accumulated_revenue` | yes      | decimal | Trailing twelve months (RBT12) |
//! | `payroll`             | no       | decimal | Trailing twelve months, empty means zero |
//! | `month_revenue`       | yes      | decimal | Revenue of the month being assessed |
//!
//! ### Example
//!
//! ```csv
//! company,activity,service,accumulated_revenue,payroll,month_revenue
//! Mercado Boa Vista,commerce,,1000000.00,,100000.00
//! Estúdio Lume,services,factor-r,420000.00,130000.00,38000.00
//! ```
use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;
use simples_core::{Activity, CalculationError, CalculationRequest};

#[derive(Debug, Deserialize)]
struct CsvRow {
    company: Option<String>,
    activity: String,
    service: Option<String>,
    accumulated_revenue: Decimal,
    payroll: Option<Decimal>,
    month_revenue: Decimal,
}

/// Errors that can occur while loading request batches.
#[derive(Debug, thiserror::Error)]
pub enum RequestLoadError {
    /// Bad structure, missing required column, type mismatch, etc.
    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),

    /// The activity or service cell could not be turned into an [`Activity`].
    /// `row` is 1-based, not counting the header.
    #[error("row {row}: {source}")]
    InvalidRow {
        row: usize,
        #[source]
        source: CalculationError,
    },

    #[error("cannot read file: {0}")]
    Io(#[from] std::io::Error),
}

fn convert_row(
    row: CsvRow,
    row_number: usize,
) -> Result<CalculationRequest, RequestLoadError> {
    let activity = Activity::parse(&row.activity, row.service.as_deref()).map_err(|source| {
        RequestLoadError::InvalidRow {
            row: row_number,
            source,
        }
    })?;

    Ok(CalculationRequest {
        company_name: row.company.filter(|name| !name.is_empty()),
        activity,
        accumulated_revenue: row.accumulated_revenue,
        payroll: row.payroll.unwrap_or(Decimal::ZERO),
        month_revenue: row.month_revenue,
    })
}

/// Parse CSV text and return the requests in file order.
///
/// # Errors
///
/// * [`RequestLoadError::Parse`] if the CSV is structurally invalid or a
///   required field cannot be deserialised.
/// * [`RequestLoadError::InvalidRow`] if a row names an unknown activity or
///   service, or a services row has no service.
pub fn load_from_str(input: &str) -> Result<Vec<CalculationRequest>, RequestLoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(false)
        .from_reader(input.as_bytes());

    reader
        .deserialize::<CsvRow>()
        .enumerate()
        .map(|(idx, result)| {
            let row = result?;
            convert_row(row, idx + 1)
        })
        .collect()
}

/// Read a file from disk and delegate to [`load_from_str`].
pub fn load_from_file(path: &Path) -> Result<Vec<CalculationRequest>, RequestLoadError> {
    let contents = std::fs::read_to_string(path)?;
    load_from_str(&contents)
}
