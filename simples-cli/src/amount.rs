//! Parsing and formatting of amounts in reais.
//!
//! Accepted input forms:
//!
//! | Input              | Value       |
//! |--------------------|-------------|
//! | `1234567.89`       | 1234567.89  |
//! | `1234567,89`       | 1234567.89  |
//! | `1.234.567,89`     | 1234567.89  |
//! | `R$ 1.234.567,89`  | 1234567.89  |
//! | `1.500`            | 1500        |
//!
//! A dot followed by exactly three digits is read as a thousands separator,
//! following Brazilian notation.

use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;
use simples_core::calculations::common::round_half_up;
use thiserror::Error;

static GROUPED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{1,3}(?:\.\d{3})+(?:,\d+)?$").expect("valid regex"));
static COMMA_DECIMAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+(?:,\d+)?$").expect("valid regex"));
static PLAIN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+(?:\.\d+)?$").expect("valid regex"));

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AmountError {
    #[error("'{0}' is not a valid amount, use 1234.56 or 1.234,56")]
    Invalid(String),
}

/// Parses a non-negative amount written in plain or Brazilian notation.
pub fn parse_amount(input: &str) -> Result<Decimal, AmountError> {
    let trimmed = input.trim();
    let body = trimmed
        .strip_prefix("R$")
        .unwrap_or(trimmed)
        .trim();

    let normalized = if GROUPED.is_match(body) {
        body.replace('.', "").replace(',', ".")
    } else if COMMA_DECIMAL.is_match(body) {
        body.replace(',', ".")
    } else if PLAIN.is_match(body) {
        body.to_string()
    } else {
        return Err(AmountError::Invalid(input.to_string()));
    };

    Decimal::from_str(&normalized).map_err(|_| AmountError::Invalid(input.to_string()))
}

/// Formats an amount as `R$ 1.234.567,89`, rounded half-up to the cent.
pub fn format_brl(value: Decimal) -> String {
    let rounded = round_half_up(value);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let text = format!("{:.2}", rounded.abs());
    let (integer, fraction) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    format!("{sign}R$ {},{fraction}", group_thousands(integer))
}

/// Formats a percentage with two decimals and a decimal comma: `8,45%`.
pub fn format_percent(value: Decimal) -> String {
    format!("{:.2}%", round_half_up(value)).replace('.', ",")
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    grouped
}
