//! Simples Nacional calculations.
//!
//! This module provides the annex classification, bracket lookup, effective
//! rate and DAS computation, plus the comparison against other annexes and a
//! calculator that runs the whole flow for one request.

mod assessment;
mod classifier;
pub mod common;
mod comparator;
mod das;
mod error;
mod factor_r;
mod rate;

pub use assessment::SimplesCalculator;
pub use classifier::classify;
pub use comparator::compare;
pub use das::{compute_tax, revenue_distribution};
pub use error::CalculationError;
pub use factor_r::{PAYROLL_WITHOUT_REVENUE, REVENUE_WITHOUT_PAYROLL, compute_factor_r};
pub use rate::{effective_rate, resolve_rate};
