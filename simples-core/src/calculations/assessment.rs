//! End-to-end assessment of one business for one month.
//!
//! # Flow
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Validate inputs (non-negative, revenue or payroll present) |
//! | 2    | Factor R, only for Factor R services |
//! | 3    | Classify the activity into an annex |
//! | 4    | Resolve bracket and effective rate for RBT12 |
//! | 5    | DAS = month revenue × effective rate |
//! | 6    | Revenue distribution (tax vs. net) |
//! | 7    | Comparison against the other four annexes |
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use simples_core::calculations::SimplesCalculator;
//! use simples_core::{Activity, Annex, CalculationRequest};
//!
//! let calculator = SimplesCalculator::default();
//! let request = CalculationRequest {
//!     company_name: Some("Mercado Boa Vista".to_string()),
//!     activity: Activity::Commerce,
//!     accumulated_revenue: dec!(1000000),
//!     payroll: dec!(0),
//!     month_revenue: dec!(100000),
//! };
//!
//! let assessment = calculator.assess(&request).unwrap();
//!
//! assert_eq!(assessment.annex, Annex::I);
//! assert_eq!(assessment.resolution.effective_rate, dec!(8.45));
//! assert_eq!(assessment.tax_due, dec!(8450.00));
//! assert_eq!(assessment.comparison.entries.len(), 4);
//! ```

use tracing::{debug, info};

use super::classifier::classify;
use super::comparator::compare;
use super::das::{compute_tax, revenue_distribution};
use super::error::{CalculationError, ensure_non_negative};
use super::factor_r::compute_factor_r;
use super::rate::resolve_rate;
use crate::config::CalculatorConfig;
use crate::models::{AnnexTables, Assessment, CalculationRequest};

/// Runs the full calculation with a fixed configuration and table set.
#[derive(Debug, Clone, Default)]
pub struct SimplesCalculator {
    config: CalculatorConfig,
    tables: AnnexTables,
}

impl SimplesCalculator {
    pub fn new(
        config: CalculatorConfig,
        tables: AnnexTables,
    ) -> Self {
        Self { config, tables }
    }

    pub fn config(&self) -> &CalculatorConfig {
        &self.config
    }

    pub fn tables(&self) -> &AnnexTables {
        &self.tables
    }

    /// Assesses one request.
    ///
    /// # Errors
    ///
    /// * [`CalculationError::InvalidInput`] for negative amounts.
    /// * [`CalculationError::NothingToAssess`] when both accumulated revenue
    ///   and payroll are zero.
    /// * [`CalculationError::RevenueAboveCeiling`] when the revenue exceeds
    ///   the tables under the reject policy.
    /// * [`CalculationError::Overflow`] when an amount is too large to
    ///   compute with.
    pub fn assess(
        &self,
        request: &CalculationRequest,
    ) -> Result<Assessment, CalculationError> {
        let accumulated_revenue =
            ensure_non_negative("accumulated revenue", request.accumulated_revenue)?;
        let payroll = ensure_non_negative("payroll", request.payroll)?;
        let month_revenue = ensure_non_negative("month revenue", request.month_revenue)?;

        if accumulated_revenue.is_zero() && payroll.is_zero() {
            return Err(CalculationError::NothingToAssess);
        }

        let factor_r = if request.activity.needs_factor_r() {
            Some(compute_factor_r(payroll, accumulated_revenue)?)
        } else {
            None
        };

        let annex = classify(request.activity, factor_r, self.config.factor_r_threshold)?;
        let policy = self.config.ceiling_policy;
        let resolution = resolve_rate(&self.tables, accumulated_revenue, annex, policy)?;
        let tax_due = compute_tax(month_revenue, resolution.effective_rate)?;
        let distribution = revenue_distribution(month_revenue, tax_due)?;

        debug!(%annex, %tax_due, net_revenue = %distribution.net_revenue, "computed DAS");

        let comparison = compare(
            &self.tables,
            accumulated_revenue,
            month_revenue,
            annex,
            policy,
        )?;

        info!(
            company = request.company_name.as_deref().unwrap_or("-"),
            %annex,
            effective_rate = %resolution.effective_rate,
            %tax_due,
            "assessment complete"
        );

        Ok(Assessment {
            company_name: request.company_name.clone(),
            activity: request.activity,
            factor_r,
            annex,
            resolution,
            accumulated_revenue,
            month_revenue,
            tax_due,
            distribution,
            comparison,
        })
    }
}
