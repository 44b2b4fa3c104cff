//! Plain-text rendering of assessments and bracket tables.

use std::fmt;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use simples_core::{Annex, AnnexTables, Assessment};

use crate::amount::{format_brl, format_percent};

/// One assessment: headline figures, bracket details, revenue split and the
/// comparison with the other annexes.
pub struct AssessmentReport<'a>(pub &'a Assessment);

impl fmt::Display for AssessmentReport<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let assessment = self.0;
        let resolution = &assessment.resolution;
        let bracket = &resolution.bracket;

        if let Some(company) = &assessment.company_name {
            writeln!(f, "{company}")?;
        }
        writeln!(f, "Activity:            {}", assessment.activity)?;
        if let Some(factor_r) = assessment.factor_r {
            match factor_r.checked_mul(dec!(100)) {
                Some(percent) => writeln!(f, "Factor R:            {}", format_percent(percent))?,
                None => writeln!(f, "Factor R:            {factor_r}")?,
            }
        }
        writeln!(
            f,
            "Annex:               {} ({})",
            assessment.annex,
            assessment.annex.description()
        )?;
        writeln!(f, "Effective rate:      {}", format_percent(resolution.effective_rate))?;
        writeln!(f, "DAS due:             {}", format_brl(assessment.tax_due))?;

        writeln!(f)?;
        writeln!(
            f,
            "Bracket:             {} ({} to {})",
            resolution.bracket_position,
            format_brl(bracket.lower),
            format_brl(bracket.upper)
        )?;
        if resolution.above_ceiling {
            writeln!(f, "                     revenue above table ceiling, last bracket applied")?;
        }
        writeln!(f, "Nominal rate:        {}", format_percent(bracket.nominal_rate))?;
        writeln!(f, "Deduction:           {}", format_brl(resolution.deduction))?;
        writeln!(f, "Accumulated revenue: {}", format_brl(assessment.accumulated_revenue))?;
        writeln!(f, "Month revenue:       {}", format_brl(assessment.month_revenue))?;
        writeln!(
            f,
            "Net revenue:         {} (tax share {})",
            format_brl(assessment.distribution.net_revenue),
            format_percent(assessment.distribution.tax_share)
        )?;

        writeln!(f)?;
        writeln!(f, "{:<8} {:>14} {:>18} {:>18}", "Annex", "Eff. rate", "DAS", "Difference")?;
        for (annex, entry) in &assessment.comparison.entries {
            writeln!(
                f,
                "{:<8} {:>14} {:>18} {:>18}",
                annex.as_str(),
                format_percent(entry.effective_rate),
                format_brl(entry.tax_due),
                format_brl(entry.difference)
            )?;
        }
        if let Some((annex, entry)) = assessment.comparison.cheapest_alternative() {
            writeln!(
                f,
                "Annex {annex} would be {} cheaper this month.",
                format_brl(-entry.difference)
            )?;
        }

        Ok(())
    }
}

/// Every bracket of `only`, or of all annexes when `None`.
pub struct TablesReport<'a> {
    pub tables: &'a AnnexTables,
    pub only: Option<Annex>,
}

impl fmt::Display for TablesReport<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let selected = self
            .tables
            .iter()
            .filter(|t| self.only.is_none_or(|a| a == t.annex));

        for table in selected {
            writeln!(f, "Annex {} - {}", table.annex, table.annex.description())?;
            writeln!(
                f,
                "{:>3} {:>20} {:>20} {:>9} {:>16}",
                "#", "From", "To", "Rate", "Deduction"
            )?;
            for (idx, bracket) in table.brackets().iter().enumerate() {
                writeln!(
                    f,
                    "{:>3} {:>20} {:>20} {:>9} {:>16}",
                    idx + 1,
                    format_brl(bracket.lower),
                    format_brl(bracket.upper),
                    format_percent(bracket.nominal_rate),
                    format_brl(bracket.deduction)
                )?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

/// One line per batch row: the annex and DAS, or the error message.
pub fn render_batch_line(
    row: usize,
    label: &str,
    outcome: Result<(Annex, Decimal), String>,
) -> String {
    match outcome {
        Ok((annex, tax_due)) => format!("{row:>4}  {label:<30} Annex {annex:<4} {}", format_brl(tax_due)),
        Err(message) => format!("{row:>4}  {label:<30} error: {message}"),
    }
}
