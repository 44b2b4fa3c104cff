use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use simples_cli::amount::parse_amount;
use simples_cli::settings::Settings;
use simples_cli::logging;
use simples_cli::report::{AssessmentReport, TablesReport, render_batch_line};
use simples_core::{
    Activity, Annex, AnnexTables, CalculationRequest, CeilingPolicy, SimplesCalculator,
};
use simples_data::{AnnexTableLoader, requests};

// --- CLI definition ---

/// Simples Nacional calculator.
///
/// Classifies a business into its annex, resolves the effective rate for the
/// accumulated revenue and computes the monthly DAS, alongside what the other
/// annexes would charge.
#[derive(Debug, Parser)]
#[command(name = "simples", version)]
struct Cli {
    /// TOML settings file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// CSV file replacing the built-in annex tables.
    #[arg(long, global = true)]
    tables: Option<PathBuf>,

    /// Behaviour when revenue exceeds the tables: last-bracket or reject.
    #[arg(long, global = true, value_parser = parse_policy)]
    ceiling_policy: Option<CeilingPolicy>,

    /// Log filter, e.g. `debug` or `simples_core=trace`. Overrides RUST_LOG.
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Also append log output to this file.
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Assess one business for one month.
    Calculate(CalculateArgs),

    /// Assess every row of a requests CSV file.
    Batch {
        /// CSV with company,activity,service,accumulated_revenue,payroll,month_revenue.
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Print the annex bracket tables.
    Tables {
        /// Only print this annex (I to V).
        #[arg(long, value_parser = parse_annex)]
        annex: Option<Annex>,
    },
}

#[derive(Debug, Args)]
struct CalculateArgs {
    /// commerce, industry or services.
    #[arg(long)]
    activity: String,

    /// factor-r, specialized or other. Required for services.
    #[arg(long)]
    service: Option<String>,

    /// Gross revenue over the last twelve months (RBT12).
    #[arg(long, value_parser = parse_amount)]
    revenue: Decimal,

    /// Payroll over the last twelve months.
    #[arg(long, value_parser = parse_amount, default_value = "0")]
    payroll: Decimal,

    /// Revenue of the month being assessed.
    #[arg(long, value_parser = parse_amount)]
    month_revenue: Decimal,

    /// Company name shown in the report.
    #[arg(long)]
    company: Option<String>,
}

fn parse_policy(s: &str) -> Result<CeilingPolicy, String> {
    CeilingPolicy::parse(s).ok_or_else(|| format!("unknown policy '{s}', use last-bracket or reject"))
}

fn parse_annex(s: &str) -> Result<Annex, String> {
    Annex::parse(s).ok_or_else(|| format!("unknown annex '{s}', use I, II, III, IV or V"))
}

// --- Setup ---

/// Merges the settings file with command-line overrides and builds the
/// calculator.
fn build_calculator(cli: &Cli) -> Result<SimplesCalculator> {
    let settings = match &cli.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };

    if cli.log_level.is_none()
        && let Some(level) = &settings.logging.level
    {
        logging::set_log_level(level)?;
    }
    if let Some(path) = cli.log_file.as_ref().or(settings.logging.file.as_ref()) {
        logging::enable_file_logging(path)?;
    }

    let mut config = settings.calculator;
    if let Some(policy) = cli.ceiling_policy {
        config.ceiling_policy = policy;
    }

    let tables = match cli.tables.as_ref().or(settings.tables.path.as_ref()) {
        Some(path) => {
            debug!("loading annex tables from {}", path.display());
            AnnexTableLoader::load_from_file(path)
                .with_context(|| format!("failed to load annex tables from {}", path.display()))?
        }
        None => AnnexTables::default(),
    };

    debug!(?config, "calculator configured");
    Ok(SimplesCalculator::new(config, tables))
}

// --- Commands ---

fn run_calculate(
    calculator: &SimplesCalculator,
    args: CalculateArgs,
) -> Result<()> {
    let activity = Activity::parse(&args.activity, args.service.as_deref())?;
    let request = CalculationRequest {
        company_name: args.company,
        activity,
        accumulated_revenue: args.revenue,
        payroll: args.payroll,
        month_revenue: args.month_revenue,
    };

    let assessment = calculator.assess(&request).context("calculation failed")?;
    print!("{}", AssessmentReport(&assessment));
    Ok(())
}

fn run_batch(
    calculator: &SimplesCalculator,
    file: &Path,
) -> Result<()> {
    let requests = requests::load_from_file(file)
        .with_context(|| format!("failed to load requests from {}", file.display()))?;
    info!("assessing {} requests from {}", requests.len(), file.display());

    let mut failures = 0;
    for (idx, request) in requests.iter().enumerate() {
        let label = request.company_name.as_deref().unwrap_or("-");
        let outcome = match calculator.assess(request) {
            Ok(assessment) => Ok((assessment.annex, assessment.tax_due)),
            Err(err) => {
                warn!(row = idx + 1, %err, "request failed");
                failures += 1;
                Err(err.to_string())
            }
        };
        println!("{}", render_batch_line(idx + 1, label, outcome));
    }

    if failures > 0 {
        anyhow::bail!("{failures} of {} requests failed", requests.len());
    }
    Ok(())
}

// --- Entry point ---

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.log_level.as_deref());

    let calculator = build_calculator(&cli)?;

    match cli.command {
        Command::Calculate(args) => run_calculate(&calculator, args),
        Command::Batch { file } => run_batch(&calculator, &file),
        Command::Tables { annex } => {
            let report = TablesReport {
                tables: calculator.tables(),
                only: annex,
            };
            print!("{report}");
            Ok(())
        }
    }
}
