use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use simples_data::AnnexTableLoader;

/// Check an annex tables CSV file before using it for calculations.
///
/// The CSV file should have the following columns:
/// - annex: The annex roman numeral (I, II, III, IV, V)
/// - lower: The lowest accumulated revenue in the bracket
/// - upper: The highest accumulated revenue in the bracket (inclusive)
/// - nominal_rate: The nominal rate as a percentage (e.g., 10.70)
/// - deduction: The fixed deduction in reais
#[derive(Parser, Debug)]
#[command(name = "annex-table-check")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the CSV file containing the annex tables
    #[arg(short, long)]
    file: PathBuf,
}

fn main() -> Result<()> {
    let args = Args::parse();

    println!("Checking annex tables in: {}", args.file.display());

    let file = File::open(&args.file)
        .with_context(|| format!("Failed to open: {}", args.file.display()))?;

    let records = AnnexTableLoader::parse(file)
        .with_context(|| format!("Failed to parse CSV: {}", args.file.display()))?;

    println!("Parsed {} records from CSV", records.len());

    let tables = AnnexTableLoader::build(&records).context("Annex tables are not valid")?;

    for table in tables.iter() {
        println!(
            "Annex {:<3} {} brackets, ceiling {}",
            table.annex,
            table.brackets().len(),
            table.ceiling().unwrap_or_default()
        );
    }

    println!("All five annex tables are contiguous and complete.");

    Ok(())
}
