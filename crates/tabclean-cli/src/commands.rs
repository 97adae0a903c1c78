use std::path::Path;

use anyhow::{Context, Result};
use tabclean_cli::cli::{CleanArgs, PreviewArgs};
use tabclean_cli::config::build_options;
use tabclean_ingest::{load_table, write_table};
use tabclean_transform::{CleanReport, clean_with_report};
use tracing::info;

use crate::summary::print_preview;

/// Loads, cleans and writes or previews one table.
pub fn run_clean(args: &CleanArgs) -> Result<CleanReport> {
    let options = build_options(args)?;
    let input = load_table(&args.input, args.sheet.as_deref())?;
    let (cleaned, report) = clean_with_report(&input, &options);

    match &args.output {
        Some(path) => {
            write_table(&cleaned, path)?;
            println!("Output: {}", path.display());
        }
        None => print_preview(&cleaned, args.preview),
    }
    if let Some(path) = &args.report {
        write_report(&report, path)?;
        println!("Report: {}", path.display());
    }
    Ok(report)
}

/// Loads one table and prints its first rows.
pub fn run_preview(args: &PreviewArgs) -> Result<()> {
    let table = load_table(&args.input, args.sheet.as_deref())?;
    print_preview(&table, args.rows);
    Ok(())
}

fn write_report(report: &CleanReport, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(report).context("serialize report")?;
    std::fs::write(path, json).with_context(|| format!("write report {}", path.display()))?;
    info!(path = %path.display(), "wrote report");
    Ok(())
}
