//! Cleaning options from a JSON file and command-line overrides.

use std::path::Path;

use anyhow::{Context, Result};
use tabclean_model::{CleanOptions, ConstantFill};

use crate::cli::CleanArgs;

/// Reads [`CleanOptions`] from a JSON file. Absent fields take their defaults.
pub fn load_options(path: &Path) -> Result<CleanOptions> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("read config {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parse config {}", path.display()))
}

/// Builds the options for a `clean` run: the config file if given, then flags.
///
/// `--fuzzy-column` switches fuzzy cleaning on.
pub fn build_options(args: &CleanArgs) -> Result<CleanOptions> {
    let mut options = match &args.config {
        Some(path) => load_options(path)?,
        None => CleanOptions::default(),
    };
    if let Some(fill) = args.fill_missing {
        options.fill_missing = fill.into();
    }
    if let Some(raw) = &args.constant_fill {
        options.constant_fill = ConstantFill::parse(raw);
    }
    if let Some(column) = &args.fuzzy_column {
        options.fuzzy_clean = true;
        options.fuzzy_column = Some(column.clone());
    }
    if !args.valid_values.is_empty() {
        options.valid_values = Some(args.valid_values.clone());
    }
    if let Some(scorer) = args.scorer {
        options.scorer = scorer.into();
    }
    if args.keep_duplicates {
        options.drop_duplicates = false;
    }
    Ok(options)
}
