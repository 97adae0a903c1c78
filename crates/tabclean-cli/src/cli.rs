//! CLI argument definitions for tabclean.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use tabclean_model::{FillStrategy, MatchScorer};

#[derive(Parser)]
#[command(
    name = "tabclean",
    version,
    about = "Clean tabular data for analysis",
    long_about = "Clean tabular data for analysis.\n\n\
                  Normalizes text, resolves missing values, optionally maps one column\n\
                  onto an allowed vocabulary, coerces numeric and date columns and\n\
                  removes duplicate rows."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Clean a table and write or preview the result.
    Clean(CleanArgs),

    /// Load a table and print its first rows.
    Preview(PreviewArgs),
}

#[derive(Parser)]
pub struct CleanArgs {
    /// Delimited file (.csv, .tsv) or spreadsheet workbook (.xlsx, .xls, .ods).
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Workbook sheet to read (defaults to the first sheet).
    #[arg(long = "sheet", value_name = "NAME")]
    pub sheet: Option<String>,

    /// Write the cleaned table here (.tsv/.tab for tab-separated output).
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// JSON file with cleaning options; flags below override its fields.
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Strategy for missing values.
    #[arg(long = "fill-missing", value_enum)]
    pub fill_missing: Option<FillArg>,

    /// Fill value for the constant strategy (numbers are filled as numbers).
    #[arg(long = "constant-fill", value_name = "VALUE")]
    pub constant_fill: Option<String>,

    /// Column to reconcile against the allowed values; enables fuzzy cleaning.
    #[arg(long = "fuzzy-column", value_name = "COLUMN")]
    pub fuzzy_column: Option<String>,

    /// Allowed value for fuzzy cleaning (repeat for each value, in priority order).
    #[arg(long = "valid-value", value_name = "VALUE")]
    pub valid_values: Vec<String>,

    /// Similarity measure for fuzzy cleaning.
    #[arg(long = "scorer", value_enum)]
    pub scorer: Option<ScorerArg>,

    /// Keep exact duplicate rows.
    #[arg(long = "keep-duplicates")]
    pub keep_duplicates: bool,

    /// Write the cleaning report as JSON.
    #[arg(long = "report", value_name = "PATH")]
    pub report: Option<PathBuf>,

    /// Rows to print when no output file is given.
    #[arg(long = "preview", value_name = "ROWS", default_value_t = 5)]
    pub preview: usize,
}

#[derive(Parser)]
pub struct PreviewArgs {
    /// Delimited file (.csv, .tsv) or spreadsheet workbook (.xlsx, .xls, .ods).
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Workbook sheet to read (defaults to the first sheet).
    #[arg(long = "sheet", value_name = "NAME")]
    pub sheet: Option<String>,

    /// Number of rows to print.
    #[arg(long = "rows", short = 'n', value_name = "ROWS", default_value_t = 5)]
    pub rows: usize,
}

/// CLI missing-value strategy choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum FillArg {
    Mode,
    Mean,
    Median,
    Constant,
    Drop,
}

impl From<FillArg> for FillStrategy {
    fn from(arg: FillArg) -> Self {
        match arg {
            FillArg::Mode => Self::Mode,
            FillArg::Mean => Self::Mean,
            FillArg::Median => Self::Median,
            FillArg::Constant => Self::Constant,
            FillArg::Drop => Self::Drop,
        }
    }
}

/// CLI similarity measure choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum ScorerArg {
    Ratio,
    Levenshtein,
    JaroWinkler,
}

impl From<ScorerArg> for MatchScorer {
    fn from(arg: ScorerArg) -> Self {
        match arg {
            ScorerArg::Ratio => Self::Ratio,
            ScorerArg::Levenshtein => Self::Levenshtein,
            ScorerArg::JaroWinkler => Self::JaroWinkler,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
