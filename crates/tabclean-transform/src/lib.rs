//! Table cleaning pipeline.
//!
//! This crate provides the cleaning logic applied to a loaded [`Table`]:
//!
//! - **text**: whitespace, case and printable-character normalization
//! - **impute**: missing-value resolution by mode, mean, median, constant or drop
//! - **reconcile**: approximate matching of free text against an allowed vocabulary
//! - **coerce**: all-or-nothing numeric and temporal column coercion
//! - **finalize**: duplicate-row removal and row renumbering
//! - **pipeline**: the ordered steps and the [`clean`] entry point
//!
//! [`Table`]: tabclean_model::Table

pub mod coerce;
pub mod datetime;
pub mod finalize;
pub mod impute;
pub mod pipeline;
pub mod reconcile;
pub mod report;
pub mod text;

pub use coerce::{CoercionOutcome, coerce_column, parse_number};
pub use datetime::parse_timestamp;
pub use pipeline::{CleaningPipeline, CleaningStep, PipelineState, clean, clean_with_report};
pub use reconcile::{VocabularyMatch, VocabularyMatcher};
pub use report::{
    CleanReport, ColumnCoercion, ColumnImputation, ImputationOutcome, ReconciliationSummary,
};
pub use text::normalize_text;
