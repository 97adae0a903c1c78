//! Cleaning pipeline with ordered step execution.
//!
//! # Step Order
//!
//! 1. **NormalizeTextStep** - Trim, lower-case and tidy text cells
//! 2. **ResolveMissingStep** - Fill or drop missing values
//! 3. **ReconcileVocabularyStep** - Map one column onto an allowed vocabulary (optional)
//! 4. **CoerceTypesStep** - Reinterpret text columns as numbers or timestamps
//! 5. **FinalizeStep** - Drop duplicate rows and renumber the row index
//!
//! Each step consumes the table left by the previous one. Steps never fail:
//! work that cannot be done is skipped and recorded in the [`CleanReport`].

use tabclean_model::{CleanOptions, Table};
use tracing::{debug, info, info_span, warn};

use crate::coerce::coerce_columns;
use crate::finalize::finalize;
use crate::impute::resolve_missing;
use crate::reconcile::reconcile_column;
use crate::report::CleanReport;
use crate::text::{normalize_columns, text_columns};

/// A single step of the cleaning pipeline.
pub trait CleaningStep: Send + Sync {
    /// Run this step on the pipeline's private table.
    fn execute(&self, table: &mut Table, options: &CleanOptions, state: &mut PipelineState);

    /// Name used in logs and in [`CleanReport::executed_steps`].
    fn step_name(&self) -> &str;

    /// Whether the options turn this step off. Defaults to always running.
    fn should_skip(&self, _options: &CleanOptions) -> bool {
        false
    }
}

/// State shared across the steps of one run.
#[derive(Debug, Default)]
pub struct PipelineState {
    /// Text columns as they were on entry; only these are normalized.
    pub entry_text_columns: Vec<usize>,
    pub report: CleanReport,
}

impl PipelineState {
    pub fn for_table(table: &Table) -> Self {
        Self {
            entry_text_columns: text_columns(table),
            report: CleanReport {
                input_rows: table.height(),
                input_columns: table.width(),
                ..CleanReport::default()
            },
        }
    }
}

pub struct NormalizeTextStep;

impl CleaningStep for NormalizeTextStep {
    fn execute(&self, table: &mut Table, _options: &CleanOptions, state: &mut PipelineState) {
        state.report.normalized_cells = normalize_columns(table, &state.entry_text_columns);
    }

    fn step_name(&self) -> &str {
        "normalize_text"
    }
}

pub struct ResolveMissingStep;

impl CleaningStep for ResolveMissingStep {
    fn execute(&self, table: &mut Table, options: &CleanOptions, state: &mut PipelineState) {
        state.report.imputations = resolve_missing(table, options);
    }

    fn step_name(&self) -> &str {
        "resolve_missing"
    }
}

pub struct ReconcileVocabularyStep;

impl CleaningStep for ReconcileVocabularyStep {
    fn execute(&self, table: &mut Table, options: &CleanOptions, state: &mut PipelineState) {
        let Some(target) = options.reconciliation() else {
            return;
        };
        match reconcile_column(table, target, options.scorer) {
            Some(summary) => state.report.reconciliation = Some(summary),
            None => {
                state.report.reconciliation_skipped =
                    Some(format!("column '{}' not found", target.column));
            }
        }
    }

    fn step_name(&self) -> &str {
        "reconcile_vocabulary"
    }

    fn should_skip(&self, options: &CleanOptions) -> bool {
        options.reconciliation().is_none()
    }
}

pub struct CoerceTypesStep;

impl CleaningStep for CoerceTypesStep {
    fn execute(&self, table: &mut Table, _options: &CleanOptions, state: &mut PipelineState) {
        state.report.coercions = coerce_columns(table);
    }

    fn step_name(&self) -> &str {
        "coerce_types"
    }
}

pub struct FinalizeStep;

impl CleaningStep for FinalizeStep {
    fn execute(&self, table: &mut Table, options: &CleanOptions, state: &mut PipelineState) {
        state.report.duplicates_removed = finalize(table, options.drop_duplicates);
    }

    fn step_name(&self) -> &str {
        "finalize"
    }
}

/// The fixed sequence of cleaning steps.
pub struct CleaningPipeline {
    steps: Vec<Box<dyn CleaningStep>>,
}

impl Default for CleaningPipeline {
    fn default() -> Self {
        Self::standard()
    }
}

impl CleaningPipeline {
    pub fn standard() -> Self {
        Self {
            steps: vec![
                Box::new(NormalizeTextStep),
                Box::new(ResolveMissingStep),
                Box::new(ReconcileVocabularyStep),
                Box::new(CoerceTypesStep),
                Box::new(FinalizeStep),
            ],
        }
    }

    /// List step names in execution order.
    pub fn step_names(&self) -> Vec<&str> {
        self.steps.iter().map(|s| s.step_name()).collect()
    }

    /// Cleans a copy of `input`; the caller's table is never modified.
    pub fn run(&self, input: &Table, options: &CleanOptions) -> (Table, CleanReport) {
        let span = info_span!("clean", rows = input.height(), columns = input.width());
        let _guard = span.enter();

        let mut table = input.clone();
        let mut state = PipelineState::for_table(&table);
        if options.fuzzy_clean && options.reconciliation().is_none() {
            warn!("fuzzy cleaning needs a column and a non-empty vocabulary; skipping");
            state.report.reconciliation_skipped =
                Some("fuzzy column or valid values not provided".to_string());
        }

        for step in &self.steps {
            if step.should_skip(options) {
                debug!(step = step.step_name(), "skipped");
                continue;
            }
            step.execute(&mut table, options, &mut state);
            debug!(
                step = step.step_name(),
                rows = table.height(),
                columns = table.width(),
                "step finished"
            );
            state.report.executed_steps.push(step.step_name().to_string());
        }

        let mut report = state.report;
        report.output_rows = table.height();
        report.output_columns = table.width();
        info!(
            input_rows = report.input_rows,
            output_rows = report.output_rows,
            filled = report.cells_filled(),
            dropped = report.rows_dropped(),
            duplicates = report.duplicates_removed,
            coerced = report.coercions.len(),
            "cleaning finished"
        );
        (table, report)
    }
}

/// Cleans `table` and reports what each step did.
pub fn clean_with_report(table: &Table, options: &CleanOptions) -> (Table, CleanReport) {
    CleaningPipeline::standard().run(table, options)
}

/// Cleans `table` with `options`.
///
/// Pure: the input is copied and left untouched, and nothing is retained after return.
pub fn clean(table: &Table, options: &CleanOptions) -> Table {
    clean_with_report(table, options).0
}
