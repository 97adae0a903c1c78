//! Per-run record of what each cleaning step did.

use serde::Serialize;
use tabclean_model::{ColumnKind, FillStrategy, MatchScorer};

/// What happened to one column during missing-value resolution.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum ImputationOutcome {
    Filled,
    Dropped,
    /// Left with its missing cells; the reason says why.
    Unresolved(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnImputation {
    pub column: String,
    pub strategy: FillStrategy,
    /// Cells that received a value.
    pub filled: usize,
    pub rows_dropped: usize,
    pub outcome: ImputationOutcome,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReconciliationSummary {
    pub source_column: String,
    pub derived_column: String,
    pub scorer: MatchScorer,
    /// Text cells mapped onto a vocabulary entry.
    pub matched: usize,
    /// Non-text cells copied unchanged.
    pub passed_through: usize,
    /// Whether an existing column of the derived name was overwritten.
    pub replaced_existing: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnCoercion {
    pub column: String,
    pub kind: ColumnKind,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CleanReport {
    pub input_rows: usize,
    pub input_columns: usize,
    pub output_rows: usize,
    pub output_columns: usize,
    pub normalized_cells: usize,
    pub imputations: Vec<ColumnImputation>,
    pub reconciliation: Option<ReconciliationSummary>,
    /// Set when reconciliation was requested or configured but could not run.
    pub reconciliation_skipped: Option<String>,
    pub coercions: Vec<ColumnCoercion>,
    pub duplicates_removed: usize,
    pub executed_steps: Vec<String>,
}

impl CleanReport {
    /// Rows removed by the `drop` strategy.
    pub fn rows_dropped(&self) -> usize {
        self.imputations.iter().map(|i| i.rows_dropped).sum()
    }

    /// Cells filled by any strategy.
    pub fn cells_filled(&self) -> usize {
        self.imputations.iter().map(|i| i.filled).sum()
    }
}
