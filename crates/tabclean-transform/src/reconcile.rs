//! Vocabulary reconciliation.
//!
//! Maps free-text values onto the closest entry of a fixed vocabulary and
//! writes the result into a derived `{column}_cleaned` column. There is no
//! minimum score: the closest entry always wins, however weak the match.

use rapidfuzz::distance::{indel, jaro_winkler, levenshtein};
use tabclean_model::{CellValue, Column, MatchScorer, ReconcileTarget, Table};
use tracing::{debug, warn};

use crate::report::ReconciliationSummary;

/// A vocabulary entry chosen for a query string.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VocabularyMatch<'a> {
    pub value: &'a str,
    /// Similarity in `0.0..=1.0`.
    pub score: f64,
    /// Position of the entry in the vocabulary.
    pub position: usize,
}

/// Scores query strings against an ordered vocabulary.
#[derive(Debug, Clone, Copy)]
pub struct VocabularyMatcher<'a> {
    vocabulary: &'a [String],
    scorer: MatchScorer,
}

impl<'a> VocabularyMatcher<'a> {
    pub fn new(vocabulary: &'a [String], scorer: MatchScorer) -> Self {
        Self { vocabulary, scorer }
    }

    pub fn similarity(&self, query: &str, candidate: &str) -> f64 {
        match self.scorer {
            MatchScorer::Ratio => indel::normalized_similarity(query.chars(), candidate.chars()),
            MatchScorer::Levenshtein => {
                levenshtein::normalized_similarity(query.chars(), candidate.chars())
            }
            MatchScorer::JaroWinkler => jaro_winkler::similarity(query.chars(), candidate.chars()),
        }
    }

    /// The highest-scoring entry; the earliest entry wins a tie.
    ///
    /// Returns `None` only for an empty vocabulary.
    pub fn best_match(&self, query: &str) -> Option<VocabularyMatch<'a>> {
        let mut best: Option<VocabularyMatch<'a>> = None;
        for (position, candidate) in self.vocabulary.iter().enumerate() {
            let score = self.similarity(query, candidate);
            if best.is_none_or(|b| score > b.score) {
                best = Some(VocabularyMatch {
                    value: candidate,
                    score,
                    position,
                });
            }
        }
        best
    }
}

/// Adds the reconciled column for `target` to `table`.
///
/// Text cells are replaced by their best vocabulary match; every other cell,
/// including `Missing`, is copied unchanged. The source column is not modified.
/// Returns `None` when the source column does not exist.
pub fn reconcile_column(
    table: &mut Table,
    target: ReconcileTarget<'_>,
    scorer: MatchScorer,
) -> Option<ReconciliationSummary> {
    let Some(source) = table.column(target.column) else {
        warn!(
            column = target.column,
            "reconciliation column not found; skipping"
        );
        return None;
    };
    let matcher = VocabularyMatcher::new(target.vocabulary, scorer);
    let mut matched = 0;
    let mut passed_through = 0;
    let values: Vec<CellValue> = source
        .values
        .iter()
        .map(|value| match value {
            CellValue::Text(text) => match matcher.best_match(text) {
                Some(found) => {
                    matched += 1;
                    CellValue::text(found.value)
                }
                None => {
                    passed_through += 1;
                    value.clone()
                }
            },
            other => {
                passed_through += 1;
                other.clone()
            }
        })
        .collect();

    let derived = target.derived_column();
    let replaced_existing = match table.replace_or_push_column(Column::new(&derived, values)) {
        Ok(replaced) => replaced,
        Err(error) => {
            warn!(column = %derived, %error, "could not add reconciled column");
            return None;
        }
    };
    debug!(
        source = target.column,
        derived = %derived,
        matched,
        passed_through,
        "reconciled vocabulary"
    );
    Some(ReconciliationSummary {
        source_column: target.column.to_string(),
        derived_column: derived,
        scorer,
        matched,
        passed_through,
        replaced_existing,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fruits() -> Vec<String> {
        ["apple", "banana", "orange"]
            .iter()
            .map(|s| (*s).to_string())
            .collect()
    }

    #[test]
    fn picks_closest_entry() {
        let vocabulary = fruits();
        let matcher = VocabularyMatcher::new(&vocabulary, MatchScorer::Ratio);
        let found = matcher.best_match("applle").unwrap();
        assert_eq!(found.value, "apple");
        assert!(found.score > 0.8, "score was {}", found.score);
    }

    #[test]
    fn always_returns_a_candidate() {
        let vocabulary = fruits();
        let matcher = VocabularyMatcher::new(&vocabulary, MatchScorer::Levenshtein);
        assert!(matcher.best_match("zzzzzzzz").is_some());
    }

    #[test]
    fn ties_go_to_first_entry() {
        let vocabulary = vec!["ab".to_string(), "ab".to_string()];
        let matcher = VocabularyMatcher::new(&vocabulary, MatchScorer::Ratio);
        assert_eq!(matcher.best_match("xy").unwrap().position, 0);
        assert_eq!(matcher.best_match("ab").unwrap().position, 0);
    }

    #[test]
    fn empty_vocabulary_has_no_match() {
        let vocabulary: Vec<String> = Vec::new();
        let matcher = VocabularyMatcher::new(&vocabulary, MatchScorer::JaroWinkler);
        assert!(matcher.best_match("apple").is_none());
    }

    #[test]
    fn jaro_winkler_scorer_matches_typos() {
        let vocabulary = fruits();
        let matcher = VocabularyMatcher::new(&vocabulary, MatchScorer::JaroWinkler);
        assert_eq!(matcher.best_match("banan").unwrap().value, "banana");
    }

    #[test]
    fn derived_column_passes_missing_through() {
        let mut table = Table::from_columns(vec![Column::new(
            "fruit",
            vec![
                CellValue::text("applle"),
                CellValue::Missing,
                CellValue::Number(3.0),
            ],
        )])
        .unwrap();
        let vocabulary = fruits();
        let target = ReconcileTarget {
            column: "fruit",
            vocabulary: &vocabulary,
        };
        let summary = reconcile_column(&mut table, target, MatchScorer::Ratio).unwrap();
        assert_eq!(summary.matched, 1);
        assert_eq!(summary.passed_through, 2);
        assert_eq!(table.column_names(), vec!["fruit", "fruit_cleaned"]);
        assert_eq!(
            table.column("fruit_cleaned").unwrap().values,
            vec![
                CellValue::text("apple"),
                CellValue::Missing,
                CellValue::Number(3.0),
            ]
        );
        assert_eq!(
            table.column("fruit").unwrap().values[0],
            CellValue::text("applle")
        );
    }

    #[test]
    fn unknown_column_is_skipped() {
        let mut table =
            Table::from_columns(vec![Column::from_values("fruit", ["apple"])]).unwrap();
        let vocabulary = fruits();
        let target = ReconcileTarget {
            column: "colour",
            vocabulary: &vocabulary,
        };
        assert!(reconcile_column(&mut table, target, MatchScorer::Ratio).is_none());
        assert_eq!(table.width(), 1);
    }
}
