//! Configuration options for a cleaning run.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::cell::CellValue;
use crate::error::ModelError;

/// How missing cells are resolved. One strategy applies to the whole table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FillStrategy {
    /// Most frequent non-missing value of the column.
    Mode,
    /// Arithmetic mean; numeric columns only.
    Mean,
    /// Median; numeric columns only.
    Median,
    /// The configured constant, inserted verbatim.
    #[default]
    Constant,
    /// Remove every row with a missing cell in the column.
    Drop,
}

impl FillStrategy {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Mode => "mode",
            Self::Mean => "mean",
            Self::Median => "median",
            Self::Constant => "constant",
            Self::Drop => "drop",
        }
    }
}

impl fmt::Display for FillStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FillStrategy {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mode" => Ok(Self::Mode),
            "mean" => Ok(Self::Mean),
            "median" => Ok(Self::Median),
            "constant" => Ok(Self::Constant),
            "drop" => Ok(Self::Drop),
            _ => Err(ModelError::UnknownStrategy(s.to_string())),
        }
    }
}

/// Replacement value for the `constant` strategy and the `mode` fallback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConstantFill {
    Number(f64),
    Text(String),
}

impl Default for ConstantFill {
    fn default() -> Self {
        Self::Text("unknown".to_string())
    }
}

impl ConstantFill {
    /// Reads a finite number when possible, text otherwise.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().parse::<f64>() {
            Ok(number) if number.is_finite() => Self::Number(number),
            _ => Self::Text(raw.to_string()),
        }
    }

    pub fn to_cell(&self) -> CellValue {
        match self {
            Self::Number(value) => CellValue::Number(*value),
            Self::Text(value) => CellValue::Text(value.clone()),
        }
    }
}

/// String-similarity measure used for vocabulary reconciliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchScorer {
    /// Normalized Indel similarity.
    #[default]
    Ratio,
    /// Normalized Levenshtein similarity.
    Levenshtein,
    JaroWinkler,
}

impl MatchScorer {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ratio => "ratio",
            Self::Levenshtein => "levenshtein",
            Self::JaroWinkler => "jaro_winkler",
        }
    }
}

impl fmt::Display for MatchScorer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MatchScorer {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "ratio" | "indel" => Ok(Self::Ratio),
            "levenshtein" => Ok(Self::Levenshtein),
            "jaro_winkler" => Ok(Self::JaroWinkler),
            _ => Err(ModelError::UnknownScorer(s.to_string())),
        }
    }
}

/// Options for one cleaning run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CleanOptions {
    pub fill_missing: FillStrategy,
    pub constant_fill: ConstantFill,
    /// Turns on vocabulary reconciliation; needs `fuzzy_column` and `valid_values`.
    pub fuzzy_clean: bool,
    pub fuzzy_column: Option<String>,
    /// Allowed values, in priority order for ties.
    pub valid_values: Option<Vec<String>>,
    pub scorer: MatchScorer,
    /// Drop exact duplicate rows before reindexing.
    pub drop_duplicates: bool,
}

impl Default for CleanOptions {
    fn default() -> Self {
        Self {
            fill_missing: FillStrategy::default(),
            constant_fill: ConstantFill::default(),
            fuzzy_clean: false,
            fuzzy_column: None,
            valid_values: None,
            scorer: MatchScorer::default(),
            drop_duplicates: true,
        }
    }
}

/// A validated reconciliation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconcileTarget<'a> {
    pub column: &'a str,
    pub vocabulary: &'a [String],
}

impl ReconcileTarget<'_> {
    /// Name of the derived column.
    pub fn derived_column(&self) -> String {
        format!("{}_cleaned", self.column)
    }
}

impl CleanOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fill_missing(mut self, strategy: FillStrategy) -> Self {
        self.fill_missing = strategy;
        self
    }

    pub fn with_constant_fill(mut self, fill: ConstantFill) -> Self {
        self.constant_fill = fill;
        self
    }

    /// Enables reconciliation of `column` against `valid_values`.
    pub fn with_fuzzy<I, S>(mut self, column: impl Into<String>, valid_values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fuzzy_clean = true;
        self.fuzzy_column = Some(column.into());
        self.valid_values = Some(valid_values.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_scorer(mut self, scorer: MatchScorer) -> Self {
        self.scorer = scorer;
        self
    }

    pub fn with_drop_duplicates(mut self, enable: bool) -> Self {
        self.drop_duplicates = enable;
        self
    }

    /// The reconciliation request, when the options describe a usable one.
    ///
    /// `fuzzy_clean` without a column or with an empty vocabulary yields `None`.
    pub fn reconciliation(&self) -> Option<ReconcileTarget<'_>> {
        if !self.fuzzy_clean {
            return None;
        }
        let column = self.fuzzy_column.as_deref()?;
        let vocabulary = self.valid_values.as_deref()?;
        if vocabulary.is_empty() {
            return None;
        }
        Some(ReconcileTarget { column, vocabulary })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_constant_unknown() {
        let options = CleanOptions::default();
        assert_eq!(options.fill_missing, FillStrategy::Constant);
        assert_eq!(options.constant_fill, ConstantFill::Text("unknown".to_string()));
        assert!(options.drop_duplicates);
        assert!(options.reconciliation().is_none());
    }

    #[test]
    fn reconciliation_needs_column_and_vocabulary() {
        let mut options = CleanOptions::new().with_fuzzy("fruit", ["apple"]);
        assert_eq!(
            options.reconciliation().map(|t| t.derived_column()),
            Some("fruit_cleaned".to_string())
        );

        options.valid_values = Some(Vec::new());
        assert!(options.reconciliation().is_none());

        options.valid_values = Some(vec!["apple".to_string()]);
        options.fuzzy_column = None;
        assert!(options.reconciliation().is_none());

        options.fuzzy_column = Some("fruit".to_string());
        options.fuzzy_clean = false;
        assert!(options.reconciliation().is_none());
    }

    #[test]
    fn parses_strategy_names() {
        assert_eq!("Median".parse::<FillStrategy>(), Ok(FillStrategy::Median));
        assert_eq!(
            "average".parse::<FillStrategy>(),
            Err(ModelError::UnknownStrategy("average".to_string()))
        );
        assert_eq!(
            "jaro-winkler".parse::<MatchScorer>(),
            Ok(MatchScorer::JaroWinkler)
        );
    }

    #[test]
    fn constant_fill_prefers_numbers() {
        assert_eq!(ConstantFill::parse("0"), ConstantFill::Number(0.0));
        assert_eq!(ConstantFill::parse("n/a"), ConstantFill::Text("n/a".to_string()));
        assert_eq!(ConstantFill::parse("nan"), ConstantFill::Text("nan".to_string()));
    }

    #[test]
    fn deserializes_partial_json() {
        let options: CleanOptions = serde_json::from_str(
            r#"{"fill_missing":"median","constant_fill":0,"fuzzy_clean":true,
                "fuzzy_column":"fruit","valid_values":["apple","banana"]}"#,
        )
        .unwrap();
        assert_eq!(options.fill_missing, FillStrategy::Median);
        assert_eq!(options.constant_fill, ConstantFill::Number(0.0));
        assert_eq!(options.scorer, MatchScorer::Ratio);
        assert!(options.drop_duplicates);
        assert_eq!(options.reconciliation().map(|t| t.vocabulary.len()), Some(2));
    }
}
