use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("column name must not be empty")]
    EmptyColumnName,
    #[error("duplicate column name: {0}")]
    DuplicateColumn(String),
    #[error("column '{column}' has {actual} rows, expected {expected}")]
    RaggedColumns {
        column: String,
        expected: usize,
        actual: usize,
    },
    #[error("row index has {actual} labels, expected {expected}")]
    IndexLength { expected: usize, actual: usize },
    #[error("unknown fill strategy '{0}' (expected mode, mean, median, constant or drop)")]
    UnknownStrategy(String),
    #[error("unknown scorer '{0}' (expected ratio, levenshtein or jaro_winkler)")]
    UnknownScorer(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
