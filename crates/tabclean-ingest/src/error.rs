//! Error types for table loading and writing.

use std::path::PathBuf;

use tabclean_model::ModelError;
use thiserror::Error;

/// Errors that can occur while loading or writing a table.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Input path does not exist.
    #[error("the file '{}' was not found. Perhaps the wrong filepath?", path.display())]
    FileNotFound { path: PathBuf },

    /// Input path is a directory.
    #[error("'{}' is a directory, expected a delimited file or a workbook", path.display())]
    NotAFile { path: PathBuf },

    // === Sheet Selection Errors ===
    /// Named sheet is not present in the workbook.
    #[error("sheet '{sheet}' not found in {}", path.display())]
    SheetNotFound { sheet: String, path: PathBuf },

    /// Workbook holds no sheets.
    #[error("no sheets found in {}", path.display())]
    NoSheets { path: PathBuf },

    // === Parsing Errors ===
    /// Polars failed to read the file.
    #[error("an error occurred while loading {}: {message}", path.display())]
    Read { path: PathBuf, message: String },

    /// Calamine failed to open the workbook or read a sheet.
    #[error("an error occurred while loading workbook {}: {message}", path.display())]
    Workbook { path: PathBuf, message: String },

    // === DataFrame Errors ===
    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },

    /// Loaded data does not form a valid table.
    #[error(transparent)]
    Model(#[from] ModelError),

    // === Output Errors ===
    /// Failed to write a table to a file.
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Failed to write a table to a stream.
    #[error("failed to write table: {0}")]
    Csv(#[from] csv::Error),
}

impl From<polars::prelude::PolarsError> for IngestError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_not_found_message_suggests_wrong_path() {
        let err = IngestError::FileNotFound {
            path: PathBuf::from("/data/fruits.csv"),
        };
        assert_eq!(
            err.to_string(),
            "the file '/data/fruits.csv' was not found. Perhaps the wrong filepath?"
        );
    }

    #[test]
    fn polars_errors_become_dataframe_errors() {
        let polars_err = polars::prelude::PolarsError::ColumnNotFound("score".into());
        let err: IngestError = polars_err.into();
        assert!(matches!(err, IngestError::DataFrame { .. }));
    }
}
