//! In-memory rectangular tables.
//!
//! A [`Table`] is an ordered list of named [`Column`]s of equal length plus a
//! row index holding one label per row. Dropping rows keeps the labels of the
//! surviving rows, so the index can have gaps until [`Table::reset_index`]
//! renumbers it.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cell::CellValue;
use crate::error::{ModelError, Result};

/// Logical type of a column, derived from its non-missing cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    /// Every cell is missing.
    Missing,
    /// At least one cell is text; other cells may be of any kind.
    Text,
    Number,
    Timestamp,
    /// Numbers and timestamps without any text.
    Mixed,
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Missing => "missing",
            Self::Text => "text",
            Self::Number => "number",
            Self::Timestamp => "timestamp",
            Self::Mixed => "mixed",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub values: Vec<CellValue>,
}

impl Column {
    pub fn new(name: impl Into<String>, values: Vec<CellValue>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Builds a column from anything convertible into cells.
    pub fn from_values<I, T>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<CellValue>,
    {
        Self::new(name, values.into_iter().map(Into::into).collect())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn kind(&self) -> ColumnKind {
        let mut numbers = false;
        let mut timestamps = false;
        for value in &self.values {
            match value {
                CellValue::Missing => {}
                CellValue::Text(_) => return ColumnKind::Text,
                CellValue::Number(_) => numbers = true,
                CellValue::Timestamp(_) => timestamps = true,
            }
        }
        match (numbers, timestamps) {
            (false, false) => ColumnKind::Missing,
            (true, false) => ColumnKind::Number,
            (false, true) => ColumnKind::Timestamp,
            (true, true) => ColumnKind::Mixed,
        }
    }

    pub fn missing_count(&self) -> usize {
        self.values.iter().filter(|value| value.is_missing()).count()
    }

    pub fn has_missing(&self) -> bool {
        self.values.iter().any(CellValue::is_missing)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Table {
    columns: Vec<Column>,
    index: Vec<usize>,
}

impl Table {
    /// Builds a table with a dense `0..n` row index.
    ///
    /// # Errors
    ///
    /// Fails when a column name is empty or repeated, or when columns differ in length.
    pub fn from_columns(columns: Vec<Column>) -> Result<Self> {
        let height = columns.first().map_or(0, Column::len);
        Self::with_index(columns, (0..height).collect())
    }

    /// Builds a table with explicit row labels.
    ///
    /// # Errors
    ///
    /// Same as [`Table::from_columns`], plus a label count that differs from the row count.
    pub fn with_index(columns: Vec<Column>, index: Vec<usize>) -> Result<Self> {
        let mut seen = BTreeSet::new();
        for column in &columns {
            if column.name.trim().is_empty() {
                return Err(ModelError::EmptyColumnName);
            }
            if !seen.insert(column.name.as_str()) {
                return Err(ModelError::DuplicateColumn(column.name.clone()));
            }
            if column.len() != index.len() {
                return Err(ModelError::RaggedColumns {
                    column: column.name.clone(),
                    expected: index.len(),
                    actual: column.len(),
                });
            }
        }
        if columns.is_empty() && !index.is_empty() {
            return Err(ModelError::IndexLength {
                expected: 0,
                actual: index.len(),
            });
        }
        Ok(Self { columns, index })
    }

    pub fn height(&self) -> usize {
        self.index.len()
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.height() == 0
    }

    pub fn index(&self) -> &[usize] {
        &self.index
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Mutable access to the columns.
    ///
    /// Callers may rewrite cells but must keep every column at [`Table::height`] rows.
    pub fn columns_mut(&mut self) -> &mut [Column] {
        &mut self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Appends a column after the existing ones.
    ///
    /// # Errors
    ///
    /// Fails on an empty or duplicate name, or a length that differs from the table height.
    pub fn push_column(&mut self, column: Column) -> Result<()> {
        if column.name.trim().is_empty() {
            return Err(ModelError::EmptyColumnName);
        }
        if self.column_index(&column.name).is_some() {
            return Err(ModelError::DuplicateColumn(column.name));
        }
        if self.columns.is_empty() && self.index.is_empty() {
            self.index = (0..column.len()).collect();
        } else if column.len() != self.height() {
            let actual = column.len();
            return Err(ModelError::RaggedColumns {
                column: column.name,
                expected: self.height(),
                actual,
            });
        }
        self.columns.push(column);
        Ok(())
    }

    /// Replaces the column with the same name in place, or appends it.
    ///
    /// Returns `true` when an existing column was replaced.
    ///
    /// # Errors
    ///
    /// Fails when the length differs from the table height.
    pub fn replace_or_push_column(&mut self, column: Column) -> Result<bool> {
        match self.column_index(&column.name) {
            Some(position) => {
                if column.len() != self.height() {
                    let actual = column.len();
                    return Err(ModelError::RaggedColumns {
                        column: column.name,
                        expected: self.height(),
                        actual,
                    });
                }
                self.columns[position] = column;
                Ok(true)
            }
            None => self.push_column(column).map(|()| false),
        }
    }

    /// Keeps the rows whose mask entry is `true`; returns how many rows were removed.
    ///
    /// Rows past the end of a short mask are kept. Labels of kept rows are preserved.
    pub fn retain_rows(&mut self, keep: &[bool]) -> usize {
        let before = self.height();
        let keep_row = |row: usize| keep.get(row).copied().unwrap_or(true);
        for column in &mut self.columns {
            let mut row = 0;
            column.values.retain(|_| {
                let kept = keep_row(row);
                row += 1;
                kept
            });
        }
        let mut row = 0;
        self.index.retain(|_| {
            let kept = keep_row(row);
            row += 1;
            kept
        });
        before - self.height()
    }

    /// Renumbers the row index to `0..height`.
    pub fn reset_index(&mut self) {
        self.index = (0..self.height()).collect();
    }

    pub fn missing_count(&self) -> usize {
        self.columns.iter().map(Column::missing_count).sum()
    }
}
