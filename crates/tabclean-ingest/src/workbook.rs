//! Spreadsheet workbook reading with calamine.
//!
//! The first row of the selected sheet is the header. Blank header cells are
//! named `Unnamed: <position>` and repeated names get a `.<n>` suffix.

use std::collections::HashMap;
use std::path::Path;

use calamine::{Data, Range, Reader, open_workbook_auto};
use tabclean_model::{CellValue, Column, Table};
use tracing::debug;

use crate::discovery::select_sheet;
use crate::error::{IngestError, Result};
use crate::frame::{float_cell, integer_cell};

fn workbook_error(path: &Path, message: impl ToString) -> IngestError {
    IngestError::Workbook {
        path: path.to_path_buf(),
        message: message.to_string(),
    }
}

/// Lists the sheet names of a workbook in workbook order.
pub fn sheet_names(path: &Path) -> Result<Vec<String>> {
    let workbook = open_workbook_auto(path).map_err(|e| workbook_error(path, e))?;
    Ok(workbook.sheet_names())
}

/// Reads one sheet of a workbook, returning its name and contents.
///
/// `sheet` is resolved with [`select_sheet`].
pub fn read_sheet(path: &Path, sheet: Option<&str>) -> Result<(String, Table)> {
    let mut workbook = open_workbook_auto(path).map_err(|e| workbook_error(path, e))?;
    let names = workbook.sheet_names();
    let name = select_sheet(&names, sheet, path)?.to_string();
    let range = workbook
        .worksheet_range(&name)
        .map_err(|e| workbook_error(path, e))?;
    debug!(
        path = %path.display(),
        sheet = %name,
        height = range.height(),
        width = range.width(),
        "read worksheet range"
    );
    let table = range_to_table(path, &range)?;
    Ok((name, table))
}

/// Maps one spreadsheet cell onto a table cell.
///
/// Empty strings and error cells are missing. Booleans and ISO date strings
/// become text.
pub fn data_to_cell(value: &Data) -> CellValue {
    match value {
        Data::Empty | Data::Error(_) => CellValue::Missing,
        Data::String(s) if s.is_empty() => CellValue::Missing,
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::text(s.as_str()),
        Data::Int(v) => integer_cell(*v),
        Data::Float(v) => float_cell(*v),
        Data::Bool(b) => CellValue::text(b.to_string()),
        Data::DateTime(dt) if dt.is_duration() => float_cell(dt.as_f64()),
        Data::DateTime(dt) => dt
            .as_datetime()
            .map(CellValue::Timestamp)
            .unwrap_or(CellValue::Missing),
    }
}

fn header_name(value: &Data, position: usize) -> String {
    let name = value.to_string();
    if name.trim().is_empty() {
        format!("Unnamed: {position}")
    } else {
        name
    }
}

fn header_names(row: &[Data]) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    row.iter()
        .enumerate()
        .map(|(position, value)| {
            let base = header_name(value, position);
            let count = seen.entry(base.clone()).or_insert(0);
            let name = if *count == 0 {
                base
            } else {
                format!("{base}.{count}")
            };
            *count += 1;
            name
        })
        .collect()
}

fn range_to_table(path: &Path, range: &Range<Data>) -> Result<Table> {
    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        return Err(workbook_error(path, "sheet is empty"));
    };
    let names = header_names(header);

    let height = range.height().saturating_sub(1);
    let mut values: Vec<Vec<CellValue>> = vec![Vec::with_capacity(height); names.len()];
    for row in rows {
        for (column, value) in values.iter_mut().zip(row) {
            column.push(data_to_cell(value));
        }
    }

    let columns = names
        .into_iter()
        .zip(values)
        .map(|(name, values)| Column::new(name, values))
        .collect();
    Ok(Table::from_columns(columns)?)
}
