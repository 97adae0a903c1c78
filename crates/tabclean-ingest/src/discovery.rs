//! Input format detection and sheet selection.
//!
//! Spreadsheet files are workbooks whose sheets are picked by name. Any other
//! file is delimited text holding a single sheet.

use std::path::Path;

use tracing::debug;

use crate::error::{IngestError, Result};

/// Extensions read as spreadsheet workbooks, compared case-insensitively.
const WORKBOOK_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xlsb", "xls", "xla", "xlam", "ods"];

/// How a file on disk is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// Delimited text read with polars.
    Delimited { separator: u8 },
    /// Spreadsheet workbook read with calamine.
    Workbook,
}

impl SourceFormat {
    /// Detects the format from the file extension.
    pub fn for_path(path: &Path) -> Self {
        let is_workbook = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                WORKBOOK_EXTENSIONS
                    .iter()
                    .any(|known| ext.eq_ignore_ascii_case(known))
            });
        if is_workbook {
            Self::Workbook
        } else {
            Self::Delimited {
                separator: separator_for(path),
            }
        }
    }
}

/// Tab for `.tsv`/`.tab` files, comma for everything else.
pub fn separator_for(path: &Path) -> u8 {
    let is_tab = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("tsv") || ext.eq_ignore_ascii_case("tab"));
    if is_tab { b'\t' } else { b',' }
}

/// Picks a sheet out of a workbook's sheet names.
///
/// An exact name wins over a case-insensitive match. `None` takes the first
/// sheet in workbook order.
pub fn select_sheet<'a>(
    names: &'a [String],
    requested: Option<&str>,
    path: &Path,
) -> Result<&'a str> {
    let selected = match requested {
        Some(name) => names
            .iter()
            .find(|candidate| candidate.as_str() == name)
            .or_else(|| {
                names
                    .iter()
                    .find(|candidate| candidate.eq_ignore_ascii_case(name))
            })
            .ok_or_else(|| IngestError::SheetNotFound {
                sheet: name.to_string(),
                path: path.to_path_buf(),
            })?,
        None => names.first().ok_or_else(|| IngestError::NoSheets {
            path: path.to_path_buf(),
        })?,
    };
    debug!(path = %path.display(), sheet = %selected, sheets = names.len(), "selected sheet");
    Ok(selected.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names() -> Vec<String> {
        ["Orders", "orders", "Customers"]
            .into_iter()
            .map(String::from)
            .collect()
    }

    #[test]
    fn spreadsheet_extensions_are_workbooks() {
        for file in ["book.xlsx", "BOOK.XLS", "sheet.ods", "macro.xlsm"] {
            assert_eq!(SourceFormat::for_path(Path::new(file)), SourceFormat::Workbook);
        }
    }

    #[test]
    fn other_files_are_delimited() {
        assert_eq!(
            SourceFormat::for_path(Path::new("fruit.csv")),
            SourceFormat::Delimited { separator: b',' }
        );
        assert_eq!(
            SourceFormat::for_path(Path::new("fruit.TSV")),
            SourceFormat::Delimited { separator: b'\t' }
        );
        assert_eq!(
            SourceFormat::for_path(Path::new("fruit")),
            SourceFormat::Delimited { separator: b',' }
        );
    }

    #[test]
    fn exact_name_wins_over_case_insensitive() {
        let names = names();
        let path = Path::new("book.xlsx");
        assert_eq!(select_sheet(&names, Some("orders"), path).unwrap(), "orders");
        assert_eq!(select_sheet(&names, Some("ORDERS"), path).unwrap(), "Orders");
        assert_eq!(
            select_sheet(&names, Some("customers"), path).unwrap(),
            "Customers"
        );
    }

    #[test]
    fn first_sheet_is_default() {
        let names = names();
        assert_eq!(
            select_sheet(&names, None, Path::new("book.xlsx")).unwrap(),
            "Orders"
        );
    }

    #[test]
    fn unknown_sheet_is_an_error() {
        let names = names();
        let err = select_sheet(&names, Some("invoices"), Path::new("book.xlsx")).unwrap_err();
        assert!(matches!(err, IngestError::SheetNotFound { .. }));
    }

    #[test]
    fn empty_workbook_has_no_sheets() {
        let err = select_sheet(&[], None, Path::new("book.xlsx")).unwrap_err();
        assert!(matches!(err, IngestError::NoSheets { .. }));
    }
}
