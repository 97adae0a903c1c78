//! Table loading: delimited files with polars, workbooks with calamine.

use std::path::Path;

use polars::prelude::{CsvParseOptions, CsvReadOptions, DataFrame, SerReader};
use tabclean_model::Table;
use tracing::{info, warn};

use crate::discovery::SourceFormat;
use crate::error::{IngestError, Result};
use crate::frame::dataframe_to_table;
use crate::path::resolve_path;
use crate::workbook::read_sheet;

/// Reads one delimited file into a DataFrame.
///
/// The first row is the header and the schema is inferred from every row.
pub fn read_frame(path: &Path, separator: u8) -> Result<DataFrame> {
    let read_error = |e: polars::prelude::PolarsError| IngestError::Read {
        path: path.to_path_buf(),
        message: e.to_string(),
    };
    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .with_parse_options(CsvParseOptions::default().with_separator(separator))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(read_error)?
        .finish()
        .map_err(read_error)
}

/// Loads a table from `path`.
///
/// The path may start with `~` and may be relative. Spreadsheet workbooks are
/// read with calamine and `sheet` picks the sheet by name; see
/// [`select_sheet`](crate::discovery::select_sheet). Delimited files hold a
/// single sheet and any requested name is ignored.
pub fn load_table(path: impl AsRef<Path>, sheet: Option<&str>) -> Result<Table> {
    let resolved = resolve_path(path);
    if !resolved.exists() {
        return Err(IngestError::FileNotFound { path: resolved });
    }
    if resolved.is_dir() {
        return Err(IngestError::NotAFile { path: resolved });
    }

    let (sheet_name, table) = match SourceFormat::for_path(&resolved) {
        SourceFormat::Workbook => read_sheet(&resolved, sheet)?,
        SourceFormat::Delimited { separator } => {
            if let Some(name) = sheet {
                warn!(
                    path = %resolved.display(),
                    sheet = name,
                    "delimited input is a single sheet; ignoring sheet name"
                );
            }
            let df = read_frame(&resolved, separator)?;
            let name = resolved
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_default();
            (name, dataframe_to_table(&df)?)
        }
    };

    info!(
        path = %resolved.display(),
        sheet = %sheet_name,
        rows = table.height(),
        columns = table.width(),
        "loaded table"
    );
    Ok(table)
}
