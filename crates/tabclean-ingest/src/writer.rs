//! Delimited output for cleaned tables.

use std::io::Write;
use std::path::Path;

use tabclean_model::Table;
use tracing::info;

use crate::discovery::separator_for;
use crate::error::{IngestError, Result};

fn write_records<W: Write>(table: &Table, writer: &mut csv::Writer<W>) -> csv::Result<()> {
    writer.write_record(table.column_names())?;
    for row in 0..table.height() {
        writer.write_record(
            table
                .columns()
                .iter()
                .map(|column| column.values[row].to_string()),
        )?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes `table` as comma-separated text to `out`.
///
/// Missing cells become empty fields. The row index is not written.
pub fn write_table_to<W: Write>(table: &Table, out: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    write_records(table, &mut writer)?;
    Ok(())
}

/// Writes `table` to `path`, tab-separated for `.tsv`/`.tab` and comma-separated otherwise.
pub fn write_table(table: &Table, path: &Path) -> Result<()> {
    let write_error = |source| IngestError::Write {
        path: path.to_path_buf(),
        source,
    };
    let mut writer = csv::WriterBuilder::new()
        .delimiter(separator_for(path))
        .from_path(path)
        .map_err(write_error)?;
    write_records(table, &mut writer).map_err(write_error)?;
    info!(
        path = %path.display(),
        rows = table.height(),
        columns = table.width(),
        "wrote table"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use tabclean_model::{CellValue, Column};

    use super::*;

    #[test]
    fn renders_cells_without_index() {
        let ts = NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_milli_opt(8, 30, 0, 250)
            .unwrap();
        let table = Table::with_index(
            vec![
                Column::from_values("name", [Some("ann, jr"), None]),
                Column::new("n", vec![CellValue::Number(2.0), CellValue::Number(0.5)]),
                Column::from_values("t", [Some(ts), None]),
            ],
            vec![3, 7],
        )
        .unwrap();

        let mut out = Vec::new();
        write_table_to(&table, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "name,n,t\n\"ann, jr\",2,2024-01-15 08:30:00.250\n,0.5,\n"
        );
    }
}
