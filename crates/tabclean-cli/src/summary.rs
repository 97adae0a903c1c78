use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use tabclean_model::{CellValue, ColumnKind, Table as DataTable};
use tabclean_transform::{CleanReport, ImputationOutcome};

/// Prints the first `rows` rows of `data` with column kinds under the names.
pub fn print_preview(data: &DataTable, rows: usize) {
    println!("{}", preview_table(data, rows));
    println!("[{} rows x {} columns]", data.height(), data.width());
}

fn preview_table(data: &DataTable, rows: usize) -> Table {
    let mut table = Table::new();
    let mut header = vec![header_cell("#")];
    header.extend(
        data.columns()
            .iter()
            .map(|column| header_cell(&format!("{}\n{}", column.name, column.kind()))),
    );
    table.set_header(header);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for (position, column) in data.columns().iter().enumerate() {
        if matches!(column.kind(), ColumnKind::Number) {
            align_column(&mut table, position + 1, CellAlignment::Right);
        }
    }

    for (row, label) in data.index().iter().take(rows).enumerate() {
        let mut cells = vec![dim_cell(label)];
        cells.extend(
            data.columns()
                .iter()
                .map(|column| value_cell(&column.values[row])),
        );
        table.add_row(cells);
    }
    table
}

pub fn print_report_summary(report: &CleanReport) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Step"), header_cell("Result")]);
    apply_summary_table_style(&mut table);
    table.add_row(vec![
        Cell::new("Shape"),
        Cell::new(format!(
            "{} x {} -> {} x {}",
            report.input_rows, report.input_columns, report.output_rows, report.output_columns
        )),
    ]);
    table.add_row(vec![
        Cell::new("Normalized cells"),
        count_cell(report.normalized_cells, Color::Green),
    ]);
    table.add_row(vec![
        Cell::new("Cells filled"),
        count_cell(report.cells_filled(), Color::Green),
    ]);
    table.add_row(vec![
        Cell::new("Rows dropped"),
        count_cell(report.rows_dropped(), Color::Yellow),
    ]);
    table.add_row(vec![Cell::new("Reconciliation"), reconciliation_cell(report)]);
    table.add_row(vec![
        Cell::new("Columns coerced"),
        count_cell(report.coercions.len(), Color::Green),
    ]);
    table.add_row(vec![
        Cell::new("Duplicates removed"),
        count_cell(report.duplicates_removed, Color::Yellow),
    ]);
    println!("{table}");
    print_column_table(report);
}

fn print_column_table(report: &CleanReport) {
    if report.imputations.is_empty() && report.coercions.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Strategy"),
        header_cell("Filled"),
        header_cell("Dropped"),
        header_cell("Outcome"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    for imputation in &report.imputations {
        table.add_row(vec![
            Cell::new(&imputation.column).add_attribute(Attribute::Bold),
            Cell::new(imputation.strategy),
            count_cell(imputation.filled, Color::Green),
            count_cell(imputation.rows_dropped, Color::Yellow),
            outcome_cell(&imputation.outcome),
        ]);
    }
    for coercion in &report.coercions {
        table.add_row(vec![
            Cell::new(&coercion.column).add_attribute(Attribute::Bold),
            dim_cell("-"),
            dim_cell("-"),
            dim_cell("-"),
            Cell::new(format!("coerced to {}", coercion.kind)).fg(Color::Blue),
        ]);
    }
    println!();
    println!("Columns:");
    println!("{table}");
}

fn reconciliation_cell(report: &CleanReport) -> Cell {
    match (&report.reconciliation, &report.reconciliation_skipped) {
        (Some(summary), _) => Cell::new(format!(
            "{} -> {} ({} matched, {} passed through)",
            summary.source_column, summary.derived_column, summary.matched, summary.passed_through
        )),
        (None, Some(reason)) => Cell::new(format!("skipped: {reason}")).fg(Color::Yellow),
        (None, None) => dim_cell("-"),
    }
}

fn outcome_cell(outcome: &ImputationOutcome) -> Cell {
    match outcome {
        ImputationOutcome::Filled => Cell::new("filled").fg(Color::Green),
        ImputationOutcome::Dropped => Cell::new("dropped").fg(Color::Yellow),
        ImputationOutcome::Unresolved(reason) => {
            Cell::new(format!("unresolved: {reason}")).fg(Color::Red)
        }
    }
}

fn value_cell(value: &CellValue) -> Cell {
    match value {
        CellValue::Missing => dim_cell("NaN"),
        other => Cell::new(other),
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
