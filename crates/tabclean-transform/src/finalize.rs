use std::collections::BTreeSet;

use tabclean_model::{CellKey, Table};

/// Removes rows identical to an earlier row across every column.
///
/// The first occurrence of each duplicate group is kept and row order is preserved.
/// Returns the number of rows removed.
pub fn drop_duplicate_rows(table: &mut Table) -> usize {
    let row_count = table.height();
    if row_count < 2 || table.width() == 0 {
        return 0;
    }
    let keep: Vec<bool> = {
        let columns = table.columns();
        let mut seen: BTreeSet<Vec<CellKey<'_>>> = BTreeSet::new();
        (0..row_count)
            .map(|idx| {
                let composite: Vec<CellKey<'_>> =
                    columns.iter().map(|c| c.values[idx].key()).collect();
                seen.insert(composite)
            })
            .collect()
    };
    table.retain_rows(&keep)
}

/// Drops duplicates when asked, then renumbers rows `0..n`.
pub fn finalize(table: &mut Table, drop_duplicates: bool) -> usize {
    let removed = if drop_duplicates {
        drop_duplicate_rows(table)
    } else {
        0
    };
    table.reset_index();
    removed
}

#[cfg(test)]
mod tests {
    use tabclean_model::{CellValue, Column};

    use super::*;

    #[test]
    fn keeps_first_of_each_duplicate_group() {
        let mut table = Table::from_columns(vec![
            Column::from_values("a", ["x", "y", "x", "x"]),
            Column::from_values("b", [1.0, 2.0, 1.0, 3.0]),
        ])
        .unwrap();
        let removed = finalize(&mut table, true);
        assert_eq!(removed, 1);
        assert_eq!(table.index(), &[0, 1, 2]);
        assert_eq!(
            table.column("b").unwrap().values,
            vec![
                CellValue::Number(1.0),
                CellValue::Number(2.0),
                CellValue::Number(3.0)
            ]
        );
    }

    #[test]
    fn missing_cells_compare_equal() {
        let mut table = Table::from_columns(vec![Column::from_values(
            "a",
            [None, None, Some("x")],
        )])
        .unwrap();
        assert_eq!(drop_duplicate_rows(&mut table), 1);
    }

    #[test]
    fn text_and_number_are_distinct() {
        let mut table = Table::from_columns(vec![Column::new(
            "a",
            vec![CellValue::text("1"), CellValue::Number(1.0)],
        )])
        .unwrap();
        assert_eq!(drop_duplicate_rows(&mut table), 0);
    }

    #[test]
    fn reindexes_even_without_deduplication() {
        let mut table = Table::with_index(
            vec![Column::from_values("a", ["x", "x"])],
            vec![4, 9],
        )
        .unwrap();
        assert_eq!(finalize(&mut table, false), 0);
        assert_eq!(table.height(), 2);
        assert_eq!(table.index(), &[0, 1]);
    }
}
