//! Text normalization.

use tabclean_model::{CellValue, ColumnKind, Table};

/// Normalizes a single text value.
///
/// Lower-cases, collapses every whitespace run into one space, trims both ends
/// and removes characters outside printable ASCII (`0x20..=0x7E`). Applying it
/// twice gives the same result as applying it once.
pub fn normalize_text(raw: &str) -> String {
    let lowered = raw.to_lowercase();
    let mut out = String::with_capacity(lowered.len());
    for word in lowered.split_whitespace() {
        let start = out.len();
        if start > 0 {
            out.push(' ');
        }
        let kept = out.len();
        out.extend(word.chars().filter(|ch| (' '..='~').contains(ch)));
        if out.len() == kept {
            // Nothing printable in this word; undo the separator.
            out.truncate(start);
        }
    }
    out
}

/// Indices of the columns whose kind is [`ColumnKind::Text`].
pub fn text_columns(table: &Table) -> Vec<usize> {
    table
        .columns()
        .iter()
        .enumerate()
        .filter(|(_, column)| column.kind() == ColumnKind::Text)
        .map(|(idx, _)| idx)
        .collect()
}

/// Normalizes the text cells of the given columns in place.
///
/// Non-text cells are left alone. Returns the number of cells whose value changed.
pub fn normalize_columns(table: &mut Table, columns: &[usize]) -> usize {
    let mut changed = 0;
    for &idx in columns {
        let Some(column) = table.columns_mut().get_mut(idx) else {
            continue;
        };
        for value in &mut column.values {
            if let CellValue::Text(text) = value {
                let normalized = normalize_text(text);
                if normalized != *text {
                    *text = normalized;
                    changed += 1;
                }
            }
        }
    }
    changed
}

#[cfg(test)]
mod tests {
    use tabclean_model::Column;

    use super::*;

    #[test]
    fn trims_and_lowercases() {
        assert_eq!(normalize_text("  Apple  "), "apple");
        assert_eq!(normalize_text("BANANA"), "banana");
    }

    #[test]
    fn collapses_internal_whitespace() {
        assert_eq!(normalize_text("green \t\n apple"), "green apple");
        assert_eq!(normalize_text("a\u{a0}b"), "a b");
    }

    #[test]
    fn removes_non_printable_characters() {
        assert_eq!(normalize_text("caf\u{e9}"), "caf");
        assert_eq!(normalize_text("a\u{7f}b"), "ab");
        assert_eq!(normalize_text("a \u{2603} b"), "a b");
        assert_eq!(normalize_text("\u{2603}"), "");
    }

    #[test]
    fn keeps_empty_text_empty() {
        assert_eq!(normalize_text(""), "");
        assert_eq!(normalize_text("   "), "");
    }

    #[test]
    fn is_idempotent_on_samples() {
        for raw in ["  Mixed\tCASE  text ", "\u{e9}t\u{e9} x", "x \u{1}\u{2} y", "A-B_C"] {
            let once = normalize_text(raw);
            assert_eq!(normalize_text(&once), once, "input {raw:?}");
        }
    }

    #[test]
    fn leaves_non_text_cells_alone() {
        let mut table = Table::from_columns(vec![Column::new(
            "mixed",
            vec![
                CellValue::text(" A "),
                CellValue::Number(1.0),
                CellValue::Missing,
                CellValue::text("b"),
            ],
        )])
        .unwrap();
        let columns = text_columns(&table);
        let changed = normalize_columns(&mut table, &columns);
        assert_eq!(changed, 1);
        assert_eq!(
            table.columns()[0].values,
            vec![
                CellValue::text("a"),
                CellValue::Number(1.0),
                CellValue::Missing,
                CellValue::text("b"),
            ]
        );
    }
}
