//! Whole-column type coercion.
//!
//! A text column becomes numeric only when every non-missing cell reads as a
//! number, and temporal only when every non-missing cell reads as a timestamp.
//! A single failure leaves the column exactly as it was.

use tabclean_model::{CellValue, Column, ColumnKind, Table};
use tracing::debug;

use crate::datetime::parse_timestamp;
use crate::report::ColumnCoercion;

/// Result of one coercion attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum CoercionOutcome {
    Coerced(ColumnKind, Vec<CellValue>),
    Kept,
}

/// Every integer up to this magnitude (2^53) is exact as `f64`.
const MAX_EXACT_INTEGER: u128 = 1 << 53;

/// Reads a finite number from text.
///
/// Integer literals too large for an exact `f64` are not numbers.
pub fn parse_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let digits = trimmed.strip_prefix(['+', '-']).unwrap_or(trimmed);
    if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
        let exact = digits
            .parse::<u128>()
            .is_ok_and(|magnitude| magnitude <= MAX_EXACT_INTEGER);
        if !exact {
            return None;
        }
    }
    trimmed.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Converts every cell with `convert`, or gives up on the first failure.
fn convert_all<F>(column: &Column, kind: ColumnKind, convert: F) -> CoercionOutcome
where
    F: Fn(&CellValue) -> Option<CellValue>,
{
    let mut values = Vec::with_capacity(column.len());
    for value in &column.values {
        if value.is_missing() {
            values.push(CellValue::Missing);
            continue;
        }
        match convert(value) {
            Some(converted) => values.push(converted),
            None => return CoercionOutcome::Kept,
        }
    }
    CoercionOutcome::Coerced(kind, values)
}

pub fn try_numeric(column: &Column) -> CoercionOutcome {
    convert_all(column, ColumnKind::Number, |value| match value {
        CellValue::Number(number) => Some(CellValue::Number(*number)),
        CellValue::Text(text) => parse_number(text).map(CellValue::Number),
        CellValue::Missing | CellValue::Timestamp(_) => None,
    })
}

pub fn try_temporal(column: &Column) -> CoercionOutcome {
    convert_all(column, ColumnKind::Timestamp, |value| match value {
        CellValue::Timestamp(ts) => Some(CellValue::Timestamp(*ts)),
        CellValue::Text(text) => parse_timestamp(text).map(CellValue::Timestamp),
        CellValue::Missing | CellValue::Number(_) => None,
    })
}

/// Numeric first, then temporal.
pub fn coerce_column(column: &Column) -> CoercionOutcome {
    if column.kind() != ColumnKind::Text {
        return CoercionOutcome::Kept;
    }
    match try_numeric(column) {
        CoercionOutcome::Kept => try_temporal(column),
        coerced => coerced,
    }
}

/// Coerces every text column of `table` that admits it.
pub fn coerce_columns(table: &mut Table) -> Vec<ColumnCoercion> {
    let mut coerced = Vec::new();
    for column in table.columns_mut() {
        if let CoercionOutcome::Coerced(kind, values) = coerce_column(column) {
            debug!(column = %column.name, %kind, "coerced column");
            column.values = values;
            coerced.push(ColumnCoercion {
                column: column.name.clone(),
                kind,
            });
        }
    }
    coerced
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_text_becomes_numbers() {
        let column = Column::from_values("n", ["1", "2", "3"]);
        assert_eq!(
            coerce_column(&column),
            CoercionOutcome::Coerced(
                ColumnKind::Number,
                vec![
                    CellValue::Number(1.0),
                    CellValue::Number(2.0),
                    CellValue::Number(3.0)
                ]
            )
        );
    }

    #[test]
    fn one_bad_cell_keeps_the_column() {
        let column = Column::from_values("n", ["1", "x", "3"]);
        assert_eq!(coerce_column(&column), CoercionOutcome::Kept);
    }

    #[test]
    fn missing_cells_do_not_block_coercion() {
        let column = Column::from_values("n", [Some("1.5"), None]);
        assert_eq!(
            coerce_column(&column),
            CoercionOutcome::Coerced(
                ColumnKind::Number,
                vec![CellValue::Number(1.5), CellValue::Missing]
            )
        );
    }

    #[test]
    fn mixed_numbers_and_numeric_text_coerce() {
        let column = Column::new("n", vec![CellValue::Number(1.0), CellValue::text("2")]);
        assert!(matches!(
            coerce_column(&column),
            CoercionOutcome::Coerced(ColumnKind::Number, _)
        ));
    }

    #[test]
    fn dates_fall_through_to_temporal() {
        let column = Column::from_values("d", ["2024-01-15", "2024-02-01"]);
        assert!(matches!(
            coerce_column(&column),
            CoercionOutcome::Coerced(ColumnKind::Timestamp, _)
        ));
    }

    #[test]
    fn non_finite_and_empty_text_are_not_numbers() {
        assert_eq!(parse_number("nan"), None);
        assert_eq!(parse_number("inf"), None);
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number(" 1e3 "), Some(1000.0));
    }

    #[test]
    fn oversized_integer_text_stays_text() {
        assert_eq!(parse_number("9007199254740993"), None);
        assert_eq!(parse_number("-9007199254740993"), None);
        assert_eq!(
            parse_number("9007199254740992"),
            Some(9_007_199_254_740_992.0)
        );
        let column = Column::from_values("id", ["9007199254740993", "12"]);
        assert_eq!(coerce_column(&column), CoercionOutcome::Kept);
    }

    #[test]
    fn numeric_columns_are_not_revisited() {
        let column = Column::from_values("n", [1.0, 2.0]);
        assert_eq!(coerce_column(&column), CoercionOutcome::Kept);
    }
}
