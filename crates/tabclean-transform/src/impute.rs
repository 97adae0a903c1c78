//! Missing-value resolution.
//!
//! One [`FillStrategy`] applies to the whole table. Columns are visited left to
//! right and only those holding a missing cell at visit time are touched, so
//! with `drop` the rows removed for an earlier column are already gone when a
//! later column is checked.

use std::collections::BTreeMap;

use tabclean_model::{
    CellKey, CellValue, CleanOptions, Column, ColumnKind, ConstantFill, FillStrategy, Table,
};
use tracing::debug;

use crate::report::{ColumnImputation, ImputationOutcome};

/// Resolves missing cells in every column that has any.
pub fn resolve_missing(table: &mut Table, options: &CleanOptions) -> Vec<ColumnImputation> {
    let strategy = options.fill_missing;
    let mut results = Vec::new();
    for idx in 0..table.width() {
        let column = &table.columns()[idx];
        if !column.has_missing() {
            continue;
        }
        let name = column.name.clone();
        let result = match strategy {
            FillStrategy::Drop => {
                let keep: Vec<bool> = column.values.iter().map(|v| !v.is_missing()).collect();
                let rows_dropped = table.retain_rows(&keep);
                ColumnImputation {
                    column: name,
                    strategy,
                    filled: 0,
                    rows_dropped,
                    outcome: ImputationOutcome::Dropped,
                }
            }
            _ => {
                let column = &mut table.columns_mut()[idx];
                match fill_value(column, strategy, &options.constant_fill) {
                    Ok(fill) => {
                        let filled = fill_missing(column, &fill);
                        ColumnImputation {
                            column: name,
                            strategy,
                            filled,
                            rows_dropped: 0,
                            outcome: ImputationOutcome::Filled,
                        }
                    }
                    Err(reason) => ColumnImputation {
                        column: name,
                        strategy,
                        filled: 0,
                        rows_dropped: 0,
                        outcome: ImputationOutcome::Unresolved(reason),
                    },
                }
            }
        };
        debug!(
            column = %result.column,
            strategy = %strategy,
            filled = result.filled,
            rows_dropped = result.rows_dropped,
            "resolved missing values"
        );
        results.push(result);
    }
    results
}

/// The value that replaces missing cells of `column`, or why there is none.
fn fill_value(
    column: &Column,
    strategy: FillStrategy,
    constant: &ConstantFill,
) -> Result<CellValue, String> {
    match strategy {
        FillStrategy::Constant => Ok(constant.to_cell()),
        FillStrategy::Mode => Ok(mode(column).unwrap_or_else(|| constant.to_cell())),
        FillStrategy::Mean => numeric_samples(column)
            .and_then(|samples| mean(&samples).ok_or_else(|| "no values to average".to_string()))
            .map(CellValue::Number),
        FillStrategy::Median => numeric_samples(column)
            .and_then(|samples| median(samples).ok_or_else(|| "no values to average".to_string()))
            .map(CellValue::Number),
        FillStrategy::Drop => Err("drop removes rows instead of filling".to_string()),
    }
}

fn numeric_samples(column: &Column) -> Result<Vec<f64>, String> {
    match column.kind() {
        ColumnKind::Number => Ok(column
            .values
            .iter()
            .filter_map(CellValue::as_number)
            .filter(|value| value.is_finite())
            .collect()),
        ColumnKind::Missing => Err("column has no non-missing values".to_string()),
        kind => Err(format!("column is {kind}, not numeric")),
    }
}

fn fill_missing(column: &mut Column, fill: &CellValue) -> usize {
    let mut filled = 0;
    for value in &mut column.values {
        if value.is_missing() {
            *value = fill.clone();
            filled += 1;
        }
    }
    filled
}

/// Most frequent non-missing value; ties go to the smallest value.
pub fn mode(column: &Column) -> Option<CellValue> {
    let mut counts: BTreeMap<CellKey<'_>, usize> = BTreeMap::new();
    for value in column.values.iter().filter(|v| !v.is_missing()) {
        *counts.entry(value.key()).or_insert(0) += 1;
    }
    let mut best: Option<(CellKey<'_>, usize)> = None;
    for (key, count) in counts {
        if best.is_none_or(|(_, top)| count > top) {
            best = Some((key, count));
        }
    }
    best.map(|(key, _)| key.to_value())
}

pub fn mean(samples: &[f64]) -> Option<f64> {
    if samples.is_empty() {
        return None;
    }
    Some(samples.iter().sum::<f64>() / samples.len() as f64)
}

pub fn median(mut samples: Vec<f64>) -> Option<f64> {
    if samples.is_empty() {
        return None;
    }
    samples.sort_by(f64::total_cmp);
    let mid = samples.len() / 2;
    if samples.len() % 2 == 0 {
        Some((samples[mid - 1] + samples[mid]) / 2.0)
    } else {
        Some(samples[mid])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers(values: &[Option<f64>]) -> Column {
        Column::from_values("n", values.iter().copied())
    }

    fn single(column: Column) -> Table {
        Table::from_columns(vec![column]).unwrap()
    }

    #[test]
    fn mean_fills_numeric_column() {
        let mut table = single(numbers(&[Some(10.0), None, Some(20.0), Some(30.0)]));
        let options = CleanOptions::new().with_fill_missing(FillStrategy::Mean);
        let results = resolve_missing(&mut table, &options);
        assert_eq!(results[0].filled, 1);
        assert_eq!(table.columns()[0].values[1], CellValue::Number(20.0));
    }

    #[test]
    fn median_fills_numeric_column() {
        let mut table = single(numbers(&[Some(10.0), None, Some(20.0), Some(90.0)]));
        let options = CleanOptions::new().with_fill_missing(FillStrategy::Median);
        resolve_missing(&mut table, &options);
        assert_eq!(table.columns()[0].values[1], CellValue::Number(20.0));
    }

    #[test]
    fn non_finite_numbers_do_not_skew_mean_or_median() {
        for strategy in [FillStrategy::Mean, FillStrategy::Median] {
            let mut table = single(Column::new(
                "n",
                vec![
                    CellValue::Number(10.0),
                    CellValue::Number(f64::NAN),
                    CellValue::Missing,
                    CellValue::Number(f64::INFINITY),
                    CellValue::Number(20.0),
                    CellValue::Number(30.0),
                ],
            ));
            let options = CleanOptions::new().with_fill_missing(strategy);
            resolve_missing(&mut table, &options);
            assert_eq!(table.columns()[0].values[2], CellValue::Number(20.0));
        }
    }

    #[test]
    fn median_of_even_count_averages_middle_pair() {
        assert_eq!(median(vec![4.0, 1.0, 3.0, 2.0]), Some(2.5));
        assert_eq!(median(Vec::new()), None);
    }

    #[test]
    fn mean_skips_text_columns() {
        let mut table = single(Column::new(
            "t",
            vec![CellValue::text("a"), CellValue::Missing],
        ));
        let options = CleanOptions::new().with_fill_missing(FillStrategy::Mean);
        let results = resolve_missing(&mut table, &options);
        assert!(matches!(
            results[0].outcome,
            ImputationOutcome::Unresolved(_)
        ));
        assert_eq!(table.columns()[0].values[1], CellValue::Missing);
    }

    #[test]
    fn mean_leaves_all_missing_column_unresolved() {
        let mut table = single(numbers(&[None, None]));
        let options = CleanOptions::new().with_fill_missing(FillStrategy::Median);
        let results = resolve_missing(&mut table, &options);
        assert_eq!(results[0].filled, 0);
        assert_eq!(table.missing_count(), 2);
    }

    #[test]
    fn mode_picks_most_frequent_then_smallest() {
        let column = Column::from_values("m", ["b", "a", "b", "a", "c"]);
        assert_eq!(mode(&column), Some(CellValue::text("a")));

        let column = Column::from_values("m", [Some("x"), None, Some("y"), Some("y")]);
        assert_eq!(mode(&column), Some(CellValue::text("y")));
    }

    #[test]
    fn mode_falls_back_to_constant_when_all_missing() {
        let mut table = single(numbers(&[None, None]));
        let options = CleanOptions::new()
            .with_fill_missing(FillStrategy::Mode)
            .with_constant_fill(ConstantFill::Text("n/a".to_string()));
        resolve_missing(&mut table, &options);
        assert_eq!(
            table.columns()[0].values,
            vec![CellValue::text("n/a"), CellValue::text("n/a")]
        );
    }

    #[test]
    fn constant_is_inserted_verbatim() {
        let mut table = single(numbers(&[Some(1.0), None]));
        resolve_missing(&mut table, &CleanOptions::default());
        assert_eq!(table.columns()[0].values[1], CellValue::text("unknown"));
        assert_eq!(table.columns()[0].kind(), ColumnKind::Text);
    }

    #[test]
    fn drop_removes_rows_progressively() {
        let mut table = Table::from_columns(vec![
            Column::from_values("a", [Some(1.0), None, Some(3.0), Some(4.0)]),
            Column::from_values("b", [None, Some(2.0), Some(3.0), Some(4.0)]),
        ])
        .unwrap();
        let options = CleanOptions::new().with_fill_missing(FillStrategy::Drop);
        let results = resolve_missing(&mut table, &options);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].rows_dropped, 1);
        assert_eq!(results[1].rows_dropped, 1);
        assert_eq!(table.height(), 2);
        assert_eq!(table.index(), &[2, 3]);
    }

    #[test]
    fn drop_skips_columns_cleared_by_earlier_drops() {
        let mut table = Table::from_columns(vec![
            Column::from_values("a", [Some(1.0), None]),
            Column::from_values("b", [Some(1.0), None]),
        ])
        .unwrap();
        let options = CleanOptions::new().with_fill_missing(FillStrategy::Drop);
        let results = resolve_missing(&mut table, &options);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].column, "a");
    }
}
