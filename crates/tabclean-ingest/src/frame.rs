//! Conversion from polars DataFrames to [`Table`].

use chrono::{DateTime, NaiveDateTime};
use polars::prelude::{AnyValue, DataFrame, TimeUnit};
use tabclean_model::{CellValue, Column, Table};

use crate::error::Result;

/// Every integer up to this magnitude (2^53) is exact as `f64`.
const MAX_EXACT_INTEGER: u64 = 1 << 53;

fn datetime_from_epoch(value: i64, unit: TimeUnit) -> Option<NaiveDateTime> {
    let parsed = match unit {
        TimeUnit::Nanoseconds => Some(DateTime::from_timestamp_nanos(value)),
        TimeUnit::Microseconds => DateTime::from_timestamp_micros(value),
        TimeUnit::Milliseconds => DateTime::from_timestamp_millis(value),
    };
    parsed.map(|dt| dt.naive_utc())
}

/// Float cell; `NaN` is a missing value.
pub fn float_cell(value: f64) -> CellValue {
    if value.is_nan() {
        CellValue::Missing
    } else {
        CellValue::Number(value)
    }
}

/// Integer cell; integers beyond `f64`'s exact range are kept as text.
pub fn integer_cell(value: i64) -> CellValue {
    if value.unsigned_abs() <= MAX_EXACT_INTEGER {
        CellValue::Number(value as f64)
    } else {
        CellValue::text(value.to_string())
    }
}

fn unsigned_cell(value: u64) -> CellValue {
    if value <= MAX_EXACT_INTEGER {
        CellValue::Number(value as f64)
    } else {
        CellValue::text(value.to_string())
    }
}

/// Maps one polars value onto a cell.
///
/// Booleans and any type without a dedicated cell variant become text.
pub fn any_to_cell(value: AnyValue<'_>) -> CellValue {
    match value {
        AnyValue::Null => CellValue::Missing,
        AnyValue::String(s) => CellValue::text(s),
        AnyValue::StringOwned(s) => CellValue::text(s.as_str()),
        AnyValue::Boolean(b) => CellValue::text(b.to_string()),
        AnyValue::Float64(v) => float_cell(v),
        AnyValue::Float32(v) => float_cell(f64::from(v)),
        AnyValue::Int8(v) => CellValue::Number(f64::from(v)),
        AnyValue::Int16(v) => CellValue::Number(f64::from(v)),
        AnyValue::Int32(v) => CellValue::Number(f64::from(v)),
        AnyValue::Int64(v) => integer_cell(v),
        AnyValue::UInt8(v) => CellValue::Number(f64::from(v)),
        AnyValue::UInt16(v) => CellValue::Number(f64::from(v)),
        AnyValue::UInt32(v) => CellValue::Number(f64::from(v)),
        AnyValue::UInt64(v) => unsigned_cell(v),
        AnyValue::Datetime(v, unit, _) => datetime_from_epoch(v, unit)
            .map(CellValue::Timestamp)
            .unwrap_or(CellValue::Missing),
        other => CellValue::text(other.to_string()),
    }
}

/// Builds a [`Table`] from a DataFrame, one cell per value.
pub fn dataframe_to_table(df: &DataFrame) -> Result<Table> {
    let mut columns = Vec::with_capacity(df.width());
    for column in df.get_columns() {
        let mut values = Vec::with_capacity(df.height());
        for idx in 0..df.height() {
            values.push(any_to_cell(column.get(idx).unwrap_or(AnyValue::Null)));
        }
        columns.push(Column::new(column.name().as_str(), values));
    }
    Ok(Table::from_columns(columns)?)
}
