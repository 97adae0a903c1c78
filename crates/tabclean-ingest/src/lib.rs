//! Table loading and writing.
//!
//! This crate reads delimited files and spreadsheet workbooks into a
//! [`Table`](tabclean_model::Table) and writes cleaned tables back out.
//!
//! # Features
//!
//! - **Path resolution**: `~` expansion and absolute paths
//! - **Format detection**: `.xlsx`/`.xls`/`.ods` and friends are workbooks
//! - **Sheet selection**: workbook sheets picked by name, first sheet by default
//! - **Loading**: polars CSV reading with full schema inference, calamine for workbooks
//! - **Cell mapping**: polars and calamine values onto table cells
//! - **Writing**: comma or tab separated output via the `csv` crate
//!
//! # Example
//!
//! ```ignore
//! use tabclean_ingest::{load_table, write_table};
//!
//! let table = load_table("~/data/fruits.xlsx", Some("orders"))?;
//! write_table(&table, std::path::Path::new("orders_clean.csv"))?;
//! ```

mod discovery;
mod error;
mod frame;
mod path;
mod reader;
mod workbook;
mod writer;

// === Error Types ===
pub use error::{IngestError, Result};

// === Path and Sheet Resolution ===
pub use discovery::{SourceFormat, select_sheet, separator_for};
pub use path::resolve_path;

// === Reading ===
pub use reader::{load_table, read_frame};
pub use workbook::{data_to_cell, read_sheet, sheet_names};

// === Cell Mapping ===
pub use frame::{any_to_cell, dataframe_to_table, float_cell, integer_cell};

// === Writing ===
pub use writer::{write_table, write_table_to};
