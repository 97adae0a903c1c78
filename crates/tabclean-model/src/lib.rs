//! Data model for the tabclean pipeline.
//!
//! - **cell**: [`CellValue`] and the [`CellKey`] used to compare cells
//! - **table**: [`Table`], [`Column`] and [`ColumnKind`]
//! - **options**: [`CleanOptions`] and the strategy enums it is built from

#![deny(unsafe_code)]

pub mod cell;
pub mod error;
pub mod options;
pub mod table;

pub use cell::{CellKey, CellValue, NumberKey, format_timestamp};
pub use error::{ModelError, Result};
pub use options::{CleanOptions, ConstantFill, FillStrategy, MatchScorer, ReconcileTarget};
pub use table::{Column, ColumnKind, Table};
