//! # sheetdb
//!
//! Loads a sheet of an Excel workbook (`.xlsx`, `.xlsm`) into a DuckDB table and hands back
//! the connection, ready to be queried with SQL.
//!
//! ## Features
//!
//! - **Header driven schema**: the first used row of the sheet names the columns
//! - **Column overrides**: per column format and converter, e.g. dates with a custom layout
//! - **Safe default**: columns without override are stored as text, exactly as rendered
//! - **Format guessing**: optional inference of number, float and date columns from sampled rows
//! - **Atomic reloads**: the table is dropped, recreated and filled inside one transaction
//! - **Pure Rust reader**: the workbook is read straight from its zip container
//!
//! ## Example
//!
//! ```no_run
//! use sheetdb::{load_with_options, Column, Destination, LoadOptions};
//!
//! let options = LoadOptions::default()
//!     .table_name("timesheet")
//!     .column(Column::date("Date", "%m/%d/%y"))
//!     .column(Column::float("Hours worked"));
//! let connection = load_with_options("Book1.xlsx", &Destination::from("timesheet.duckdb"), &options)?;
//! let kirk: i64 = connection.query_row(
//!     "SELECT COUNT(*) FROM timesheet WHERE Employee = 'Kirk'",
//!     [],
//!     |row| row.get(0),
//! )?;
//! # Ok::<(), sheetdb::SheetDbError>(())
//! ```
pub mod database;
mod error;
mod helpers;
mod loader;
pub mod spreadsheet;

pub use crate::database::column::Column;
pub use crate::database::column::ColumnError;
pub use crate::database::column::Format;
pub use crate::database::converter::ConversionError;
pub use crate::database::converter::Converter;
pub use crate::database::destination::Destination;
pub use crate::database::importer::ImportError;
pub use crate::database::importer::ImportSummary;
pub use crate::database::value::Value;
pub use crate::error::ErrorKind;
pub use crate::error::SheetDbError;
pub use crate::loader::load_from_excel;
pub use crate::loader::load_with_options;
pub use crate::loader::LoadOptions;
pub use crate::loader::DEFAULT_TABLE_NAME;
pub use crate::spreadsheet::RowCursor;
pub use crate::spreadsheet::SpreadsheetError;
pub use crate::spreadsheet::Workbook;
