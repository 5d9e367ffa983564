use crate::database::column::Column;
use crate::database::converter::ConversionError;
use crate::database::schema::Schema;
use crate::database::value::Value;
use crate::error::SheetDbError;
use crate::spreadsheet::Cell;
use crate::spreadsheet::RowCursor;
use duckdb::params_from_iter;
use duckdb::Connection;
use log::debug;
use thiserror::Error;

/// Errors raised while importing data rows.
#[derive(Error, Debug)]
pub enum ImportError {
    /// A cell was rejected by its column's converter
    #[error("Convert cell {reference} of column '{column}' failed: {source}")]
    ConversionError {
        column: String,
        reference: String,
        source: ConversionError,
    },

    /// A row holds a value to the right of the last header
    #[error("Unexpected cell {reference} beyond the last column: '{value}'")]
    UnexpectedCell { reference: String, value: String },
}

/// Outcome of an import.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ImportSummary {
    /// Rows inserted into the table
    pub inserted: usize,
    /// Blank rows skipped
    pub skipped: usize,
}

/// Converts and inserts every remaining row of the cursor, one prepared insert per row.
///
/// Stops at the first conversion or storage failure; the caller owns the transaction.
pub fn import_rows(
    connection: &Connection,
    table: &str,
    schema: &Schema,
    columns: &[Column],
    cursor: &mut RowCursor,
) -> Result<ImportSummary, SheetDbError> {
    let mut statement = connection.prepare(&schema.insert_sql(table)?)?;
    let mut summary = ImportSummary::default();
    while cursor.advance() {
        let row = cursor.current();
        if row.iter().all(Cell::is_empty) {
            summary.skipped += 1;
            debug!("Skip blank data row #{} of '{}'", summary.inserted + summary.skipped + 1, cursor.sheet_name());
            continue;
        }
        let values = convert_row(columns, row)?;
        statement.execute(params_from_iter(values.iter()))?;
        summary.inserted += 1;
    }
    Ok(summary)
}

/// Converts the cells of one row, one value per column.
///
/// Missing trailing cells become NULL without calling the converter.
pub fn convert_row(columns: &[Column], row: &[Cell]) -> Result<Vec<Value>, SheetDbError> {
    if let Some(cell) = row.iter().skip(columns.len()).find(|cell| !cell.is_empty()) {
        Err(ImportError::UnexpectedCell {
            reference: cell.reference(),
            value: cell.text(),
        })?;
    }
    columns
        .iter()
        .enumerate()
        .map(|(index, column)| match row.get(index) {
            None => Ok(Value::Null),
            Some(cell) => column.convert(&cell.text()).map_err(|source| {
                SheetDbError::from(ImportError::ConversionError {
                    column: column.name.to_owned(),
                    reference: cell.reference(),
                    source,
                })
            }),
        })
        .collect()
}
