//! # Spreadsheet Reading Module
//!
//! Reads Excel 2007+ workbooks (`.xlsx`, `.xlsm`) straight from their zip
//! container: sheet list, shared strings, number formats and worksheet cells.
//! A worksheet is read into memory and handed out row by row through a
//! [`RowCursor`].
use crate::error::ResultMessage;
use crate::error::SheetDbError;
use crate::spreadsheet::xlsx::XlsxSpreadsheet;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use thiserror::Error;

pub mod cell;
mod excel;
pub(crate) mod reference;
pub mod sheet;
mod xlsx;

pub use cell::Cell;
pub use cell::CellType;
pub use sheet::Sheet;

/// Errors raised while reading a workbook.
#[derive(Error, Debug)]
pub enum SpreadsheetError {
    /// A required part is missing from the workbook container
    #[error("Missing part '{0}' in workbook")]
    FileError(String),

    /// The requested sheet does not exist, or the workbook lists no sheets
    #[error("Sheet '{1}' not found in '{0}'")]
    SheetNotFound(String, String),

    /// The sheet has no rows, so there is no header row to read
    #[error("No rows to read from sheet '{1}' in '{0}'")]
    EmptySheet(String, String),

    /// A cell value is inconsistent with the workbook structure
    #[error("Invalid cell value at '{0}'!{1}!{2}: {3}")]
    CellValueError(String, String, String, String),
}

/// An opened workbook.
pub struct Workbook {
    inner: XlsxSpreadsheet<BufReader<File>>,
}

impl Workbook {
    /// Opens a workbook and reads its structure (sheet list, date system, number formats).
    ///
    /// Every failure is reported as [`SheetDbError::OpenError`]: missing or unreadable
    /// file, a file that is not a zip container, or a container without a workbook part.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Workbook, SheetDbError> {
        let file_name = path.as_ref().to_string_lossy().to_string();
        XlsxSpreadsheet::open(&file_name)
            .map(|inner| Workbook { inner })
            .map_err(|source| SheetDbError::OpenError {
                path: file_name,
                source: Box::new(source),
            })
    }

    /// Returns the sheet names in workbook order.
    pub fn sheet_names(&self) -> Vec<String> {
        self.inner.sheet_names()
    }

    /// Returns the name of the first sheet.
    pub fn first_sheet_name(&self) -> Result<String, SheetDbError> {
        self.sheet_names()
            .into_iter()
            .next()
            .ok_or_else(|| SpreadsheetError::SheetNotFound(self.inner.name.to_owned(), "(first)".to_string()).into())
    }

    /// Reads the named sheet and returns a cursor over its rows.
    pub fn rows(&mut self, sheet_name: &str) -> Result<RowCursor, SheetDbError> {
        if !self.sheet_names().iter().any(|name| name == sheet_name) {
            Err(SpreadsheetError::SheetNotFound(self.inner.name.to_owned(), sheet_name.to_owned()))?;
        }
        let prefix = format!("{}#{}", self.inner.name, sheet_name);
        let sheet = self.inner.read_sheet(sheet_name).with_prefix(&prefix)?;
        Ok(RowCursor::new(sheet))
    }
}

/// Cursor over the rows of a sheet.
///
/// The cursor starts before the first row; [`RowCursor::advance`] moves it forward
/// and reports whether a row is available.
#[derive(Debug)]
pub struct RowCursor {
    file_name: String,
    sheet_name: String,
    rows: Vec<Vec<Cell>>,
    /// Number of rows consumed so far; the current row is `rows[position - 1]`
    position: usize,
}

impl RowCursor {
    /// Creates a cursor over the rows of an in-memory sheet.
    pub fn new(sheet: Sheet) -> Self {
        let file_name = sheet.file_name.to_owned();
        let sheet_name = sheet.name.to_owned();
        RowCursor {
            file_name,
            sheet_name,
            rows: sheet.into_rows(),
            position: 0,
        }
    }

    /// Returns the file name of the workbook this cursor reads from.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Returns the name of the sheet this cursor reads from.
    pub fn sheet_name(&self) -> &str {
        &self.sheet_name
    }

    /// Moves to the next row. Returns false once the rows are exhausted.
    pub fn advance(&mut self) -> bool {
        if self.position < self.rows.len() {
            self.position += 1;
            true
        } else {
            false
        }
    }

    /// Returns the cells of the current row; empty before the first advance.
    pub fn current(&self) -> &[Cell] {
        self.position
            .checked_sub(1)
            .and_then(|index| self.rows.get(index))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Returns the rendered text of every cell in the current row.
    pub fn current_texts(&self) -> Vec<String> {
        self.current().iter().map(Cell::text).collect()
    }

    /// Returns up to `count` rows following the current one without consuming them.
    pub fn upcoming(&self, count: usize) -> &[Vec<Cell>] {
        let lower = self.position.min(self.rows.len());
        let upper = (lower + count).min(self.rows.len());
        &self.rows[lower..upper]
    }

    /// Returns the 1-based row number of the current row in the sheet, if any.
    pub fn row_number(&self) -> Option<usize> {
        self.current().first().map(|cell| cell.row + 1)
    }
}
