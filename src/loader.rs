use crate::database::column::resolve_columns;
use crate::database::column::Column;
use crate::database::destination::Destination;
use crate::database::importer::import_rows;
use crate::database::importer::ImportSummary;
use crate::database::schema::quote_identifier;
use crate::database::schema::Schema;
use crate::error::SheetDbError;
use crate::spreadsheet::RowCursor;
use crate::spreadsheet::SpreadsheetError;
use crate::spreadsheet::Workbook;
use duckdb::Connection;
use log::info;
use log::warn;
use std::path::Path;

/// Name of the table created when none is given.
pub const DEFAULT_TABLE_NAME: &str = "data";

/// Options of a load.
#[derive(Clone, Debug)]
pub struct LoadOptions {
    /// Destination table, dropped and recreated on every load
    pub table_name: String,
    /// Column overrides, matched against header names
    pub columns: Vec<Column>,
    /// Sheet to read; the first sheet in workbook order when not set
    pub sheet: Option<String>,
    /// Guess the format of columns without override from the rows following the header
    pub infer_formats: bool,
    /// Number of rows sampled when guessing formats
    pub sample_rows: usize,
}

impl Default for LoadOptions {
    fn default() -> Self {
        LoadOptions {
            table_name: DEFAULT_TABLE_NAME.to_owned(),
            columns: Vec::new(),
            sheet: None,
            infer_formats: false,
            sample_rows: 1,
        }
    }
}

impl LoadOptions {
    pub fn table_name(mut self, table_name: &str) -> Self {
        self.table_name = table_name.to_owned();
        self
    }

    /// Adds a column override. A later override with the same name replaces an earlier one.
    pub fn column(mut self, column: Column) -> Self {
        self.columns.push(column);
        self
    }

    pub fn columns(mut self, columns: impl IntoIterator<Item = Column>) -> Self {
        self.columns.extend(columns);
        self
    }

    pub fn sheet(mut self, sheet: &str) -> Self {
        self.sheet = Some(sheet.to_owned());
        self
    }

    pub fn infer_formats(mut self, infer_formats: bool) -> Self {
        self.infer_formats = infer_formats;
        self
    }

    pub fn sample_rows(mut self, sample_rows: usize) -> Self {
        self.sample_rows = sample_rows;
        self
    }
}

/// Loads the first sheet of a workbook into the `data` table of the destination.
///
/// The first row holds the column names. Columns listed in `columns` use their own format
/// and converter, every other column is stored as text. Returns the open connection.
///
/// ```no_run
/// use sheetdb::{load_from_excel, Column, Destination};
///
/// let connection = load_from_excel(
///     "Book1.xlsx",
///     &Destination::InMemory,
///     [Column::date("Date", "%m/%d/%y"), Column::float("Hours worked")],
/// )?;
/// let rows: i64 = connection.query_row("SELECT COUNT(*) FROM data", [], |row| row.get(0))?;
/// # Ok::<(), sheetdb::SheetDbError>(())
/// ```
pub fn load_from_excel<P: AsRef<Path>>(
    path: P,
    destination: &Destination,
    columns: impl IntoIterator<Item = Column>,
) -> Result<Connection, SheetDbError> {
    load_with_options(path, destination, &LoadOptions::default().columns(columns))
}

/// Loads a sheet of a workbook into a table of the destination.
///
/// The table is dropped, recreated and filled inside one transaction: on any failure the
/// previous table is left untouched, the connection is closed and the error returned.
pub fn load_with_options<P: AsRef<Path>>(
    path: P,
    destination: &Destination,
    options: &LoadOptions,
) -> Result<Connection, SheetDbError> {
    quote_identifier(&options.table_name)?;
    let (columns, mut cursor) = read_header(path.as_ref(), options)?;
    let schema = Schema::build(&columns)?;

    let mut connection = destination.open()?;
    match populate(&mut connection, &options.table_name, &schema, &columns, &mut cursor) {
        Ok(summary) => {
            info!(
                "Loaded {} rows ({} blank skipped) from '{}#{}' into table '{}' of {}",
                summary.inserted,
                summary.skipped,
                cursor.file_name(),
                cursor.sheet_name(),
                options.table_name,
                destination
            );
            Ok(connection)
        }
        Err(error) => {
            if let Err((_, close_error)) = connection.close() {
                warn!("Close connection to {} failed: {}", destination, close_error);
            }
            Err(error)
        }
    }
}

/// Reads the selected sheet and resolves its columns from the header row.
///
/// The workbook is released before returning; the cursor is left on the header row.
fn read_header(path: &Path, options: &LoadOptions) -> Result<(Vec<Column>, RowCursor), SheetDbError> {
    let mut workbook = Workbook::open(path)?;
    let sheet_name = match &options.sheet {
        Some(sheet_name) => sheet_name.to_owned(),
        None => workbook.first_sheet_name()?,
    };
    let mut cursor = workbook.rows(&sheet_name)?;
    drop(workbook);

    if !cursor.advance() {
        Err(SpreadsheetError::EmptySheet(
            cursor.file_name().to_owned(),
            cursor.sheet_name().to_owned(),
        ))?;
    }
    let headers = cursor.current_texts();
    let samples = options
        .infer_formats
        .then(|| cursor.upcoming(options.sample_rows));
    let columns = resolve_columns(&headers, &options.columns, samples)?;
    Ok((columns, cursor))
}

fn populate(
    connection: &mut Connection,
    table: &str,
    schema: &Schema,
    columns: &[Column],
    cursor: &mut RowCursor,
) -> Result<ImportSummary, SheetDbError> {
    let transaction = connection.transaction()?;
    transaction.execute_batch(&schema.drop_table_sql(table)?)?;
    transaction.execute_batch(&schema.create_table_sql(table)?)?;
    let summary = import_rows(&transaction, table, schema, columns, cursor)?;
    transaction.commit()?;
    Ok(summary)
}
