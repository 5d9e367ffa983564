use crate::database::converter::ConversionError;
use crate::database::converter::Converter;
use crate::database::value::Value;
use crate::error::SheetDbError;
use crate::spreadsheet::cell::Cell;
use crate::spreadsheet::cell::CellType;
use log::debug;
use std::collections::HashMap;
use std::collections::HashSet;
use thiserror::Error;

/// Errors related to column formats, names and resolution.
#[derive(Error, Debug)]
pub enum ColumnError {
    #[error("Duplicate column '{0}'")]
    DuplicateColumn(String),

    #[error("Invalid identifier '{0}'")]
    InvalidName(String),

    #[error("Unknown column format '{0}'")]
    UnknownFormat(String),
}

/// Logical format of a column, deciding both its storage type and its default converter.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Format {
    /// Text kept as is
    #[default]
    Text,
    /// Calendar dates
    Date,
    /// Integral numbers
    Number,
    /// Floating point numbers
    Float,
}

impl Format {
    /// Returns the lower case name of the format.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Format::Text => "text",
            Format::Date => "date",
            Format::Number => "number",
            Format::Float => "float",
        }
    }

    /// Parses a format from its name.
    /// Supports various aliases for each format.
    pub fn parse(name: &str) -> Result<Self, SheetDbError> {
        match name.trim().to_ascii_uppercase().as_str() {
            "TEXT" | "STRING" | "VARCHAR" => Ok(Self::Text),
            "DATE" => Ok(Self::Date),
            "NUMBER" | "INT" | "INTEGER" | "BIGINT" => Ok(Self::Number),
            "FLOAT" | "DOUBLE" | "REAL" | "DECIMAL" | "NUMERIC" => Ok(Self::Float),
            _ => Err(ColumnError::UnknownFormat(name.to_string()))?,
        }
    }

    /// Returns the converter registered for this format.
    pub fn default_converter(&self) -> Converter {
        match self {
            Format::Text => Converter::identity(),
            Format::Date => Converter::date("%Y-%m-%d"),
            Format::Number => Converter::number(),
            Format::Float => Converter::float(),
        }
    }

    /// Infers the format of a single cell, `None` for blank cells.
    pub(crate) fn from(cell: &Cell) -> Option<Self> {
        if cell.is_empty() {
            return None;
        }
        match cell.kind {
            CellType::Number if cell.is_integral() => Some(Format::Number),
            CellType::Number => Some(Format::Float),
            _ if cell.renders_as_date() => Some(Format::Date),
            _ => Some(Format::Text),
        }
    }

    /// Detects the most specific common format from a collection of candidate formats.
    /// Falls back to Text if formats are inconsistent or empty.
    pub(crate) fn detect(formats: Vec<Option<Format>>) -> Format {
        let formats: Vec<Format> = formats.into_iter().flatten().collect();
        if formats.is_empty() {
            Format::Text
        } else if formats.iter().all(|format| *format == Format::Number) {
            Format::Number
        } else if formats.iter().all(Format::is_numeric) {
            Format::Float
        } else if formats.iter().all(|format| *format == Format::Date) {
            Format::Date
        } else {
            Format::Text
        }
    }

    /// Returns true for Number and Float.
    #[inline]
    pub(crate) fn is_numeric(&self) -> bool {
        matches!(self, Format::Number | Format::Float)
    }
}

/// A column of the destination table: its name, format and converter.
#[derive(Clone, Debug)]
pub struct Column {
    /// Column name, as found in the header row
    pub name: String,
    /// Logical format
    pub format: Format,
    /// Converter applied to every cell of the column
    pub converter: Converter,
}

impl Column {
    /// Creates a column using the default converter of its format.
    pub fn new(name: &str, format: Format) -> Self {
        Self::with_converter(name, format, format.default_converter())
    }

    /// Creates a column with a caller-supplied converter.
    pub fn with_converter(name: &str, format: Format, converter: Converter) -> Self {
        Column {
            name: name.to_owned(),
            format,
            converter,
        }
    }

    /// Creates a text column keeping the cell text as is.
    pub fn text(name: &str) -> Self {
        Self::new(name, Format::Text)
    }

    /// Creates a date column parsing cells with a chrono layout, e.g. `%m/%d/%y`.
    pub fn date(name: &str, layout: &str) -> Self {
        Self::with_converter(name, Format::Date, Converter::date(layout))
    }

    /// Creates an integral number column.
    pub fn number(name: &str) -> Self {
        Self::new(name, Format::Number)
    }

    /// Creates a floating point number column.
    pub fn float(name: &str) -> Self {
        Self::new(name, Format::Float)
    }

    /// Converts the text of one cell of this column.
    pub fn convert(&self, text: &str) -> Result<Value, ConversionError> {
        self.converter.convert(text)
    }
}

/// Resolves one column per header, in header order.
///
/// Blank header names become `column{N}` (1-based position). A header matching an
/// override takes it as is; when several overrides share a name the last one wins.
/// Other headers get their format inferred from `samples` when given, Text otherwise.
pub fn resolve_columns(
    headers: &[String],
    overrides: &[Column],
    samples: Option<&[Vec<Cell>]>,
) -> Result<Vec<Column>, SheetDbError> {
    let names: Vec<String> = headers
        .iter()
        .enumerate()
        .map(|(index, header)| {
            let header = header.trim();
            if header.is_empty() {
                format!("column{}", index + 1)
            } else {
                header.to_owned()
            }
        })
        .collect();

    let mut seen = HashSet::new();
    for name in &names {
        if !seen.insert(name.to_lowercase()) {
            Err(ColumnError::DuplicateColumn(name.to_owned()))?;
        }
    }

    let overrides: HashMap<&str, &Column> = overrides.iter().map(|column| (column.name.as_str(), column)).collect();
    for name in overrides.keys() {
        if !names.iter().any(|header| header == name) {
            debug!("Column override '{}' matches no header, ignored", name);
        }
    }

    let columns: Vec<Column> = names
        .iter()
        .enumerate()
        .map(|(index, name)| {
            let column = match (overrides.get(name.as_str()), samples) {
                (Some(column), _) => (*column).clone(),
                (None, Some(rows)) => {
                    let formats = rows.iter().map(|row| row.get(index).and_then(Format::from)).collect();
                    Column::new(name, Format::detect(formats))
                }
                (None, None) => Column::text(name),
            };
            debug!(
                "Column #{} '{}' resolved as {} with converter {}",
                index + 1,
                column.name,
                column.format.as_str(),
                column.converter.name()
            );
            column
        })
        .collect();
    Ok(columns)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| name.to_string()).collect()
    }

    fn cell(col: usize, kind: CellType, value: &str) -> Cell {
        Cell {
            row: 1,
            col,
            kind,
            value: value.to_owned(),
        }
    }

    #[test]
    fn format_aliases() {
        assert_eq!(Format::parse("varchar").unwrap(), Format::Text);
        assert_eq!(Format::parse("Date").unwrap(), Format::Date);
        assert_eq!(Format::parse("BIGINT").unwrap(), Format::Number);
        assert_eq!(Format::parse(" double ").unwrap(), Format::Float);
        assert!(matches!(
            Format::parse("blob"),
            Err(SheetDbError::ColumnError(ColumnError::UnknownFormat(name))) if name == "blob"
        ));
    }

    #[test]
    fn detect_common_format() {
        assert_eq!(Format::detect(vec![]), Format::Text);
        assert_eq!(Format::detect(vec![None, Some(Format::Number)]), Format::Number);
        assert_eq!(Format::detect(vec![Some(Format::Number), Some(Format::Float)]), Format::Float);
        assert_eq!(Format::detect(vec![Some(Format::Date), Some(Format::Date)]), Format::Date);
        assert_eq!(Format::detect(vec![Some(Format::Date), Some(Format::Number)]), Format::Text);
    }

    #[test]
    fn cell_formats() {
        assert_eq!(Format::from(&cell(0, CellType::Number, "42.000")), Some(Format::Number));
        assert_eq!(Format::from(&cell(0, CellType::Number, "7.25")), Some(Format::Float));
        assert_eq!(Format::from(&cell(0, CellType::NumberDate1900, "44197")), Some(Format::Date));
        assert_eq!(Format::from(&cell(0, CellType::IsoDateTime, "2021-01-01")), Some(Format::Date));
        assert_eq!(Format::from(&cell(0, CellType::NumberDate1900, "10000000000")), Some(Format::Text));
        assert_eq!(Format::from(&cell(0, CellType::NumberDateTime1900, "44197.5")), Some(Format::Text));
        assert_eq!(Format::from(&cell(0, CellType::SharedString, "Kirk")), Some(Format::Text));
        assert_eq!(Format::from(&Cell::empty(1, 0)), None);
    }

    #[test]
    fn headers_default_to_text() {
        let columns = resolve_columns(&headers(&["Employee", "Status"]), &[], None).unwrap();
        assert_eq!(columns.len(), 2);
        assert_eq!(columns[0].name, "Employee");
        assert!(columns.iter().all(|column| column.format == Format::Text));
        assert_eq!(columns[1].convert("Done").unwrap(), Value::Text("Done".to_owned()));
    }

    #[test]
    fn overrides_replace_defaults() {
        let hours = Column::float("Hours worked");
        let columns = resolve_columns(
            &headers(&["Date", "Hours worked"]),
            &[Column::number("Hours worked"), hours.clone(), Column::text("Unknown")],
            None,
        )
        .unwrap();
        assert_eq!(columns[0].format, Format::Text);
        assert_eq!(columns[1].format, Format::Float);
        assert!(columns[1].converter.same_as(&hours.converter));
    }

    #[test]
    fn blank_headers_are_named_by_position() {
        let columns = resolve_columns(&headers(&["id", " ", ""]), &[], None).unwrap();
        let names: Vec<&str> = columns.iter().map(|column| column.name.as_str()).collect();
        assert_eq!(names, vec!["id", "column2", "column3"]);
    }

    #[test]
    fn headers_are_trimmed() {
        let columns = resolve_columns(&headers(&["  Hours ", "Name\t"]), &[Column::float("Hours")], None).unwrap();
        assert_eq!(columns[0].name, "Hours");
        assert_eq!(columns[0].format, Format::Float);
        assert_eq!(columns[1].name, "Name");
    }

    #[test]
    fn duplicate_headers_are_rejected() {
        let error = resolve_columns(&headers(&["Name", "name"]), &[], None).unwrap_err();
        assert!(matches!(error, SheetDbError::ColumnError(ColumnError::DuplicateColumn(name)) if name == "name"));
    }

    #[test]
    fn formats_inferred_from_samples() {
        let samples = vec![
            vec![
                cell(0, CellType::NumberDate1900, "44197"),
                cell(1, CellType::Number, "3"),
                cell(2, CellType::Number, "7.5"),
                cell(3, CellType::SharedString, "Kirk"),
            ],
            vec![
                cell(0, CellType::IsoDateTime, "2021-01-02"),
                cell(1, CellType::Number, "4"),
                cell(2, CellType::Number, "8"),
            ],
        ];
        let columns = resolve_columns(
            &headers(&["Date", "Count", "Hours", "Employee", "Notes"]),
            &[],
            Some(samples.as_slice()),
        )
        .unwrap();
        let formats: Vec<Format> = columns.iter().map(|column| column.format).collect();
        assert_eq!(
            formats,
            vec![Format::Date, Format::Number, Format::Float, Format::Text, Format::Text]
        );
        assert_eq!(columns[0].convert("2021-01-01").unwrap().to_string(), "2021-01-01");
    }

    #[test]
    fn scientific_samples() {
        let samples = vec![vec![
            cell(0, CellType::Number, "1E-3"),
            cell(1, CellType::Number, "1E+20"),
            cell(2, CellType::Number, "1E+3"),
        ]];
        let columns = resolve_columns(&headers(&["Small", "Huge", "Thousand"]), &[], Some(samples.as_slice())).unwrap();
        let formats: Vec<Format> = columns.iter().map(|column| column.format).collect();
        assert_eq!(formats, vec![Format::Float, Format::Float, Format::Number]);
    }

    #[test]
    fn inferred_columns_accept_their_samples() {
        let samples = vec![
            vec![
                cell(0, CellType::Number, "1E-3"),
                cell(1, CellType::Number, "1E+20"),
                cell(2, CellType::Number, "42.000"),
                cell(3, CellType::NumberDate1900, "44197"),
                cell(4, CellType::NumberDate1900, "10000000000"),
                cell(5, CellType::IsoDateTime, "2021-01-01T08:00:00"),
                cell(6, CellType::Boolean, "1"),
                cell(7, CellType::Error, "#N/A"),
            ],
            vec![
                cell(0, CellType::Number, "2"),
                cell(1, CellType::Number, "-7.5"),
                cell(2, CellType::Number, "-3"),
                cell(3, CellType::IsoDateTime, "2021-01-02"),
                cell(4, CellType::NumberDate1900, "44198"),
                cell(5, CellType::NumberDateTime1900, "44197.5"),
            ],
        ];
        let columns = resolve_columns(
            &headers(&["a", "b", "c", "d", "e", "f", "g", "h"]),
            &[],
            Some(samples.as_slice()),
        )
        .unwrap();
        assert_eq!(columns[3].format, Format::Date);
        assert_eq!(columns[4].format, Format::Text);
        for row in &samples {
            for cell in row {
                let column = &columns[cell.col];
                assert!(
                    column.convert(&cell.text()).is_ok(),
                    "{} column rejected its sample '{}'",
                    column.format.as_str(),
                    cell.text()
                );
            }
        }
    }
}
