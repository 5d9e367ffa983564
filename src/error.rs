use thiserror::Error;

/// Main error type for sheetdb.
/// Aggregates errors from various sources including standard library, dependencies, and internal modules.
#[derive(Error, Debug)]
pub enum SheetDbError {
    #[error("{0}")]
    WithContextError(String),

    /// The workbook could not be opened: missing file, unreadable file or not an xlsx container.
    #[error("Open workbook '{path}' failed: {source}")]
    OpenError {
        path: String,
        source: Box<SheetDbError>,
    },

    // Standard library errors
    #[error("{0}")]
    IoError(#[from] std::io::Error),

    #[error("{0}")]
    ParseIntError(#[from] std::num::ParseIntError),

    // Third-party library errors
    #[error("{0}")]
    DuckDBError(#[from] duckdb::Error),

    #[error("{0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("{0}")]
    XmlError(#[from] quick_xml::Error),

    #[error("{0}")]
    XmlEncodingError(#[from] quick_xml::encoding::EncodingError),

    #[error("{0}")]
    XmlAttributeError(#[from] quick_xml::events::attributes::AttrError),

    // Helper module errors
    #[error("{0}")]
    XmlHelperError(#[from] crate::helpers::xml::XmlError),

    // Spreadsheet module errors
    #[error("{0}")]
    SpreadsheetError(#[from] crate::spreadsheet::SpreadsheetError),

    // Database module errors
    #[error("{0}")]
    ColumnError(#[from] crate::database::column::ColumnError),

    #[error("{0}")]
    ImportError(#[from] crate::database::importer::ImportError),
}

/// Coarse classification of a [`SheetDbError`], following the stages of a load.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// The workbook file is missing, unreadable or not a valid container.
    Open,
    /// The selected sheet has no rows, so there is no header row.
    EmptySheet,
    /// Headers or rows cannot be mapped onto a table schema.
    Schema,
    /// A cell value was rejected by its column's converter.
    Conversion,
    /// The destination store failed to create the table or insert a row.
    Storage,
    /// Anything else, e.g. a malformed worksheet part.
    Other,
}

impl SheetDbError {
    /// Classifies the error by the load stage it belongs to.
    pub fn kind(&self) -> ErrorKind {
        use crate::database::importer::ImportError;
        use crate::spreadsheet::SpreadsheetError;
        match self {
            Self::OpenError { .. } => ErrorKind::Open,
            Self::SpreadsheetError(SpreadsheetError::EmptySheet(..)) => ErrorKind::EmptySheet,
            Self::ImportError(ImportError::ConversionError { .. }) => ErrorKind::Conversion,
            Self::ImportError(ImportError::UnexpectedCell { .. }) => ErrorKind::Schema,
            Self::ColumnError(_) => ErrorKind::Schema,
            Self::DuckDBError(_) => ErrorKind::Storage,
            _ => ErrorKind::Other,
        }
    }
}

pub(crate) trait ResultMessage {
    fn with_prefix(self, message: &str) -> Self;
}

impl<T> ResultMessage for Result<T, SheetDbError> {
    fn with_prefix(self, message: &str) -> Self {
        self.map_err(|e| SheetDbError::WithContextError(format!("{}: {}", message, e)))
    }
}
