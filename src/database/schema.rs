use crate::database::column::Column;
use crate::database::column::ColumnError;
use crate::database::column::Format;
use crate::error::SheetDbError;

/// Storage types used by the destination table.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StorageType {
    /// Variable-length strings, also used for dates bound as ISO text
    Varchar,
    /// Double-precision floating point numbers
    Double,
}

impl StorageType {
    /// Returns the string representation of the storage type for DuckDB.
    pub const fn as_str(&self) -> &'static str {
        match self {
            StorageType::Varchar => "VARCHAR",
            StorageType::Double => "DOUBLE",
        }
    }
}

impl From<Format> for StorageType {
    fn from(format: Format) -> Self {
        if format.is_numeric() {
            StorageType::Double
        } else {
            StorageType::Varchar
        }
    }
}

/// Table schema derived from resolved columns: one (name, storage type) pair per column.
#[derive(Clone, Debug, PartialEq)]
pub struct Schema {
    columns: Vec<(String, StorageType)>,
}

impl Schema {
    /// Builds the schema of a table holding the given columns, in order.
    pub fn build(columns: &[Column]) -> Result<Self, SheetDbError> {
        let columns = columns
            .iter()
            .map(|column| {
                validate_identifier(&column.name)?;
                Ok((column.name.to_owned(), StorageType::from(column.format)))
            })
            .collect::<Result<Vec<_>, SheetDbError>>()?;
        Ok(Schema { columns })
    }

    /// Returns the (name, storage type) pairs in column order.
    pub fn columns(&self) -> &[(String, StorageType)] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn drop_table_sql(&self, table: &str) -> Result<String, SheetDbError> {
        Ok(format!("DROP TABLE IF EXISTS {}", quote_identifier(table)?))
    }

    pub fn create_table_sql(&self, table: &str) -> Result<String, SheetDbError> {
        let definitions = self
            .columns
            .iter()
            .map(|(name, kind)| Ok(format!("{} {}", quote_identifier(name)?, kind.as_str())))
            .collect::<Result<Vec<_>, SheetDbError>>()?;
        Ok(format!("CREATE TABLE {} ({})", quote_identifier(table)?, definitions.join(", ")))
    }

    /// Renders a parameterized insert with one placeholder per column.
    pub fn insert_sql(&self, table: &str) -> Result<String, SheetDbError> {
        let placeholders = vec!["?"; self.columns.len()].join(", ");
        Ok(format!("INSERT INTO {} VALUES ({})", quote_identifier(table)?, placeholders))
    }
}

fn validate_identifier(name: &str) -> Result<(), SheetDbError> {
    if name.is_empty() || name.contains('\0') {
        Err(ColumnError::InvalidName(name.escape_default().to_string()))?;
    }
    Ok(())
}

/// Double-quotes an identifier, doubling embedded quotes.
pub fn quote_identifier(name: &str) -> Result<String, SheetDbError> {
    validate_identifier(name)?;
    Ok(format!("\"{}\"", name.replace('"', "\"\"")))
}
