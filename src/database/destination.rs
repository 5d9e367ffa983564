use crate::error::SheetDbError;
use duckdb::Connection;
use std::fmt::Display;
use std::path::Path;
use std::path::PathBuf;

/// Where loaded tables are stored.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Destination {
    /// A private in-memory database, gone when its last connection closes
    #[default]
    InMemory,
    /// A database file on disk, created if it doesn't exist
    File(PathBuf),
}

impl Destination {
    /// Opens a connection to the destination database.
    pub fn open(&self) -> Result<Connection, SheetDbError> {
        let connection = match self {
            Destination::InMemory => Connection::open_in_memory()?,
            Destination::File(path) => Connection::open(path)?,
        };
        Ok(connection)
    }
}

impl From<&str> for Destination {
    /// `":memory:"` and the empty string select an in-memory database; anything else is a file path.
    fn from(dsn: &str) -> Self {
        match dsn.trim() {
            "" | ":memory:" => Destination::InMemory,
            path => Destination::File(PathBuf::from(path)),
        }
    }
}

impl From<&Path> for Destination {
    fn from(path: &Path) -> Self {
        Destination::File(path.to_path_buf())
    }
}

impl From<PathBuf> for Destination {
    fn from(path: PathBuf) -> Self {
        Destination::File(path)
    }
}

impl Display for Destination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Destination::InMemory => write!(f, ":memory:"),
            Destination::File(path) => write!(f, "{}", path.display()),
        }
    }
}
