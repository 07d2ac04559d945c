//! The storage handle.

use std::path::Path;

use rusqlite::Connection;

use crate::operations::OperationError;
use crate::schema::{self, SchemaError, ENTITY_TABLES};

/// One open shelter database.
///
/// A handle is meant to be acquired at the start of a request and dropped
/// at its end; dropping it closes the connection. It is not meant to be
/// shared between concurrent callers. Every statement commits on its own.
pub struct Storage {
    conn: Connection,
}

impl Storage {
    /// Open the database at `path`, creating the file and schema if needed.
    pub fn connect(path: impl AsRef<Path>) -> Result<Self, SchemaError> {
        let conn = schema::open_database(path.as_ref())?;
        log::debug!("Opened shelter database {}", path.as_ref().display());
        Ok(Self { conn })
    }

    /// An in-memory database with the full schema.
    pub fn open_memory() -> Result<Self, SchemaError> {
        Ok(Self {
            conn: schema::open_memory()?,
        })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Close the connection, reporting any error instead of discarding it
    /// as `Drop` would.
    pub fn close(self) -> Result<(), OperationError> {
        self.conn.close().map_err(|(_, e)| OperationError::Sqlite(e))
    }

    /// Number of rows in one of the entity or plugin tables.
    pub fn count_rows(&self, table: &str) -> Result<i64, OperationError> {
        let known = ENTITY_TABLES.contains(&table) || table == "plugin" || table == "plugin_config";
        if !known {
            return Err(OperationError::UnknownTable(table.to_string()));
        }
        let count = self
            .conn
            .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))?;
        Ok(count)
    }
}
