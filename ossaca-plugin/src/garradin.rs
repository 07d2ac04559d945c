//! Person directory backed by a Garradin association database.
//!
//! Garradin keeps its members in a `membres` table. The file is opened
//! read-only; ossaca never writes to it.

use std::path::{Path, PathBuf};

use rusqlite::types::Value;
use rusqlite::{params, Connection, OpenFlags, Row};

use ossaca_model::{Address, Id, Person};

use crate::config::PluginConfig;
use crate::error::PluginError;
use crate::plugin::{PersonProvider, Plugin, PluginKind};

pub const PLUGIN_NAME: &str = "garradin_plugin";
pub const DATABASE_PATH_KEY: &str = "database_path";
pub const DEFAULT_DATABASE_PATH: &str = "/var/www/garradin/association.sqlite";

const MEMBER_COLUMNS: &str = "id, nom, email, telephone, adresse, code_postal, ville, pays";

#[derive(Debug, Default)]
pub struct GarradinPlugin {
    database_path: Option<PathBuf>,
}

impl GarradinPlugin {
    pub fn new() -> Self {
        Self::default()
    }

    /// Path read from the plugin configuration, once loaded.
    pub fn database_path(&self) -> Option<&Path> {
        self.database_path.as_deref()
    }

    /// `None` when not loaded or when the Garradin file doesn't exist.
    fn open(&self) -> Result<Option<Connection>, PluginError> {
        let Some(path) = &self.database_path else {
            return Ok(None);
        };
        if !path.is_file() {
            log::debug!("Garradin database {} not found", path.display());
            return Ok(None);
        }
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        Ok(Some(conn))
    }
}

/// Garradin columns are loosely typed; postal codes in particular may be
/// stored as integers.
fn text(row: &Row<'_>, column: &str) -> rusqlite::Result<String> {
    Ok(match row.get::<_, Value>(column)? {
        Value::Text(s) => s,
        Value::Integer(n) => n.to_string(),
        Value::Real(n) => n.to_string(),
        Value::Null | Value::Blob(_) => String::new(),
    })
}

fn person_from_row(row: &Row<'_>) -> rusqlite::Result<Person> {
    Ok(Person {
        id: row.get("id")?,
        name: text(row, "nom")?,
        email: text(row, "email")?,
        phone: text(row, "telephone")?,
        address: Address {
            street: text(row, "adresse")?,
            postal_code: text(row, "code_postal")?,
            city: text(row, "ville")?,
            country: text(row, "pays")?,
        },
    })
}

impl Plugin for GarradinPlugin {
    fn name(&self) -> &'static str {
        PLUGIN_NAME
    }

    fn kind(&self) -> PluginKind {
        PluginKind::Person
    }

    fn load(&mut self, config: &PluginConfig<'_>) -> Result<(), PluginError> {
        let path = PathBuf::from(config.set_default(DATABASE_PATH_KEY, DEFAULT_DATABASE_PATH)?);
        if !path.is_file() {
            log::info!(
                "Garradin database {} doesn't exist, no persons will be listed",
                path.display()
            );
        }
        self.database_path = Some(path);
        Ok(())
    }

    fn destroy(&mut self) {
        self.database_path = None;
    }

    fn as_person_provider(&self) -> Option<&dyn PersonProvider> {
        Some(self)
    }
}

impl PersonProvider for GarradinPlugin {
    fn get_all_persons(&self) -> Result<Vec<Person>, PluginError> {
        let Some(conn) = self.open()? else {
            return Ok(Vec::new());
        };
        let mut stmt = conn.prepare(&format!("SELECT {MEMBER_COLUMNS} FROM membres ORDER BY id"))?;
        let rows = stmt.query_map([], person_from_row)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    fn get_person_by_id(&self, id: Id) -> Result<Option<Person>, PluginError> {
        let Some(conn) = self.open()? else {
            return Ok(None);
        };
        let result = conn.query_row(
            &format!("SELECT {MEMBER_COLUMNS} FROM membres WHERE id = ?1"),
            params![id],
            person_from_row,
        );
        match result {
            Ok(person) => Ok(Some(person)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
