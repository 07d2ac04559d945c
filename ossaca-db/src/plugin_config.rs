//! Plugin registrations and per-plugin key/value configuration.

use rusqlite::params;

use crate::operations::OperationError;
use crate::storage::Storage;

/// A plugin recorded as loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginRow {
    pub name: String,
    /// Plugin kind as stored by the plugin host.
    pub kind: i64,
    pub registered_at: String,
}

impl Storage {
    /// Record a loaded plugin. Registering again refreshes its kind.
    pub fn register_plugin(&self, name: &str, kind: i64) -> Result<(), OperationError> {
        self.connection().execute(
            "INSERT INTO plugin (name, type) VALUES (?1, ?2)
             ON CONFLICT(name) DO UPDATE SET
                 type = excluded.type,
                 registered_at = datetime('now')",
            params![name, kind],
        )?;
        Ok(())
    }

    pub fn registered_plugins(&self) -> Result<Vec<PluginRow>, OperationError> {
        let mut stmt = self
            .connection()
            .prepare("SELECT name, type, registered_at FROM plugin ORDER BY name")?;
        let rows = stmt.query_map([], |row| {
            Ok(PluginRow {
                name: row.get(0)?,
                kind: row.get(1)?,
                registered_at: row.get(2)?,
            })
        })?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    pub fn set_plugin_config(
        &self,
        plugin: &str,
        key: &str,
        value: &str,
    ) -> Result<(), OperationError> {
        self.connection().execute(
            "INSERT INTO plugin_config (plugin, key, value) VALUES (?1, ?2, ?3)
             ON CONFLICT(plugin, key) DO UPDATE SET value = excluded.value",
            params![plugin, key, value],
        )?;
        Ok(())
    }

    pub fn get_plugin_config(
        &self,
        plugin: &str,
        key: &str,
    ) -> Result<Option<String>, OperationError> {
        let result = self.connection().query_row(
            "SELECT value FROM plugin_config WHERE plugin = ?1 AND key = ?2",
            params![plugin, key],
            |row| row.get::<_, Option<String>>(0),
        );
        match result {
            Ok(value) => Ok(value),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// All configuration entries of one plugin, sorted by key.
    pub fn plugin_config_entries(
        &self,
        plugin: &str,
    ) -> Result<Vec<(String, String)>, OperationError> {
        let mut stmt = self.connection().prepare(
            "SELECT key, COALESCE(value, '') FROM plugin_config WHERE plugin = ?1 ORDER BY key",
        )?;
        let rows = stmt.query_map(params![plugin], |row| Ok((row.get(0)?, row.get(1)?)))?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }
}
