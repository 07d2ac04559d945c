use ossaca_db::OperationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PluginError {
    #[error("Storage error: {0}")]
    Storage(#[from] OperationError),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// The plugin declares a kind whose interface it doesn't expose
    #[error("Plugin '{plugin}' doesn't provide {capability}")]
    MissingCapability {
        plugin: String,
        capability: &'static str,
    },

    #[error("Plugin '{plugin}' failed to load: {reason}")]
    Load { plugin: String, reason: String },
}

impl PluginError {
    pub fn load(plugin: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Load {
            plugin: plugin.into(),
            reason: reason.into(),
        }
    }
}
