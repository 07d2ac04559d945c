use thiserror::Error;

use ossaca_db::{OperationError, SchemaError};
use ossaca_plugin::PluginError;

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// I/O error
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// Database operation failed
    #[error("Database error: {0}")]
    Database(String),

    /// Settings file error
    #[error("Config error: {0}")]
    Config(String),

    /// Plugin host error
    #[error("Plugin error: {0}")]
    Plugin(#[from] PluginError),

    /// Rejected or failed picture upload
    #[error("Upload error: {0}")]
    Upload(String),

    /// Catch-all for other errors
    #[error("{0}")]
    Other(String),
}

impl CliError {
    pub(crate) fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }

    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub(crate) fn upload(msg: impl Into<String>) -> Self {
        Self::Upload(msg.into())
    }

    pub(crate) fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }

    /// No row with this id.
    pub(crate) fn not_found(entity: &str, id: ossaca_model::Id) -> Self {
        Self::Other(format!("No {entity} with id {id}"))
    }
}

impl From<OperationError> for CliError {
    fn from(e: OperationError) -> Self {
        Self::Database(e.to_string())
    }
}

impl From<SchemaError> for CliError {
    fn from(e: SchemaError) -> Self {
        Self::Database(e.to_string())
    }
}
