pub(crate) mod animals;
pub(crate) mod boxes;
pub(crate) mod cares;
pub(crate) mod caresheets;
pub(crate) mod config;
pub(crate) mod labels;
pub(crate) mod locations;
pub(crate) mod plugins;
pub(crate) mod sheets;

use std::path::PathBuf;

use ossaca_db::Storage;
use ossaca_model::{Id, Link};

use crate::CliError;
use crate::settings::{PathSource, Settings};

/// Paths every command works from.
pub(crate) struct AppContext {
    pub database: PathBuf,
    pub database_source: PathSource,
    pub uploads: PathBuf,
    pub uploads_source: PathSource,
}

impl AppContext {
    pub(crate) fn new(
        settings: &Settings,
        database_flag: Option<PathBuf>,
        uploads_flag: Option<PathBuf>,
    ) -> Self {
        let (database, database_source) = settings.database_path(database_flag);
        let (uploads, uploads_source) = settings.uploads_dir(uploads_flag);
        Self {
            database,
            database_source,
            uploads,
            uploads_source,
        }
    }

    /// Open the shelter database for one command. The handle is dropped, and
    /// the connection closed, when the command returns.
    pub(crate) fn open_storage(&self) -> Result<Storage, CliError> {
        Storage::connect(&self.database).map_err(|e| {
            CliError::database(format!(
                "Failed to open {}: {}",
                self.database.display(),
                e
            ))
        })
    }
}

pub(crate) fn link_arg<T>(id: Option<Id>) -> Link<T> {
    id.map_or(Link::Unset, Link::from_id)
}

pub(crate) fn or_dash(s: &str) -> &str {
    if s.is_empty() { "-" } else { s }
}

/// Truncate a string to a maximum width, appending "..." if needed.
pub(crate) fn truncate_str(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else if max > 3 {
        format!("{}...", s.chars().take(max - 3).collect::<String>())
    } else {
        s.chars().take(max).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_counts_characters() {
        assert_eq!(truncate_str("Louloute", 20), "Louloute");
        assert_eq!(truncate_str("gentille avec du poil au nez", 10), "gentill...");
        assert_eq!(truncate_str("été", 2), "ét");
    }

    #[test]
    fn link_arg_ignores_sentinels() {
        assert_eq!(link_arg::<ossaca_model::State>(None), Link::Unset);
        assert_eq!(link_arg::<ossaca_model::State>(Some(-1)), Link::Unset);
        assert_eq!(link_arg::<ossaca_model::State>(Some(4)), Link::Id(4));
    }
}
