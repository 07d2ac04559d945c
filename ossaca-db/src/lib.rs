//! SQLite persistence layer for the shelter.
//!
//! Provides schema creation, the row mapper, type-directed add/update/delete,
//! read queries, and on-demand resolution of relations between entities.
//! Backed by SQLite via rusqlite with the bundled feature.

pub mod mapper;
pub mod operations;
pub mod plugin_config;
pub mod queries;
pub mod resolve;
pub mod schema;
pub mod storage;

pub use mapper::{Mapped, Params};
pub use operations::{insert_sql, update_sql, ChildWrite, Layout, OperationError, Persist, TableWrite};
pub use plugin_config::PluginRow;
pub use schema::{open_database, open_memory, SchemaError, CURRENT_VERSION};
pub use storage::Storage;
