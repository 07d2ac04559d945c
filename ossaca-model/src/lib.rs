//! Shelter entity model.
//!
//! This crate defines the animals, sheets, cares, locations and food habits
//! handled by the shelter without any database dependency. `ossaca-db` maps
//! these types onto SQLite; person data only ever arrives through plugins.

pub mod error;
pub mod format;
pub mod link;
pub mod types;

pub use error::ModelError;
pub use link::{is_persisted_id, Id, Identified, Link, UNSET_ID};
pub use types::*;
