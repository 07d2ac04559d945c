//! Plugins extending the shelter with outside data, chiefly the directory of
//! persons (adopters, foster families, vets) that the shelter database only
//! refers to by id.

pub mod config;
pub mod error;
pub mod garradin;
pub mod host;
pub mod plugin;

pub use config::PluginConfig;
pub use error::PluginError;
pub use garradin::GarradinPlugin;
pub use host::{PluginHost, RegisteredPlugin};
pub use plugin::{PersonProvider, Plugin, PluginKind, PluginState};
