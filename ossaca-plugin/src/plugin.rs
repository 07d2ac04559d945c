use std::fmt;

use ossaca_model::{Id, Person};

use crate::config::PluginConfig;
use crate::error::PluginError;

/// What a plugin contributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PluginKind {
    Generic,
    /// Provides the person directory.
    Person,
}

impl PluginKind {
    /// Value stored in the `plugin` table.
    pub fn as_i64(self) -> i64 {
        match self {
            PluginKind::Generic => 0,
            PluginKind::Person => 1,
        }
    }

    pub fn from_i64(value: i64) -> Self {
        match value {
            1 => PluginKind::Person,
            _ => PluginKind::Generic,
        }
    }
}

impl fmt::Display for PluginKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PluginKind::Generic => write!(f, "generic"),
            PluginKind::Person => write!(f, "person"),
        }
    }
}

/// Lifecycle of a plugin inside a [`crate::PluginHost`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PluginState {
    Unloaded,
    Attached,
    Loaded,
    Failed,
}

impl fmt::Display for PluginState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PluginState::Unloaded => "unloaded",
            PluginState::Attached => "attached",
            PluginState::Loaded => "loaded",
            PluginState::Failed => "failed",
        };
        f.write_str(s)
    }
}

/// A plugin the host can attach, load and destroy.
pub trait Plugin {
    /// Unique name, also the key of the plugin's configuration.
    fn name(&self) -> &'static str;

    fn kind(&self) -> PluginKind;

    /// Prepare the plugin. Configuration defaults should be written here.
    fn load(&mut self, config: &PluginConfig<'_>) -> Result<(), PluginError>;

    /// Release whatever `load` acquired.
    fn destroy(&mut self);

    /// The person directory, for plugins of kind [`PluginKind::Person`].
    fn as_person_provider(&self) -> Option<&dyn PersonProvider> {
        None
    }
}

/// Read access to a directory of persons.
pub trait PersonProvider {
    fn get_all_persons(&self) -> Result<Vec<Person>, PluginError>;

    fn get_person_by_id(&self, id: Id) -> Result<Option<Person>, PluginError>;
}
