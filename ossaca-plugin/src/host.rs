//! Registry of attached plugins and their lifecycle.

use ossaca_db::Storage;
use ossaca_model::{Link, Person};

use crate::config::PluginConfig;
use crate::error::PluginError;
use crate::plugin::{PersonProvider, Plugin, PluginKind, PluginState};

/// An attached plugin with its lifecycle state.
pub struct RegisteredPlugin {
    plugin: Box<dyn Plugin>,
    state: PluginState,
    failure: Option<String>,
}

impl RegisteredPlugin {
    fn new<P: Plugin + 'static>(plugin: P) -> Self {
        Self {
            plugin: Box::new(plugin),
            state: PluginState::Unloaded,
            failure: None,
        }
    }

    pub fn name(&self) -> &'static str {
        self.plugin.name()
    }

    pub fn kind(&self) -> PluginKind {
        self.plugin.kind()
    }

    pub fn state(&self) -> PluginState {
        self.state
    }

    /// Why the plugin is in the `Failed` state.
    pub fn failure(&self) -> Option<&str> {
        self.failure.as_deref()
    }

    /// The plugin's person directory, once it is loaded.
    pub fn person_provider(&self) -> Option<&dyn PersonProvider> {
        if self.state != PluginState::Loaded {
            return None;
        }
        self.plugin.as_person_provider()
    }

    fn fail(&mut self, error: PluginError) {
        log::warn!("Plugin '{}' disabled: {error}", self.name());
        self.state = PluginState::Failed;
        self.failure = Some(error.to_string());
    }
}

/// A plugin of kind `Person` must expose a person provider.
fn self_check(plugin: &dyn Plugin) -> Result<(), PluginError> {
    if plugin.kind() == PluginKind::Person && plugin.as_person_provider().is_none() {
        return Err(PluginError::MissingCapability {
            plugin: plugin.name().to_string(),
            capability: "a person provider",
        });
    }
    Ok(())
}

/// Holds every attached plugin.
///
/// Attach plugins, load them against a storage handle, then query the
/// loaded ones. A plugin that fails its self-check or its `load` is kept in
/// the `Failed` state; it never takes the host down with it.
pub struct PluginHost {
    plugins: Vec<RegisteredPlugin>,
}

impl Default for PluginHost {
    fn default() -> Self {
        Self::new()
    }
}

impl PluginHost {
    pub fn new() -> Self {
        Self {
            plugins: Vec::new(),
        }
    }

    /// A host with every plugin shipped with ossaca attached.
    pub fn with_bundled() -> Self {
        let mut host = Self::new();
        host.attach(crate::garradin::GarradinPlugin::new());
        host
    }

    /// Attach a plugin, running its capability self-check.
    pub fn attach<P: Plugin + 'static>(&mut self, plugin: P) -> &mut Self {
        let mut entry = RegisteredPlugin::new(plugin);
        let duplicate = self.plugins.iter().any(|p| p.name() == entry.name());

        let checked = if duplicate {
            Err(PluginError::load(entry.name(), "a plugin with this name is already attached"))
        } else {
            self_check(&*entry.plugin)
        };
        match checked {
            Ok(()) => entry.state = PluginState::Attached,
            Err(e) => entry.fail(e),
        }

        self.plugins.push(entry);
        self
    }

    /// Load every attached plugin and record the loaded ones in storage.
    ///
    /// Returns how many plugins were loaded by this call. Only storage
    /// errors while recording a plugin are returned; a plugin's own failure
    /// marks it `Failed`.
    pub fn load_all(&mut self, storage: &Storage) -> Result<usize, PluginError> {
        let mut loaded = 0;
        for entry in &mut self.plugins {
            if entry.state != PluginState::Attached {
                continue;
            }
            let config = PluginConfig::new(storage, entry.name());
            match entry.plugin.load(&config) {
                Ok(()) => {
                    storage.register_plugin(entry.name(), entry.kind().as_i64())?;
                    entry.state = PluginState::Loaded;
                    log::info!("Loaded plugin '{}' ({})", entry.name(), entry.kind());
                    loaded += 1;
                }
                Err(e) => entry.fail(e),
            }
        }
        Ok(loaded)
    }

    /// Destroy every loaded plugin. They go back to `Attached` and can be
    /// loaded again.
    pub fn destroy_all(&mut self) {
        for entry in &mut self.plugins {
            if entry.state == PluginState::Loaded {
                entry.plugin.destroy();
                entry.state = PluginState::Attached;
                log::debug!("Destroyed plugin '{}'", entry.name());
            }
        }
    }

    pub fn plugins(&self) -> impl Iterator<Item = &RegisteredPlugin> {
        self.plugins.iter()
    }

    pub fn get(&self, name: &str) -> Option<&RegisteredPlugin> {
        self.plugins.iter().find(|p| p.name() == name)
    }

    /// The first loaded person directory.
    pub fn person_provider(&self) -> Option<&dyn PersonProvider> {
        self.plugins.iter().find_map(|p| p.person_provider())
    }

    /// Replace a person id with the person from the loaded directory.
    ///
    /// Without a directory the link is left as it is. An id the directory
    /// doesn't know becomes `Unset`.
    pub fn resolve_person(&self, link: &mut Link<Person>) -> Result<(), PluginError> {
        if link.is_resolved() {
            return Ok(());
        }
        let Some(provider) = self.person_provider() else {
            return Ok(());
        };
        *link = match link.id() {
            Some(id) => provider
                .get_person_by_id(id)?
                .map_or(Link::Unset, Link::Resolved),
            None => Link::Unset,
        };
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/host_tests.rs"]
mod tests;
