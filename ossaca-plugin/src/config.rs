use ossaca_db::Storage;

use crate::error::PluginError;

/// Key/value configuration of one plugin, persisted in the shelter database.
pub struct PluginConfig<'a> {
    storage: &'a Storage,
    plugin: &'a str,
}

impl<'a> PluginConfig<'a> {
    pub fn new(storage: &'a Storage, plugin: &'a str) -> Self {
        Self { storage, plugin }
    }

    pub fn plugin(&self) -> &str {
        self.plugin
    }

    pub fn get(&self, key: &str) -> Result<Option<String>, PluginError> {
        Ok(self.storage.get_plugin_config(self.plugin, key)?)
    }

    pub fn set(&self, key: &str, value: &str) -> Result<(), PluginError> {
        Ok(self.storage.set_plugin_config(self.plugin, key, value)?)
    }

    /// Write `value` only if the key has no value yet. Returns the value in
    /// effect afterwards.
    pub fn set_default(&self, key: &str, value: &str) -> Result<String, PluginError> {
        if let Some(existing) = self.get(key)? {
            return Ok(existing);
        }
        self.set(key, value)?;
        Ok(value.to_string())
    }
}
