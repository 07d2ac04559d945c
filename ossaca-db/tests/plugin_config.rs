use ossaca_db::*;

#[test]
fn register_plugin_is_idempotent() {
    let storage = Storage::open_memory().unwrap();
    storage.register_plugin("garradin_plugin", 1).unwrap();
    storage.register_plugin("garradin_plugin", 1).unwrap();
    storage.register_plugin("another", 0).unwrap();

    let plugins = storage.registered_plugins().unwrap();
    assert_eq!(plugins.len(), 2);
    assert_eq!(plugins[0].name, "another");
    assert_eq!(plugins[1].name, "garradin_plugin");
    assert_eq!(plugins[1].kind, 1);
    assert!(!plugins[1].registered_at.is_empty());
}

#[test]
fn config_values_are_scoped_per_plugin() {
    let storage = Storage::open_memory().unwrap();
    assert_eq!(storage.get_plugin_config("a", "path").unwrap(), None);

    storage.set_plugin_config("a", "path", "/tmp/a.sqlite").unwrap();
    storage.set_plugin_config("b", "path", "/tmp/b.sqlite").unwrap();
    storage.set_plugin_config("a", "path", "/tmp/other.sqlite").unwrap();
    storage.set_plugin_config("a", "mode", "ro").unwrap();

    assert_eq!(
        storage.get_plugin_config("a", "path").unwrap().as_deref(),
        Some("/tmp/other.sqlite")
    );
    assert_eq!(
        storage.plugin_config_entries("a").unwrap(),
        vec![
            ("mode".to_string(), "ro".to_string()),
            ("path".to_string(), "/tmp/other.sqlite".to_string()),
        ]
    );
    assert_eq!(storage.count_rows("plugin_config").unwrap(), 3);
}
