//! Setting groups and runtime layering

use sextant::core::registry::Registry;
use sextant::{RuntimeSettings, Settings, SettingsSource};
use std::sync::Arc;

fn converters() -> Settings {
    Settings::from_pairs([
        ("sextant.converter.date.type", "date"),
        ("sextant.converter.date.format", "%Y"),
        ("sextant.converter.money.type", "double"),
        ("sextant.mapping.uid", "$/uid"),
    ])
}

#[test]
fn test_groups_bucket_by_name() {
    let groups = converters().get_setting_groups("sextant.converter").unwrap();
    assert_eq!(groups.keys().collect::<Vec<_>>(), vec!["date", "money"]);
    assert_eq!(groups["date"].get_setting("format").as_deref(), Some("%Y"));
    assert_eq!(groups["money"].get_setting("type").as_deref(), Some("double"));
}

#[test]
fn test_group_key_without_separator_fails() {
    let settings = converters();
    settings.set_setting("sextant.converter.broken", "x");
    let err = settings.get_setting_groups("sextant.converter").unwrap_err();
    assert!(err.is_illegal_argument());
}

#[test]
fn test_groups_reflect_later_mutation() {
    let settings = converters();
    assert_eq!(settings.get_setting_groups("sextant.converter").unwrap().len(), 2);
    settings.set_setting("sextant.converter.flag.type", "boolean");
    assert_eq!(settings.get_setting_groups("sextant.converter").unwrap().len(), 3);
}

#[test]
fn test_runtime_overlay_reads_through() {
    let global = Arc::new(converters());
    let runtime = RuntimeSettings::new(Arc::clone(&global), Arc::new(Registry::new()));

    assert_eq!(runtime.get_setting("sextant.mapping.uid").as_deref(), Some("$/uid"));
    runtime.set_setting("sextant.mapping.uid", "$/session");
    assert_eq!(runtime.get_setting("sextant.mapping.uid").as_deref(), Some("$/session"));
    assert_eq!(global.get_setting("sextant.mapping.uid").as_deref(), Some("$/uid"));
}

#[test]
fn test_registry_shared_between_sessions() {
    let global = Arc::new(Settings::new());
    let registry = Arc::new(Registry::new());
    let first = RuntimeSettings::new(Arc::clone(&global), Arc::clone(&registry));
    let second = RuntimeSettings::new(global, registry);

    first.registry().set("cache", String::from("warm"));
    assert_eq!(second.registry().get::<String>("cache").unwrap().as_str(), "warm");
}
