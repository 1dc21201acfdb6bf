//! Naming strategies turn logical property names into index paths.

use crate::core::error::Result;
use crate::core::registry::FactoryRegistry;
use crate::core::settings::{keys, Settings};
use std::fmt;

pub trait NamingStrategy: Send + Sync + fmt::Debug {
    /// Root path of an alias, the starting point for its properties
    fn root_path(&self, alias: &str) -> String;

    /// Path of `name` below `root`
    fn build_path(&self, root: &str, name: &str) -> String;
}

/// Paths are the plain property names
#[derive(Debug, Default)]
pub struct DefaultNamingStrategy;

impl NamingStrategy for DefaultNamingStrategy {
    fn root_path(&self, _alias: &str) -> String {
        String::new()
    }

    fn build_path(&self, _root: &str, name: &str) -> String {
        name.to_string()
    }
}

/// Paths are `root.name`, with the alias as the outermost root
#[derive(Debug, Default)]
pub struct PrefixedNamingStrategy;

impl NamingStrategy for PrefixedNamingStrategy {
    fn root_path(&self, alias: &str) -> String {
        alias.to_string()
    }

    fn build_path(&self, root: &str, name: &str) -> String {
        if root.is_empty() {
            name.to_string()
        } else {
            format!("{root}.{name}")
        }
    }
}

pub type NamingFactories = FactoryRegistry<dyn NamingStrategy>;

/// `default` and `prefixed`
pub fn builtin_factories() -> NamingFactories {
    let mut factories = NamingFactories::new("naming strategy");
    factories.register("default", |_: &Settings| {
        Ok(Box::new(DefaultNamingStrategy) as Box<dyn NamingStrategy>)
    });
    factories.register("prefixed", |_: &Settings| {
        Ok(Box::new(PrefixedNamingStrategy) as Box<dyn NamingStrategy>)
    });
    factories
}

/// Strategy named by `sextant.mapping.naming`
pub fn from_settings(
    settings: &Settings,
    factories: &NamingFactories,
) -> Result<Box<dyn NamingStrategy>> {
    settings.get_setting_as_instance_or(keys::NAMING_STRATEGY, keys::DEFAULT_NAMING, factories)
}
