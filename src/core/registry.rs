//! Explicit context objects shared by a build.
//!
//! [`Registry`] holds singleton-like objects keyed by name. It is owned
//! by a built configuration and handed to whoever needs it, instead of
//! hiding inside the settings store.
//!
//! [`FactoryRegistry`] maps names to constructors. Settings that name a
//! strategy or converter type ("class" settings) resolve through one.

use crate::core::error::{Result, SextantError};
use crate::core::settings::Settings;
use parking_lot::RwLock;
use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Thread-safe keyed store of shared objects
#[derive(Default)]
pub struct Registry {
    entries: RwLock<HashMap<String, Arc<dyn Any + Send + Sync>>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `value` under `key`, replacing any previous entry
    pub fn set<T: Any + Send + Sync>(&self, key: impl Into<String>, value: T) {
        self.entries.write().insert(key.into(), Arc::new(value));
    }

    /// Fetch the entry under `key` if it exists and has type `T`
    pub fn get<T: Any + Send + Sync>(&self, key: &str) -> Option<Arc<T>> {
        let entry = self.entries.read().get(key).cloned()?;
        entry.downcast::<T>().ok()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.read().contains_key(key)
    }

    pub fn remove(&self, key: &str) -> bool {
        self.entries.write().remove(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<String> = self.entries.read().keys().cloned().collect();
        keys.sort();
        f.debug_struct("Registry").field("keys", &keys).finish()
    }
}

/// Constructor invoked with the settings of the object being built
pub type Factory<T> = Arc<dyn Fn(&Settings) -> Result<Box<T>> + Send + Sync>;

/// Named constructors for trait objects
pub struct FactoryRegistry<T: ?Sized> {
    kind: &'static str,
    factories: HashMap<String, Factory<T>>,
}

impl<T: ?Sized> FactoryRegistry<T> {
    /// Create an empty registry; `kind` names the product in error messages
    pub fn new(kind: &'static str) -> Self {
        Self {
            kind,
            factories: HashMap::new(),
        }
    }

    pub fn register<F>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn(&Settings) -> Result<Box<T>> + Send + Sync + 'static,
    {
        self.factories.insert(name.into(), Arc::new(factory));
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.factories.keys().cloned().collect();
        names.sort();
        names
    }

    /// Build the product registered as `name`
    pub fn create(&self, name: &str, settings: &Settings) -> Result<Box<T>> {
        let factory = self.factories.get(name).ok_or_else(|| {
            SextantError::Configuration(format!(
                "No {} registered under [{}], known: {:?}",
                self.kind,
                name,
                self.names()
            ))
        })?;
        factory(settings)
    }
}

impl<T: ?Sized> Clone for FactoryRegistry<T> {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            factories: self.factories.clone(),
        }
    }
}

impl<T: ?Sized> fmt::Debug for FactoryRegistry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FactoryRegistry")
            .field("kind", &self.kind)
            .field("names", &self.names())
            .finish()
    }
}
