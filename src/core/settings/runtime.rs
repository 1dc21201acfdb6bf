//! Per-session settings layered over a built configuration.

use crate::core::registry::Registry;
use crate::core::settings::{SettingValue, Settings, SettingsSource};
use std::any::Any;
use std::sync::Arc;

/// Mutable overlay over immutable global settings
///
/// Reads check the overlay first and fall back to the global layer.
/// Writes only ever touch the overlay. The registry always belongs to
/// the global build.
#[derive(Debug)]
pub struct RuntimeSettings {
    global: Arc<Settings>,
    registry: Arc<Registry>,
    overlay: Settings,
}

impl RuntimeSettings {
    pub fn new(global: Arc<Settings>, registry: Arc<Registry>) -> Self {
        Self {
            global,
            registry,
            overlay: Settings::new(),
        }
    }

    pub fn set_setting(&self, key: impl Into<String>, value: impl Into<String>) -> &Self {
        self.overlay.set_setting(key, value);
        self
    }

    pub fn set_object_setting<T: Any + Send + Sync>(
        &self,
        key: impl Into<String>,
        value: T,
    ) -> &Self {
        self.overlay.set_object_setting(key, value);
        self
    }

    /// Remove an overlay entry, exposing the global value again
    pub fn remove_setting(&self, key: &str) -> Option<SettingValue> {
        self.overlay.remove_setting(key)
    }

    pub fn global(&self) -> &Settings {
        &self.global
    }

    pub fn overlay(&self) -> &Settings {
        &self.overlay
    }

    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }
}

impl SettingsSource for RuntimeSettings {
    fn get_value(&self, key: &str) -> Option<SettingValue> {
        self.overlay
            .get_value(key)
            .or_else(|| self.global.get_value(key))
    }
}
