//! Hierarchical key/value settings.
//!
//! Keys are dotted strings (`sextant.converter.date.format`). Values are
//! either text or shared objects. [`SettingsSource`] carries the typed
//! accessors so that [`Settings`] and the layered [`RuntimeSettings`]
//! read the same way.

pub mod keys;
mod parse;
mod runtime;

pub use parse::{parse_bytes, parse_time_in_millis, parse_time_in_seconds};
pub use runtime::RuntimeSettings;

use crate::core::error::{Result, SextantError};
use crate::core::registry::FactoryRegistry;
use parking_lot::RwLock;
use std::any::Any;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

/// A single setting value
#[derive(Clone)]
pub enum SettingValue {
    Text(String),
    /// Shared by reference across copies
    Object(Arc<dyn Any + Send + Sync>),
}

impl SettingValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            SettingValue::Text(s) => Some(s),
            SettingValue::Object(_) => None,
        }
    }
}

impl PartialEq for SettingValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (SettingValue::Text(a), SettingValue::Text(b)) => a == b,
            (SettingValue::Object(a), SettingValue::Object(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingValue::Text(s) => write!(f, "{s:?}"),
            SettingValue::Object(_) => write!(f, "<object>"),
        }
    }
}

/// Read access plus typed accessors
///
/// Absent keys yield the supplied default. Present but unparseable
/// values are an [`SextantError::IllegalArgument`].
pub trait SettingsSource {
    fn get_value(&self, key: &str) -> Option<SettingValue>;

    fn contains(&self, key: &str) -> bool {
        self.get_value(key).is_some()
    }

    /// Text value of `key`; object values are not text and yield `None`
    fn get_setting(&self, key: &str) -> Option<String> {
        match self.get_value(key)? {
            SettingValue::Text(s) => Some(s),
            SettingValue::Object(_) => None,
        }
    }

    fn get_setting_or(&self, key: &str, default: &str) -> String {
        self.get_setting(key).unwrap_or_else(|| default.to_string())
    }

    fn get_setting_as_int(&self, key: &str, default: i32) -> Result<i32> {
        parse_number(key, self.get_setting(key), default)
    }

    fn get_setting_as_long(&self, key: &str, default: i64) -> Result<i64> {
        parse_number(key, self.get_setting(key), default)
    }

    fn get_setting_as_double(&self, key: &str, default: f64) -> Result<f64> {
        parse_number(key, self.get_setting(key), default)
    }

    fn get_setting_as_float(&self, key: &str, default: f32) -> Result<f32> {
        parse_number(key, self.get_setting(key), default)
    }

    /// `true` (any case) is true, every other present value is false
    fn get_setting_as_bool(&self, key: &str, default: bool) -> bool {
        match self.get_setting(key) {
            Some(value) => value.eq_ignore_ascii_case("true"),
            None => default,
        }
    }

    fn get_setting_as_time_in_millis(&self, key: &str, default: i64) -> Result<i64> {
        match self.get_setting(key) {
            Some(value) => parse_time_in_millis(&value),
            None => Ok(default),
        }
    }

    fn get_setting_as_time_in_seconds(&self, key: &str, default: i64) -> Result<i64> {
        match self.get_setting(key) {
            Some(value) => parse_time_in_seconds(&value),
            None => Ok(default),
        }
    }

    fn get_setting_as_bytes(&self, key: &str, default: i64) -> Result<i64> {
        match self.get_setting(key) {
            Some(value) => parse_bytes(&value),
            None => Ok(default),
        }
    }

    /// Object value of `key` if it holds a `T`
    fn get_setting_as_object<T: Any + Send + Sync>(&self, key: &str) -> Option<Arc<T>>
    where
        Self: Sized,
    {
        match self.get_value(key)? {
            SettingValue::Object(obj) => obj.downcast::<T>().ok(),
            SettingValue::Text(_) => None,
        }
    }
}

fn parse_number<T>(key: &str, value: Option<String>, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: fmt::Display,
{
    match value {
        Some(value) => value.parse::<T>().map_err(|e| {
            SextantError::IllegalArgument(format!(
                "Setting [{key}] with value [{value}] is not a valid number: {e}"
            ))
        }),
        None => Ok(default),
    }
}

/// Settings grouped by the path segment after a prefix
pub type SettingGroups = BTreeMap<String, Settings>;

/// Concurrent settings store
///
/// Group extraction results are cached per prefix and dropped on any
/// mutation, so a group lookup always reflects the current keys.
#[derive(Default)]
pub struct Settings {
    values: RwLock<HashMap<String, SettingValue>>,
    groups: RwLock<HashMap<String, Arc<SettingGroups>>>,
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from text pairs
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        let settings = Self::new();
        for (key, value) in pairs {
            settings.set_setting(key, value);
        }
        settings
    }

    fn invalidate_groups(&self) {
        self.groups.write().clear();
    }

    pub fn set_setting(&self, key: impl Into<String>, value: impl Into<String>) -> &Self {
        self.values
            .write()
            .insert(key.into(), SettingValue::Text(value.into()));
        self.invalidate_groups();
        self
    }

    pub fn set_object_setting<T: Any + Send + Sync>(
        &self,
        key: impl Into<String>,
        value: T,
    ) -> &Self {
        self.set_value(key, SettingValue::Object(Arc::new(value)))
    }

    pub fn set_value(&self, key: impl Into<String>, value: SettingValue) -> &Self {
        self.values.write().insert(key.into(), value);
        self.invalidate_groups();
        self
    }

    pub fn set_boolean_setting(&self, key: impl Into<String>, value: bool) -> &Self {
        self.set_setting(key, value.to_string())
    }

    pub fn set_int_setting(&self, key: impl Into<String>, value: i32) -> &Self {
        self.set_setting(key, value.to_string())
    }

    pub fn set_long_setting(&self, key: impl Into<String>, value: i64) -> &Self {
        self.set_setting(key, value.to_string())
    }

    pub fn set_double_setting(&self, key: impl Into<String>, value: f64) -> &Self {
        self.set_setting(key, value.to_string())
    }

    /// Set `prefix.group.name` for each name/value pair, skipping `None`
    pub fn set_group_settings(
        &self,
        prefix: &str,
        group: &str,
        names: &[&str],
        values: &[Option<&str>],
    ) -> Result<&Self> {
        if names.len() != values.len() {
            return Err(SextantError::IllegalArgument(format!(
                "Group [{group}] has {} setting names but {} values",
                names.len(),
                values.len()
            )));
        }
        for (name, value) in names.iter().zip(values) {
            if let Some(value) = value {
                self.set_setting(format!("{prefix}.{group}.{name}"), *value);
            }
        }
        Ok(self)
    }

    pub fn remove_setting(&self, key: &str) -> Option<SettingValue> {
        let removed = self.values.write().remove(key);
        if removed.is_some() {
            self.invalidate_groups();
        }
        removed
    }

    /// Copy every entry of `other` into this store, overwriting
    pub fn add_settings(&self, other: &Settings) -> &Self {
        let entries: Vec<(String, SettingValue)> = other
            .values
            .read()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        self.values.write().extend(entries);
        self.invalidate_groups();
        self
    }

    /// Sorted keys
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.values.read().keys().cloned().collect();
        keys.sort();
        keys
    }

    pub fn len(&self) -> usize {
        self.values.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.read().is_empty()
    }

    /// Independent copy; object values stay shared
    pub fn copy(&self) -> Settings {
        Settings {
            values: RwLock::new(self.values.read().clone()),
            groups: RwLock::new(HashMap::new()),
        }
    }

    /// Split every key under `prefix.` into `group` and remaining key
    ///
    /// `sextant.converter.date.format` under prefix `sextant.converter`
    /// lands in group `date` as key `format`. A key under the prefix
    /// with no further `.` is an error.
    pub fn get_setting_groups(&self, prefix: &str) -> Result<Arc<SettingGroups>> {
        let prefix = if prefix.ends_with('.') {
            prefix.to_string()
        } else {
            format!("{prefix}.")
        };

        if let Some(cached) = self.groups.read().get(&prefix) {
            return Ok(Arc::clone(cached));
        }

        let mut groups = SettingGroups::new();
        {
            let values = self.values.read();
            for (key, value) in values.iter() {
                let Some(rest) = key.strip_prefix(&prefix) else {
                    continue;
                };
                let (group, name) = rest.split_once('.').ok_or_else(|| {
                    SextantError::IllegalArgument(format!(
                        "Failed to get setting group for [{prefix}] setting prefix and setting \
                         [{key}] because of a missing '.'"
                    ))
                })?;
                groups
                    .entry(group.to_string())
                    .or_default()
                    .values
                    .get_mut()
                    .insert(name.to_string(), value.clone());
            }
        }

        let groups = Arc::new(groups);
        self.groups.write().insert(prefix, Arc::clone(&groups));
        Ok(groups)
    }

    /// Resolve the named product of `key` through `factories`
    ///
    /// The factory receives these settings. Returns `None` when the key
    /// is absent.
    pub fn get_setting_as_instance<T: ?Sized>(
        &self,
        key: &str,
        factories: &FactoryRegistry<T>,
    ) -> Result<Option<Box<T>>> {
        match self.get_setting(key) {
            Some(name) => factories.create(&name, self).map(Some),
            None => Ok(None),
        }
    }

    /// Like [`Settings::get_setting_as_instance`] with a fallback name
    pub fn get_setting_as_instance_or<T: ?Sized>(
        &self,
        key: &str,
        default: &str,
        factories: &FactoryRegistry<T>,
    ) -> Result<Box<T>> {
        let name = self.get_setting_or(key, default);
        factories.create(&name, self)
    }

    /// Text settings as a sorted map, objects rendered as `<object>`
    pub fn to_map(&self) -> BTreeMap<String, String> {
        self.values
            .read()
            .iter()
            .map(|(k, v)| {
                let text = match v {
                    SettingValue::Text(s) => s.clone(),
                    SettingValue::Object(_) => "<object>".to_string(),
                };
                (k.clone(), text)
            })
            .collect()
    }
}

impl SettingsSource for Settings {
    fn get_value(&self, key: &str) -> Option<SettingValue> {
        self.values.read().get(key).cloned()
    }
}

impl Clone for Settings {
    fn clone(&self) -> Self {
        self.copy()
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let values = self.values.read();
        let sorted: BTreeMap<&String, &SettingValue> = values.iter().collect();
        f.debug_map().entries(sorted).finish()
    }
}
