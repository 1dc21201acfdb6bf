//! Named metadata groups and `${group.id}` placeholder lookup.
//!
//! A [`MetaDataGroup`] bundles reusable [`Alias`] and [`MetaData`]
//! definitions. Groups are registered once per configuration and are
//! read-only for the rest of a build.

mod lookup;

pub use lookup::{is_placeholder, MetaDataLookup};

use crate::core::error::{Result, SextantError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A reusable alias name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alias {
    pub id: String,
    #[serde(default)]
    pub group_id: String,
    /// Canonical alias name mappings are registered under
    pub name: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl Alias {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            group_id: String::new(),
            name: name.into(),
            display_name: None,
            description: None,
        }
    }
}

/// A reusable index field definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaData {
    pub id: String,
    #[serde(default)]
    pub group_id: String,
    /// Canonical field name
    pub name: String,
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Literal values addressable as `${group.metadata.valueId}`
    #[serde(default)]
    pub values: BTreeMap<String, String>,
}

impl MetaData {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            group_id: String::new(),
            name: name.into(),
            format: None,
            display_name: None,
            description: None,
            values: BTreeMap::new(),
        }
    }

    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    pub fn with_value(mut self, id: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(id.into(), value.into());
        self
    }

    pub fn value(&self, id: &str) -> Option<&str> {
        self.values.get(id).map(String::as_str)
    }
}

/// Named collection of aliases and metadata; ids unique within the group
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetaDataGroup {
    pub id: String,
    pub display_name: Option<String>,
    pub description: Option<String>,
    aliases: BTreeMap<String, Alias>,
    meta_data: BTreeMap<String, MetaData>,
}

impl MetaDataGroup {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: None,
            description: None,
            aliases: BTreeMap::new(),
            meta_data: BTreeMap::new(),
        }
    }

    /// Add an alias, stamping it with this group's id
    pub fn add_alias(&mut self, mut alias: Alias) -> Result<()> {
        if self.aliases.contains_key(&alias.id) {
            return Err(SextantError::Configuration(format!(
                "Alias [{}] is defined twice in group [{}]",
                alias.id, self.id
            )));
        }
        alias.group_id = self.id.clone();
        self.aliases.insert(alias.id.clone(), alias);
        Ok(())
    }

    /// Add a metadata definition, stamping it with this group's id
    pub fn add_meta_data(&mut self, mut meta_data: MetaData) -> Result<()> {
        if self.meta_data.contains_key(&meta_data.id) {
            return Err(SextantError::Configuration(format!(
                "Meta data [{}] is defined twice in group [{}]",
                meta_data.id, self.id
            )));
        }
        meta_data.group_id = self.id.clone();
        self.meta_data.insert(meta_data.id.clone(), meta_data);
        Ok(())
    }

    pub fn alias(&self, id: &str) -> Option<&Alias> {
        self.aliases.get(id)
    }

    pub fn meta_data(&self, id: &str) -> Option<&MetaData> {
        self.meta_data.get(id)
    }

    pub fn aliases(&self) -> impl Iterator<Item = &Alias> {
        self.aliases.values()
    }

    pub fn meta_datas(&self) -> impl Iterator<Item = &MetaData> {
        self.meta_data.values()
    }
}
