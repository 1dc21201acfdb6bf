//! Placeholder resolution against registered metadata groups.
//!
//! `${group.alias}` resolves an alias, `${group.metadata}` a metadata
//! entry and `${group.metadata.valueId}` one of its literal values.
//! Anything not wrapped in `${...}` is already a literal.

use crate::core::error::{Result, SextantError};
use crate::core::metadata::{Alias, MetaData, MetaDataGroup};
use std::collections::BTreeMap;

/// `true` when `value` has the `${...}` placeholder shape
pub fn is_placeholder(value: &str) -> bool {
    placeholder_body(value).is_some()
}

fn placeholder_body(value: &str) -> Option<&str> {
    value.strip_prefix("${")?.strip_suffix('}')
}

/// Registry of metadata groups
#[derive(Debug, Clone, Default)]
pub struct MetaDataLookup {
    groups: BTreeMap<String, MetaDataGroup>,
}

impl MetaDataLookup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_group(&mut self, group: MetaDataGroup) -> Result<()> {
        if self.groups.contains_key(&group.id) {
            return Err(SextantError::Configuration(format!(
                "Meta data group [{}] is already registered",
                group.id
            )));
        }
        self.groups.insert(group.id.clone(), group);
        Ok(())
    }

    pub fn group(&self, id: &str) -> Option<&MetaDataGroup> {
        self.groups.get(id)
    }

    pub fn groups(&self) -> impl Iterator<Item = &MetaDataGroup> {
        self.groups.values()
    }

    /// Split a placeholder into its group and the id that follows
    ///
    /// Any further dotted suffix after the id is dropped.
    fn resolve_group<'a>(
        &self,
        value: &'a str,
        body: &'a str,
    ) -> Result<(&MetaDataGroup, &'a str)> {
        let (group_id, rest) = body.split_once('.').ok_or_else(|| {
            SextantError::Configuration(format!(
                "Failed to find '.' separating the group from the id in [{value}]"
            ))
        })?;
        let group = self.groups.get(group_id).ok_or_else(|| {
            SextantError::Configuration(format!(
                "Failed to find meta data group [{group_id}] in [{value}]"
            ))
        })?;
        let id = rest.split_once('.').map_or(rest, |(id, _)| id);
        Ok((group, id))
    }

    /// Resolve `${group.alias}`; `None` when `value` is not a placeholder
    pub fn lookup_alias(&self, value: &str) -> Result<Option<&Alias>> {
        let Some(body) = placeholder_body(value) else {
            return Ok(None);
        };
        let (group, alias_id) = self.resolve_group(value, body)?;
        group.alias(alias_id).map(Some).ok_or_else(|| {
            SextantError::Configuration(format!(
                "Failed to find alias [{alias_id}] in group [{}] for [{value}]",
                group.id
            ))
        })
    }

    /// Canonical alias name, or `value` itself when it is a literal
    pub fn lookup_alias_name(&self, value: &str) -> Result<Option<String>> {
        if value.is_empty() {
            return Ok(None);
        }
        Ok(Some(match self.lookup_alias(value)? {
            Some(alias) => alias.name.clone(),
            None => value.to_string(),
        }))
    }

    /// Resolve `${group.metadata}`; `None` when `value` is not a placeholder
    pub fn lookup_meta_data(&self, value: &str) -> Result<Option<&MetaData>> {
        let Some(body) = placeholder_body(value) else {
            return Ok(None);
        };
        let (group, meta_data_id) = self.resolve_group(value, body)?;
        group.meta_data(meta_data_id).map(Some).ok_or_else(|| {
            SextantError::Configuration(format!(
                "Failed to find meta data [{meta_data_id}] in group [{}] for [{value}]",
                group.id
            ))
        })
    }

    /// Canonical metadata name, or `value` itself when it is a literal
    pub fn lookup_meta_data_name(&self, value: &str) -> Result<Option<String>> {
        if value.is_empty() {
            return Ok(None);
        }
        Ok(Some(match self.lookup_meta_data(value)? {
            Some(meta_data) => meta_data.name.clone(),
            None => value.to_string(),
        }))
    }

    /// Metadata format; `None` for literals, unlike the name lookups
    pub fn lookup_meta_data_format(&self, value: &str) -> Result<Option<String>> {
        Ok(self
            .lookup_meta_data(value)?
            .and_then(|meta_data| meta_data.format.clone()))
    }

    /// Resolve `${group.metadata.valueId}` to the literal value
    ///
    /// Literals come back unchanged. The value id is the last dotted
    /// segment; a placeholder without one is a conversion error.
    pub fn lookup_meta_data_value(&self, value: &str) -> Result<Option<String>> {
        if value.is_empty() {
            return Ok(None);
        }
        let Some(meta_data) = self.lookup_meta_data(value)? else {
            return Ok(Some(value.to_string()));
        };
        let body = placeholder_body(value).unwrap_or(value);
        let value_id = body
            .split_once('.')
            .and_then(|(_, rest)| rest.rsplit_once('.'))
            .map(|(_, value_id)| value_id)
            .ok_or_else(|| {
                SextantError::Conversion(format!("Must define a value id for [{value}]"))
            })?;
        meta_data.value(value_id).map(|v| Some(v.to_string())).ok_or_else(|| {
            SextantError::Conversion(format!(
                "Meta data [{}] has no value [{value_id}] for [{value}]",
                meta_data.id
            ))
        })
    }
}
