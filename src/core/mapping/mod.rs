//! Mapping tree: one [`AliasMapping`] per registered alias.
//!
//! The tree is mutable while a configuration is assembled. A build
//! works on a copy, threads it through the processor chain and freezes
//! the result behind an `Arc`.

mod index;
mod node;

pub use index::MappingIndex;
pub use node::{
    Accessor, AccessorStrategy, BoundConverter, Cascade, ClassPropertyMapping, CollectionKind,
    CollectionMapping, ComponentMapping, ConstantMapping, DynamicMetaDataMapping, FieldMapping,
    IndexMode, JsonObjectMapping, JsonPropertyMapping, ManagedId, Mapping, NullValue,
    ParentMapping, ReferenceMapping, Store, XmlPropertyMapping,
};

use crate::core::error::{Result, SextantError};
use serde::{Deserialize, Serialize};

/// Which kind of document an alias maps
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AliasKind {
    Class {
        class_name: String,
        #[serde(default)]
        poly: bool,
    },
    /// Abstract set of children other aliases extend; never a root
    Contract,
    Resource,
    XmlObject {
        #[serde(default)]
        xpath: Option<String>,
    },
    JsonObject,
}

impl AliasKind {
    pub fn label(&self) -> &'static str {
        match self {
            AliasKind::Class { .. } => "class",
            AliasKind::Contract => "contract",
            AliasKind::Resource => "resource",
            AliasKind::XmlObject { .. } => "xml-object",
            AliasKind::JsonObject => "json-object",
        }
    }

    pub fn same_kind(&self, other: &AliasKind) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }

    pub fn class_name(&self) -> Option<&str> {
        match self {
            AliasKind::Class { class_name, .. } => Some(class_name),
            _ => None,
        }
    }
}

/// Sub-index partitioning of an alias's documents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum SubIndexHash {
    /// Every document goes to one named sub-index
    Constant { sub_index: String },
    /// Documents spread over `size` sub-indexes named `{prefix}_{n}`
    Modulo { prefix: String, size: u32 },
}

impl SubIndexHash {
    pub fn sub_indexes(&self) -> Vec<String> {
        match self {
            SubIndexHash::Constant { sub_index } => vec![sub_index.clone()],
            SubIndexHash::Modulo { prefix, size } => {
                (0..*size).map(|n| format!("{prefix}_{n}")).collect()
            }
        }
    }
}

/// Cascade operations collected from one component or reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CascadeBinding {
    pub property: String,
    pub target_aliases: Vec<String>,
    pub operations: Vec<Cascade>,
}

/// Mapping registered under one alias
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AliasMapping {
    pub alias: String,
    #[serde(flatten)]
    pub kind: AliasKind,
    #[serde(default)]
    pub extends: Vec<String>,
    #[serde(default)]
    pub sub_index_hash: Option<SubIndexHash>,
    /// Explicit root flag; resolved into `is_root`
    #[serde(default)]
    pub root: Option<bool>,
    #[serde(default)]
    pub boost: Option<f32>,
    #[serde(default)]
    pub analyzer: Option<String>,
    #[serde(default)]
    pub exclude_from_all: Option<bool>,
    #[serde(default)]
    pub children: Vec<Mapping>,

    #[serde(default, skip_deserializing)]
    pub is_root: bool,
    /// Every alias that extends this one, directly or not
    #[serde(default, skip_deserializing)]
    pub extending_aliases: Vec<String>,
    #[serde(default, skip_deserializing)]
    pub cascades: Vec<CascadeBinding>,
    #[serde(default, skip_deserializing)]
    pub id_names: Vec<String>,
    #[serde(default, skip_deserializing)]
    pub uid_path: Option<String>,
    /// Path of the stored concrete class name for polymorphic classes
    #[serde(default, skip_deserializing)]
    pub poly_class_path: Option<String>,
}

impl AliasMapping {
    pub fn new(alias: impl Into<String>, kind: AliasKind) -> Self {
        Self {
            alias: alias.into(),
            kind,
            extends: Vec::new(),
            sub_index_hash: None,
            root: None,
            boost: None,
            analyzer: None,
            exclude_from_all: None,
            children: Vec::new(),
            is_root: false,
            extending_aliases: Vec::new(),
            cascades: Vec::new(),
            id_names: Vec::new(),
            uid_path: None,
            poly_class_path: None,
        }
    }

    pub fn class(alias: impl Into<String>, class_name: impl Into<String>) -> Self {
        Self::new(
            alias,
            AliasKind::Class {
                class_name: class_name.into(),
                poly: false,
            },
        )
    }

    pub fn contract(alias: impl Into<String>) -> Self {
        Self::new(alias, AliasKind::Contract)
    }

    pub fn resource(alias: impl Into<String>) -> Self {
        Self::new(alias, AliasKind::Resource)
    }

    pub fn with_child(mut self, child: Mapping) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_extends(mut self, alias: impl Into<String>) -> Self {
        self.extends.push(alias.into());
        self
    }

    pub fn child(&self, name: &str) -> Option<&Mapping> {
        self.children.iter().find(|c| c.name() == name)
    }

    /// Whether the root stage may make this alias a root
    pub fn can_be_root(&self) -> bool {
        !matches!(self.kind, AliasKind::Contract) && self.root != Some(false)
    }

    pub fn for_each_field(&self, f: &mut dyn FnMut(&FieldMapping)) {
        for child in &self.children {
            child.for_each_field(f);
        }
    }

    pub fn for_each_field_mut(&mut self, f: &mut dyn FnMut(&mut FieldMapping)) {
        for child in &mut self.children {
            child.for_each_field_mut(f);
        }
    }
}

/// All alias mappings in registration order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MappingTree {
    aliases: Vec<AliasMapping>,
    #[serde(default, skip_deserializing)]
    index: Option<MappingIndex>,
}

impl MappingTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a mapping; aliases are unique
    pub fn add(&mut self, mapping: AliasMapping) -> Result<()> {
        if mapping.alias.trim().is_empty() {
            return Err(SextantError::Mapping(format!(
                "A {} mapping must define an alias",
                mapping.kind.label()
            )));
        }
        if self.contains(&mapping.alias) {
            return Err(SextantError::Mapping(format!(
                "Alias [{}] is already mapped",
                mapping.alias
            )));
        }
        self.aliases.push(mapping);
        self.index = None;
        Ok(())
    }

    pub fn contains(&self, alias: &str) -> bool {
        self.aliases.iter().any(|m| m.alias == alias)
    }

    pub fn get(&self, alias: &str) -> Option<&AliasMapping> {
        self.aliases.iter().find(|m| m.alias == alias)
    }

    pub fn get_mut(&mut self, alias: &str) -> Option<&mut AliasMapping> {
        self.aliases.iter_mut().find(|m| m.alias == alias)
    }

    pub fn aliases(&self) -> &[AliasMapping] {
        &self.aliases
    }

    pub fn aliases_mut(&mut self) -> &mut [AliasMapping] {
        &mut self.aliases
    }

    pub fn alias_names(&self) -> Vec<String> {
        self.aliases.iter().map(|m| m.alias.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }

    /// First class alias mapping `class_name`
    pub fn find_by_class(&self, class_name: &str) -> Option<&AliasMapping> {
        self.aliases
            .iter()
            .find(|m| m.kind.class_name() == Some(class_name))
    }

    /// Aliases resolved as roots
    pub fn root_mappings(&self) -> impl Iterator<Item = &AliasMapping> {
        self.aliases.iter().filter(|m| m.is_root)
    }

    /// Lookup index, present once the chain has finalized the tree
    pub fn index(&self) -> Option<&MappingIndex> {
        self.index.as_ref()
    }

    pub(crate) fn set_index(&mut self, index: MappingIndex) {
        self.index = Some(index);
    }
}
