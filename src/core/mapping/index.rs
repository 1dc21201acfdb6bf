//! Lookup tables over a finalized mapping tree.

use crate::core::mapping::{AliasMapping, MappingTree};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MappingIndex {
    /// Class name -> alias
    pub by_class: BTreeMap<String, String>,
    /// Index path -> aliases whose leaves write it
    pub by_path: BTreeMap<String, Vec<String>>,
    /// Root aliases in registration order
    pub roots: Vec<String>,
    /// Sub-index -> root aliases stored in it
    pub by_sub_index: BTreeMap<String, Vec<String>>,
}

impl MappingIndex {
    pub fn build(tree: &MappingTree) -> Self {
        let mut index = Self::default();
        for mapping in tree.aliases() {
            index.add(mapping);
        }
        index
    }

    fn add(&mut self, mapping: &AliasMapping) {
        if let Some(class_name) = mapping.kind.class_name() {
            self.by_class
                .entry(class_name.to_string())
                .or_insert_with(|| mapping.alias.clone());
        }

        let mut paths = Vec::new();
        mapping.for_each_field(&mut |field| {
            if let Some(path) = &field.path {
                paths.push(path.clone());
            }
        });
        for path in paths {
            let aliases = self.by_path.entry(path).or_default();
            if !aliases.contains(&mapping.alias) {
                aliases.push(mapping.alias.clone());
            }
        }

        if mapping.is_root {
            self.roots.push(mapping.alias.clone());
            if let Some(hash) = &mapping.sub_index_hash {
                for sub_index in hash.sub_indexes() {
                    self.by_sub_index
                        .entry(sub_index)
                        .or_default()
                        .push(mapping.alias.clone());
                }
            }
        }
    }

    pub fn alias_for_class(&self, class_name: &str) -> Option<&str> {
        self.by_class.get(class_name).map(String::as_str)
    }

    pub fn aliases_for_path(&self, path: &str) -> &[String] {
        self.by_path.get(path).map(Vec::as_slice).unwrap_or(&[])
    }
}
