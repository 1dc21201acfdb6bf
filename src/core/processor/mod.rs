//! Ordered mapping processor chain.
//!
//! A raw [`MappingTree`] is turned into a resolved one by running it
//! once through [`STANDARD_STAGES`]. Each stage consumes the tree and
//! returns the transformed tree; the first error aborts the chain.
//! Order encodes data dependencies (converters are bound before late
//! binding copies leaves, roots are known before uids are assigned).

mod accessor;
mod cascade;
mod collection;
mod converter;
mod dynamic;
mod extends;
mod finalize;
mod internal_id;
mod json_binding;
mod late_attributes;
mod null_value;
mod object_binding;
mod post_process;
mod reference;
mod root;
mod sub_index;
mod uid;
mod validator;
mod xml_binding;

#[cfg(test)]
pub(crate) mod test_support;

use crate::core::converter::ConverterLookup;
use crate::core::error::Result;
use crate::core::mapping::{AliasMapping, FieldMapping, Mapping, MappingTree};
use crate::core::metadata::MetaDataLookup;
use crate::core::naming::NamingStrategy;
use crate::core::settings::Settings;
use std::sync::Arc;
use std::time::Instant;

/// Collaborators every stage may consult
pub struct ProcessContext<'a> {
    pub naming: &'a dyn NamingStrategy,
    pub converters: &'a dyn ConverterLookup,
    pub settings: &'a Settings,
    pub lookup: &'a MetaDataLookup,
    pub hooks: &'a [Arc<dyn MappingHook>],
}

/// User extension run by the `post-process` stage for every alias
pub trait MappingHook: Send + Sync {
    fn post_process(&self, mapping: &mut AliasMapping, settings: &Settings) -> Result<()>;
}

pub type StageFn = fn(MappingTree, &ProcessContext<'_>) -> Result<MappingTree>;

/// A named transformation pass
#[derive(Clone, Copy)]
pub struct Stage {
    pub name: &'static str,
    pub run: StageFn,
}

impl std::fmt::Debug for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name)
    }
}

/// The fixed stage order of every configuration build
pub const STANDARD_STAGES: [Stage; 20] = [
    Stage { name: "sub-index-hash", run: sub_index::process },
    Stage { name: "resolve-extends", run: extends::process },
    Stage { name: "property-accessor", run: accessor::process },
    Stage { name: "null-value", run: null_value::process },
    Stage { name: "dynamic-meta-data", run: dynamic::process },
    Stage { name: "resolve-ref-alias", run: reference::process },
    Stage { name: "collection", run: collection::process },
    Stage { name: "late-attributes-pre", run: late_attributes::process_pre },
    Stage { name: "converter-lookup", run: converter::process },
    Stage { name: "late-binding-object", run: object_binding::process },
    Stage { name: "late-binding-xml", run: xml_binding::process },
    Stage { name: "late-binding-json", run: json_binding::process },
    Stage { name: "resolve-cascade", run: cascade::process },
    Stage { name: "internal-id", run: internal_id::process },
    Stage { name: "post-process", run: post_process::process },
    Stage { name: "root-alias", run: root::process },
    Stage { name: "finalize", run: finalize::process },
    Stage { name: "late-attributes-post", run: late_attributes::process_post },
    Stage { name: "uid", run: uid::process },
    Stage { name: "validator", run: validator::process },
];

#[derive(Debug, Clone)]
pub struct ProcessorChain {
    stages: Vec<Stage>,
}

impl ProcessorChain {
    pub fn new(stages: Vec<Stage>) -> Self {
        Self { stages }
    }

    pub fn standard() -> Self {
        Self::new(STANDARD_STAGES.to_vec())
    }

    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|s| s.name).collect()
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Run every stage in order
    pub fn process(&self, tree: MappingTree, ctx: &ProcessContext<'_>) -> Result<MappingTree> {
        let start = Instant::now();
        tracing::debug!(
            "Processing {} aliases through {} stages",
            tree.len(),
            self.stages.len()
        );

        let mut tree = tree;
        for stage in &self.stages {
            let stage_start = Instant::now();
            tree = (stage.run)(tree, ctx).map_err(|e| {
                tracing::warn!("Stage [{}] failed: {}", stage.name, e);
                e
            })?;
            tracing::debug!(
                "Stage [{}] done in {}us",
                stage.name,
                stage_start.elapsed().as_micros()
            );
        }

        tracing::debug!(
            "Mapping chain complete: {} aliases in {}ms",
            tree.len(),
            start.elapsed().as_millis()
        );
        Ok(tree)
    }
}

impl Default for ProcessorChain {
    fn default() -> Self {
        Self::standard()
    }
}

/// Visit every node below `children`, descending into collection
/// elements and nested JSON objects
pub(crate) fn try_for_each_mapping(
    children: &mut [Mapping],
    f: &mut dyn FnMut(&mut Mapping) -> Result<()>,
) -> Result<()> {
    for child in children {
        f(child)?;
        match child {
            Mapping::Collection(collection) => {
                try_for_each_mapping(std::slice::from_mut(collection.element.as_mut()), f)?
            }
            Mapping::JsonObject(object) => try_for_each_mapping(&mut object.children, f)?,
            _ => {}
        }
    }
    Ok(())
}

/// Fallible visit of every leaf of an alias; stops at the first error
pub(crate) fn try_for_each_field(
    mapping: &mut AliasMapping,
    f: &mut dyn FnMut(&mut FieldMapping) -> Result<()>,
) -> Result<()> {
    let mut outcome = Ok(());
    mapping.for_each_field_mut(&mut |field| {
        if outcome.is_ok() {
            outcome = f(field);
        }
    });
    outcome
}
