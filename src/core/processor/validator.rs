//! Final structural checks over the resolved tree.

use super::ProcessContext;
use crate::core::error::{Result, SextantError};
use crate::core::mapping::{AliasMapping, Mapping, MappingTree};
use std::collections::{BTreeMap, HashSet};

pub(super) fn process(tree: MappingTree, _ctx: &ProcessContext<'_>) -> Result<MappingTree> {
    let roots: HashSet<&str> = tree.root_mappings().map(|m| m.alias.as_str()).collect();
    for mapping in tree.aliases() {
        check_names(mapping)?;
        check_references(mapping, &roots)?;
        if mapping.is_root {
            check_root(mapping)?;
        }
    }
    Ok(tree)
}

fn check_names(mapping: &AliasMapping) -> Result<()> {
    check_sibling_names(&mapping.children, &mapping.alias)
}

/// Names are unique among siblings, at every json object level
fn check_sibling_names(siblings: &[Mapping], alias: &str) -> Result<()> {
    let mut by_name: BTreeMap<&str, Vec<&Mapping>> = BTreeMap::new();
    for child in siblings {
        if child.name().trim().is_empty() {
            return Err(SextantError::Mapping(format!(
                "A {} mapping in alias [{alias}] has no name",
                child.kind_label()
            )));
        }
        by_name.entry(child.name()).or_default().push(child);
        if let Mapping::JsonObject(object) = child {
            check_sibling_names(&object.children, alias)?;
        }
    }
    for (name, children) in by_name {
        let plain = children.iter().filter(|c| !c.override_by_name()).count();
        if plain > 1 {
            return Err(SextantError::Mapping(format!(
                "Alias [{alias}] maps [{name}] {} times; mark overrides with override_by_name",
                children.len()
            )));
        }
    }
    Ok(())
}

fn check_references(mapping: &AliasMapping, roots: &HashSet<&str>) -> Result<()> {
    for child in &mapping.children {
        let reference = match child {
            Mapping::Reference(reference) => reference,
            Mapping::Collection(collection) => match collection.element.as_ref() {
                Mapping::Reference(reference) => reference,
                _ => continue,
            },
            _ => continue,
        };
        if let Some(target) = reference.ref_alias.iter().find(|a| !roots.contains(a.as_str())) {
            return Err(SextantError::Mapping(format!(
                "Reference [{}] in alias [{}] points to [{target}] which is not a root mapping",
                reference.name, mapping.alias
            )));
        }
    }
    Ok(())
}

fn check_root(mapping: &AliasMapping) -> Result<()> {
    if mapping.id_names.is_empty() {
        return Err(SextantError::Mapping(format!(
            "Root mapping [{}] must define at least one id",
            mapping.alias
        )));
    }
    if mapping.uid_path.is_none() {
        return Err(SextantError::Mapping(format!(
            "Root mapping [{}] has no uid path",
            mapping.alias
        )));
    }

    let mut problem = None;
    mapping.for_each_field(&mut |field| {
        if problem.is_some() {
            return;
        }
        if field.path.is_none() {
            problem = Some(format!("[{}] has no index path", field.name));
        } else if field.bound.is_none() {
            problem = Some(format!("[{}] has no converter", field.name));
        }
    });
    match problem {
        Some(problem) => Err(SextantError::Mapping(format!(
            "Root mapping [{}]: {problem}",
            mapping.alias
        ))),
        None => Ok(()),
    }
}
