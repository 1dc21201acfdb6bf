use super::ProcessContext;
use crate::core::error::Result;
use crate::core::mapping::{Cascade, CascadeBinding, Mapping, MappingTree};

/// Collect cascade bindings from components and references
pub(super) fn process(mut tree: MappingTree, _ctx: &ProcessContext<'_>) -> Result<MappingTree> {
    for mapping in tree.aliases_mut() {
        let mut cascades = Vec::new();
        for child in &mapping.children {
            let (name, targets, requested) = match child {
                Mapping::Component(m) => (&m.name, &m.ref_alias, &m.cascade),
                Mapping::Reference(m) => (&m.name, &m.ref_alias, &m.cascade),
                _ => continue,
            };
            let operations = expand(requested);
            if operations.is_empty() {
                continue;
            }
            cascades.push(CascadeBinding {
                property: name.clone(),
                target_aliases: targets.clone(),
                operations,
            });
        }
        mapping.cascades = cascades;
    }
    Ok(tree)
}

/// `all` stands for every concrete operation
pub(crate) fn expand(requested: &[Cascade]) -> Vec<Cascade> {
    let mut operations: Vec<Cascade> = requested
        .iter()
        .flat_map(|op| match op {
            Cascade::All => vec![Cascade::Create, Cascade::Save, Cascade::Delete],
            other => vec![*other],
        })
        .collect();
    operations.sort();
    operations.dedup();
    operations
}
