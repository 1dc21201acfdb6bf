use super::ProcessContext;
use crate::core::error::{Result, SextantError};
use crate::core::mapping::{AliasKind, Mapping, MappingTree};
use crate::core::metadata::MetaDataLookup;
use std::collections::HashMap;

/// Resolve the target aliases of components and references
///
/// Placeholders go through the metadata lookup. When no alias is given
/// the declared `ref_class` is looked up among class mappings. Every
/// target must be a class alias.
pub(super) fn process(mut tree: MappingTree, ctx: &ProcessContext<'_>) -> Result<MappingTree> {
    let kinds: HashMap<String, AliasKind> = tree
        .aliases()
        .iter()
        .map(|m| (m.alias.clone(), m.kind.clone()))
        .collect();
    let by_class: HashMap<String, String> = tree
        .aliases()
        .iter()
        .filter_map(|m| Some((m.kind.class_name()?.to_string(), m.alias.clone())))
        .collect();
    let targets = Targets {
        kinds: &kinds,
        by_class: &by_class,
        lookup: ctx.lookup,
    };

    for mapping in tree.aliases_mut() {
        for child in &mut mapping.children {
            resolve(child, &mapping.alias, &targets)?;
        }
    }
    Ok(tree)
}

struct Targets<'a> {
    kinds: &'a HashMap<String, AliasKind>,
    by_class: &'a HashMap<String, String>,
    lookup: &'a MetaDataLookup,
}

fn resolve(child: &mut Mapping, owner: &str, targets: &Targets<'_>) -> Result<()> {
    let (name, ref_alias, ref_class) = match child {
        Mapping::Component(m) => (&m.name, &mut m.ref_alias, &m.ref_class),
        Mapping::Reference(m) => (&m.name, &mut m.ref_alias, &m.ref_class),
        Mapping::Collection(m) => return resolve(m.element.as_mut(), owner, targets),
        _ => return Ok(()),
    };

    let mut resolved = Vec::with_capacity(ref_alias.len().max(1));
    for alias in ref_alias.iter() {
        if let Some(alias) = targets.lookup.lookup_alias_name(alias)? {
            resolved.push(alias);
        }
    }
    if resolved.is_empty() {
        let class_name = ref_class.as_deref().ok_or_else(|| {
            SextantError::Mapping(format!(
                "Mapping [{name}] in alias [{owner}] must define a ref alias or a ref class"
            ))
        })?;
        let alias = targets.by_class.get(class_name).ok_or_else(|| {
            SextantError::Mapping(format!(
                "Mapping [{name}] in alias [{owner}] references unmapped class [{class_name}]"
            ))
        })?;
        resolved.push(alias.clone());
    }

    for alias in &resolved {
        match targets.kinds.get(alias) {
            Some(AliasKind::Class { .. }) => {}
            Some(kind) => {
                return Err(SextantError::Mapping(format!(
                    "Mapping [{name}] in alias [{owner}] references [{alias}] which is a {} mapping, not a class mapping",
                    kind.label()
                )));
            }
            None => {
                return Err(SextantError::Mapping(format!(
                    "Mapping [{name}] in alias [{owner}] references unknown alias [{alias}]"
                )));
            }
        }
    }
    *ref_alias = resolved;
    Ok(())
}
