use super::ProcessContext;
use crate::core::error::Result;
use crate::core::mapping::{AliasKind, ClassPropertyMapping, ManagedId, Mapping, MappingTree};

/// Decide which class properties need a synthetic internal id
///
/// Ids always get a path to rebuild from: the first stored metadata
/// with a round-trip converter, or a synthetic `$/{alias}/{name}`.
/// Properties get the synthetic path when managed, or in `auto` mode
/// when no stored metadata could restore the value.
pub(super) fn process(mut tree: MappingTree, _ctx: &ProcessContext<'_>) -> Result<MappingTree> {
    for mapping in tree.aliases_mut() {
        if !matches!(mapping.kind, AliasKind::Class { .. }) {
            continue;
        }
        for child in &mut mapping.children {
            assign(child, &mapping.alias);
        }
    }
    Ok(tree)
}

fn assign(child: &mut Mapping, alias: &str) {
    match child {
        Mapping::Id(property) => {
            property.internal_id_path =
                restorable_path(property).or_else(|| Some(synthetic(alias, &property.name)));
        }
        Mapping::Property(property) => {
            let managed = match property.managed_id {
                ManagedId::True => true,
                ManagedId::False => false,
                ManagedId::Auto => restorable_path(property).is_none(),
            };
            property.internal_id_path = managed.then(|| synthetic(alias, &property.name));
        }
        Mapping::Collection(collection) => assign(collection.element.as_mut(), alias),
        _ => {}
    }
}

fn restorable_path(property: &ClassPropertyMapping) -> Option<String> {
    property
        .meta_data
        .iter()
        .filter(|md| md.is_stored())
        .filter(|md| md.bound.as_ref().map_or(true, |b| b.converter.round_trips()))
        .find_map(|md| md.path.clone())
}

fn synthetic(alias: &str, name: &str) -> String {
    format!("$/{alias}/{name}")
}
