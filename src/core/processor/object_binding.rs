//! Late binding of class and resource aliases.
//!
//! Leaf paths come from the naming strategy. Components are expanded in
//! place: the referenced alias's children are copied under the
//! component, prefixed, down to the configured depth.

use super::ProcessContext;
use crate::core::error::Result;
use crate::core::mapping::{AliasKind, FieldMapping, Mapping, MappingTree};
use crate::core::naming::NamingStrategy;
use crate::core::settings::{keys, SettingsSource};

struct Binder<'a> {
    snapshot: &'a MappingTree,
    naming: &'a dyn NamingStrategy,
}

pub(super) fn process(mut tree: MappingTree, ctx: &ProcessContext<'_>) -> Result<MappingTree> {
    let max_depth = ctx
        .settings
        .get_setting_as_int(keys::COMPONENT_MAX_DEPTH, keys::DEFAULT_COMPONENT_MAX_DEPTH)?
        .max(0) as u32;
    let snapshot = tree.clone();
    let binder = Binder {
        snapshot: &snapshot,
        naming: ctx.naming,
    };

    for mapping in tree.aliases_mut() {
        match &mapping.kind {
            AliasKind::Class { poly, .. } => {
                if *poly {
                    mapping.poly_class_path = Some(format!("$/{}/class", mapping.alias));
                }
            }
            AliasKind::Resource => {}
            _ => continue,
        }
        let root = ctx.naming.root_path(&mapping.alias);
        binder.bind_children(&mut mapping.children, &root, "", 0, max_depth);
    }
    Ok(tree)
}

impl Binder<'_> {
    fn bind_children(
        &self,
        children: &mut [Mapping],
        root: &str,
        prefix: &str,
        depth: u32,
        limit: u32,
    ) {
        for child in children {
            match child {
                Mapping::Id(property) | Mapping::Property(property) => {
                    for meta_data in &mut property.meta_data {
                        self.assign(meta_data, root, prefix);
                    }
                }
                Mapping::Constant(constant) => self.assign(&mut constant.field, root, prefix),
                Mapping::DynamicMetaData(dynamic) => self.assign(&mut dynamic.field, root, prefix),
                Mapping::ResourceId(field) | Mapping::ResourceProperty(field) => {
                    self.assign(field, root, prefix)
                }
                Mapping::Collection(collection) => self.bind_children(
                    std::slice::from_mut(collection.element.as_mut()),
                    root,
                    prefix,
                    depth,
                    limit,
                ),
                Mapping::Component(component) => {
                    let limit = component.max_depth.unwrap_or(limit);
                    if depth >= limit {
                        tracing::debug!(
                            "Component [{}] not expanded past depth {}",
                            component.name,
                            limit
                        );
                        component.inlined.clear();
                        continue;
                    }
                    let Some(target) = component
                        .ref_alias
                        .first()
                        .and_then(|alias| self.snapshot.get(alias))
                    else {
                        continue;
                    };
                    let nested_prefix =
                        format!("{prefix}{}", component.prefix.as_deref().unwrap_or_default());
                    let mut inlined = target.children.clone();
                    self.bind_children(&mut inlined, root, &nested_prefix, depth + 1, limit);
                    component.inlined = inlined;
                }
                _ => {}
            }
        }
    }

    fn assign(&self, field: &mut FieldMapping, root: &str, prefix: &str) {
        if field.path.is_none() {
            let name = format!("{prefix}{}", field.name);
            field.path = Some(self.naming.build_path(root, &name));
        }
    }
}
