use super::ProcessContext;
use crate::core::error::{Result, SextantError};
use crate::core::mapping::{
    AliasKind, ConstantMapping, DynamicMetaDataMapping, FieldMapping, Mapping, MappingTree,
};
use crate::core::naming::NamingStrategy;

const CONTENT_NAME: &str = "$json";

/// Late binding of json-object aliases
///
/// Nested objects give their properties dotted full names from the
/// document root; leaf paths follow the full name.
pub(super) fn process(mut tree: MappingTree, ctx: &ProcessContext<'_>) -> Result<MappingTree> {
    for mapping in tree.aliases_mut() {
        if !matches!(mapping.kind, AliasKind::JsonObject) {
            continue;
        }
        let root = ctx.naming.root_path(&mapping.alias);
        bind_children(&mut mapping.children, None, &root, &mapping.alias, ctx.naming)?;
    }
    Ok(tree)
}

fn bind_children(
    children: &mut [Mapping],
    parent: Option<&str>,
    root: &str,
    alias: &str,
    naming: &dyn NamingStrategy,
) -> Result<()> {
    for child in children {
        match child {
            Mapping::JsonId(json) | Mapping::JsonProperty(json) => {
                require_name(&json.field.name, alias)?;
                let full_name = join_name(parent, &json.field.name);
                assign(&mut json.field, root, &full_name, naming);
                json.full_name = Some(full_name);
            }
            Mapping::JsonObject(object) => {
                require_name(&object.name, alias)?;
                let full_name = join_name(parent, &object.name);
                bind_children(&mut object.children, Some(&full_name), root, alias, naming)?;
                object.full_name = Some(full_name);
            }
            Mapping::JsonContent(field) => {
                if field.name.is_empty() {
                    field.name = CONTENT_NAME.to_string();
                }
                let full_name = join_name(parent, &field.name);
                assign(field, root, &full_name, naming);
            }
            Mapping::Constant(ConstantMapping { field, .. })
            | Mapping::DynamicMetaData(DynamicMetaDataMapping { field, .. }) => {
                let full_name = join_name(parent, &field.name);
                assign(field, root, &full_name, naming);
            }
            _ => {}
        }
    }
    Ok(())
}

fn require_name(name: &str, alias: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(SextantError::Mapping(format!(
            "Json property in alias [{alias}] must define a name"
        )));
    }
    Ok(())
}

fn join_name(parent: Option<&str>, name: &str) -> String {
    match parent {
        Some(parent) => format!("{parent}.{name}"),
        None => name.to_string(),
    }
}

fn assign(field: &mut FieldMapping, root: &str, full_name: &str, naming: &dyn NamingStrategy) {
    if field.path.is_none() {
        field.path = Some(naming.build_path(root, full_name));
    }
}
