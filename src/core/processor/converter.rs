use super::ProcessContext;
use crate::core::converter::STRING;
use crate::core::error::{Result, SextantError};
use crate::core::mapping::{BoundConverter, FieldMapping, Mapping, MappingTree};

/// Bind a converter to every leaf
///
/// A leaf naming a converter gets exactly that one. Otherwise the
/// leaf's value type, or the owning property's, picks the default for
/// that type, and anything left over is converted as a string.
pub(super) fn process(mut tree: MappingTree, ctx: &ProcessContext<'_>) -> Result<MappingTree> {
    for mapping in tree.aliases_mut() {
        for child in &mut mapping.children {
            bind_mapping(child, None, &mapping.alias, ctx)?;
        }
    }
    Ok(tree)
}

fn bind_mapping(
    mapping: &mut Mapping,
    owner_type: Option<&str>,
    alias: &str,
    ctx: &ProcessContext<'_>,
) -> Result<()> {
    match mapping {
        Mapping::Id(property) | Mapping::Property(property) => {
            let owner_type = property.value_type.as_deref().or(owner_type);
            for meta_data in &mut property.meta_data {
                bind(meta_data, owner_type, alias, ctx)?;
            }
        }
        Mapping::Collection(collection) => {
            bind_mapping(collection.element.as_mut(), owner_type, alias, ctx)?
        }
        Mapping::JsonObject(object) => {
            for child in &mut object.children {
                bind_mapping(child, None, alias, ctx)?;
            }
        }
        Mapping::Component(_) | Mapping::Reference(_) | Mapping::Parent(_) => {}
        Mapping::Constant(constant) => bind(&mut constant.field, None, alias, ctx)?,
        Mapping::DynamicMetaData(dynamic) => bind(&mut dynamic.field, None, alias, ctx)?,
        Mapping::ResourceId(field)
        | Mapping::ResourceProperty(field)
        | Mapping::XmlContent(field)
        | Mapping::JsonContent(field) => bind(field, None, alias, ctx)?,
        Mapping::XmlId(xml) | Mapping::XmlProperty(xml) => bind(&mut xml.field, None, alias, ctx)?,
        Mapping::JsonId(json) | Mapping::JsonProperty(json) => {
            bind(&mut json.field, None, alias, ctx)?
        }
    }
    Ok(())
}

fn bind(
    field: &mut FieldMapping,
    owner_type: Option<&str>,
    alias: &str,
    ctx: &ProcessContext<'_>,
) -> Result<()> {
    if field.bound.is_some() {
        return Ok(());
    }

    let name = match (&field.converter, field.value_type.as_deref().or(owner_type)) {
        (Some(name), _) => name.clone(),
        (None, Some(value_type)) => match ctx.converters.converter_name_for_type(value_type) {
            Some(name) => name,
            None => {
                tracing::debug!(
                    "No converter registered for type [{}] of [{}] in alias [{}], using [{}]",
                    value_type,
                    field.name,
                    alias,
                    STRING
                );
                STRING.to_string()
            }
        },
        (None, None) => STRING.to_string(),
    };

    let converter = ctx.converters.lookup_converter(&name).ok_or_else(|| {
        SextantError::Configuration(format!(
            "Failed to find converter [{name}] for [{}] in alias [{alias}]",
            field.name
        ))
    })?;
    field.bound = Some(BoundConverter::new(name, converter));
    Ok(())
}
