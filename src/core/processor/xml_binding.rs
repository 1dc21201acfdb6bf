use super::ProcessContext;
use crate::core::error::{Result, SextantError};
use crate::core::mapping::{
    AliasKind, ConstantMapping, DynamicMetaDataMapping, Mapping, MappingTree,
};
use once_cell::sync::Lazy;
use regex::Regex;

const CONTENT_NAME: &str = "$xml";

// Predicates may contain '/' themselves, so they go before splitting
static PREDICATE_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[[^\]]*\]").unwrap());

/// Late binding of xml-object aliases
///
/// Every xml id and property needs an xpath; an unnamed one takes the
/// last step of its xpath as its name. Constants and dynamic meta data
/// are bound by name.
pub(super) fn process(mut tree: MappingTree, ctx: &ProcessContext<'_>) -> Result<MappingTree> {
    for mapping in tree.aliases_mut() {
        if !matches!(mapping.kind, AliasKind::XmlObject { .. }) {
            continue;
        }
        let root = ctx.naming.root_path(&mapping.alias);
        for child in &mut mapping.children {
            match child {
                Mapping::XmlId(xml) | Mapping::XmlProperty(xml) => {
                    if xml.xpath.trim().is_empty() {
                        return Err(SextantError::Mapping(format!(
                            "Xml property [{}] in alias [{}] must define an xpath",
                            xml.field.name, mapping.alias
                        )));
                    }
                    if xml.field.name.is_empty() {
                        xml.field.name = name_from_xpath(&xml.xpath).ok_or_else(|| {
                            SextantError::Mapping(format!(
                                "Can not derive a name from xpath [{}] in alias [{}]",
                                xml.xpath, mapping.alias
                            ))
                        })?;
                    }
                    if xml.field.path.is_none() {
                        xml.field.path = Some(ctx.naming.build_path(&root, &xml.field.name));
                    }
                }
                Mapping::XmlContent(field) => {
                    if field.name.is_empty() {
                        field.name = CONTENT_NAME.to_string();
                    }
                    if field.path.is_none() {
                        field.path = Some(ctx.naming.build_path(&root, &field.name));
                    }
                }
                Mapping::Constant(ConstantMapping { field, .. })
                | Mapping::DynamicMetaData(DynamicMetaDataMapping { field, .. }) => {
                    if field.path.is_none() {
                        field.path = Some(ctx.naming.build_path(&root, &field.name));
                    }
                }
                _ => {}
            }
        }
    }
    Ok(tree)
}

/// `/order/item/@sku` -> `sku`, `/order/total/text()` -> `total`
fn name_from_xpath(xpath: &str) -> Option<String> {
    let stripped = PREDICATE_PATTERN.replace_all(xpath, "");
    let steps: Vec<&str> = stripped
        .split('/')
        .map(str::trim)
        .filter(|s| !s.is_empty() && !s.ends_with("()") && *s != "." && *s != "..")
        .collect();
    let last = steps.last()?;
    let name = last.trim_start_matches('@');
    let name = name.rsplit(':').next().unwrap_or(name);
    (!name.is_empty() && name != "*").then(|| name.to_string())
}
