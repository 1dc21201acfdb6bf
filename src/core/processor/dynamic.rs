use super::{try_for_each_mapping, ProcessContext};
use crate::core::converter::DYNAMIC;
use crate::core::error::{Result, SextantError};
use crate::core::mapping::{Mapping, MappingTree};

const DEFAULT_LANG: &str = "jexl";

/// Validate dynamic metadata and give it the expression converter
pub(super) fn process(mut tree: MappingTree, _ctx: &ProcessContext<'_>) -> Result<MappingTree> {
    for mapping in tree.aliases_mut() {
        let alias = mapping.alias.clone();
        try_for_each_mapping(&mut mapping.children, &mut |child| {
            let Mapping::DynamicMetaData(dynamic) = child else {
                return Ok(());
            };
            if dynamic.field.name.trim().is_empty() {
                return Err(SextantError::Mapping(format!(
                    "Dynamic meta data in alias [{alias}] must define a name"
                )));
            }
            if dynamic.expression.trim().is_empty() {
                return Err(SextantError::Mapping(format!(
                    "Dynamic meta data [{}] in alias [{alias}] must define an expression",
                    dynamic.field.name
                )));
            }
            if dynamic.lang.is_none() {
                dynamic.lang = Some(DEFAULT_LANG.to_string());
            }
            if dynamic.field.converter.is_none() {
                dynamic.field.converter = Some(DYNAMIC.to_string());
            }
            Ok(())
        })?;
    }
    Ok(tree)
}
