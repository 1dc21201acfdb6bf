use super::ProcessContext;
use crate::core::error::Result;
use crate::core::mapping::{MappingTree, NullValue};
use crate::core::settings::{keys, SettingsSource};

/// Apply `sextant.mapping.nullvalue` to leaves that did not choose one
pub(super) fn process(mut tree: MappingTree, ctx: &ProcessContext<'_>) -> Result<MappingTree> {
    let Some(default) = ctx.settings.get_setting(keys::NULL_VALUE) else {
        return Ok(tree);
    };
    for mapping in tree.aliases_mut() {
        for child in mapping.children.iter_mut().filter(|c| !c.is_id()) {
            child.for_each_field_mut(&mut |field| {
                if field.null_value == NullValue::Unset {
                    field.null_value = NullValue::Value(default.clone());
                }
            });
        }
    }
    Ok(tree)
}
