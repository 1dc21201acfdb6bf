use super::ProcessContext;
use crate::core::error::Result;
use crate::core::mapping::{Mapping, MappingTree};

/// Record id names, then run registered hooks on every alias
pub(super) fn process(mut tree: MappingTree, ctx: &ProcessContext<'_>) -> Result<MappingTree> {
    for mapping in tree.aliases_mut() {
        mapping.id_names = mapping
            .children
            .iter()
            .filter(|c| c.is_id())
            .map(|c| Mapping::name(c).to_string())
            .collect();
        for hook in ctx.hooks {
            hook.post_process(mapping, ctx.settings)?;
        }
    }
    Ok(tree)
}
