use super::ProcessContext;
use crate::core::error::Result;
use crate::core::mapping::{AliasKind, MappingTree};

/// Mark root aliases; contracts never are, an explicit flag wins otherwise
pub(super) fn process(mut tree: MappingTree, _ctx: &ProcessContext<'_>) -> Result<MappingTree> {
    for mapping in tree.aliases_mut() {
        if matches!(mapping.kind, AliasKind::Contract) && mapping.root == Some(true) {
            tracing::warn!("Contract [{}] can not be a root mapping", mapping.alias);
        }
        mapping.is_root = mapping.can_be_root();
    }
    Ok(tree)
}
