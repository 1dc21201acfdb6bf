use super::ProcessContext;
use crate::core::error::{Result, SextantError};
use crate::core::mapping::{MappingIndex, MappingTree};

/// Check root invariants and build the lookup index
pub(super) fn process(mut tree: MappingTree, _ctx: &ProcessContext<'_>) -> Result<MappingTree> {
    for mapping in tree.root_mappings() {
        if mapping.sub_index_hash.is_none() {
            return Err(SextantError::Mapping(format!(
                "Root mapping [{}] has no sub index hash",
                mapping.alias
            )));
        }
    }

    let index = MappingIndex::build(&tree);
    for root in &index.roots {
        if let Some(class_name) = tree.get(root).and_then(|m| m.kind.class_name()) {
            if index.alias_for_class(class_name) != Some(root.as_str()) {
                tracing::warn!(
                    "Class [{}] is mapped by more than one alias, [{}] is not used for class lookups",
                    class_name,
                    root
                );
            }
        }
    }
    tree.set_index(index);
    Ok(tree)
}
