use super::ProcessContext;
use crate::core::error::{Result, SextantError};
use crate::core::mapping::{MappingTree, SubIndexHash};

/// Default every root candidate to a constant sub-index named after its alias
pub(super) fn process(mut tree: MappingTree, _ctx: &ProcessContext<'_>) -> Result<MappingTree> {
    for mapping in tree.aliases_mut() {
        match &mapping.sub_index_hash {
            Some(SubIndexHash::Constant { sub_index }) if sub_index.trim().is_empty() => {
                return Err(SextantError::Mapping(format!(
                    "Alias [{}] defines an empty constant sub index",
                    mapping.alias
                )));
            }
            Some(SubIndexHash::Modulo { prefix, size })
                if prefix.trim().is_empty() || *size == 0 =>
            {
                return Err(SextantError::Mapping(format!(
                    "Alias [{}] defines a modulo sub index hash without a prefix or size",
                    mapping.alias
                )));
            }
            Some(_) => {}
            None if mapping.can_be_root() => {
                mapping.sub_index_hash = Some(SubIndexHash::Constant {
                    sub_index: mapping.alias.clone(),
                });
            }
            None => {}
        }
    }
    Ok(tree)
}
