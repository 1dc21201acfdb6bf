use super::ProcessContext;
use crate::core::error::Result;
use crate::core::mapping::MappingTree;
use crate::core::settings::{keys, SettingsSource};

/// Give every root the path of its unique document id
pub(super) fn process(mut tree: MappingTree, ctx: &ProcessContext<'_>) -> Result<MappingTree> {
    let uid_path = ctx.settings.get_setting_or(keys::UID_PATH, keys::DEFAULT_UID_PATH);
    for mapping in tree.aliases_mut() {
        mapping.uid_path = mapping.is_root.then(|| uid_path.clone());
    }
    Ok(tree)
}
