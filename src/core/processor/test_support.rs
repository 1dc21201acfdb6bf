//! Helpers for stage unit tests.

use super::{MappingHook, ProcessContext};
use crate::core::converter::{builtin_factories, DefaultConverterLookup};
use crate::core::mapping::MappingTree;
use crate::core::metadata::MetaDataLookup;
use crate::core::naming::DefaultNamingStrategy;
use crate::core::settings::Settings;
use std::sync::Arc;

/// Run `f` with built-in converters, default naming and no metadata
pub(crate) fn with_context<R>(settings: Settings, f: impl FnOnce(&ProcessContext<'_>) -> R) -> R {
    with_lookup(settings, MetaDataLookup::new(), f)
}

pub(crate) fn with_lookup<R>(
    settings: Settings,
    lookup: MetaDataLookup,
    f: impl FnOnce(&ProcessContext<'_>) -> R,
) -> R {
    let converters = DefaultConverterLookup::new(&settings, &builtin_factories())
        .expect("built-in converters");
    let hooks: Vec<Arc<dyn MappingHook>> = Vec::new();
    let ctx = ProcessContext {
        naming: &DefaultNamingStrategy,
        converters: &converters,
        settings: &settings,
        lookup: &lookup,
        hooks: &hooks,
    };
    f(&ctx)
}

pub(crate) fn tree_of(
    mappings: impl IntoIterator<Item = crate::core::mapping::AliasMapping>,
) -> MappingTree {
    let mut tree = MappingTree::new();
    for mapping in mappings {
        tree.add(mapping).expect("unique aliases");
    }
    tree
}
