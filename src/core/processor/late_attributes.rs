//! Attributes resolved around the binding stages.
//!
//! The `pre` pass swaps metadata placeholders for canonical names so
//! binding sees real names. The `post` pass fills analyzer and
//! all-field defaults once the final leaf set is known.

use super::{try_for_each_field, try_for_each_mapping, ProcessContext};
use crate::core::error::Result;
use crate::core::mapping::{Mapping, MappingTree};
use crate::core::metadata::is_placeholder;
use crate::core::settings::{keys, SettingsSource};

pub(super) fn process_pre(mut tree: MappingTree, ctx: &ProcessContext<'_>) -> Result<MappingTree> {
    for mapping in tree.aliases_mut() {
        try_for_each_field(mapping, &mut |field| {
            if !is_placeholder(&field.name) {
                return Ok(());
            }
            if field.format.is_none() {
                field.format = ctx.lookup.lookup_meta_data_format(&field.name)?;
            }
            if let Some(name) = ctx.lookup.lookup_meta_data_name(&field.name)? {
                field.name = name;
            }
            Ok(())
        })?;

        try_for_each_mapping(&mut mapping.children, &mut |child| {
            if let Mapping::Constant(constant) = child {
                let mut values = Vec::with_capacity(constant.values.len());
                for value in &constant.values {
                    if let Some(value) = ctx.lookup.lookup_meta_data_value(value)? {
                        values.push(value);
                    }
                }
                constant.values = values;
            }
            Ok(())
        })?;
    }
    Ok(tree)
}

pub(super) fn process_post(mut tree: MappingTree, ctx: &ProcessContext<'_>) -> Result<MappingTree> {
    let default_analyzer = ctx.settings.get_setting(keys::DEFAULT_ANALYZER);
    let default_exclude = ctx.settings.get_setting_as_bool(keys::ALL_EXCLUDE, false);

    for mapping in tree.aliases_mut() {
        let analyzer = mapping.analyzer.clone().or_else(|| default_analyzer.clone());
        let exclude = mapping.exclude_from_all.unwrap_or(default_exclude);
        mapping.for_each_field_mut(&mut |field| {
            if field.analyzer.is_none() {
                field.analyzer = analyzer.clone();
            }
            if field.exclude_from_all.is_none() {
                field.exclude_from_all = Some(exclude);
            }
        });
    }
    Ok(tree)
}
