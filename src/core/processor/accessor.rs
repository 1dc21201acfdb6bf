use super::ProcessContext;
use crate::core::error::{Result, SextantError};
use crate::core::mapping::{Accessor, AccessorStrategy, AliasKind, Mapping, MappingTree};
use crate::core::settings::{keys, SettingsSource};

/// Resolve how every class member is read
///
/// Members without an explicit accessor use `sextant.property.accessor`.
pub(super) fn process(mut tree: MappingTree, ctx: &ProcessContext<'_>) -> Result<MappingTree> {
    let default_name = ctx
        .settings
        .get_setting_or(keys::PROPERTY_ACCESSOR, keys::DEFAULT_ACCESSOR);
    let default = parse_strategy(&default_name)?;

    for mapping in tree.aliases_mut() {
        if !matches!(mapping.kind, AliasKind::Class { .. }) {
            continue;
        }
        for child in &mut mapping.children {
            resolve(child, default)?;
        }
    }
    Ok(tree)
}

fn resolve(child: &mut Mapping, default: AccessorStrategy) -> Result<()> {
    let (name, requested, slot) = match child {
        Mapping::Id(m) | Mapping::Property(m) => (&m.name, &m.accessor, &mut m.resolved_accessor),
        Mapping::Component(m) => (&m.name, &m.accessor, &mut m.resolved_accessor),
        Mapping::Reference(m) => (&m.name, &m.accessor, &mut m.resolved_accessor),
        Mapping::Parent(m) => (&m.name, &m.accessor, &mut m.resolved_accessor),
        Mapping::Collection(m) => (&m.name, &m.accessor, &mut m.resolved_accessor),
        _ => return Ok(()),
    };
    let strategy = match requested {
        Some(requested) => parse_strategy(requested)?,
        None => default,
    };
    *slot = Some(Accessor {
        strategy,
        member: member_name(strategy, name),
    });
    Ok(())
}

fn parse_strategy(name: &str) -> Result<AccessorStrategy> {
    AccessorStrategy::parse(name).ok_or_else(|| {
        SextantError::Configuration(format!(
            "Unknown property accessor [{name}], expected [field] or [property]"
        ))
    })
}

fn member_name(strategy: AccessorStrategy, name: &str) -> String {
    match strategy {
        AccessorStrategy::Field => name.to_string(),
        AccessorStrategy::Property => {
            let mut chars = name.chars();
            match chars.next() {
                Some(first) => format!("get{}{}", first.to_uppercase(), chars.as_str()),
                None => "get".to_string(),
            }
        }
    }
}
