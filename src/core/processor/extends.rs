//! Multi-level `extends` resolution.
//!
//! Every alias receives copies of the children of the aliases it
//! extends, transitively. Supers are merged before the aliases that
//! extend them, so a single pass over the resolution order is enough.

use super::ProcessContext;
use crate::core::error::{Result, SextantError};
use crate::core::mapping::{AliasKind, Mapping, MappingTree};
use std::collections::{BTreeSet, HashMap};

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Visiting,
    Done,
}

pub(super) fn process(mut tree: MappingTree, ctx: &ProcessContext<'_>) -> Result<MappingTree> {
    for mapping in tree.aliases_mut() {
        let mut resolved = Vec::with_capacity(mapping.extends.len());
        for name in &mapping.extends {
            if let Some(name) = ctx.lookup.lookup_alias_name(name)? {
                resolved.push(name);
            }
        }
        mapping.extends = resolved;
    }

    let order = resolution_order(&tree)?;
    let mut ancestors: HashMap<String, BTreeSet<String>> = HashMap::new();

    for alias in &order {
        let Some(mapping) = tree.get(alias) else {
            continue;
        };
        let supers = mapping.extends.clone();
        if supers.is_empty() {
            continue;
        }

        let mut inherited: Vec<Mapping> = Vec::new();
        let mut analyzer = None;
        let mut boost = None;
        let mut exclude_from_all = None;
        let mut reached = BTreeSet::new();

        for super_alias in &supers {
            let Some(parent) = tree.get(super_alias) else {
                continue;
            };
            for child in &parent.children {
                if shadowed(mapping.children.as_slice(), child) || duplicated(&inherited, child) {
                    continue;
                }
                let mut copy = child.clone();
                copy.mark_defined_in(super_alias);
                inherited.push(copy);
            }
            analyzer = analyzer.or_else(|| parent.analyzer.clone());
            boost = boost.or(parent.boost);
            exclude_from_all = exclude_from_all.or(parent.exclude_from_all);

            reached.insert(super_alias.clone());
            if let Some(above) = ancestors.get(super_alias) {
                reached.extend(above.iter().cloned());
            }
        }

        if let Some(mapping) = tree.get_mut(alias) {
            tracing::debug!(
                "Alias [{}] inherits {} mappings from {:?}",
                alias,
                inherited.len(),
                supers
            );
            let own = std::mem::take(&mut mapping.children);
            mapping.children = inherited;
            mapping.children.extend(own);
            if mapping.analyzer.is_none() {
                mapping.analyzer = analyzer;
            }
            if mapping.boost.is_none() {
                mapping.boost = boost;
            }
            if mapping.exclude_from_all.is_none() {
                mapping.exclude_from_all = exclude_from_all;
            }
        }
        ancestors.insert(alias.clone(), reached);
    }

    for (alias, above) in &ancestors {
        for ancestor in above {
            if let Some(mapping) = tree.get_mut(ancestor) {
                mapping.extending_aliases.push(alias.clone());
            }
        }
    }
    for mapping in tree.aliases_mut() {
        mapping.extending_aliases.sort();
    }

    Ok(tree)
}

/// An own child overriding by name hides the inherited one
fn shadowed(own: &[Mapping], inherited: &Mapping) -> bool {
    own.iter()
        .any(|c| c.name() == inherited.name() && c.override_by_name())
}

/// The same declaration reached through two supers
fn duplicated(inherited: &[Mapping], child: &Mapping) -> bool {
    inherited.iter().any(|c| {
        c.name() == child.name()
            && c.defined_in_alias().is_some()
            && c.defined_in_alias() == child.defined_in_alias()
    })
}

/// Aliases ordered so every alias follows all the aliases it extends
fn resolution_order(tree: &MappingTree) -> Result<Vec<String>> {
    let mut marks: HashMap<String, Mark> = HashMap::new();
    let mut stack = Vec::new();
    let mut order = Vec::with_capacity(tree.len());
    for mapping in tree.aliases() {
        visit(tree, &mapping.alias, &mut marks, &mut stack, &mut order)?;
    }
    Ok(order)
}

fn visit(
    tree: &MappingTree,
    alias: &str,
    marks: &mut HashMap<String, Mark>,
    stack: &mut Vec<String>,
    order: &mut Vec<String>,
) -> Result<()> {
    match marks.get(alias) {
        Some(Mark::Done) => return Ok(()),
        Some(Mark::Visiting) => {
            let start = stack.iter().position(|a| a == alias).unwrap_or(0);
            let mut cycle: Vec<&str> = stack[start..].iter().map(String::as_str).collect();
            cycle.push(alias);
            return Err(SextantError::Mapping(format!(
                "Cyclic extends between aliases [{}]",
                cycle.join(" -> ")
            )));
        }
        None => {}
    }

    let Some(mapping) = tree.get(alias) else {
        return Ok(());
    };
    marks.insert(alias.to_string(), Mark::Visiting);
    stack.push(alias.to_string());

    for super_alias in &mapping.extends {
        let parent = tree.get(super_alias).ok_or_else(|| {
            SextantError::Mapping(format!(
                "Alias [{alias}] extends unknown alias [{super_alias}]"
            ))
        })?;
        if !matches!(parent.kind, AliasKind::Contract) && !parent.kind.same_kind(&mapping.kind) {
            return Err(SextantError::Mapping(format!(
                "Alias [{alias}] of kind [{}] can not extend [{super_alias}] of kind [{}]",
                mapping.kind.label(),
                parent.kind.label()
            )));
        }
        visit(tree, super_alias, marks, stack, order)?;
    }

    stack.pop();
    marks.insert(alias.to_string(), Mark::Done);
    order.push(alias.to_string());
    Ok(())
}
