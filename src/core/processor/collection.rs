use super::ProcessContext;
use crate::core::error::{Result, SextantError};
use crate::core::mapping::{CollectionKind, CollectionMapping, Mapping, MappingTree};

/// Infer collection kinds and prepare their element mappings
pub(super) fn process(mut tree: MappingTree, _ctx: &ProcessContext<'_>) -> Result<MappingTree> {
    for mapping in tree.aliases_mut() {
        for child in &mut mapping.children {
            if let Mapping::Collection(collection) = child {
                prepare(collection, &mapping.alias)?;
            }
        }
    }
    Ok(tree)
}

fn prepare(collection: &mut CollectionMapping, alias: &str) -> Result<()> {
    if matches!(
        collection.element.as_ref(),
        Mapping::Collection(_) | Mapping::Parent(_) | Mapping::Id(_)
    ) {
        return Err(SextantError::Mapping(format!(
            "Collection [{}] in alias [{alias}] can not hold a {} element",
            collection.name,
            collection.element.kind_label()
        )));
    }

    let declared = collection.declared_type.as_deref();
    collection.kind = Some(infer_kind(declared));

    let element = collection.element.as_mut();
    if element.name().is_empty() {
        *element.name_mut() = collection.name.clone();
    }
    if let (Mapping::Property(property), Some(item)) = (element, declared.and_then(element_type)) {
        if property.value_type.is_none() {
            property.value_type = Some(item.to_string());
        }
    }
    Ok(())
}

pub(crate) fn infer_kind(declared_type: Option<&str>) -> CollectionKind {
    let Some(declared) = declared_type.map(str::trim) else {
        return CollectionKind::Unknown;
    };
    if declared.starts_with('[') || declared.ends_with("[]") || declared == "array" {
        return CollectionKind::Array;
    }
    let base = declared.split('<').next().unwrap_or(declared);
    let base = base.rsplit("::").next().unwrap_or(base);
    match base {
        "Vec" | "VecDeque" | "LinkedList" | "List" | "list" => CollectionKind::List,
        "HashSet" | "BTreeSet" | "IndexSet" | "Set" | "set" => CollectionKind::Set,
        _ => CollectionKind::Unknown,
    }
}

/// Item type of `Vec<T>`, `[T]`, `[T; N]` or `T[]`
fn element_type(declared: &str) -> Option<&str> {
    let declared = declared.trim();
    if let Some(inner) = declared.strip_prefix('[').and_then(|d| d.strip_suffix(']')) {
        let item = inner.split(';').next().unwrap_or(inner).trim();
        return (!item.is_empty()).then_some(item);
    }
    if let Some(item) = declared.strip_suffix("[]") {
        return Some(item.trim());
    }
    let start = declared.find('<')?;
    let end = declared.rfind('>')?;
    let item = declared.get(start + 1..end)?.trim();
    (!item.is_empty()).then_some(item)
}
