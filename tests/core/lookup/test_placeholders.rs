//! Alias and metadata placeholder resolution

use crate::common::shop_group;
use sextant::core::metadata::MetaDataLookup;

fn lookup() -> MetaDataLookup {
    let mut lookup = MetaDataLookup::new();
    lookup.add_group(shop_group()).unwrap();
    lookup
}

#[test]
fn test_literals_pass_through_names_but_not_format() {
    let lookup = lookup();
    for literal in ["order", "shop.order", "${shop", "shop.order}", "$shop.order"] {
        assert_eq!(lookup.lookup_alias(literal).unwrap(), None);
        assert_eq!(lookup.lookup_alias_name(literal).unwrap().as_deref(), Some(literal));
        assert_eq!(lookup.lookup_meta_data_name(literal).unwrap().as_deref(), Some(literal));
        assert_eq!(lookup.lookup_meta_data_format(literal).unwrap(), None);
    }
}

#[test]
fn test_empty_input_is_none() {
    let lookup = lookup();
    assert_eq!(lookup.lookup_alias_name("").unwrap(), None);
    assert_eq!(lookup.lookup_meta_data_name("").unwrap(), None);
    assert_eq!(lookup.lookup_meta_data_value("").unwrap(), None);
}

#[test]
fn test_alias_placeholder_resolves_group_and_id() {
    let lookup = lookup();
    let alias = lookup.lookup_alias("${shop.order}").unwrap().unwrap();
    assert_eq!(alias.group_id, "shop");
    assert_eq!(alias.id, "order");
    assert_eq!(lookup.lookup_alias_name("${shop.order}").unwrap().as_deref(), Some("order"));
}

#[test]
fn test_alias_lookup_ignores_trailing_segments() {
    let lookup = lookup();
    let alias = lookup.lookup_alias("${shop.order.whatever}").unwrap().unwrap();
    assert_eq!(alias.id, "order");
}

#[test]
fn test_unknown_group_is_configuration_error() {
    let err = lookup().lookup_alias("${warehouse.order}").unwrap_err();
    assert!(err.is_configuration());
    assert!(err.message().contains("warehouse"));
}

#[test]
fn test_unknown_alias_is_configuration_error() {
    let err = lookup().lookup_alias("${shop.invoice}").unwrap_err();
    assert!(err.is_configuration());
}

#[test]
fn test_missing_separator_is_configuration_error() {
    let lookup = lookup();
    assert!(lookup.lookup_alias("${shop}").unwrap_err().is_configuration());
    assert!(lookup.lookup_meta_data("${shop}").unwrap_err().is_configuration());
}

#[test]
fn test_meta_data_name_and_format() {
    let lookup = lookup();
    assert_eq!(
        lookup.lookup_meta_data_name("${shop.total}").unwrap().as_deref(),
        Some("orderTotal")
    );
    assert_eq!(
        lookup.lookup_meta_data_format("${shop.total}").unwrap().as_deref(),
        Some("#0.00")
    );
    assert_eq!(lookup.lookup_meta_data_format("${shop.status}").unwrap(), None);
}

#[test]
fn test_meta_data_value() {
    let lookup = lookup();
    assert_eq!(
        lookup.lookup_meta_data_value("${shop.status.closed}").unwrap().as_deref(),
        Some("C")
    );
    assert_eq!(lookup.lookup_meta_data_value("OPEN").unwrap().as_deref(), Some("OPEN"));
}

#[test]
fn test_meta_data_value_requires_value_id() {
    let lookup = lookup();
    assert!(lookup.lookup_meta_data_value("${shop.status}").unwrap_err().is_conversion());
    assert!(lookup
        .lookup_meta_data_value("${shop.status.pending}")
        .unwrap_err()
        .is_conversion());
}

#[test]
fn test_duplicate_group_rejected() {
    let mut lookup = lookup();
    assert!(lookup.add_group(shop_group()).unwrap_err().is_configuration());
}
