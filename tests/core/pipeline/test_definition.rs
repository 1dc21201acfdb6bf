//! Builds driven by a TOML definition file

use crate::common::{assert_resolved_root, field_paths, DefinitionFile, SHOP_DEFINITION};
use sextant::core::mapping::{Mapping, NullValue};
use sextant::Config;

#[test]
fn test_definition_file_builds() {
    let file = DefinitionFile::shop();
    let config = Config::from_file(&file.path).unwrap();
    config.validate().unwrap();

    let built = config.into_configuration().unwrap().build().unwrap();
    let order = built.alias("order").unwrap();
    assert_resolved_root(order);
    assert_eq!(order.extends, vec!["contract"]);
    assert_eq!(
        field_paths(order),
        vec!["createdAt", "id", "orderTotal", "owner", "status"]
    );
}

#[test]
fn test_placeholders_resolved_from_groups() {
    let built = Config::parse(SHOP_DEFINITION)
        .unwrap()
        .into_configuration()
        .unwrap()
        .build()
        .unwrap();
    let order = built.alias("order").unwrap();

    let Some(Mapping::Property(total)) = order.child("total") else {
        panic!("total missing");
    };
    assert_eq!(total.meta_data[0].name, "orderTotal");
    assert_eq!(total.meta_data[0].format.as_deref(), Some("#0.00"));
    assert_eq!(total.meta_data[0].bound.as_ref().unwrap().name, "double");

    let Some(Mapping::Constant(status)) = order.child("status") else {
        panic!("status constant missing");
    };
    assert_eq!(status.values, vec!["O"]);
}

#[test]
fn test_inherited_converter_and_null_value() {
    let built = Config::parse(SHOP_DEFINITION)
        .unwrap()
        .into_configuration()
        .unwrap()
        .build()
        .unwrap();
    let order = built.alias("order").unwrap();

    let Some(Mapping::Property(created)) = order.child("createdAt") else {
        panic!("createdAt missing");
    };
    assert_eq!(created.defined_in_alias.as_deref(), Some("contract"));
    assert_eq!(created.meta_data[0].bound.as_ref().unwrap().name, "shortDate");
    assert_eq!(
        created.meta_data[0].null_value,
        NullValue::Value("<null>".to_string())
    );
}

#[test]
fn test_missing_file_is_configuration_error() {
    let file = DefinitionFile::shop();
    let err = Config::from_file(file.dir.path().join("absent.toml")).unwrap_err();
    assert!(err.is_configuration());
}

#[test]
fn test_unknown_placeholder_group_fails_build() {
    let definition = SHOP_DEFINITION.replace("${shop.total}", "${billing.total}");
    let err = Config::parse(&definition)
        .unwrap()
        .into_configuration()
        .unwrap()
        .build()
        .unwrap_err();
    assert!(err.is_configuration());
    assert!(err.message().contains("billing"));
}
