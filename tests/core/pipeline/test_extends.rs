//! Inheritance through `extends`

use crate::common::{assert_resolved_root, build, contract_and_order, field_paths};
use sextant::core::mapping::{
    AliasKind, AliasMapping, ClassPropertyMapping, ConstantMapping, FieldMapping,
    JsonPropertyMapping, Mapping, XmlPropertyMapping,
};

fn property(name: &str) -> Mapping {
    Mapping::Property(ClassPropertyMapping::new(name).with_meta_data(FieldMapping::new(name)))
}

fn id(name: &str) -> Mapping {
    Mapping::Id(ClassPropertyMapping::new(name).with_meta_data(FieldMapping::new(name)))
}

#[test]
fn test_order_inherits_contract_properties() {
    let built = build(contract_and_order()).unwrap();
    let order = built.alias("order").unwrap();

    for inherited in ["createdAt", "owner"] {
        let child = order.child(inherited).unwrap_or_else(|| panic!("{inherited} missing"));
        assert_eq!(child.defined_in_alias(), Some("contract"));
    }
    assert_eq!(
        field_paths(order),
        vec!["city", "createdAt", "id", "owner", "street", "total"]
    );
    assert_resolved_root(order);
}

#[test]
fn test_contract_is_never_root() {
    let built = build(contract_and_order()).unwrap();
    let contract = built.alias("contract").unwrap();
    assert!(!contract.is_root);
    assert!(contract.sub_index_hash.is_none());
    assert_eq!(contract.extending_aliases, vec!["order"]);
}

#[test]
fn test_three_level_chain() {
    let base = AliasMapping::contract("base").with_child(property("created"));
    let audited = AliasMapping::contract("audited")
        .with_extends("base")
        .with_child(property("modified"));
    let invoice = AliasMapping::class("invoice", "billing::Invoice")
        .with_extends("audited")
        .with_child(id("number"));

    let built = build(vec![invoice, audited, base]).unwrap();
    let invoice = built.alias("invoice").unwrap();
    assert_eq!(field_paths(invoice), vec!["created", "modified", "number"]);
    assert_eq!(
        built.alias("base").unwrap().extending_aliases,
        vec!["audited", "invoice"]
    );
}

#[test]
fn test_class_extending_class() {
    let mut party = AliasMapping::class("party", "crm::Party")
        .with_child(id("id"))
        .with_child(property("name"));
    party.root = Some(false);
    let customer = AliasMapping::class("customer", "crm::Customer")
        .with_extends("party")
        .with_child(property("tier"));

    let built = build(vec![party, customer]).unwrap();
    let customer = built.alias("customer").unwrap();
    assert_eq!(customer.id_names, vec!["id"]);
    assert_resolved_root(customer);
    assert!(!built.alias("party").unwrap().is_root);
}

#[test]
fn test_override_by_name_replaces_inherited() {
    let contract = AliasMapping::contract("contract").with_child(property("title"));
    let mut title = ClassPropertyMapping::new("title")
        .with_meta_data(FieldMapping::new("title").with_converter("string"));
    title.override_by_name = true;
    let article = AliasMapping::class("article", "cms::Article")
        .with_extends("contract")
        .with_child(id("id"))
        .with_child(Mapping::Property(title));

    let built = build(vec![contract, article]).unwrap();
    let article = built.alias("article").unwrap();
    let titles = article.children.iter().filter(|c| c.name() == "title").count();
    assert_eq!(titles, 1);
    assert_eq!(article.child("title").unwrap().defined_in_alias(), None);
}

#[test]
fn test_same_name_without_override_rejected() {
    let contract = AliasMapping::contract("contract").with_child(property("title"));
    let article = AliasMapping::class("article", "cms::Article")
        .with_extends("contract")
        .with_child(id("id"))
        .with_child(property("title"));

    let err = build(vec![contract, article]).unwrap_err();
    assert!(err.is_mapping());
    assert!(err.message().contains("title"));
}

#[test]
fn test_cyclic_extends_fails_fast() {
    let a = AliasMapping::contract("a").with_extends("c");
    let b = AliasMapping::contract("b").with_extends("a");
    let c = AliasMapping::contract("c").with_extends("b");

    let err = build(vec![a, b, c]).unwrap_err();
    assert!(err.is_mapping());
    assert!(err.message().contains("Cyclic extends"));
}

#[test]
fn test_unresolved_extends_target() {
    let order = AliasMapping::class("order", "shop::Order")
        .with_extends("nowhere")
        .with_child(id("id"));
    let err = build(vec![order]).unwrap_err();
    assert!(err.is_mapping());
    assert!(err.message().contains("nowhere"));
}

fn constant(name: &str, value: &str) -> Mapping {
    Mapping::Constant(ConstantMapping {
        field: FieldMapping::new(name),
        values: vec![value.to_string()],
    })
}

#[test]
fn test_contract_constant_shared_across_alias_kinds() {
    let base = AliasMapping::contract("base").with_child(constant("type", "document"));
    let order = AliasMapping::class("order", "shop::Order")
        .with_extends("base")
        .with_child(id("id"));
    let feed = AliasMapping::new("feed", AliasKind::XmlObject { xpath: None })
        .with_extends("base")
        .with_child(Mapping::XmlId(XmlPropertyMapping {
            field: FieldMapping::new("number"),
            xpath: "/feed/@number".to_string(),
        }));
    let event = AliasMapping::new("event", AliasKind::JsonObject)
        .with_extends("base")
        .with_child(Mapping::JsonId(JsonPropertyMapping {
            field: FieldMapping::new("id"),
            full_name: None,
        }));

    let built = build(vec![base, order, feed, event]).unwrap();
    for alias in ["order", "feed", "event"] {
        let mapping = built.alias(alias).unwrap();
        assert_resolved_root(mapping);
        assert!(field_paths(mapping).contains(&"type".to_string()), "[{alias}] lost type");
        assert_eq!(mapping.child("type").unwrap().defined_in_alias(), Some("base"));
    }
    assert_eq!(
        built.alias("base").unwrap().extending_aliases,
        vec!["event", "feed", "order"]
    );
}
