//! Tests for the lookup command

use crate::common::{shop_group, SHOP_DEFINITION};
use sextant::cli::commands::lookup::{self, LookupArgs, LookupKind};
use sextant::cli::OutputFormat;
use sextant::core::metadata::MetaDataLookup;
use sextant::Config;

fn groups() -> MetaDataLookup {
    let mut lookup = MetaDataLookup::new();
    lookup.add_group(shop_group()).unwrap();
    lookup
}

#[test]
fn test_lookup_kinds() {
    let groups = groups();
    let cases = [
        ("order", LookupKind::Literal, "order"),
        ("${shop.order}", LookupKind::Alias, "order"),
        ("${shop.total}", LookupKind::MetaData, "orderTotal"),
        ("${shop.status.closed}", LookupKind::MetaDataValue, "C"),
    ];
    for (value, kind, resolved) in cases {
        let response = lookup::lookup(value, &groups).unwrap();
        assert_eq!(response.kind, kind, "kind of {value}");
        assert_eq!(response.resolved, resolved, "resolution of {value}");
    }
}

#[test]
fn test_lookup_carries_format() {
    let response = lookup::lookup("${shop.total}", &groups()).unwrap();
    assert_eq!(response.format.as_deref(), Some("#0.00"));
}

#[test]
fn test_lookup_errors() {
    let groups = groups();
    assert!(lookup::lookup("${shop.nothing}", &groups).unwrap_err().is_configuration());
    assert!(lookup::lookup("${shop.status.pending}", &groups)
        .unwrap_err()
        .is_conversion());
}

#[test]
fn test_execute_uses_definition_groups() {
    let config = Config::parse(SHOP_DEFINITION).unwrap();
    let args = LookupArgs {
        value: "${shop.status.open}".to_string(),
    };
    assert!(lookup::execute(args, config, OutputFormat::Json).is_ok());
}

#[test]
fn test_execute_reports_unknown_group() {
    let config = Config::parse(SHOP_DEFINITION).unwrap();
    let args = LookupArgs {
        value: "${billing.total}".to_string(),
    };
    assert!(lookup::execute(args, config, OutputFormat::Human).is_err());
}
