//! Tests for the resolve command

use crate::common::{DefinitionFile, SHOP_DEFINITION};
use sextant::cli::commands::resolve::{self, ResolveArgs};
use sextant::cli::{load_config, OutputFormat};
use sextant::Config;

fn args() -> ResolveArgs {
    ResolveArgs {
        alias: None,
        roots: false,
        verbose: false,
    }
}

fn shop() -> Config {
    Config::parse(SHOP_DEFINITION).unwrap()
}

#[test]
fn test_resolve_lists_every_alias() {
    let response = resolve::resolve(&args(), shop()).unwrap();
    let aliases: Vec<&str> = response.aliases.iter().map(|a| a.alias.as_str()).collect();
    assert_eq!(aliases, vec!["contract", "order"]);
    assert_eq!(response.stages, 20);
}

#[test]
fn test_resolve_roots_only() {
    let response = resolve::resolve(
        &ResolveArgs {
            roots: true,
            ..args()
        },
        shop(),
    )
    .unwrap();
    assert_eq!(response.aliases.len(), 1);

    let order = &response.aliases[0];
    assert_eq!(order.alias, "order");
    assert_eq!(order.kind, "class");
    assert!(order.root);
    assert_eq!(order.sub_indexes, vec!["order"]);
    assert_eq!(order.uid_path.as_deref(), Some("$/uid"));
    assert_eq!(order.ids, vec!["id"]);
    assert_eq!(order.extends, vec!["contract"]);
}

#[test]
fn test_resolve_field_summaries() {
    let response = resolve::resolve(
        &ResolveArgs {
            alias: Some("order".to_string()),
            ..args()
        },
        shop(),
    )
    .unwrap();
    let order = &response.aliases[0];

    let created = order.fields.iter().find(|f| f.name == "createdAt").unwrap();
    assert_eq!(created.converter.as_deref(), Some("shortDate"));
    assert_eq!(created.defined_in.as_deref(), Some("contract"));

    let total = order.fields.iter().find(|f| f.name == "orderTotal").unwrap();
    assert_eq!(total.path.as_deref(), Some("orderTotal"));
    assert_eq!(total.defined_in, None);
}

#[test]
fn test_resolve_unknown_alias_filter_is_empty() {
    let response = resolve::resolve(
        &ResolveArgs {
            alias: Some("invoice".to_string()),
            ..args()
        },
        shop(),
    )
    .unwrap();
    assert!(response.aliases.is_empty());
}

#[test]
fn test_resolve_reports_build_errors() {
    let broken =
        SHOP_DEFINITION.replace("extends = [\"${shop.contract}\"]", "extends = [\"missing\"]");
    let err = resolve::resolve(&args(), Config::parse(&broken).unwrap()).unwrap_err();
    assert!(err.is_mapping());
}

#[test]
fn test_execute_from_definition_file() {
    let file = DefinitionFile::shop();
    let config = load_config(Some(&file.path)).unwrap();
    assert!(resolve::execute(args(), config.clone(), OutputFormat::Json).is_ok());
    assert!(resolve::execute(
        ResolveArgs {
            verbose: true,
            ..args()
        },
        config,
        OutputFormat::Human
    )
    .is_ok());
}

#[test]
fn test_response_serializes() {
    let response = resolve::resolve(&args(), shop()).unwrap();
    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json["aliases"][1]["alias"], "order");
    assert_eq!(json["aliases"][1]["root"], true);
    assert!(json["elapsed_secs"].is_number());
}
