//! Tests for the settings command

use crate::common::SHOP_DEFINITION;
use sextant::cli::commands::settings::{self, settings_response, SettingsArgs, SettingsResponse};
use sextant::cli::OutputFormat;
use sextant::Config;

fn shop() -> Config {
    Config::parse(SHOP_DEFINITION).unwrap()
}

#[test]
fn test_flat_settings() {
    let response = settings_response(&SettingsArgs { prefix: None }, &shop()).unwrap();
    let SettingsResponse::Flat(values) = response else {
        panic!("expected flat settings");
    };
    assert_eq!(values["sextant.mapping.nullvalue"], "<null>");
    assert_eq!(values["sextant.converter.shortDate.format"], "%d.%m.%Y");
}

#[test]
fn test_grouped_settings() {
    let args = SettingsArgs {
        prefix: Some("sextant.converter".to_string()),
    };
    let SettingsResponse::Groups(groups) = settings_response(&args, &shop()).unwrap() else {
        panic!("expected grouped settings");
    };
    assert_eq!(groups.len(), 1);
    assert_eq!(groups["shortDate"]["type"], "date");
}

#[test]
fn test_prefix_with_ungroupable_key_fails() {
    let args = SettingsArgs {
        prefix: Some("sextant.mapping".to_string()),
    };
    let err = settings_response(&args, &shop()).unwrap_err();
    assert!(err.is_illegal_argument());
}

#[test]
fn test_json_output_is_untagged() {
    let response = settings_response(&SettingsArgs { prefix: None }, &shop()).unwrap();
    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json["sextant.mapping.nullvalue"], "<null>");
}

#[test]
fn test_execute_empty_config() {
    let config = Config::default();
    assert!(settings::execute(SettingsArgs { prefix: None }, &config, OutputFormat::Human).is_ok());
    assert!(settings::execute(
        SettingsArgs {
            prefix: Some("sextant.converter".to_string())
        },
        &config,
        OutputFormat::Json
    )
    .is_ok());
}
