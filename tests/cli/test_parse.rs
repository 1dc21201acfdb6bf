//! Tests for command line parsing

use clap::Parser;
use sextant::cli::{Cli, Commands, OutputFormat};
use std::path::PathBuf;

#[test]
fn test_global_options() {
    let cli = Cli::try_parse_from(["sextant", "--format", "json", "-c", "shop.toml", "stages"])
        .unwrap();
    assert_eq!(cli.format, OutputFormat::Json);
    assert_eq!(cli.config, Some(PathBuf::from("shop.toml")));
    assert!(matches!(cli.command, Commands::Stages(_)));
}

#[test]
fn test_global_options_after_subcommand() {
    let cli = Cli::try_parse_from(["sextant", "resolve", "--roots", "--format", "json"]).unwrap();
    assert_eq!(cli.format, OutputFormat::Json);
    let Commands::Resolve(args) = cli.command else {
        panic!("expected resolve");
    };
    assert!(args.roots);
    assert!(!args.verbose);
}

#[test]
fn test_resolve_alias_filter() {
    let cli = Cli::try_parse_from(["sextant", "resolve", "-a", "order", "-v"]).unwrap();
    let Commands::Resolve(args) = cli.command else {
        panic!("expected resolve");
    };
    assert_eq!(args.alias.as_deref(), Some("order"));
    assert!(args.verbose);
}

#[test]
fn test_lookup_requires_value() {
    assert!(Cli::try_parse_from(["sextant", "lookup"]).is_err());
    let cli = Cli::try_parse_from(["sextant", "lookup", "${shop.total}"]).unwrap();
    let Commands::Lookup(args) = cli.command else {
        panic!("expected lookup");
    };
    assert_eq!(args.value, "${shop.total}");
}

#[test]
fn test_settings_prefix() {
    let cli = Cli::try_parse_from(["sextant", "settings", "-p", "sextant.converter"]).unwrap();
    let Commands::Settings(args) = cli.command else {
        panic!("expected settings");
    };
    assert_eq!(args.prefix.as_deref(), Some("sextant.converter"));
}

#[test]
fn test_default_format_is_human() {
    let cli = Cli::try_parse_from(["sextant", "stages"]).unwrap();
    assert_eq!(cli.format, OutputFormat::Human);
    assert!(cli.config.is_none());
}

#[test]
fn test_unknown_subcommand_rejected() {
    assert!(Cli::try_parse_from(["sextant", "index"]).is_err());
}
