//! Lookup command - resolve placeholders against the metadata groups

use crate::cli::output::{colors, print_warning};
use crate::cli::OutputFormat;
use crate::core::config::Config;
use crate::core::error::Result;
use crate::core::metadata::{is_placeholder, MetaDataLookup};
use clap::Args;
use serde::Serialize;

/// Arguments for the lookup command
#[derive(Args, Debug)]
pub struct LookupArgs {
    /// Literal or placeholder, e.g. '${shop.price}'
    pub value: String,
}

/// What a value resolved to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum LookupKind {
    Literal,
    Alias,
    MetaData,
    MetaDataValue,
}

impl LookupKind {
    pub fn label(&self) -> &'static str {
        match self {
            LookupKind::Literal => "literal",
            LookupKind::Alias => "alias",
            LookupKind::MetaData => "meta-data",
            LookupKind::MetaDataValue => "meta-data-value",
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LookupResponse {
    pub value: String,
    pub kind: LookupKind,
    pub resolved: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

/// Resolve `value`, trying alias, metadata value and metadata in turn
pub fn lookup(value: &str, lookup: &MetaDataLookup) -> Result<LookupResponse> {
    let literal = |kind| LookupResponse {
        value: value.to_string(),
        kind,
        resolved: value.to_string(),
        format: None,
    };
    if !is_placeholder(value) {
        return Ok(literal(LookupKind::Literal));
    }

    if let Ok(Some(alias)) = lookup.lookup_alias(value) {
        return Ok(LookupResponse {
            resolved: alias.name.clone(),
            ..literal(LookupKind::Alias)
        });
    }

    let meta_data = lookup.lookup_meta_data(value)?;
    let format = meta_data.and_then(|m| m.format.clone());
    // three segments address a value of the metadata
    if value.matches('.').count() >= 2 {
        let resolved = lookup.lookup_meta_data_value(value)?.unwrap_or_default();
        return Ok(LookupResponse {
            resolved,
            format,
            ..literal(LookupKind::MetaDataValue)
        });
    }

    Ok(LookupResponse {
        resolved: meta_data.map(|m| m.name.clone()).unwrap_or_default(),
        format,
        ..literal(LookupKind::MetaData)
    })
}

/// Execute the lookup command
pub fn execute(
    args: LookupArgs,
    config: Config,
    format: OutputFormat,
) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let mut groups = MetaDataLookup::new();
    for group in config.groups {
        groups.add_group(group.into_group()?)?;
    }

    let response = lookup(&args.value, &groups)?;

    match format {
        OutputFormat::Human => {
            if response.kind == LookupKind::Literal {
                print_warning(&format!("[{}] is a literal, not a placeholder", response.value));
            }
            println!(
                "{} -> {} [{}]",
                response.value,
                colors::alias(&response.resolved),
                colors::kind(response.kind.label())
            );
            if let Some(fmt) = &response.format {
                println!("  {} {}", colors::label("format:"), fmt);
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }

    Ok(())
}
