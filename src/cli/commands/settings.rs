//! Settings command - show flattened settings or setting groups

use crate::cli::output::{colors, print_header, print_output, print_warning};
use crate::cli::OutputFormat;
use crate::core::config::Config;
use crate::core::error::Result;
use clap::Args;
use serde::Serialize;
use std::collections::BTreeMap;

/// Arguments for the settings command
#[derive(Args, Debug)]
pub struct SettingsArgs {
    /// Group the settings below this prefix, e.g. 'sextant.converter'
    #[arg(long, short = 'p')]
    pub prefix: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum SettingsResponse {
    Flat(BTreeMap<String, String>),
    Groups(BTreeMap<String, BTreeMap<String, String>>),
}

/// Settings of `config`, grouped when a prefix is given
pub fn settings_response(args: &SettingsArgs, config: &Config) -> Result<SettingsResponse> {
    let settings = config.to_settings();
    match &args.prefix {
        None => Ok(SettingsResponse::Flat(settings.to_map())),
        Some(prefix) => {
            let groups = settings.get_setting_groups(prefix)?;
            Ok(SettingsResponse::Groups(
                groups
                    .iter()
                    .map(|(name, group)| (name.clone(), group.to_map()))
                    .collect(),
            ))
        }
    }
}

/// Execute the settings command
pub fn execute(
    args: SettingsArgs,
    config: &Config,
    format: OutputFormat,
) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let response = settings_response(&args, config)?;

    match format {
        OutputFormat::Human => match &response {
            SettingsResponse::Flat(values) if values.is_empty() => {
                print_warning("No settings defined");
            }
            SettingsResponse::Flat(values) => print_values(values, ""),
            SettingsResponse::Groups(groups) if groups.is_empty() => {
                print_warning(&format!(
                    "No setting groups below [{}]",
                    args.prefix.as_deref().unwrap_or_default()
                ));
            }
            SettingsResponse::Groups(groups) => {
                for (name, values) in groups {
                    print_header(&format!("{name}:"));
                    print_values(values, "  ");
                }
            }
        },
        OutputFormat::Json => print_output(&response, format),
    }

    Ok(())
}

fn print_values(values: &BTreeMap<String, String>, indent: &str) {
    for (key, value) in values {
        println!("{indent}{} = {}", colors::label(key), value);
    }
}
