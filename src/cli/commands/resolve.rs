//! Resolve command - build the configuration and show resolved aliases

use crate::cli::output::{
    colors, format_duration_colored, format_list, print_header, print_success, print_warning,
};
use crate::cli::OutputFormat;
use crate::core::config::Config;
use crate::core::error::Result;
use crate::core::mapping::{AliasMapping, Mapping};
use clap::Args;
use serde::Serialize;
use std::time::Instant;

/// Arguments for the resolve command
#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// Only show this alias
    #[arg(long, short = 'a')]
    pub alias: Option<String>,

    /// Only show root aliases
    #[arg(long)]
    pub roots: bool,

    /// Print every resolved field with its converter
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

#[derive(Debug, Serialize)]
pub struct ResolveResponse {
    pub aliases: Vec<AliasSummary>,
    pub stages: usize,
    pub elapsed_secs: f64,
}

#[derive(Debug, Serialize)]
pub struct AliasSummary {
    pub alias: String,
    pub kind: &'static str,
    pub root: bool,
    pub sub_indexes: Vec<String>,
    pub uid_path: Option<String>,
    pub ids: Vec<String>,
    pub extends: Vec<String>,
    pub extending_aliases: Vec<String>,
    pub inlined_components: usize,
    pub fields: Vec<FieldSummary>,
}

#[derive(Debug, Serialize)]
pub struct FieldSummary {
    pub name: String,
    pub path: Option<String>,
    pub converter: Option<String>,
    pub defined_in: Option<String>,
}

impl AliasSummary {
    pub fn from_mapping(mapping: &AliasMapping) -> Self {
        let mut fields = Vec::new();
        for child in &mapping.children {
            let defined_in = child.defined_in_alias().map(str::to_string);
            child.for_each_field(&mut |field| {
                fields.push(FieldSummary {
                    name: field.name.clone(),
                    path: field.path.clone(),
                    converter: field.bound.as_ref().map(|b| b.name.clone()),
                    defined_in: defined_in.clone(),
                })
            });
        }
        Self {
            alias: mapping.alias.clone(),
            kind: mapping.kind.label(),
            root: mapping.is_root,
            sub_indexes: mapping
                .sub_index_hash
                .as_ref()
                .map(|h| h.sub_indexes())
                .unwrap_or_default(),
            uid_path: mapping.uid_path.clone(),
            ids: mapping.id_names.clone(),
            extends: mapping.extends.clone(),
            extending_aliases: mapping.extending_aliases.clone(),
            inlined_components: mapping
                .children
                .iter()
                .filter(|c| matches!(c, Mapping::Component(m) if !m.inlined.is_empty()))
                .count(),
            fields,
        }
    }
}

/// Build `config` and summarize the aliases selected by `args`
pub fn resolve(args: &ResolveArgs, config: Config) -> Result<ResolveResponse> {
    let start = Instant::now();
    let configuration = config.into_configuration()?;
    let stages = configuration.chain().len();
    let built = configuration.build()?;

    let aliases = built
        .mapping
        .aliases()
        .iter()
        .filter(|m| args.alias.as_deref().map_or(true, |alias| m.alias == alias))
        .filter(|m| !args.roots || m.is_root)
        .map(AliasSummary::from_mapping)
        .collect();

    Ok(ResolveResponse {
        aliases,
        stages,
        elapsed_secs: start.elapsed().as_secs_f64(),
    })
}

/// Execute the resolve command
pub fn execute(
    args: ResolveArgs,
    config: Config,
    format: OutputFormat,
) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let response = resolve(&args, config)?;

    match format {
        OutputFormat::Human => print_human(&response, args.verbose),
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }

    Ok(())
}

fn print_human(response: &ResolveResponse, verbose: bool) {
    if response.aliases.is_empty() {
        print_warning("No aliases matched");
        return;
    }

    for summary in &response.aliases {
        let role = if summary.root { "root" } else { "embedded" };
        println!(
            "{} [{}] {}",
            colors::alias(&summary.alias),
            colors::kind(summary.kind),
            colors::dim(role)
        );
        if summary.root {
            println!("  {} {}", colors::label("sub indexes:"), format_list(&summary.sub_indexes));
            println!(
                "  {} {}",
                colors::label("uid:"),
                summary.uid_path.as_deref().unwrap_or("-")
            );
        }
        println!("  {} {}", colors::label("ids:"), format_list(&summary.ids));
        if !summary.extends.is_empty() {
            println!("  {} {}", colors::label("extends:"), format_list(&summary.extends));
        }
        if !summary.extending_aliases.is_empty() {
            println!(
                "  {} {}",
                colors::label("extended by:"),
                format_list(&summary.extending_aliases)
            );
        }
        println!(
            "  {} {} ({} inlined components)",
            colors::label("fields:"),
            colors::number(&summary.fields.len().to_string()),
            summary.inlined_components
        );
        if verbose {
            for field in &summary.fields {
                let inherited = field
                    .defined_in
                    .as_deref()
                    .map(|alias| format!(" (from {alias})"))
                    .unwrap_or_default();
                println!(
                    "    {} -> {} [{}]{}",
                    field.name,
                    colors::path(field.path.as_deref().unwrap_or("-")),
                    colors::kind(field.converter.as_deref().unwrap_or("-")),
                    colors::dim(&inherited)
                );
            }
        }
        println!();
    }

    print_header(&format!(
        "{} aliases through {} stages",
        response.aliases.len(),
        response.stages
    ));
    print_success(&format!(
        "Resolved in {}",
        format_duration_colored(response.elapsed_secs)
    ));
}
