//! Stages command - list the processor chain

use crate::cli::output::{colors, print_header};
use crate::cli::OutputFormat;
use crate::core::processor::ProcessorChain;
use clap::Args;
use serde::Serialize;

/// Arguments for the stages command
#[derive(Args, Debug)]
pub struct StagesArgs {}

#[derive(Debug, Serialize)]
pub struct StagesResponse {
    pub stages: Vec<&'static str>,
}

pub fn stages_response() -> StagesResponse {
    StagesResponse {
        stages: ProcessorChain::standard().stage_names(),
    }
}

/// Execute the stages command
pub fn execute(_args: StagesArgs, format: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
    let response = stages_response();

    match format {
        OutputFormat::Human => {
            print_header("Processor chain:");
            for (position, name) in response.stages.iter().enumerate() {
                println!(
                    "  {:>2}. {}",
                    colors::number(&(position + 1).to_string()),
                    name
                );
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }

    Ok(())
}
