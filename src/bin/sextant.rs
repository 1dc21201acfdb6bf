//! Sextant CLI - resolve search mapping definitions from the command line
//!
//! # Examples
//!
//! ```bash
//! # Resolve every alias of a definition file
//! sextant --config shop.toml resolve --verbose
//!
//! # Resolve a metadata placeholder
//! sextant --config shop.toml lookup '${shop.price}'
//!
//! # Show converter setting groups
//! sextant --config shop.toml settings --prefix sextant.converter
//! ```

use clap::Parser;
use sextant::cli::output::print_error;
use sextant::cli::{run, Cli};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() {
    // stdout carries command output, logs go to stderr
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "sextant=warn".into());
    let registry = tracing_subscriber::registry().with(filter);
    if std::env::var("SEXTANT_LOG_FORMAT").as_deref() == Ok("json") {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        print_error(&e.to_string());
        std::process::exit(1);
    }
}
