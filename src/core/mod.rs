//! Core domain logic (CLI-agnostic)
//!
//! # Architecture
//!
//! - **config**: Definition file loading (TOML + environment)
//! - **error**: Error types and Result alias
//! - **xdg**: XDG directory handling
//! - **settings**: Settings store, typed accessors, runtime overlay
//! - **registry**: Explicit object registry and named factories
//! - **metadata**: Metadata groups and placeholder lookup
//! - **converter**: Value converters and the converter lookup
//! - **naming**: Index path naming strategies
//! - **mapping**: Raw and resolved mapping trees
//! - **processor**: The ordered mapping processor chain
//! - **builder**: Configuration assembly and build

pub mod builder;
pub mod config;
pub mod converter;
pub mod error;
pub mod mapping;
pub mod metadata;
pub mod naming;
pub mod processor;
pub mod registry;
pub mod settings;
pub mod xdg;

// Re-export key types for convenience
pub use builder::{BuiltConfiguration, SextantConfiguration};
pub use config::Config;
pub use error::{Result, SextantError};
