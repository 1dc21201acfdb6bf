//! CLI command implementations
//!
//! Each command module handles argument parsing and execution for a specific CLI command.

pub mod completions;
pub mod lookup;
pub mod resolve;
pub mod settings;
pub mod stages;

// Re-export argument types for use in mod.rs
pub use completions::CompletionsArgs;
pub use lookup::LookupArgs;
pub use resolve::ResolveArgs;
pub use settings::SettingsArgs;
pub use stages::StagesArgs;
