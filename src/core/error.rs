//! Error types and error handling for the Sextant mapping pipeline.
//!
//! Every failure aborts the build that raised it. Nothing in the
//! pipeline attempts local recovery, so callers only ever see the
//! first error encountered.

use thiserror::Error;

/// Result type alias for Sextant operations
pub type Result<T> = std::result::Result<T, SextantError>;

/// Main error type for the Sextant pipeline
#[derive(Error, Debug)]
pub enum SextantError {
    /// Malformed settings, placeholders or unresolvable references
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Structural problems in the mapping tree
    #[error("Mapping error: {0}")]
    Mapping(String),

    #[error("Conversion error: {0}")]
    Conversion(String),

    /// A setting value that cannot be parsed by the requested accessor
    #[error("Illegal argument: {0}")]
    IllegalArgument(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),
}

impl SextantError {
    /// Get user-friendly error message
    pub fn message(&self) -> String {
        self.to_string()
    }

    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            SextantError::Configuration(_) | SextantError::TomlError(_)
        )
    }

    pub fn is_mapping(&self) -> bool {
        matches!(self, SextantError::Mapping(_))
    }

    pub fn is_conversion(&self) -> bool {
        matches!(self, SextantError::Conversion(_))
    }

    pub fn is_illegal_argument(&self) -> bool {
        matches!(self, SextantError::IllegalArgument(_))
    }
}
