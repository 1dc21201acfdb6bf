//! Sextant - search mapping resolution pipeline
//!
//! Turns raw alias mappings (classes, contracts, resources, XML and
//! JSON objects) into a fully resolved mapping tree: inheritance
//! applied, converters bound, index paths assigned and every root
//! carrying its ids.
//!
//! # Architecture
//!
//! - **core**: Domain logic
//!   - settings, registry, metadata lookup
//!   - converters, naming strategies
//!   - mapping tree and the processor chain
//!   - builder (copy-on-build configuration)
//!
//! - **cli**: Command-line adapter (depends on core)
//!
//! # Example
//!
//! ```
//! use sextant::core::mapping::{AliasMapping, ClassPropertyMapping, FieldMapping, Mapping};
//! use sextant::SextantConfiguration;
//!
//! let mut config = SextantConfiguration::new();
//! config
//!     .add_mapping(
//!         AliasMapping::class("order", "shop::Order").with_child(Mapping::Id(
//!             ClassPropertyMapping::new("id").with_meta_data(FieldMapping::new("id")),
//!         )),
//!     )
//!     .unwrap();
//! let built = config.build().unwrap();
//! assert!(built.alias("order").unwrap().is_root);
//! ```

pub mod cli;
pub mod core;

// Re-export commonly used types for convenience
pub use core::builder::{BuiltConfiguration, SextantConfiguration};
pub use core::config::Config;
pub use core::error::{Result, SextantError};
pub use core::mapping::{AliasKind, AliasMapping, Mapping, MappingTree};
pub use core::metadata::{MetaDataGroup, MetaDataLookup};
pub use core::settings::{RuntimeSettings, Settings, SettingsSource};
