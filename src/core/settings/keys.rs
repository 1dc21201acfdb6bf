//! Well-known setting keys

/// Global null value substituted for unset property null values
pub const NULL_VALUE: &str = "sextant.mapping.nullvalue";

/// Name of the naming strategy (`default`, `prefixed` or a registered one)
pub const NAMING_STRATEGY: &str = "sextant.mapping.naming";

/// Default property accessor strategy (`field` or `property`)
pub const PROPERTY_ACCESSOR: &str = "sextant.property.accessor";

/// Path of the internal document identity property
pub const UID_PATH: &str = "sextant.mapping.uid";

/// Maximum depth of inlined component mappings
pub const COMPONENT_MAX_DEPTH: &str = "sextant.mapping.component.maxDepth";

/// Default for excluding properties from the catch-all field
pub const ALL_EXCLUDE: &str = "sextant.property.all.exclude";

/// Default analyzer for metadata without one
pub const DEFAULT_ANALYZER: &str = "sextant.mapping.analyzer";

/// Prefix of converter setting groups (`sextant.converter.<name>.<key>`)
pub const CONVERTER_GROUP_PREFIX: &str = "sextant.converter";

/// Key inside a converter group naming the converter type
pub const CONVERTER_TYPE: &str = "type";

/// Key inside a converter group holding the format
pub const CONVERTER_FORMAT: &str = "format";

pub const DEFAULT_ACCESSOR: &str = "field";
pub const DEFAULT_NAMING: &str = "default";
pub const DEFAULT_UID_PATH: &str = "$/uid";
pub const DEFAULT_COMPONENT_MAX_DEPTH: i32 = 5;
