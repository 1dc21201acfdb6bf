// Test helper functions

use sextant::core::mapping::AliasMapping;
use sextant::{BuiltConfiguration, SextantConfiguration};

/// Register `mappings` on a fresh configuration and build it
#[allow(dead_code)] // Used in integration tests
pub fn build(mappings: Vec<AliasMapping>) -> sextant::Result<BuiltConfiguration> {
    let mut config = SextantConfiguration::new();
    for mapping in mappings {
        config.add_mapping(mapping)?;
    }
    config.build()
}

/// Sorted resolved paths of every leaf of `mapping`
#[allow(dead_code)] // Used in integration tests
pub fn field_paths(mapping: &AliasMapping) -> Vec<String> {
    let mut paths = Vec::new();
    mapping.for_each_field(&mut |field| {
        if let Some(path) = &field.path {
            paths.push(path.clone());
        }
    });
    paths.sort();
    paths
}

/// Assert the guarantees every resolved root carries
#[allow(dead_code)] // Used in integration tests
pub fn assert_resolved_root(mapping: &AliasMapping) {
    assert!(mapping.is_root, "[{}] should be a root", mapping.alias);
    assert!(
        mapping.sub_index_hash.is_some(),
        "[{}] has no sub index hash",
        mapping.alias
    );
    assert!(mapping.uid_path.is_some(), "[{}] has no uid", mapping.alias);
    assert!(!mapping.id_names.is_empty(), "[{}] has no ids", mapping.alias);
    mapping.for_each_field(&mut |field| {
        assert!(
            field.bound.is_some(),
            "[{}] field [{}] has no converter",
            mapping.alias,
            field.name
        );
    });
}
