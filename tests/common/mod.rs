// Common test utilities and fixtures

pub mod helpers;

// Re-export commonly used items
// Note: These may appear unused in unit tests but are used in integration tests
#[allow(unused_imports)]
pub use fixtures::{contract_and_order, shop_group, DefinitionFile, SHOP_DEFINITION};
#[allow(unused_imports)]
pub use helpers::{assert_resolved_root, build, field_paths};
