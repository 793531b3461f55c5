// crates/its-harness/src/identity.rs
// ============================================================================
// Module: Test Identity
// Description: Short, human-readable names for integration test types.
// Purpose: Derive the name used in progress lines and repository paths.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Integration test types are named `MavenIT<Feature>Test` inside some module
//! path. The short identity drops the module path and both affixes, so
//! `org.example.MavenITMyFeatureTest` and `its::MavenITMyFeatureTest` both
//! become `MyFeature`. The transform is pure and idempotent.

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Leading marker identifying an integration test type.
pub const IT_PREFIX: &str = "MavenIT";

/// Trailing marker identifying a test type.
pub const TEST_SUFFIX: &str = "Test";

// ============================================================================
// SECTION: Derivation
// ============================================================================

/// Derives the short identity from a fully-qualified test name.
///
/// Accepts both `.` and `::` as namespace separators. Affixes are stripped
/// until none remain.
#[must_use]
pub fn short_identity(qualified: &str) -> String {
    let simple = strip_namespace(qualified);
    let mut current = simple;
    loop {
        let next = strip_affixes(current);
        if next.len() == current.len() {
            return next.to_string();
        }
        current = next;
    }
}

/// Returns the short identity of a Rust type.
#[must_use]
pub fn short_identity_of<T: ?Sized>() -> String {
    short_identity(std::any::type_name::<T>())
}

/// Drops everything up to and including the last namespace separator.
fn strip_namespace(qualified: &str) -> &str {
    // generic arguments would otherwise contribute their own separators
    let head = qualified.split('<').next().unwrap_or(qualified);
    let after_path = head.rsplit("::").next().unwrap_or(head);
    after_path.rsplit('.').next().unwrap_or(after_path)
}

/// Strips one layer of prefix and suffix.
fn strip_affixes(name: &str) -> &str {
    let name = name.strip_prefix(IT_PREFIX).unwrap_or(name);
    name.strip_suffix(TEST_SUFFIX).unwrap_or(name)
}
