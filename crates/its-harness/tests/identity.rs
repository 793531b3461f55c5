// crates/its-harness/tests/identity.rs
// ============================================================================
// Module: Test Identity Tests
// Description: Short identity derivation from qualified test names.
// Purpose: Pin namespace and affix stripping rules.
// ============================================================================

//! Short identity tests.

use its_harness::identity::short_identity;
use its_harness::identity::short_identity_of;
use proptest::prelude::*;

#[allow(dead_code, reason = "Marker type exists only for its type name.")]
struct MavenITMyFeatureTest;

mod nested {
    #[allow(dead_code, reason = "Marker type exists only for its type name.")]
    pub struct MavenITDeepTest;
}

#[test]
fn dotted_names_drop_package_and_affixes() {
    assert_eq!(short_identity("org.example.MavenITMyFeatureTest"), "MyFeature");
}

#[test]
fn rust_paths_drop_modules_and_affixes() {
    assert_eq!(short_identity("its::suite::MavenITMyFeatureTest"), "MyFeature");
    assert_eq!(short_identity_of::<MavenITMyFeatureTest>(), "MyFeature");
    assert_eq!(short_identity_of::<nested::MavenITDeepTest>(), "Deep");
}

#[test]
fn names_without_affixes_are_kept() {
    assert_eq!(short_identity("org.example.SmokeSuite"), "SmokeSuite");
    assert_eq!(short_identity("MavenITBootstrap"), "Bootstrap");
    assert_eq!(short_identity("ReleaseTest"), "Release");
}

#[test]
fn nested_affixes_are_fully_stripped() {
    assert_eq!(short_identity("MavenITMavenITTwiceTestTest"), "Twice");
}

proptest! {
    #[test]
    fn derivation_is_idempotent(name in "((MavenIT|Test|[A-Za-z0-9_]|\\.|::)){0,12}") {
        let once = short_identity(&name);
        prop_assert_eq!(short_identity(&once), once);
    }
}
