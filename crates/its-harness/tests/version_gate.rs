// crates/its-harness/tests/version_gate.rs
// ============================================================================
// Module: Version Gate Tests
// Description: Skip decisions and rationales for version-ranged tests.
// Purpose: Verify gating scenarios and decision invariants.
// ============================================================================

//! Version gate scenario and property tests.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "Test-only assertions and helpers are permitted."
)]

use its_harness::ArtifactVersion;
use its_harness::GateRationale;
use its_harness::HarnessError;
use its_harness::RangeError;
use its_harness::VersionGate;
use its_harness::VersionRange;
use proptest::prelude::*;

// ============================================================================
// SECTION: Scenarios
// ============================================================================

#[test]
fn version_inside_range_runs() {
    let gate = VersionGate::evaluate("MyFeature", Some("[2.0,3.0)"), Some("2.5")).unwrap();
    assert!(!gate.should_skip());
    let rationale = gate.rationale().expect("rationale");
    assert!(matches!(rationale, GateRationale::InRange { .. }));
    assert_eq!(rationale.to_string(), "Running MyFeature (version 2.5 in range [2.0,3.0))");
}

#[test]
fn version_outside_range_skips() {
    let gate = VersionGate::evaluate("MyFeature", Some("[2.0,3.0)"), Some("3.1")).unwrap();
    assert!(gate.should_skip());
    let rationale = gate.rationale().expect("rationale");
    assert!(matches!(rationale, GateRationale::OutOfRange { .. }));
    assert_eq!(rationale.to_string(), "Skipping MyFeature (version 3.1 not in range [2.0,3.0))");
    assert_eq!(gate.version(), Some(&ArtifactVersion::new("3.1")));
}

#[test]
fn missing_range_is_inert() {
    let gate = VersionGate::evaluate("MyFeature", None, Some("3.1")).unwrap();
    assert!(!gate.should_skip());
    assert!(gate.rationale().is_none());
    assert_eq!(gate, VersionGate::inert());
}

#[test]
fn missing_version_warns_instead_of_skipping() {
    let gate = VersionGate::evaluate("MyFeature", Some("[2.0,3.0)"), None).unwrap();
    assert!(!gate.should_skip());
    let rationale = gate.rationale().expect("warning");
    assert!(rationale.is_warning());
    assert_eq!(
        rationale.to_string(),
        "WARNING: MyFeature: version range '[2.0,3.0)' supplied but no maven version - not \
         skipping test."
    );
}

#[test]
fn malformed_range_is_a_configuration_error() {
    let err = VersionGate::evaluate("MyFeature", Some("[2.0,3.0"), Some("2.5")).unwrap_err();
    assert!(matches!(err, HarnessError::Configuration(RangeError::Unbounded(_))));
}

#[test]
fn malformed_range_fails_even_without_version() {
    let err = VersionGate::evaluate("MyFeature", Some("(1.0)"), None).unwrap_err();
    assert!(matches!(err, HarnessError::Configuration(_)));
}

#[test]
fn repeated_queries_return_the_cached_decision() {
    let gate = VersionGate::evaluate("MyFeature", Some("[2.0,3.0)"), Some("3.1")).unwrap();
    let first = (gate.should_skip(), gate.rationale().cloned());
    for _ in 0 .. 3 {
        assert_eq!((gate.should_skip(), gate.rationale().cloned()), first);
    }
}

// ============================================================================
// SECTION: Properties
// ============================================================================

type Triple = (u64, u64, u64);

/// Numeric head plus an optional qualifier; no qualifier prefixes another.
type Version = (Triple, Option<&'static str>);

fn triple() -> impl Strategy<Value = Triple> {
    (0u64 .. 4, 0u64 .. 4, 0u64 .. 4)
}

fn version() -> impl Strategy<Value = Version> {
    (triple(), proptest::option::of(proptest::sample::select(vec!["alpha", "beta", "rc"])))
}

/// A missing bound is an unbounded side of the range.
fn bound() -> impl Strategy<Value = Option<Version>> {
    proptest::option::of(version())
}

fn render(((major, minor, incremental), qualifier): Version) -> String {
    match qualifier {
        Some(qualifier) => format!("{major}.{minor}.{incremental}-{qualifier}"),
        None => format!("{major}.{minor}.{incremental}"),
    }
}

/// Independent ordering: numbers, then qualified before release, then
/// qualifiers lexically.
fn order_key((numbers, qualifier): Version) -> (Triple, bool, &'static str) {
    (numbers, qualifier.is_none(), qualifier.unwrap_or_default())
}

/// Puts two bounds in ascending order; `None` stays on the side it was drawn.
fn ordered_bounds(a: Option<Version>, b: Option<Version>) -> (Option<Version>, Option<Version>) {
    match (a, b) {
        (Some(a), Some(b)) if order_key(b) < order_key(a) => (Some(b), Some(a)),
        other => other,
    }
}

/// Returns true when the bounds describe a non-empty, well-formed restriction.
fn usable_bounds(lower: Option<Version>, upper: Option<Version>) -> bool {
    match (lower, upper) {
        (None, None) => false,
        (Some(lower), Some(upper)) => order_key(lower) != order_key(upper),
        _ => true,
    }
}

/// Builds a range spec; unbounded sides always use an exclusive bracket.
fn range_spec(
    lower: Option<Version>,
    upper: Option<Version>,
    lower_inclusive: bool,
    upper_inclusive: bool,
) -> String {
    let open = if lower.is_some() && lower_inclusive { "[" } else { "(" };
    let close = if upper.is_some() && upper_inclusive { "]" } else { ")" };
    format!(
        "{open}{},{}{close}",
        lower.map(render).unwrap_or_default(),
        upper.map(render).unwrap_or_default()
    )
}

fn model_contains(
    lower: Option<Version>,
    upper: Option<Version>,
    lower_inclusive: bool,
    upper_inclusive: bool,
    version: Version,
) -> bool {
    let key = order_key(version);
    let above = lower.is_none_or(|lower| {
        if lower_inclusive { key >= order_key(lower) } else { key > order_key(lower) }
    });
    let below = upper.is_none_or(|upper| {
        if upper_inclusive { key <= order_key(upper) } else { key < order_key(upper) }
    });
    above && below
}

proptest! {
    #[test]
    fn skip_decision_is_negated_containment(
        a in bound(),
        b in bound(),
        version in version(),
        lower_inclusive in any::<bool>(),
        upper_inclusive in any::<bool>(),
    ) {
        let (lower, upper) = ordered_bounds(a, b);
        prop_assume!(usable_bounds(lower, upper));
        let spec = range_spec(lower, upper, lower_inclusive, upper_inclusive);
        let expected_inside =
            model_contains(lower, upper, lower_inclusive, upper_inclusive, version);

        let gate = VersionGate::evaluate("Prop", Some(&spec), Some(&render(version))).unwrap();
        let range = VersionRange::parse(&spec).unwrap();
        prop_assert_eq!(gate.should_skip(), !range.contains(&ArtifactVersion::new(&render(version))));
        prop_assert_eq!(gate.should_skip(), !expected_inside, "spec {} version {}", spec, render(version));
    }

    #[test]
    fn missing_version_never_skips(
        a in bound(),
        b in bound(),
        lower_inclusive in any::<bool>(),
        upper_inclusive in any::<bool>(),
    ) {
        let (lower, upper) = ordered_bounds(a, b);
        prop_assume!(usable_bounds(lower, upper));
        let spec = range_spec(lower, upper, lower_inclusive, upper_inclusive);
        let gate = VersionGate::evaluate("Prop", Some(&spec), None).unwrap();
        prop_assert!(!gate.should_skip());
        prop_assert!(gate.rationale().is_some_and(GateRationale::is_warning));
    }
}
