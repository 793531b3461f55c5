// crates/its-harness/src/gate.rs
// ============================================================================
// Module: Version Gate
// Description: Skip decisions for version-ranged integration tests.
// Purpose: Decide once per test case whether the build tool version applies.
// Dependencies: crate::range, crate::version, crate::error
// ============================================================================

//! ## Overview
//! A gate combines an optional range specification with the ambient build
//! tool version. The decision is computed once at construction and is
//! immutable afterwards.
//!
//! A configured range without an ambient version never skips: the gate
//! records a warning instead so incompletely configured environments still
//! run every test.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use crate::error::HarnessError;
use crate::range::VersionRange;
use crate::version::ArtifactVersion;

// ============================================================================
// SECTION: Rationale
// ============================================================================

/// Explanation attached to a gate decision.
///
/// # Invariants
/// - `Unenforced` never accompanies a skip.
/// - `OutOfRange` always accompanies a skip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateRationale {
    /// A range was supplied but no ambient version was configured.
    Unenforced {
        /// Short identity of the test.
        identity: String,
        /// Range that could not be enforced.
        range: VersionRange,
    },
    /// The ambient version satisfies the range.
    InRange {
        /// Short identity of the test.
        identity: String,
        /// Ambient version.
        version: ArtifactVersion,
        /// Required range.
        range: VersionRange,
    },
    /// The ambient version falls outside the range.
    OutOfRange {
        /// Short identity of the test.
        identity: String,
        /// Ambient version.
        version: ArtifactVersion,
        /// Required range.
        range: VersionRange,
    },
}

impl GateRationale {
    /// Returns true when this rationale is a configuration warning.
    #[must_use]
    pub const fn is_warning(&self) -> bool {
        matches!(self, Self::Unenforced { .. })
    }
}

impl fmt::Display for GateRationale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unenforced {
                identity,
                range,
            } => write!(
                f,
                "WARNING: {identity}: version range '{range}' supplied but no maven version - not \
                 skipping test."
            ),
            Self::InRange {
                identity,
                version,
                range,
            } => write!(f, "Running {identity} (version {version} in range {range})"),
            Self::OutOfRange {
                identity,
                version,
                range,
            } => write!(f, "Skipping {identity} (version {version} not in range {range})"),
        }
    }
}

// ============================================================================
// SECTION: Gate
// ============================================================================

/// Version gate for a single test case.
///
/// # Invariants
/// - `skip` is true only when both a range and a version are present and the
///   range does not contain the version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionGate {
    /// Parsed range, when the test declared one.
    range: Option<VersionRange>,
    /// Parsed ambient version, when configured.
    version: Option<ArtifactVersion>,
    /// Cached skip decision.
    skip: bool,
    /// Cached rationale; `None` for an inert gate.
    rationale: Option<GateRationale>,
}

impl VersionGate {
    /// Gate that never skips and has no rationale.
    #[must_use]
    pub const fn inert() -> Self {
        Self {
            range: None,
            version: None,
            skip: false,
            rationale: None,
        }
    }

    /// Evaluates the gate for a test.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::Configuration`] when `range_spec` is malformed.
    pub fn evaluate(
        identity: &str,
        range_spec: Option<&str>,
        ambient_version: Option<&str>,
    ) -> Result<Self, HarnessError> {
        let Some(range_spec) = range_spec else {
            return Ok(Self::inert());
        };
        let range = VersionRange::parse(range_spec)?;

        let Some(version) = ambient_version.map(ArtifactVersion::new) else {
            return Ok(Self {
                rationale: Some(GateRationale::Unenforced {
                    identity: identity.to_string(),
                    range: range.clone(),
                }),
                range: Some(range),
                version: None,
                skip: false,
            });
        };

        let skip = !range.contains(&version);
        let rationale = if skip {
            GateRationale::OutOfRange {
                identity: identity.to_string(),
                version: version.clone(),
                range: range.clone(),
            }
        } else {
            GateRationale::InRange {
                identity: identity.to_string(),
                version: version.clone(),
                range: range.clone(),
            }
        };
        Ok(Self {
            range: Some(range),
            version: Some(version),
            skip,
            rationale: Some(rationale),
        })
    }

    /// Returns the cached skip decision.
    #[must_use]
    pub const fn should_skip(&self) -> bool {
        self.skip
    }

    /// Returns the cached rationale.
    #[must_use]
    pub const fn rationale(&self) -> Option<&GateRationale> {
        self.rationale.as_ref()
    }

    /// Returns the parsed range.
    #[must_use]
    pub const fn range(&self) -> Option<&VersionRange> {
        self.range.as_ref()
    }

    /// Returns the ambient version.
    #[must_use]
    pub const fn version(&self) -> Option<&ArtifactVersion> {
        self.version.as_ref()
    }
}

impl Default for VersionGate {
    fn default() -> Self {
        Self::inert()
    }
}
