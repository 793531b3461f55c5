// crates/its-harness/src/version.rs
// ============================================================================
// Module: Artifact Versions
// Description: Parsed build tool and artifact version strings.
// Purpose: Provide a total ordering used by version range containment.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Versions follow the `major[.minor[.incremental]][-(build|qualifier)]`
//! layout. Parsing never fails: text that does not fit the layout becomes a
//! pure qualifier version whose numeric components are all zero. The original
//! text is preserved for display so progress lines echo what was configured.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::cmp::Ordering;
use std::fmt;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Parsed artifact or build tool version.
///
/// # Invariants
/// - `unparsed` is the exact text the version was built from.
/// - When the text does not fit the numeric layout, every numeric component is
///   `None` and `qualifier` holds the full text.
#[derive(Debug, Clone)]
pub struct ArtifactVersion {
    /// Original version text.
    unparsed: String,
    /// Major component.
    major: Option<u64>,
    /// Minor component.
    minor: Option<u64>,
    /// Incremental component.
    incremental: Option<u64>,
    /// Numeric build suffix (`1.0-3`).
    build_number: Option<u64>,
    /// Textual qualifier suffix (`1.0-alpha-1`).
    qualifier: Option<String>,
}

impl ArtifactVersion {
    /// Parses a version string. Never fails.
    #[must_use]
    pub fn new(version: &str) -> Self {
        let mut parsed = Self {
            unparsed: version.to_string(),
            major: None,
            minor: None,
            incremental: None,
            build_number: None,
            qualifier: None,
        };

        let (numeric, suffix) = match version.split_once('-') {
            Some((head, tail)) => (head, Some(tail)),
            None => (version, None),
        };

        if let Some(suffix) = suffix {
            match parse_component(suffix) {
                Some(build) => parsed.build_number = Some(build),
                None => parsed.qualifier = Some(suffix.to_string()),
            }
        }

        match parse_numeric(numeric) {
            Some((major, minor, incremental)) => {
                parsed.major = Some(major);
                parsed.minor = minor;
                parsed.incremental = incremental;
            }
            None => {
                parsed.major = None;
                parsed.minor = None;
                parsed.incremental = None;
                parsed.build_number = None;
                parsed.qualifier = Some(version.to_string());
            }
        }
        parsed
    }

    /// Returns the major component (zero when absent).
    #[must_use]
    pub fn major(&self) -> u64 {
        self.major.unwrap_or(0)
    }

    /// Returns the minor component (zero when absent).
    #[must_use]
    pub fn minor(&self) -> u64 {
        self.minor.unwrap_or(0)
    }

    /// Returns the incremental component (zero when absent).
    #[must_use]
    pub fn incremental(&self) -> u64 {
        self.incremental.unwrap_or(0)
    }

    /// Returns the build number (zero when absent).
    #[must_use]
    pub fn build_number(&self) -> u64 {
        self.build_number.unwrap_or(0)
    }

    /// Returns the qualifier, if any.
    #[must_use]
    pub fn qualifier(&self) -> Option<&str> {
        self.qualifier.as_deref()
    }

    /// Returns the original version text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.unparsed
    }
}

// ============================================================================
// SECTION: Parsing Helpers
// ============================================================================

/// Parses one numeric component. Leading zeros are rejected unless the
/// component is exactly `0`.
fn parse_component(text: &str) -> Option<u64> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if text.len() > 1 && text.starts_with('0') {
        return None;
    }
    text.parse().ok()
}

/// Parses the dotted numeric head into at most three components.
fn parse_numeric(text: &str) -> Option<(u64, Option<u64>, Option<u64>)> {
    let mut parts = text.split('.');
    let major = parse_component(parts.next()?)?;
    let minor = match parts.next() {
        Some(part) => Some(parse_component(part)?),
        None => None,
    };
    let incremental = match parts.next() {
        Some(part) => Some(parse_component(part)?),
        None => None,
    };
    if parts.next().is_some() {
        return None;
    }
    Some((major, minor, incremental))
}

/// Compares qualifiers; a qualifier that extends another sorts older.
fn compare_qualifiers(left: &str, right: &str) -> Ordering {
    if left.len() > right.len() && left.starts_with(right) {
        Ordering::Less
    } else if left.len() < right.len() && right.starts_with(left) {
        Ordering::Greater
    } else {
        left.cmp(right)
    }
}

// ============================================================================
// SECTION: Trait Implementations
// ============================================================================

impl Ord for ArtifactVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.major()
            .cmp(&other.major())
            .then_with(|| self.minor().cmp(&other.minor()))
            .then_with(|| self.incremental().cmp(&other.incremental()))
            .then_with(|| match (self.qualifier(), other.qualifier()) {
                (Some(left), Some(right)) => compare_qualifiers(left, right),
                // a release sorts after any qualified build of the same numbers
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => self.build_number().cmp(&other.build_number()),
            })
    }
}

impl PartialOrd for ArtifactVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for ArtifactVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ArtifactVersion {}

impl fmt::Display for ArtifactVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.unparsed)
    }
}
