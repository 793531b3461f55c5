// crates/its-harness/src/range.rs
// ============================================================================
// Module: Version Ranges
// Description: Interval-notation version ranges and containment checks.
// Purpose: Decide whether a build tool version satisfies a test's range.
// Dependencies: crate::version, thiserror
// ============================================================================

//! ## Overview
//! A range is either a soft requirement (`2.0`, which matches every version)
//! or a comma-joined list of restrictions in interval notation:
//! `[1.0]`, `[1.0,2.0)`, `(,1.0]`, `[1.5,)`, `(,1.0],[1.2,)`.
//! Restrictions must be listed in ascending order without overlap.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use thiserror::Error;

use crate::version::ArtifactVersion;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Version range grammar errors.
///
/// # Invariants
/// - Every variant except [`RangeError::Empty`] carries the full range
///   specification that failed, not just the offending restriction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RangeError {
    /// Specification was empty or whitespace.
    #[error("version range must not be empty")]
    Empty,
    /// An opening bracket had no matching closing bracket.
    #[error("unbounded range: {0}")]
    Unbounded(String),
    /// A single version used a half-open bracket.
    #[error("single version must be surrounded by []: {0}")]
    SingleVersionNotClosed(String),
    /// Lower and upper bound text are identical.
    #[error("range cannot have identical boundaries: {0}")]
    IdenticalBounds(String),
    /// A restriction listed more than two boundaries.
    #[error("range has more than two boundaries: {0}")]
    TooManyBounds(String),
    /// A bracketed version was empty.
    #[error("range contains an empty version: {0}")]
    EmptyVersion(String),
    /// The restriction cannot contain any version.
    #[error("range defines empty set: {0}")]
    EmptySet(String),
    /// Restrictions are out of order or overlap.
    #[error("ranges overlap: {0}")]
    Overlap(String),
    /// Text followed a set of restrictions.
    #[error("only fully-qualified sets allowed in multiple set scenario: {0}")]
    TrailingText(String),
}

// ============================================================================
// SECTION: Restriction
// ============================================================================

/// One interval of a version range.
///
/// # Invariants
/// - When both bounds are present, `lower <= upper`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Restriction {
    /// Lower bound, `None` when unbounded.
    lower: Option<ArtifactVersion>,
    /// Whether the lower bound itself is included.
    lower_inclusive: bool,
    /// Upper bound, `None` when unbounded.
    upper: Option<ArtifactVersion>,
    /// Whether the upper bound itself is included.
    upper_inclusive: bool,
}

impl Restriction {
    /// Restriction matching every version.
    #[must_use]
    pub const fn everything() -> Self {
        Self {
            lower: None,
            lower_inclusive: false,
            upper: None,
            upper_inclusive: false,
        }
    }

    /// Returns true when the version lies inside this interval.
    #[must_use]
    pub fn contains(&self, version: &ArtifactVersion) -> bool {
        if let Some(lower) = &self.lower {
            match lower.cmp(version) {
                std::cmp::Ordering::Greater => return false,
                std::cmp::Ordering::Equal if !self.lower_inclusive => return false,
                _ => {}
            }
        }
        if let Some(upper) = &self.upper {
            match upper.cmp(version) {
                std::cmp::Ordering::Less => return false,
                std::cmp::Ordering::Equal if !self.upper_inclusive => return false,
                _ => {}
            }
        }
        true
    }

    /// Returns the lower bound.
    #[must_use]
    pub const fn lower(&self) -> Option<&ArtifactVersion> {
        self.lower.as_ref()
    }

    /// Returns the upper bound.
    #[must_use]
    pub const fn upper(&self) -> Option<&ArtifactVersion> {
        self.upper.as_ref()
    }

    /// Returns true for an exact `[v]` restriction.
    fn is_exact(&self) -> bool {
        self.lower_inclusive
            && self.upper_inclusive
            && matches!((&self.lower, &self.upper), (Some(l), Some(u)) if l.as_str() == u.as_str())
    }

    /// Parses a single bracketed restriction such as `[1.0,2.0)`.
    ///
    /// `spec` is the enclosing range specification, reported on errors.
    fn parse(text: &str, spec: &str) -> Result<Self, RangeError> {
        let lower_inclusive = text.starts_with('[');
        let upper_inclusive = text.ends_with(']');
        let inner = text.get(1 .. text.len() - 1).unwrap_or_default().trim();

        let Some((lower_text, upper_text)) = inner.split_once(',') else {
            if !lower_inclusive || !upper_inclusive {
                return Err(RangeError::SingleVersionNotClosed(spec.to_string()));
            }
            if inner.is_empty() {
                return Err(RangeError::EmptyVersion(spec.to_string()));
            }
            let version = ArtifactVersion::new(inner);
            return Ok(Self {
                lower: Some(version.clone()),
                lower_inclusive: true,
                upper: Some(version),
                upper_inclusive: true,
            });
        };

        let lower_text = lower_text.trim();
        let upper_text = upper_text.trim();
        if upper_text.contains(',') {
            return Err(RangeError::TooManyBounds(spec.to_string()));
        }
        if lower_text == upper_text {
            return Err(RangeError::IdenticalBounds(spec.to_string()));
        }

        let lower = (!lower_text.is_empty()).then(|| ArtifactVersion::new(lower_text));
        let upper = (!upper_text.is_empty()).then(|| ArtifactVersion::new(upper_text));
        if let (Some(lower), Some(upper)) = (&lower, &upper) {
            let empty = match upper.cmp(lower) {
                std::cmp::Ordering::Less => true,
                std::cmp::Ordering::Equal => !(lower_inclusive && upper_inclusive),
                std::cmp::Ordering::Greater => false,
            };
            if empty {
                return Err(RangeError::EmptySet(spec.to_string()));
            }
        }

        Ok(Self {
            lower,
            lower_inclusive,
            upper,
            upper_inclusive,
        })
    }
}

impl fmt::Display for Restriction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_exact()
            && let Some(version) = &self.lower
        {
            return write!(f, "[{version}]");
        }
        f.write_str(if self.lower_inclusive { "[" } else { "(" })?;
        if let Some(lower) = &self.lower {
            write!(f, "{lower}")?;
        }
        f.write_str(",")?;
        if let Some(upper) = &self.upper {
            write!(f, "{upper}")?;
        }
        f.write_str(if self.upper_inclusive { "]" } else { ")" })
    }
}

// ============================================================================
// SECTION: Version Range
// ============================================================================

/// Parsed version range.
///
/// # Invariants
/// - `restrictions` is non-empty and sorted without overlap.
/// - `recommended` is set only for soft requirements, whose single
///   restriction is [`Restriction::everything`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionRange {
    /// Soft-requirement version, if the spec was a bare version.
    recommended: Option<ArtifactVersion>,
    /// Intervals; a version matches when any interval contains it.
    restrictions: Vec<Restriction>,
}

impl VersionRange {
    /// Parses a range specification.
    ///
    /// # Errors
    ///
    /// Returns [`RangeError`] when the specification is malformed.
    pub fn parse(spec: &str) -> Result<Self, RangeError> {
        let mut rest = spec.trim();
        if rest.is_empty() {
            return Err(RangeError::Empty);
        }

        let mut restrictions: Vec<Restriction> = Vec::new();
        while rest.starts_with('[') || rest.starts_with('(') {
            let close =
                rest.find([')', ']']).ok_or_else(|| RangeError::Unbounded(spec.to_string()))?;
            let restriction = Restriction::parse(&rest[..= close], spec)?;

            if let Some(previous) = restrictions.last() {
                let ordered = match (previous.upper(), restriction.lower()) {
                    (Some(upper), Some(lower)) => lower >= upper,
                    _ => false,
                };
                if !ordered {
                    return Err(RangeError::Overlap(spec.to_string()));
                }
            }
            restrictions.push(restriction);

            rest = rest[close + 1 ..].trim();
            if let Some(stripped) = rest.strip_prefix(',') {
                rest = stripped.trim();
            }
        }

        if rest.is_empty() {
            return Ok(Self {
                recommended: None,
                restrictions,
            });
        }
        if !restrictions.is_empty() {
            return Err(RangeError::TrailingText(spec.to_string()));
        }
        Ok(Self {
            recommended: Some(ArtifactVersion::new(rest)),
            restrictions: vec![Restriction::everything()],
        })
    }

    /// Returns true when any restriction contains the version.
    #[must_use]
    pub fn contains(&self, version: &ArtifactVersion) -> bool {
        self.restrictions.iter().any(|restriction| restriction.contains(version))
    }

    /// Returns the soft-requirement version, if any.
    #[must_use]
    pub const fn recommended(&self) -> Option<&ArtifactVersion> {
        self.recommended.as_ref()
    }

    /// Returns the restrictions in ascending order.
    #[must_use]
    pub fn restrictions(&self) -> &[Restriction] {
        &self.restrictions
    }
}

impl fmt::Display for VersionRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(recommended) = &self.recommended {
            return write!(f, "{recommended}");
        }
        for (index, restriction) in self.restrictions.iter().enumerate() {
            if index > 0 {
                f.write_str(",")?;
            }
            write!(f, "{restriction}")?;
        }
        Ok(())
    }
}
