// crates/its-harness/src/error.rs
// ============================================================================
// Module: Harness Errors
// Description: Failures raised by the harness itself.
// Purpose: Separate harness failures from test-body failures.
// Dependencies: crate::range, thiserror
// ============================================================================

//! ## Overview
//! Harness errors are fatal for the test that raised them and are never
//! retried. Test bodies own their error type; the runner only converts these
//! variants into it and never wraps body errors.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::range::RangeError;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Harness failures.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum HarnessError {
    /// The test's version range specification is malformed.
    #[error("invalid version range: {0}")]
    Configuration(#[from] RangeError),
    /// An environment value failed validation.
    #[error("invalid harness environment: {0}")]
    Environment(String),
    /// A test identity cannot be used as a directory name.
    #[error("invalid test identity for repository isolation: '{0}'")]
    InvalidIdentity(String),
    /// Wiping or creating the isolated repository failed.
    #[error("local repository io error at {}: {source}", path.display())]
    Io {
        /// Directory being prepared.
        path: PathBuf,
        /// Underlying filesystem error.
        #[source]
        source: io::Error,
    },
}
