// crates/its-harness/src/config/env.rs
// ============================================================================
// Module: Harness Environment
// Description: Environment-backed configuration for integration test runs.
// Purpose: Centralize env parsing with strict UTF-8 validation.
// Dependencies: crate::error
// ============================================================================

//! ## Overview
//! Environment values are parsed with strict UTF-8 enforcement to avoid silent
//! misconfiguration. Invalid UTF-8 and empty values fail closed; an unset
//! build tool version is not an error and leaves version gating unenforced.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::PathBuf;

use crate::error::HarnessError;

// ============================================================================
// SECTION: Environment Constants
// ============================================================================

/// Environment keys for harness configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HarnessEnv {
    /// Version of the build tool under test.
    BuildToolVersion,
    /// Optional base temp directory override.
    TempDir,
    /// Provision an empty local repository per test (`true`/`false` or `1`/`0`).
    UseEmptyLocalRepository,
    /// Optional path of a JSON-lines event log; `-` selects stderr.
    EventLog,
}

impl HarnessEnv {
    /// Returns the canonical environment variable name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BuildToolVersion => "MAVEN_ITS_VERSION",
            Self::TempDir => "MAVEN_ITS_TMPDIR",
            Self::UseEmptyLocalRepository => "MAVEN_ITS_USE_EMPTY_LOCAL_REPOSITORY",
            Self::EventLog => "MAVEN_ITS_EVENT_LOG",
        }
    }
}

// ============================================================================
// SECTION: Config Types
// ============================================================================

/// Typed harness configuration derived from environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HarnessConfig {
    /// Build tool version used for range gating.
    pub build_tool_version: Option<String>,
    /// Base directory for isolated repositories; platform temp dir when unset.
    pub temp_dir: Option<PathBuf>,
    /// Whether each test gets a freshly emptied local repository.
    pub use_empty_local_repository: bool,
    /// Optional JSON-lines event log destination.
    pub event_log: Option<PathBuf>,
}

impl HarnessConfig {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::Environment`] when an environment value is not
    /// valid UTF-8, is empty, or is not a recognized boolean literal.
    pub fn load() -> Result<Self, HarnessError> {
        let build_tool_version = read_env_nonempty(HarnessEnv::BuildToolVersion.as_str())?;
        let temp_dir = read_env_nonempty(HarnessEnv::TempDir.as_str())?.map(PathBuf::from);
        let use_empty_local_repository = parse_bool_env(
            HarnessEnv::UseEmptyLocalRepository.as_str(),
            read_env_nonempty(HarnessEnv::UseEmptyLocalRepository.as_str())?,
        )?;
        let event_log = read_env_nonempty(HarnessEnv::EventLog.as_str())?.map(PathBuf::from);
        Ok(Self {
            build_tool_version,
            temp_dir,
            use_empty_local_repository,
            event_log,
        })
    }

    /// Returns the base directory for isolated repositories.
    #[must_use]
    pub fn base_temp_dir(&self) -> PathBuf {
        self.temp_dir.clone().unwrap_or_else(std::env::temp_dir)
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Reads an environment variable and enforces UTF-8 validity.
///
/// # Errors
///
/// Returns an error when the environment variable contains invalid UTF-8.
pub fn read_env_strict(name: &str) -> Result<Option<String>, HarnessError> {
    std::env::var_os(name).map_or(Ok(None), |raw| {
        raw.into_string()
            .map(Some)
            .map_err(|_| HarnessError::Environment(format!("{name} must be valid UTF-8")))
    })
}

/// Reads an environment variable and rejects empty values.
///
/// # Errors
///
/// Returns an error when the variable is set but empty or whitespace.
fn read_env_nonempty(name: &str) -> Result<Option<String>, HarnessError> {
    match read_env_strict(name)? {
        Some(value) if value.trim().is_empty() => {
            Err(HarnessError::Environment(format!("{name} must not be empty")))
        }
        Some(value) => Ok(Some(value.trim().to_string())),
        None => Ok(None),
    }
}

/// Parses a boolean environment variable; unset means `false`.
///
/// # Errors
///
/// Returns an error when the value is not a recognized boolean literal.
fn parse_bool_env(name: &str, raw: Option<String>) -> Result<bool, HarnessError> {
    let Some(value) = raw else {
        return Ok(false);
    };
    let trimmed = value.trim();
    if trimmed.eq_ignore_ascii_case("true") || trimmed == "1" {
        return Ok(true);
    }
    if trimmed.eq_ignore_ascii_case("false") || trimmed == "0" {
        return Ok(false);
    }
    Err(HarnessError::Environment(format!("{name} must be 1, 0, true, or false")))
}
