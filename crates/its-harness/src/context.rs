// crates/its-harness/src/context.rs
// ============================================================================
// Module: Invocation Context
// Description: Settings handed to build tool invocations.
// Purpose: Carry the active local repository without process-wide state.
// Dependencies: std
// ============================================================================

//! ## Overview
//! The build tool reads its local repository location from the
//! `maven.repo.local` system property. The context holds at most one active
//! path and renders it as a `-D` argument for the command that launches the
//! build tool.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::Path;
use std::path::PathBuf;
use std::process::Command;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// System property naming the build tool's local repository.
pub const LOCAL_REPOSITORY_PROPERTY: &str = "maven.repo.local";

// ============================================================================
// SECTION: Types
// ============================================================================

/// Settings consumed by build tool invocations.
///
/// # Invariants
/// - At most one local repository path is active at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvocationContext {
    /// Active isolated local repository.
    local_repository: Option<PathBuf>,
}

impl InvocationContext {
    /// Creates an empty context.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            local_repository: None,
        }
    }

    /// Activates a local repository and returns the one it replaced.
    pub fn set_local_repository(&mut self, path: PathBuf) -> Option<PathBuf> {
        self.local_repository.replace(path)
    }

    /// Deactivates the local repository override.
    pub fn clear_local_repository(&mut self) -> Option<PathBuf> {
        self.local_repository.take()
    }

    /// Returns the active local repository.
    #[must_use]
    pub fn local_repository(&self) -> Option<&Path> {
        self.local_repository.as_deref()
    }

    /// Returns the system properties implied by this context.
    #[must_use]
    pub fn system_properties(&self) -> Vec<(&'static str, String)> {
        self.local_repository
            .iter()
            .map(|path| (LOCAL_REPOSITORY_PROPERTY, path.display().to_string()))
            .collect()
    }

    /// Returns the `-Dkey=value` arguments for the build tool command line.
    #[must_use]
    pub fn build_tool_args(&self) -> Vec<String> {
        self.system_properties().into_iter().map(|(key, value)| format!("-D{key}={value}")).collect()
    }

    /// Appends this context's arguments to a build tool command.
    pub fn apply(&self, command: &mut Command) {
        command.args(self.build_tool_args());
    }
}
