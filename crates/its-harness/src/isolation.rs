// crates/its-harness/src/isolation.rs
// ============================================================================
// Module: Repository Isolation
// Description: Per-test local repository provisioning.
// Purpose: Give each test an empty artifact repository of its own.
// Dependencies: crate::config, crate::context, crate::error
// ============================================================================

//! ## Overview
//! Each test identity maps to `<base>/local-repository/<identity>`. Preparing
//! the path wipes any previous contents, recreates the directory and activates
//! it in the [`InvocationContext`]. Directories are left in place after the
//! test for inspection.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

use crate::config::HarnessConfig;
use crate::context::InvocationContext;
use crate::error::HarnessError;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Directory under the base temp dir holding every isolated repository.
pub const LOCAL_REPOSITORY_DIR: &str = "local-repository";

// ============================================================================
// SECTION: Isolator
// ============================================================================

/// Provisions isolated local repositories under a base directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryIsolator {
    /// Base temp directory.
    base_dir: PathBuf,
}

impl RepositoryIsolator {
    /// Creates an isolator rooted at `base_dir`.
    #[must_use]
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Creates an isolator from the configured temp dir, falling back to the
    /// platform temp dir.
    #[must_use]
    pub fn from_config(config: &HarnessConfig) -> Self {
        Self::new(config.base_temp_dir())
    }

    /// Returns the base directory.
    #[must_use]
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Returns the repository path for a test identity without touching disk.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::InvalidIdentity`] when the identity is not a
    /// single normal path component.
    pub fn repository_path(&self, identity: &str) -> Result<PathBuf, HarnessError> {
        validate_identity(identity)?;
        Ok(self.base_dir.join(LOCAL_REPOSITORY_DIR).join(identity))
    }

    /// Wipes and recreates the repository for `identity`, then activates it.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::InvalidIdentity`] for unusable identities and
    /// [`HarnessError::Io`] when the directory cannot be removed or created.
    pub fn prepare(
        &self,
        identity: &str,
        context: &mut InvocationContext,
    ) -> Result<PathBuf, HarnessError> {
        let relative = self.repository_path(identity)?;
        let path = std::path::absolute(&relative).map_err(|source| HarnessError::Io {
            path: relative.clone(),
            source,
        })?;

        if path.is_dir() {
            fs::remove_dir_all(&path).map_err(|source| HarnessError::Io {
                path: path.clone(),
                source,
            })?;
        }
        fs::create_dir_all(&path).map_err(|source| HarnessError::Io {
            path: path.clone(),
            source,
        })?;

        context.set_local_repository(path.clone());
        Ok(path)
    }
}

/// Rejects identities that would escape or alias the repository root.
fn validate_identity(identity: &str) -> Result<(), HarnessError> {
    let mut components = Path::new(identity).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(name)), None) if name == identity => Ok(()),
        _ => Err(HarnessError::InvalidIdentity(identity.to_string())),
    }
}
