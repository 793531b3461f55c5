// crates/its-harness/src/lib.rs
// ============================================================================
// Module: Integration Test Harness Library
// Description: Version gating and repository isolation for build tool ITs.
// Purpose: Decide which integration tests run and give each a clean repository.
// Dependencies: serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! This crate is the shared execution harness for integration tests that drive
//! an external build tool end-to-end. For every test it
//! - evaluates a version range against the configured build tool version and
//!   skips tests that do not apply,
//! - optionally provisions an empty per-test local repository and hands its
//!   path to build tool invocations through an [`InvocationContext`],
//! - reports `<identity>(<method>)..` progress lines ending in ` Ok`,
//!   ` Failure`, or ` Skipping (...)`.
//!
//! ```no_run
//! use its_harness::HarnessError;
//! use its_harness::TestRunner;
//!
//! struct MavenITMyFeatureTest;
//!
//! fn main() -> Result<(), HarnessError> {
//!     let mut runner = TestRunner::from_env()?;
//!     let case = runner.test_case_for::<MavenITMyFeatureTest>("test_it", Some("[2.0,3.0)"))?;
//!     runner.run(&case, |context| {
//!         let _args = context.build_tool_args();
//!         Ok::<(), HarnessError>(())
//!     })?;
//!     Ok(())
//! }
//! ```

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
pub mod context;
pub mod error;
pub mod events;
pub mod gate;
pub mod identity;
pub mod isolation;
pub mod progress;
pub mod range;
pub mod runner;
pub mod version;

// ============================================================================
// SECTION: Re-exports
// ============================================================================

pub use config::HarnessConfig;
pub use config::HarnessEnv;
pub use context::InvocationContext;
pub use context::LOCAL_REPOSITORY_PROPERTY;
pub use error::HarnessError;
pub use gate::GateRationale;
pub use gate::VersionGate;
pub use identity::short_identity;
pub use isolation::RepositoryIsolator;
pub use range::RangeError;
pub use range::VersionRange;
pub use runner::TestCase;
pub use runner::TestOutcome;
pub use runner::TestRunner;
pub use version::ArtifactVersion;
