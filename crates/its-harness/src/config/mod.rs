// crates/its-harness/src/config/mod.rs
// ============================================================================
// Module: Harness Configuration
// Description: Centralized configuration for the integration test harness.
// Purpose: Provide typed access to harness environment settings and defaults.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Harness configuration is read from environment variables once and mapped
//! into a small typed structure that test cases and runners share.

// ============================================================================
// SECTION: Modules
// ============================================================================

mod env;

// ============================================================================
// SECTION: Tests
// ============================================================================


// ============================================================================
// SECTION: Re-exports
// ============================================================================

pub use env::HarnessConfig;
pub use env::HarnessEnv;
pub use env::read_env_strict;
