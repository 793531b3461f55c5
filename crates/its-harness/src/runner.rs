// crates/its-harness/src/runner.rs
// ============================================================================
// Module: Test Runner
// Description: Sequencing of version gating, isolation, and test bodies.
// Purpose: Run one integration test and report its status.
// Dependencies: crate::gate, crate::isolation, crate::progress, crate::events
// ============================================================================

//! ## Overview
//! A test moves through `Init -> Gated -> (Skipped | Isolating -> Running ->
//! (Passed | Failed))`. The gate is evaluated when the [`TestCase`] is built;
//! [`TestRunner::run`] performs the remaining transitions.
//!
//! Body failures are returned to the caller untouched and panics are resumed
//! with their original payload, so the surrounding test framework reports the
//! real failure. Only harness failures are converted into the body's error
//! type.
//!
//! The runner owns the [`InvocationContext`] and `run` takes `&mut self`, so
//! at most one isolated repository is active per runner. Use one runner per
//! process when tests share a base directory.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::panic::AssertUnwindSafe;
use std::panic::catch_unwind;
use std::panic::resume_unwind;
use std::path::Path;

use crate::config::HarnessConfig;
use crate::context::InvocationContext;
use crate::error::HarnessError;
use crate::events::FileEventSink;
use crate::events::HarnessEvent;
use crate::events::HarnessEventKind;
use crate::events::HarnessEventSink;
use crate::events::NoopEventSink;
use crate::events::STDERR_EVENT_LOG;
use crate::events::StderrEventSink;
use crate::gate::GateRationale;
use crate::gate::VersionGate;
use crate::identity::short_identity;
use crate::identity::short_identity_of;
use crate::isolation::RepositoryIsolator;
use crate::progress::Completion;
use crate::progress::ProgressLine;
use crate::progress::ProgressSink;
use crate::progress::WriterProgressSink;

// ============================================================================
// SECTION: Test Case
// ============================================================================

/// A single integration test method with its precomputed gate.
///
/// # Invariants
/// - `gate` is evaluated once, at construction, and never recomputed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCase {
    /// Short identity of the test type.
    identity: String,
    /// Test method name.
    method: String,
    /// Version gate decision.
    gate: VersionGate,
}

impl TestCase {
    /// Builds a test case from a fully-qualified test name.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::Configuration`] when `range_spec` is malformed.
    pub fn new(
        qualified_name: &str,
        method: &str,
        range_spec: Option<&str>,
        config: &HarnessConfig,
    ) -> Result<Self, HarnessError> {
        Self::with_identity(short_identity(qualified_name), method, range_spec, config)
    }

    /// Builds a test case named after the Rust type `T`.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::Configuration`] when `range_spec` is malformed.
    pub fn for_type<T: ?Sized>(
        method: &str,
        range_spec: Option<&str>,
        config: &HarnessConfig,
    ) -> Result<Self, HarnessError> {
        Self::with_identity(short_identity_of::<T>(), method, range_spec, config)
    }

    /// Evaluates the gate for an already derived identity.
    fn with_identity(
        identity: String,
        method: &str,
        range_spec: Option<&str>,
        config: &HarnessConfig,
    ) -> Result<Self, HarnessError> {
        let gate =
            VersionGate::evaluate(&identity, range_spec, config.build_tool_version.as_deref())?;
        Ok(Self {
            identity,
            method: method.to_string(),
            gate,
        })
    }

    /// Returns the short identity.
    #[must_use]
    pub fn identity(&self) -> &str {
        &self.identity
    }

    /// Returns the test method name.
    #[must_use]
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Returns the version gate.
    #[must_use]
    pub const fn gate(&self) -> &VersionGate {
        &self.gate
    }
}

// ============================================================================
// SECTION: Outcomes
// ============================================================================

/// Non-failing result of a test run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TestOutcome {
    /// Body ran and returned normally.
    Passed,
    /// Version gate skipped the test.
    Skipped(GateRationale),
}

// ============================================================================
// SECTION: Runner
// ============================================================================

/// Executes test cases against a shared configuration.
pub struct TestRunner {
    /// Harness configuration.
    config: HarnessConfig,
    /// Repository isolator rooted at the configured temp dir.
    isolator: RepositoryIsolator,
    /// Settings handed to build tool invocations.
    context: InvocationContext,
    /// Human-readable progress stream.
    progress: Box<dyn ProgressSink>,
    /// Structured event log.
    events: Box<dyn HarnessEventSink>,
}

impl TestRunner {
    /// Creates a runner printing progress to stdout with no event log.
    #[must_use]
    pub fn new(config: HarnessConfig) -> Self {
        Self {
            isolator: RepositoryIsolator::from_config(&config),
            config,
            context: InvocationContext::new(),
            progress: Box::new(WriterProgressSink::stdout()),
            events: Box::new(NoopEventSink),
        }
    }

    /// Creates a runner from environment configuration.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::Environment`] for invalid environment values
    /// and [`HarnessError::Io`] when the event log cannot be opened. An event
    /// log of [`STDERR_EVENT_LOG`] writes events to stderr instead of a file.
    pub fn from_env() -> Result<Self, HarnessError> {
        let config = HarnessConfig::load()?;
        let events = config.event_log.as_deref().map(open_event_log).transpose()?;
        let runner = Self::new(config);
        Ok(match events {
            Some(events) => runner.with_events(events),
            None => runner,
        })
    }

    /// Replaces the progress sink.
    #[must_use]
    pub fn with_progress(mut self, progress: Box<dyn ProgressSink>) -> Self {
        self.progress = progress;
        self
    }

    /// Replaces the event sink.
    #[must_use]
    pub fn with_events(mut self, events: Box<dyn HarnessEventSink>) -> Self {
        self.events = events;
        self
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &HarnessConfig {
        &self.config
    }

    /// Returns the invocation context.
    #[must_use]
    pub const fn context(&self) -> &InvocationContext {
        &self.context
    }

    /// Builds a test case and reports an unenforced range once.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::Configuration`] when `range_spec` is malformed.
    pub fn test_case(
        &self,
        qualified_name: &str,
        method: &str,
        range_spec: Option<&str>,
    ) -> Result<TestCase, HarnessError> {
        let case = TestCase::new(qualified_name, method, range_spec, &self.config)?;
        self.report_unenforced(&case);
        Ok(case)
    }

    /// Builds a test case named after `T` and reports an unenforced range once.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::Configuration`] when `range_spec` is malformed.
    pub fn test_case_for<T: ?Sized>(
        &self,
        method: &str,
        range_spec: Option<&str>,
    ) -> Result<TestCase, HarnessError> {
        let case = TestCase::for_type::<T>(method, range_spec, &self.config)?;
        self.report_unenforced(&case);
        Ok(case)
    }

    /// Runs a test body.
    ///
    /// The body receives the invocation context holding the isolated local
    /// repository when isolation is enabled.
    ///
    /// # Errors
    ///
    /// Returns the body's own error unchanged, or a converted
    /// [`HarnessError`] when repository isolation fails.
    ///
    /// # Panics
    ///
    /// Resumes a panic raised by the body after reporting the failure.
    pub fn run<F, E>(&mut self, case: &TestCase, body: F) -> Result<TestOutcome, E>
    where
        F: FnOnce(&InvocationContext) -> Result<(), E>,
        E: From<HarnessError>,
    {
        self.progress.record(&ProgressLine::Started {
            identity: case.identity(),
            method: case.method(),
        });
        self.emit(HarnessEventKind::TestStarted, case, None);

        if case.gate().should_skip()
            && let Some(rationale) = case.gate().rationale()
        {
            if let GateRationale::OutOfRange {
                version,
                range,
                ..
            } = rationale
            {
                self.progress.record(&ProgressLine::Completed(&Completion::Skipped {
                    version: version.clone(),
                    range: range.clone(),
                }));
            }
            self.emit(HarnessEventKind::TestSkipped, case, Some(rationale.to_string()));
            return Ok(TestOutcome::Skipped(rationale.clone()));
        }

        if self.config.use_empty_local_repository {
            match self.isolator.prepare(case.identity(), &mut self.context) {
                Ok(path) => {
                    self.emit(
                        HarnessEventKind::RepositoryIsolated,
                        case,
                        Some(path.display().to_string()),
                    );
                }
                Err(err) => {
                    self.fail(case, err.to_string());
                    return Err(E::from(err));
                }
            }
        }

        match catch_unwind(AssertUnwindSafe(|| body(&self.context))) {
            Ok(Ok(())) => {
                self.progress.record(&ProgressLine::Completed(&Completion::Ok));
                self.emit(HarnessEventKind::TestPassed, case, None);
                Ok(TestOutcome::Passed)
            }
            Ok(Err(err)) => {
                self.fail(case, "test body returned an error".to_string());
                Err(err)
            }
            Err(payload) => {
                self.fail(case, "test body panicked".to_string());
                resume_unwind(payload)
            }
        }
    }

    /// Reports a failure on the progress stream and event log.
    fn fail(&self, case: &TestCase, detail: String) {
        self.progress.record(&ProgressLine::Completed(&Completion::Failure));
        self.emit(HarnessEventKind::TestFailed, case, Some(detail));
    }

    /// Emits the unenforced-range warning when the case carries one.
    fn report_unenforced(&self, case: &TestCase) {
        if let Some(rationale) = case.gate().rationale().filter(|rationale| rationale.is_warning()) {
            let message = rationale.to_string();
            self.progress.record(&ProgressLine::Warning(&message));
            self.events.record(&HarnessEvent::new(
                HarnessEventKind::VersionUnenforced,
                case.identity(),
                None,
                Some(message),
            ));
        }
    }

    /// Records an event for a test case.
    fn emit(&self, kind: HarnessEventKind, case: &TestCase, detail: Option<String>) {
        self.events.record(&HarnessEvent::new(kind, case.identity(), Some(case.method()), detail));
    }
}

/// Opens the configured event log, or selects stderr for [`STDERR_EVENT_LOG`].
fn open_event_log(path: &Path) -> Result<Box<dyn HarnessEventSink>, HarnessError> {
    if path.as_os_str() == STDERR_EVENT_LOG {
        return Ok(Box::new(StderrEventSink));
    }
    let sink = FileEventSink::new(path).map_err(|source| HarnessError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Box::new(sink))
}
