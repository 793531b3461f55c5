// crates/its-harness/src/events.rs
// ============================================================================
// Module: Harness Events
// Description: Structured JSON-lines events for test execution.
// Purpose: Emit machine-readable run logs without hard dependencies.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! Events mirror the progress stream in structured form so CI tooling can
//! count skips and failures without scraping text. Sinks serialize one JSON
//! object per line and drop events they cannot write.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use std::sync::Mutex;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use serde::Serialize;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Event kind labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HarnessEventKind {
    /// Test started.
    TestStarted,
    /// Version gate skipped the test.
    TestSkipped,
    /// Range declared but no ambient version configured.
    VersionUnenforced,
    /// Isolated local repository prepared.
    RepositoryIsolated,
    /// Body returned normally.
    TestPassed,
    /// Body or harness failed.
    TestFailed,
}

/// Harness event payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HarnessEvent {
    /// Event kind.
    pub event: HarnessEventKind,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Short identity of the test.
    pub identity: String,
    /// Test method name when known.
    pub method: Option<String>,
    /// Free-form detail (rationale, path, or error text).
    pub detail: Option<String>,
}

impl HarnessEvent {
    /// Creates an event stamped with the current time.
    #[must_use]
    pub fn new(
        event: HarnessEventKind,
        identity: &str,
        method: Option<&str>,
        detail: Option<String>,
    ) -> Self {
        let timestamp_ms =
            SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis();
        Self {
            event,
            timestamp_ms,
            identity: identity.to_string(),
            method: method.map(str::to_string),
            detail,
        }
    }
}

// ============================================================================
// SECTION: Trait
// ============================================================================

/// Sink for harness events.
pub trait HarnessEventSink: Send + Sync {
    /// Records an event.
    fn record(&self, event: &HarnessEvent);
}

impl<T: HarnessEventSink + ?Sized> HarnessEventSink for Arc<T> {
    fn record(&self, event: &HarnessEvent) {
        (**self).record(event);
    }
}

// ============================================================================
// SECTION: Sinks
// ============================================================================

/// Event log setting that selects [`StderrEventSink`] instead of a file.
pub const STDERR_EVENT_LOG: &str = "-";

/// Sink that logs JSON lines to stderr.
pub struct StderrEventSink;

impl HarnessEventSink for StderrEventSink {
    fn record(&self, event: &HarnessEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            let _ = writeln!(io::stderr(), "{payload}");
        }
    }
}

/// Sink that appends JSON lines to a file.
pub struct FileEventSink {
    /// File handle used for append-only logging.
    file: Mutex<std::fs::File>,
}

impl FileEventSink {
    /// Opens the log file in append mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn new(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

impl HarnessEventSink for FileEventSink {
    fn record(&self, event: &HarnessEvent) {
        if let Ok(payload) = serde_json::to_string(event)
            && let Ok(mut file) = self.file.lock()
        {
            let _ = writeln!(file, "{payload}");
            let _ = file.flush();
        }
    }
}

/// No-op sink.
///
/// # Invariants
/// - Events are intentionally discarded.
pub struct NoopEventSink;

impl HarnessEventSink for NoopEventSink {
    fn record(&self, _event: &HarnessEvent) {}
}

/// In-memory sink retaining every event.
#[derive(Debug, Default)]
pub struct MemoryEventSink {
    /// Recorded events in arrival order.
    events: Mutex<Vec<HarnessEvent>>,
}

impl MemoryEventSink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the kinds of the recorded events in order.
    #[must_use]
    pub fn kinds(&self) -> Vec<HarnessEventKind> {
        self.events().iter().map(|event| event.event).collect()
    }

    /// Returns a snapshot of the recorded events.
    #[must_use]
    pub fn events(&self) -> Vec<HarnessEvent> {
        self.events.lock().map(|events| events.clone()).unwrap_or_default()
    }
}

impl HarnessEventSink for MemoryEventSink {
    fn record(&self, event: &HarnessEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
    }
}
