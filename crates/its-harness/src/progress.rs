// crates/its-harness/src/progress.rs
// ============================================================================
// Module: Progress Stream
// Description: Human-readable per-test progress lines.
// Purpose: Report start, pass, failure, and skip status to a shared stream.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Each test prints `<identity>(<method>)..` when it starts and completes the
//! same line with ` Ok`, ` Failure`, or
//! ` Skipping (version <v> not in range <r>)`. Warnings occupy their own line.
//! Writes are best-effort: a broken stream never fails a test.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::io;
use std::io::Write;
use std::sync::Arc;
use std::sync::Mutex;

use crate::range::VersionRange;
use crate::version::ArtifactVersion;

// ============================================================================
// SECTION: Types
// ============================================================================

/// How a test finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    /// Body returned normally.
    Ok,
    /// Body or harness failed.
    Failure,
    /// Version gate skipped the test.
    Skipped {
        /// Ambient version.
        version: ArtifactVersion,
        /// Required range.
        range: VersionRange,
    },
}

impl fmt::Display for Completion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ok => f.write_str(" Ok"),
            Self::Failure => f.write_str(" Failure"),
            Self::Skipped {
                version,
                range,
            } => write!(f, " Skipping (version {version} not in range {range})"),
        }
    }
}

/// One fragment of the progress stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressLine<'a> {
    /// Test start; the line stays open.
    Started {
        /// Short identity of the test.
        identity: &'a str,
        /// Test method name.
        method: &'a str,
    },
    /// Completion text closing a started line.
    Completed(&'a Completion),
    /// Standalone warning line.
    Warning(&'a str),
}

impl fmt::Display for ProgressLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Started {
                identity,
                method,
            } => write!(f, "{identity}({method}).."),
            Self::Completed(completion) => writeln!(f, "{completion}"),
            Self::Warning(message) => writeln!(f, "{message}"),
        }
    }
}

// ============================================================================
// SECTION: Trait
// ============================================================================

/// Destination for progress lines.
pub trait ProgressSink: Send + Sync {
    /// Records one progress fragment.
    fn record(&self, line: &ProgressLine<'_>);
}

impl<T: ProgressSink + ?Sized> ProgressSink for Arc<T> {
    fn record(&self, line: &ProgressLine<'_>) {
        (**self).record(line);
    }
}

// ============================================================================
// SECTION: Sinks
// ============================================================================

/// Progress sink writing to any [`Write`] target.
pub struct WriterProgressSink<W: Write + Send> {
    /// Output stream captured when the sink was built.
    writer: Mutex<W>,
}

impl<W: Write + Send> WriterProgressSink<W> {
    /// Wraps a writer.
    pub const fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }
}

impl WriterProgressSink<io::Stdout> {
    /// Sink writing to standard output.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> ProgressSink for WriterProgressSink<W> {
    fn record(&self, line: &ProgressLine<'_>) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = write!(writer, "{line}");
            let _ = writer.flush();
        }
    }
}

/// In-memory progress sink.
#[derive(Debug, Default)]
pub struct BufferProgressSink {
    /// Everything recorded so far.
    buffer: Mutex<String>,
}

impl BufferProgressSink {
    /// Creates an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the recorded text.
    #[must_use]
    pub fn contents(&self) -> String {
        self.buffer.lock().map(|buffer| buffer.clone()).unwrap_or_default()
    }
}

impl ProgressSink for BufferProgressSink {
    fn record(&self, line: &ProgressLine<'_>) {
        if let Ok(mut buffer) = self.buffer.lock() {
            buffer.push_str(&line.to_string());
        }
    }
}
