//! Progress reporting for copy batches.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Terminal status of a file within a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileStatus {
    /// The file was copied.
    Success,
    /// The destination existed and overwrite is disabled.
    Skipped,
    /// Every attempt failed.
    Failed,
    /// The file was abandoned because the batch was cancelled.
    Cancelled,
}

impl FileStatus {
    /// Lowercase tag used in progress events.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Skipped => "skipped",
            Self::Failed => "failed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for FileStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single progress notification, emitted once per completed file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressEvent {
    /// Number of files completed so far, including this one.
    pub current: usize,
    /// Number of files in the batch.
    pub total: usize,
    /// Base name of the file that completed.
    pub file_name: String,
    /// How the file completed.
    pub status: FileStatus,
}

impl ProgressEvent {
    /// Create a new progress event.
    #[must_use]
    pub fn new(
        current: usize,
        total: usize,
        file_name: impl Into<String>,
        status: FileStatus,
    ) -> Self {
        Self {
            current,
            total,
            file_name: file_name.into(),
            status,
        }
    }

    /// Calculate progress as a percentage (0.0 to 100.0).
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            100.0
        } else {
            (self.current as f64 / self.total as f64) * 100.0
        }
    }
}

/// Receiver of progress notifications.
///
/// Called concurrently from worker threads, in completion order.
pub trait ProgressSink: Sync {
    /// Handle one completed file.
    fn report(&self, event: &ProgressEvent);
}

impl<F> ProgressSink for F
where
    F: Fn(&ProgressEvent) + Sync,
{
    fn report(&self, event: &ProgressEvent) {
        self(event);
    }
}

/// A sink that discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn report(&self, _event: &ProgressEvent) {}
}

/// Thread-safe completion counter.
///
/// Each call to [`advance`](Self::advance) yields a distinct value, so the
/// `current` field never repeats within a batch.
#[derive(Debug, Default)]
pub struct ProgressTracker {
    processed: AtomicUsize,
}

impl ProgressTracker {
    /// Create a new progress tracker.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            processed: AtomicUsize::new(0),
        }
    }

    /// Count one more completed file and return the new count.
    pub fn advance(&self) -> usize {
        self.processed.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Get the current completed count.
    #[must_use]
    pub fn processed(&self) -> usize {
        self.processed.load(Ordering::SeqCst)
    }
}
