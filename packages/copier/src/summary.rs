//! Result aggregation and the final batch summary.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

use crate::copy::{CopyOutcome, CopyResult};
use crate::progress::FileStatus;

/// Aggregate result of a batch. Built once, when the batch finishes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopySummary {
    /// Number of files handed to the batch.
    pub total_files: usize,
    /// Files copied (or, in dry-run, that would have been).
    pub successful: usize,
    /// Files whose every attempt failed.
    pub failed: usize,
    /// Files skipped because the destination existed.
    pub skipped: usize,
    /// Files abandoned mid-retry because the batch was cancelled.
    pub cancelled: usize,
    /// Wall-clock time from batch start to finish.
    pub duration: Duration,
    /// `"filename: error"` for every failed file, in completion order.
    pub failed_files: Vec<String>,
}

impl CopySummary {
    /// Files that reached a terminal state.
    #[must_use]
    pub const fn processed(&self) -> usize {
        self.successful + self.failed + self.skipped + self.cancelled
    }

    /// Files that were never started, typically because of cancellation.
    #[must_use]
    pub const fn not_started(&self) -> usize {
        self.total_files.saturating_sub(self.processed())
    }

    /// Whether every file was copied or skipped.
    #[must_use]
    pub const fn is_complete_success(&self) -> bool {
        self.failed == 0 && self.cancelled == 0 && self.not_started() == 0
    }
}

/// Thread-safe accumulator shared by all workers of a batch.
#[derive(Debug)]
pub struct BatchAggregator {
    started: Instant,
    successful: AtomicUsize,
    failed: AtomicUsize,
    skipped: AtomicUsize,
    cancelled: AtomicUsize,
    failed_files: Mutex<Vec<String>>,
}

impl BatchAggregator {
    /// Start timing a new batch.
    #[must_use]
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
            successful: AtomicUsize::new(0),
            failed: AtomicUsize::new(0),
            skipped: AtomicUsize::new(0),
            cancelled: AtomicUsize::new(0),
            failed_files: Mutex::new(Vec::new()),
        }
    }

    /// Fold one file's result into the counters.
    ///
    /// Exactly one counter is incremented per call.
    pub fn record(&self, result: &CopyResult) -> FileStatus {
        match &result.outcome {
            CopyOutcome::Success => {
                self.successful.fetch_add(1, Ordering::SeqCst);
                FileStatus::Success
            }
            CopyOutcome::Skipped => {
                self.skipped.fetch_add(1, Ordering::SeqCst);
                FileStatus::Skipped
            }
            CopyOutcome::Failed(e) if e.is_cancelled() => {
                self.cancelled.fetch_add(1, Ordering::SeqCst);
                FileStatus::Cancelled
            }
            CopyOutcome::Failed(e) => {
                self.failed.fetch_add(1, Ordering::SeqCst);
                self.failed_files
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .push(format!("{}: {e}", result.file_name));
                FileStatus::Failed
            }
        }
    }

    /// Build the final summary for a batch of `total_files`.
    #[must_use]
    pub fn finish(self, total_files: usize) -> CopySummary {
        CopySummary {
            total_files,
            successful: self.successful.into_inner(),
            failed: self.failed.into_inner(),
            skipped: self.skipped.into_inner(),
            cancelled: self.cancelled.into_inner(),
            duration: self.started.elapsed(),
            failed_files: self
                .failed_files
                .into_inner()
                .unwrap_or_else(PoisonError::into_inner),
        }
    }
}

impl Default for BatchAggregator {
    fn default() -> Self {
        Self::new()
    }
}
