//! JSON-lines progress events for machine consumers.
//!
//! One JSON object is written per line to stdout. Every object carries a
//! `type` tag: `start`, `progress`, `complete` or `cancelled`.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::io::{self, Write};
use std::sync::Mutex;

use copy_image_copier::{CopySummary, ProgressEvent, ProgressSink};
use serde::Serialize;

/// A line of JSON output.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum JsonEvent {
    /// A job is about to start.
    #[serde(rename_all = "camelCase")]
    Start {
        /// Job label.
        job: String,
        /// Number of files in the job.
        total_files: usize,
    },
    /// A file finished.
    #[serde(rename_all = "camelCase")]
    Progress {
        /// Files completed so far.
        current: usize,
        /// Files in the job.
        total: usize,
        /// Base name of the file.
        file_name: String,
        /// `success`, `skipped`, `failed` or `cancelled`.
        status: String,
        /// Completed share of the job in percent.
        percentage: f64,
    },
    /// A job finished.
    #[serde(rename_all = "camelCase")]
    Complete {
        /// Job label.
        job: String,
        /// Files in the job.
        total_files: usize,
        /// Files copied.
        successful: usize,
        /// Files that failed every attempt.
        failed: usize,
        /// Files kept because they already existed.
        skipped: usize,
        /// Files abandoned or never started after cancellation.
        cancelled: usize,
        /// Wall-clock duration in milliseconds.
        duration_ms: u64,
        /// Names of failed files.
        failed_files: Vec<String>,
    },
    /// The run was interrupted.
    Cancelled,
}

impl JsonEvent {
    /// Build a `progress` line from a batch event.
    #[must_use]
    pub fn progress(event: &ProgressEvent) -> Self {
        Self::Progress {
            current: event.current,
            total: event.total,
            file_name: event.file_name.clone(),
            status: event.status.to_string(),
            percentage: event.percentage(),
        }
    }

    /// Build a `complete` line from a job summary.
    #[must_use]
    pub fn complete(job: &str, summary: &CopySummary) -> Self {
        Self::Complete {
            job: job.to_string(),
            total_files: summary.total_files,
            successful: summary.successful,
            failed: summary.failed,
            skipped: summary.skipped,
            cancelled: summary.cancelled + summary.not_started(),
            duration_ms: u64::try_from(summary.duration.as_millis()).unwrap_or(u64::MAX),
            failed_files: summary.failed_files.clone(),
        }
    }
}

/// [`ProgressSink`] that writes JSON lines.
pub struct JsonEventSink<W: Write + Send> {
    writer: Mutex<W>,
}

impl JsonEventSink<io::Stdout> {
    /// Sink writing to stdout.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> JsonEventSink<W> {
    /// Sink writing to `writer`.
    pub const fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Write one event as a single line.
    pub fn emit(&self, event: &JsonEvent) {
        let line = match serde_json::to_string(event) {
            Ok(line) => line,
            Err(e) => {
                log::warn!("Failed to serialize event: {e}");
                return;
            }
        };

        let mut writer = self
            .writer
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        if let Err(e) = writeln!(writer, "{line}").and_then(|()| writer.flush()) {
            log::warn!("Failed to write event: {e}");
        }
    }

    /// Consume the sink and return the writer.
    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl<W: Write + Send> ProgressSink for JsonEventSink<W> {
    fn report(&self, event: &ProgressEvent) {
        self.emit(&JsonEvent::progress(event));
    }
}
