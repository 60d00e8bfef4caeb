//! Progress bar utilities for the CLI.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use colored::Colorize;
use copy_image_copier::{FileStatus, ProgressEvent, ProgressSink};
use indicatif::{ProgressBar, ProgressStyle};

/// Progress bar manager for copy jobs.
pub struct ProgressManager {
    enabled: bool,
    dry_run: bool,
}

impl ProgressManager {
    /// Create a new progress manager.
    #[must_use]
    pub const fn new(enabled: bool, dry_run: bool) -> Self {
        Self { enabled, dry_run }
    }

    /// Create a console sink with a bar sized for `total` files.
    ///
    /// If progress is disabled, the bar is hidden but failures are still printed.
    #[must_use]
    pub fn create_sink(&self, total: usize) -> ConsoleProgress {
        let bar = if self.enabled {
            let pb = ProgressBar::new(total as u64);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("  Copying [{bar:30.green/dim}] {pos}/{len} ({percent}%) {msg}")
                    .expect("Invalid progress bar template")
                    .progress_chars("━━─"),
            );
            pb
        } else {
            ProgressBar::hidden()
        };

        ConsoleProgress {
            bar,
            dry_run: self.dry_run,
        }
    }
}

/// Console [`ProgressSink`] backed by an indicatif bar.
pub struct ConsoleProgress {
    bar: ProgressBar,
    dry_run: bool,
}

impl ConsoleProgress {
    /// Remove the bar from the terminal.
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }

    /// Line to print above the bar for `event`, if any.
    fn notice(&self, event: &ProgressEvent) -> Option<String> {
        match event.status {
            FileStatus::Success if self.dry_run => Some(format!(
                "  {} Would copy: {}",
                "[DRY-RUN]".yellow(),
                event.file_name
            )),
            FileStatus::Failed => Some(format!("  {} {}", "✗".red(), event.file_name)),
            FileStatus::Success | FileStatus::Skipped | FileStatus::Cancelled => None,
        }
    }
}

impl ProgressSink for ConsoleProgress {
    fn report(&self, event: &ProgressEvent) {
        if let Some(line) = self.notice(event) {
            self.bar.println(line);
        }

        self.bar.set_message(event.file_name.clone());
        self.bar.inc(1);
    }
}
