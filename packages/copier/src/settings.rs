//! Per-batch copy settings.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::path::PathBuf;

/// Default number of concurrent workers.
pub const DEFAULT_WORKERS: usize = 10;

/// Upper bound for the worker count.
pub const MAX_WORKERS: usize = 50;

/// Default number of retries after the first failed attempt.
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Settings for one batch. Read-only while the batch runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopySettings {
    /// Directory every file is copied into.
    pub destination: PathBuf,
    /// Maximum number of files copied at once.
    pub workers: usize,
    /// Replace files that already exist at the destination.
    pub overwrite: bool,
    /// Retries after the first failed attempt.
    pub max_retries: u32,
    /// Report what would be copied without touching the filesystem.
    pub dry_run: bool,
}

impl CopySettings {
    /// Create settings for `destination` with default values.
    #[must_use]
    pub fn new(destination: impl Into<PathBuf>) -> Self {
        Self {
            destination: destination.into(),
            workers: DEFAULT_WORKERS,
            overwrite: false,
            max_retries: DEFAULT_MAX_RETRIES,
            dry_run: false,
        }
    }

    /// Set the worker count.
    #[must_use]
    pub const fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Set the overwrite flag.
    #[must_use]
    pub const fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Set the retry count.
    #[must_use]
    pub const fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Set the dry-run flag.
    #[must_use]
    pub const fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Worker count clamped to `1..=MAX_WORKERS`.
    #[must_use]
    pub fn effective_workers(&self) -> usize {
        self.workers.clamp(1, MAX_WORKERS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = CopySettings::new("/dst");

        assert_eq!(settings.destination, PathBuf::from("/dst"));
        assert_eq!(settings.workers, 10);
        assert_eq!(settings.max_retries, 3);
        assert!(!settings.overwrite);
        assert!(!settings.dry_run);
    }

    #[test]
    fn test_effective_workers_clamps() {
        assert_eq!(CopySettings::new("/dst").with_workers(0).effective_workers(), 1);
        assert_eq!(CopySettings::new("/dst").with_workers(7).effective_workers(), 7);
        assert_eq!(CopySettings::new("/dst").with_workers(500).effective_workers(), 50);
    }
}
