//! Error types for job planning.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use thiserror::Error;

/// Errors that can occur while planning copy jobs.
#[derive(Debug, Error)]
pub enum OperationError {
    /// The configuration is incomplete.
    #[error("Invalid configuration: {0}")]
    ConfigError(#[from] copy_image_config::ConfigError),

    /// A job would copy a directory onto itself.
    #[error("Destination is the source directory for {label}: {}", path.display())]
    SameDirectory {
        /// Label of the offending job.
        label: String,
        /// The shared directory.
        path: std::path::PathBuf,
    },

    /// A source directory could not be listed.
    #[error("Failed to scan files for {label}: {error}")]
    ListError {
        /// Label of the job whose source failed.
        label: String,
        /// The underlying copy error.
        #[source]
        error: copy_image_copier::CopyError,
    },
}
