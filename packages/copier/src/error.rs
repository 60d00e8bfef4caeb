//! Error types for copy operations.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::path::PathBuf;

/// Errors that can occur during copy operations.
#[derive(Debug, thiserror::Error)]
pub enum CopyError {
    /// The batch was cancelled before or while this file was being handled.
    #[error("operation cancelled")]
    Cancelled,

    /// Source file could not be opened for reading (locked, denied or missing).
    #[error("file is locked by another process: {}", path.display())]
    SourceLocked {
        /// The source file path.
        path: PathBuf,
    },

    /// Source and destination resolve to the same file.
    #[error("source and destination are the same file: {}", path.display())]
    SameFile {
        /// The source file path.
        path: PathBuf,
    },

    /// Source directory does not exist.
    #[error("source directory does not exist: {}", path.display())]
    SourceDirNotFound {
        /// The directory path.
        path: PathBuf,
    },

    /// Failed to read source directory.
    #[error("Failed to read source directory {}: {message}", path.display())]
    ReadDirError {
        /// The directory path.
        path: PathBuf,
        /// Error message from the directory walker.
        message: String,
    },

    /// Failed to create destination directory.
    #[error("Failed to create destination directory {}: {io_error}", path.display())]
    CreateDirError {
        /// The directory path.
        path: PathBuf,
        /// The underlying IO error.
        io_error: std::io::Error,
    },

    /// Failed to open the source file.
    #[error("Failed to open source file {}: {io_error}", path.display())]
    OpenSourceError {
        /// The source file path.
        path: PathBuf,
        /// The underlying IO error.
        io_error: std::io::Error,
    },

    /// Failed to create or truncate the destination file.
    #[error("Failed to create destination file {}: {io_error}", path.display())]
    CreateTargetError {
        /// The destination file path.
        path: PathBuf,
        /// The underlying IO error.
        io_error: std::io::Error,
    },

    /// Failed while streaming bytes; the destination may be truncated.
    #[error("Failed to copy {} to {}: {io_error}", source_path.display(), target_path.display())]
    StreamError {
        /// Source file path.
        source_path: PathBuf,
        /// Target file path.
        target_path: PathBuf,
        /// The underlying IO error.
        io_error: std::io::Error,
    },

    /// Failed to flush the destination file to stable storage.
    #[error("Failed to sync file {}: {io_error}", path.display())]
    SyncError {
        /// The destination file path.
        path: PathBuf,
        /// The underlying IO error.
        io_error: std::io::Error,
    },
}

impl CopyError {
    /// Whether this error was caused by cancellation rather than I/O.
    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// Whether another attempt could succeed.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        !matches!(self, Self::Cancelled | Self::SameFile { .. })
    }
}
