//! Bounded parallel file copying with retries, cancellation and progress.
//!
//! This crate is the copy engine behind `copy-image`:
//!
//! * Flat source listing with a case-insensitive extension filter (`jwalk`)
//! * Single-file copy that honors the overwrite policy and syncs to disk
//! * Linear-backoff retries that stop early on cancellation
//! * A worker pool (`rayon`) capped at the configured worker count
//! * Thread-safe aggregation into a final [`CopySummary`]
//! * Progress reporting through the [`ProgressSink`] trait
//!
//! # Example
//!
//! ```rust,ignore
//! use copy_image_copier::{
//!     CancelToken, CopySettings, ExtensionFilter, ProgressEvent, copy_batch_with_events,
//!     list_files,
//! };
//!
//! let files = list_files(source, &ExtensionFilter::new([".jpg", ".png"]))?;
//! let settings = CopySettings::new(destination).with_workers(4);
//! let cancel = CancelToken::new();
//!
//! let summary = copy_batch_with_events(&files, &settings, &cancel, &|event: &ProgressEvent| {
//!     println!("{}/{} {} {}", event.current, event.total, event.file_name, event.status);
//! });
//! println!("{} copied, {} failed", summary.successful, summary.failed);
//! ```

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

mod cancel;
mod copy;
mod error;
mod list;
mod probe;
mod progress;
mod retry;
mod scheduler;
mod settings;
mod summary;

pub use cancel::CancelToken;
pub use copy::{CopyOutcome, CopyResult, copy_one, destination_path, file_name_of};
pub use error::CopyError;
pub use list::{ExtensionFilter, list_files};
pub use probe::is_file_locked;
pub use progress::{FileStatus, NoProgress, ProgressEvent, ProgressSink, ProgressTracker};
pub use retry::{BACKOFF_STEP, backoff_delay, copy_with_retry};
pub use scheduler::{copy_batch_blocking, copy_batch_with_events};
pub use settings::{CopySettings, DEFAULT_MAX_RETRIES, DEFAULT_WORKERS, MAX_WORKERS};
pub use summary::{BatchAggregator, CopySummary};
