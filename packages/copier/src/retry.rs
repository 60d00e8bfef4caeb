//! Retry wrapper around the single-file copy.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::path::Path;
use std::time::Duration;

use crate::cancel::CancelToken;
use crate::copy::{CopyResult, copy_one, destination_path, file_name_of};
use crate::error::CopyError;
use crate::settings::CopySettings;

/// Base unit of the backoff between attempts.
pub const BACKOFF_STEP: Duration = Duration::from_millis(100);

/// Delay after failed attempt `attempt` (zero-based): 100ms, 200ms, 300ms, ...
#[must_use]
pub fn backoff_delay(attempt: u32) -> Duration {
    BACKOFF_STEP.saturating_mul(attempt.saturating_add(1))
}

/// Copy a file into `settings.destination`, retrying on failure.
///
/// A destination that already exists with overwrite disabled is reported as
/// skipped without any attempt. Otherwise up to `max_retries + 1` attempts are
/// made, with a cancellable [`backoff_delay`] between them.
#[must_use]
pub fn copy_with_retry(source: &Path, settings: &CopySettings, cancel: &CancelToken) -> CopyResult {
    retry_copy(source, settings, cancel, |cancel| {
        copy_one(source, &settings.destination, settings.overwrite, cancel)
    })
}

/// Retry loop shared by [`copy_with_retry`] and tests that count attempts.
pub(crate) fn retry_copy<F>(
    source: &Path,
    settings: &CopySettings,
    cancel: &CancelToken,
    mut attempt_copy: F,
) -> CopyResult
where
    F: FnMut(&CancelToken) -> Result<(), CopyError>,
{
    let file_name = file_name_of(source);

    if !settings.overwrite && destination_path(source, &settings.destination).exists() {
        log::debug!("Skipping {file_name}: already exists at destination");
        return CopyResult::skipped(file_name);
    }

    let mut attempt: u32 = 0;
    loop {
        if cancel.is_cancelled() {
            return CopyResult::failed(file_name, CopyError::Cancelled);
        }

        match attempt_copy(cancel) {
            Ok(()) => return CopyResult::success(file_name),
            Err(e) if !e.is_retryable() || attempt >= settings.max_retries => {
                log::debug!(
                    "Giving up on {file_name} after {} attempt(s): {e}",
                    attempt + 1
                );
                return CopyResult::failed(file_name, e);
            }
            Err(e) => {
                let delay = backoff_delay(attempt);
                log::warn!(
                    "Attempt {} for {file_name} failed, retrying in {}ms: {e}",
                    attempt + 1,
                    delay.as_millis()
                );
                if cancel.wait_timeout(delay) {
                    return CopyResult::failed(file_name, CopyError::Cancelled);
                }
                attempt += 1;
            }
        }
    }
}
