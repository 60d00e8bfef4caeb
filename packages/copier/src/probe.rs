//! Read-access probe used as a gate before copying.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::fs::File;
use std::path::Path;

/// Check whether a file currently cannot be opened for reading.
///
/// Only read access is probed since that is all a copy needs; asking for
/// write access would flag read-only files and shares as locked.
///
/// A file that is locked, unreadable, or missing all report `true`.
#[must_use]
pub fn is_file_locked(path: &Path) -> bool {
    match File::open(path) {
        Ok(_) => false,
        Err(e) => {
            log::trace!("Probe failed for {}: {e}", path.display());
            true
        }
    }
}
