//! Single-file copy.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use crate::cancel::CancelToken;
use crate::error::CopyError;
use crate::probe::is_file_locked;

/// Outcome of copying one file, including its retries.
#[derive(Debug)]
pub enum CopyOutcome {
    /// The file was copied (or, in dry-run, would have been).
    Success,
    /// Destination already existed and overwrite is disabled.
    Skipped,
    /// Every attempt failed; carries the last error.
    Failed(CopyError),
}

/// Result of copying a single file.
#[derive(Debug)]
pub struct CopyResult {
    /// Base name of the source file.
    pub file_name: String,
    /// What happened to the file.
    pub outcome: CopyOutcome,
}

impl CopyResult {
    /// Create a successful result.
    #[must_use]
    pub fn success(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            outcome: CopyOutcome::Success,
        }
    }

    /// Create a skipped result.
    #[must_use]
    pub fn skipped(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            outcome: CopyOutcome::Skipped,
        }
    }

    /// Create a failed result.
    #[must_use]
    pub fn failed(file_name: impl Into<String>, error: CopyError) -> Self {
        Self {
            file_name: file_name.into(),
            outcome: CopyOutcome::Failed(error),
        }
    }

    /// Whether the file was copied.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self.outcome, CopyOutcome::Success)
    }

    /// Whether the file was skipped.
    #[must_use]
    pub const fn is_skipped(&self) -> bool {
        matches!(self.outcome, CopyOutcome::Skipped)
    }

    /// The error, if the file failed.
    #[must_use]
    pub const fn error(&self) -> Option<&CopyError> {
        match &self.outcome {
            CopyOutcome::Failed(e) => Some(e),
            _ => None,
        }
    }
}

/// Base name of `path` as a display string.
#[must_use]
pub fn file_name_of(path: &Path) -> String {
    path.file_name().map_or_else(
        || path.to_string_lossy().to_string(),
        |n| n.to_string_lossy().to_string(),
    )
}

/// Where `source` lands inside `destination`.
#[must_use]
pub fn destination_path(source: &Path, destination: &Path) -> PathBuf {
    match source.file_name() {
        Some(name) => destination.join(name),
        None => destination.join(source),
    }
}

/// Whether both paths resolve to the same file on disk.
fn is_same_file(source: &Path, target: &Path) -> bool {
    match (fs::canonicalize(source), fs::canonicalize(target)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Copy one file into `destination`.
///
/// If the destination file already exists and `overwrite` is false, nothing
/// is written and `Ok(())` is returned. The destination is synced to disk
/// before returning success. A failed stream leaves the partial destination
/// in place; the next attempt truncates it.
///
/// # Arguments
///
/// * `source` - Source file path
/// * `destination` - Destination directory
/// * `overwrite` - Replace an existing destination file
/// * `cancel` - Checked once on entry
///
/// # Errors
///
/// * If the token is already cancelled
/// * If the target is the source file itself
/// * If the source cannot be opened for reading
/// * If the destination directory cannot be created
/// * If opening, creating, streaming or syncing fails
pub fn copy_one(
    source: &Path,
    destination: &Path,
    overwrite: bool,
    cancel: &CancelToken,
) -> Result<(), CopyError> {
    if cancel.is_cancelled() {
        return Err(CopyError::Cancelled);
    }

    let target = destination_path(source, destination);
    log::debug!("Copying file: {} -> {}", source.display(), target.display());

    if target.exists() && !overwrite {
        log::debug!("Target already exists");
        return Ok(());
    }

    if target.exists() && is_same_file(source, &target) {
        return Err(CopyError::SameFile {
            path: source.to_path_buf(),
        });
    }

    if is_file_locked(source) {
        return Err(CopyError::SourceLocked {
            path: source.to_path_buf(),
        });
    }

    fs::create_dir_all(destination).map_err(|e| CopyError::CreateDirError {
        path: destination.to_path_buf(),
        io_error: e,
    })?;

    let mut reader = File::open(source).map_err(|e| CopyError::OpenSourceError {
        path: source.to_path_buf(),
        io_error: e,
    })?;

    let mut writer = File::create(&target).map_err(|e| CopyError::CreateTargetError {
        path: target.clone(),
        io_error: e,
    })?;

    let bytes = io::copy(&mut reader, &mut writer).map_err(|e| CopyError::StreamError {
        source_path: source.to_path_buf(),
        target_path: target.clone(),
        io_error: e,
    })?;

    writer.sync_all().map_err(|e| CopyError::SyncError {
        path: target.clone(),
        io_error: e,
    })?;

    log::trace!(
        "Copied {} bytes {} -> {}",
        bytes,
        source.display(),
        target.display()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_copy_one_creates_new() {
        let src = TempDir::new().unwrap();
        let dst = TempDir::new().unwrap();
        let source = src.path().join("photo.jpg");
        fs::write(&source, "hello world").unwrap();

        copy_one(&source, dst.path(), false, &CancelToken::new()).unwrap();

        assert_eq!(
            fs::read_to_string(dst.path().join("photo.jpg")).unwrap(),
            "hello world"
        );
    }

    #[test]
    fn test_copy_one_keeps_existing_without_overwrite() {
        let src = TempDir::new().unwrap();
        let dst = TempDir::new().unwrap();
        let source = src.path().join("photo.jpg");
        fs::write(&source, "source content").unwrap();
        fs::write(dst.path().join("photo.jpg"), "target content").unwrap();

        copy_one(&source, dst.path(), false, &CancelToken::new()).unwrap();

        assert_eq!(
            fs::read_to_string(dst.path().join("photo.jpg")).unwrap(),
            "target content"
        );
    }

    #[test]
    fn test_copy_one_overwrites_existing() {
        let src = TempDir::new().unwrap();
        let dst = TempDir::new().unwrap();
        let source = src.path().join("photo.jpg");
        fs::write(&source, "new").unwrap();
        fs::write(dst.path().join("photo.jpg"), "much longer old content").unwrap();

        copy_one(&source, dst.path(), true, &CancelToken::new()).unwrap();

        assert_eq!(fs::read(dst.path().join("photo.jpg")).unwrap(), b"new");
    }

    #[test]
    fn test_copy_one_creates_destination_directory() {
        let src = TempDir::new().unwrap();
        let dst = TempDir::new().unwrap();
        let source = src.path().join("photo.jpg");
        fs::write(&source, "content").unwrap();
        let nested = dst.path().join("a/b/c");

        copy_one(&source, &nested, false, &CancelToken::new()).unwrap();

        assert!(nested.join("photo.jpg").exists());
    }

    #[test]
    fn test_copy_one_missing_source_is_locked() {
        let src = TempDir::new().unwrap();
        let dst = TempDir::new().unwrap();
        let source = src.path().join("missing.jpg");

        let err = copy_one(&source, dst.path(), false, &CancelToken::new()).unwrap_err();

        assert!(matches!(err, CopyError::SourceLocked { .. }));
        assert!(!dst.path().join("missing.jpg").exists());
    }

    #[test]
    fn test_copy_one_cancelled_does_no_work() {
        let src = TempDir::new().unwrap();
        let dst = TempDir::new().unwrap();
        let source = src.path().join("photo.jpg");
        fs::write(&source, "content").unwrap();
        let target_dir = dst.path().join("out");

        let cancel = CancelToken::new();
        cancel.cancel();
        let err = copy_one(&source, &target_dir, true, &cancel).unwrap_err();

        assert!(err.is_cancelled());
        assert!(!target_dir.exists());
    }

    #[test]
    fn test_copy_one_into_own_directory_keeps_source() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("a.jpg");
        fs::write(&source, "hello").unwrap();

        let err = copy_one(&source, dir.path(), true, &CancelToken::new()).unwrap_err();

        assert!(matches!(err, CopyError::SameFile { .. }));
        assert!(!err.is_retryable());
        assert_eq!(fs::read(&source).unwrap(), b"hello");
    }

    #[test]
    fn test_copy_one_into_own_directory_via_dotted_path() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        let source = dir.path().join("a.jpg");
        fs::write(&source, "hello").unwrap();
        let same = dir.path().join("sub").join("..");

        let err = copy_one(&source, &same, true, &CancelToken::new()).unwrap_err();

        assert!(matches!(err, CopyError::SameFile { .. }));
        assert_eq!(fs::read(&source).unwrap(), b"hello");
    }

    #[test]
    fn test_copy_one_large_content() {
        let src = TempDir::new().unwrap();
        let dst = TempDir::new().unwrap();
        let source = src.path().join("large.bin");
        let content: Vec<u8> = (0..1_048_576u32).map(|i| (i % 251) as u8).collect();
        fs::write(&source, &content).unwrap();

        copy_one(&source, dst.path(), false, &CancelToken::new()).unwrap();

        assert_eq!(fs::read(dst.path().join("large.bin")).unwrap(), content);
    }

    #[test]
    fn test_copy_result_is_three_way() {
        let ok = CopyResult::success("a.jpg");
        assert!(ok.is_success() && !ok.is_skipped() && ok.error().is_none());

        let skipped = CopyResult::skipped("a.jpg");
        assert!(!skipped.is_success() && skipped.is_skipped() && skipped.error().is_none());

        let failed = CopyResult::failed("a.jpg", CopyError::Cancelled);
        assert!(!failed.is_success() && !failed.is_skipped() && failed.error().is_some());
    }

    #[test]
    fn test_destination_path_uses_base_name() {
        assert_eq!(
            destination_path(Path::new("/src/photos/a.jpg"), Path::new("/dst")),
            PathBuf::from("/dst/a.jpg")
        );
        assert_eq!(file_name_of(Path::new("/src/photos/a.jpg")), "a.jpg");
    }
}
