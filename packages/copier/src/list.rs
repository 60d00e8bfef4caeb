//! Flat source directory listing with extension filtering.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::error::CopyError;

/// Case-insensitive extension allow-list.
///
/// Entries are stored lowercase with a leading dot. An empty filter allows
/// every file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtensionFilter {
    allowed: BTreeSet<String>,
}

impl ExtensionFilter {
    /// Build a filter from extensions such as `".jpg"`, `"PNG"` or `" .Tif "`.
    ///
    /// Blank entries are ignored.
    #[must_use]
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let allowed = extensions
            .into_iter()
            .filter_map(|ext| {
                let ext = ext.as_ref().trim().to_lowercase();
                if ext.is_empty() || ext == "." {
                    None
                } else if ext.starts_with('.') {
                    Some(ext)
                } else {
                    Some(format!(".{ext}"))
                }
            })
            .collect();

        Self { allowed }
    }

    /// Filter that allows every file.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Whether any extension restriction is in effect.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.allowed.is_empty()
    }

    /// Whether a dotted extension (e.g. `".JPG"`) passes the filter.
    #[must_use]
    pub fn allows_extension(&self, ext: &str) -> bool {
        !self.is_active() || self.allowed.contains(&ext.to_lowercase())
    }

    /// Whether a path's extension passes the filter.
    #[must_use]
    pub fn allows(&self, path: &Path) -> bool {
        if !self.is_active() {
            return true;
        }

        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| self.allows_extension(&format!(".{e}")))
    }

    /// The normalized extensions, sorted.
    pub fn extensions(&self) -> impl Iterator<Item = &str> {
        self.allowed.iter().map(String::as_str)
    }
}

/// List the files directly inside `source` that pass `filter`.
///
/// The listing is flat: subdirectories (and symlinks to directories) are not
/// returned or descended into. Paths are returned sorted by file name.
///
/// # Errors
///
/// * If `source` does not exist or is not a directory
/// * If the directory cannot be read
pub fn list_files(source: &Path, filter: &ExtensionFilter) -> Result<Vec<PathBuf>, CopyError> {
    log::debug!("Listing files in {}", source.display());

    if !source.is_dir() {
        return Err(CopyError::SourceDirNotFound {
            path: source.to_path_buf(),
        });
    }

    let mut files = Vec::new();

    for entry in jwalk::WalkDir::new(source)
        .min_depth(1)
        .max_depth(1)
        .skip_hidden(false)
        .follow_links(false)
        .sort(true)
    {
        let entry = entry.map_err(|e| CopyError::ReadDirError {
            path: source.to_path_buf(),
            message: e.to_string(),
        })?;

        let path = entry.path();
        let file_type = entry.file_type();
        if file_type.is_dir() || (file_type.is_symlink() && path.is_dir()) {
            continue;
        }

        if !filter.allows(&path) {
            log::trace!("Filtered out {}", path.display());
            continue;
        }

        files.push(path);
    }

    log::debug!("Found {} files to copy", files.len());

    Ok(files)
}
