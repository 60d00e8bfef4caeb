//! Configuration file discovery.
//!
//! Looks for the config file in the working directory, next to the
//! executable, and in the platform config directory, in that order.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::env;
use std::path::{Path, PathBuf};

/// Default configuration file name.
pub const DEFAULT_CONFIG_FILE: &str = "copy-image.toml";

/// Application directory name under the platform config directory.
const APP_DIR: &str = "copy-image";

/// Candidate locations for `file_name`, most specific first.
///
/// An absolute `file_name` is its own only candidate.
#[must_use]
pub fn config_search_paths(file_name: &Path) -> Vec<PathBuf> {
    if file_name.is_absolute() {
        return vec![file_name.to_path_buf()];
    }

    let mut paths = Vec::new();

    if let Ok(cwd) = env::current_dir() {
        paths.push(cwd.join(file_name));
    }

    if let Some(exe_dir) = env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
    {
        paths.push(exe_dir.join(file_name));
    }

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join(APP_DIR).join(file_name));
    }

    paths.dedup();
    paths
}

/// Find the first existing file among `candidates`.
#[must_use]
pub fn find_existing(candidates: &[PathBuf]) -> Option<PathBuf> {
    candidates.iter().find(|p| p.is_file()).cloned()
}

/// Discover the configuration file named `file_name`.
///
/// Returns `None` when no candidate location holds the file.
#[must_use]
pub fn discover_config(file_name: &Path) -> Option<PathBuf> {
    let candidates = config_search_paths(file_name);
    let found = find_existing(&candidates);

    match &found {
        Some(path) => log::debug!("Found config at {}", path.display()),
        None => log::debug!("No {} found in {:?}", file_name.display(), candidates),
    }

    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_absolute_path_is_only_candidate() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("custom.toml");

        assert_eq!(config_search_paths(&path), vec![path]);
    }

    #[test]
    fn test_relative_name_searches_working_directory_first() {
        let paths = config_search_paths(Path::new(DEFAULT_CONFIG_FILE));

        let cwd = env::current_dir().unwrap();
        assert_eq!(paths.first(), Some(&cwd.join(DEFAULT_CONFIG_FILE)));
        assert!(paths.iter().all(|p| p.ends_with(DEFAULT_CONFIG_FILE)));
    }

    #[test]
    fn test_find_existing_picks_first_match() {
        let first = TempDir::new().unwrap();
        let second = TempDir::new().unwrap();
        let third = TempDir::new().unwrap();
        fs::write(second.path().join("c.toml"), "").unwrap();
        fs::write(third.path().join("c.toml"), "").unwrap();

        let candidates = vec![
            first.path().join("c.toml"),
            second.path().join("c.toml"),
            third.path().join("c.toml"),
        ];

        assert_eq!(find_existing(&candidates), Some(second.path().join("c.toml")));
    }

    #[test]
    fn test_find_existing_none() {
        let dir = TempDir::new().unwrap();

        assert_eq!(find_existing(&[dir.path().join("c.toml")]), None);
    }
}
