//! Configuration types for copy-image.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::path::PathBuf;

use copy_image_copier::{
    CopySettings, DEFAULT_MAX_RETRIES, DEFAULT_WORKERS, ExtensionFilter, MAX_WORKERS,
};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// One destination of a copy group, with its own overwrite policy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Destination {
    /// Identifier, unique within the group.
    pub id: String,
    /// Destination directory.
    pub path: String,
    /// Replace files that already exist here.
    pub overwrite: bool,
    /// Whether this destination takes part in copies.
    pub enabled: bool,
}

/// One source directory copied to several destinations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CopyGroup {
    /// Identifier, unique within the config.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Source directory.
    pub source: String,
    /// Whether this group takes part in copies.
    pub enabled: bool,
    /// Where files from `source` go.
    pub destinations: Vec<Destination>,
}

impl CopyGroup {
    /// Destinations that are enabled and have a path.
    pub fn enabled_destinations(&self) -> impl Iterator<Item = &Destination> {
        self.destinations
            .iter()
            .filter(|d| d.enabled && !d.path.trim().is_empty())
    }
}

/// copy-image configuration.
///
/// Supports a single source/destination pair as well as copy groups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Source directory for single-pair mode.
    pub source: String,

    /// Destination directory for single-pair mode.
    pub destination: String,

    /// Number of files copied at once. Clamped to `1..=50` by [`Config::validate`].
    pub workers: i64,

    /// Replace files that already exist at the destination.
    pub overwrite: bool,

    /// Extensions to include (e.g. `".jpg"`). Empty means all files.
    pub extensions: Vec<String>,

    /// Retries after the first failed attempt. Negative values become 0.
    pub max_retries: i64,

    /// Report what would be copied without copying.
    pub dry_run: bool,

    /// Copy groups, each with one source and several destinations.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<CopyGroup>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: String::new(),
            destination: String::new(),
            workers: i64::try_from(DEFAULT_WORKERS).unwrap_or(10),
            overwrite: false,
            extensions: Vec::new(),
            max_retries: i64::from(DEFAULT_MAX_RETRIES),
            dry_run: false,
            groups: Vec::new(),
        }
    }
}

impl Config {
    /// Check the configuration and normalize out-of-range values.
    ///
    /// Without copy groups, both `source` and `destination` are required.
    /// `workers` is clamped to `1..=50` and negative `max_retries` become 0.
    ///
    /// # Errors
    ///
    /// * If no groups are configured and the source is empty
    /// * If no groups are configured and the destination is empty
    pub fn validate(&mut self) -> Result<(), ConfigError> {
        if self.groups.is_empty() {
            if self.source.trim().is_empty() {
                return Err(ConfigError::MissingSource);
            }
            if self.destination.trim().is_empty() {
                return Err(ConfigError::MissingDestination);
            }
        }

        let max_workers = i64::try_from(MAX_WORKERS).unwrap_or(50);
        if !(1..=max_workers).contains(&self.workers) {
            log::debug!("Clamping workers from {}", self.workers);
            self.workers = self.workers.clamp(1, max_workers);
        }

        if self.max_retries < 0 {
            log::debug!("Clamping max_retries from {}", self.max_retries);
            self.max_retries = 0;
        }

        Ok(())
    }

    /// Whether extension filtering is enabled.
    #[must_use]
    pub fn has_extension_filter(&self) -> bool {
        self.extensions.iter().any(|e| !e.trim().is_empty())
    }

    /// Whether a dotted extension passes the configured filter (case-insensitive).
    #[must_use]
    pub fn is_extension_allowed(&self, ext: &str) -> bool {
        self.extension_filter().allows_extension(ext)
    }

    /// The configured extension filter.
    #[must_use]
    pub fn extension_filter(&self) -> ExtensionFilter {
        ExtensionFilter::new(&self.extensions)
    }

    /// Build batch settings for one destination.
    #[must_use]
    pub fn copy_settings(&self, destination: impl Into<PathBuf>, overwrite: bool) -> CopySettings {
        CopySettings::new(destination)
            .with_workers(usize::try_from(self.workers).unwrap_or(1))
            .with_overwrite(overwrite)
            .with_max_retries(u32::try_from(self.max_retries.max(0)).unwrap_or(u32::MAX))
            .with_dry_run(self.dry_run)
    }

    /// Groups that are enabled.
    pub fn enabled_groups(&self) -> impl Iterator<Item = &CopyGroup> {
        self.groups.iter().filter(|g| g.enabled)
    }

    /// Add a copy group.
    pub fn add_group(&mut self, group: CopyGroup) {
        self.groups.push(group);
    }

    /// Remove the group with `group_id`. Returns whether one was removed.
    pub fn remove_group(&mut self, group_id: &str) -> bool {
        let before = self.groups.len();
        self.groups.retain(|g| g.id != group_id);
        self.groups.len() != before
    }

    /// Find a group by id.
    #[must_use]
    pub fn find_group(&self, group_id: &str) -> Option<&CopyGroup> {
        self.groups.iter().find(|g| g.id == group_id)
    }

    /// Find a group by id for modification.
    pub fn find_group_mut(&mut self, group_id: &str) -> Option<&mut CopyGroup> {
        self.groups.iter_mut().find(|g| g.id == group_id)
    }
}

/// Parse a comma-separated extension list such as `"jpg, .PNG"`.
///
/// Entries are trimmed, lowercased and given a leading dot; blanks are dropped.
#[must_use]
pub fn parse_extensions(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(|p| {
            let p = p.to_lowercase();
            if p.starts_with('.') { p } else { format!(".{p}") }
        })
        .collect()
}
