//! Job planning - resolve sources and destinations and list files without copying.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use copy_image_config::{Config, ConfigError};
use copy_image_copier::{ExtensionFilter, list_files};

use crate::error::OperationError;

/// Where a job came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobOrigin {
    /// The top-level `source`/`destination` pair.
    Single,
    /// A destination of a copy group.
    Group {
        /// Group id.
        group_id: String,
        /// Destination id within the group.
        destination_id: String,
    },
}

/// A planned copy of one source directory into one destination.
#[derive(Debug, Clone)]
pub struct PlannedJob {
    /// Display label, e.g. `"Camera -> /mnt/nas"`.
    pub label: String,
    /// Where the job came from.
    pub origin: JobOrigin,
    /// Source directory.
    pub source: PathBuf,
    /// Destination directory.
    pub destination: PathBuf,
    /// Overwrite policy for this destination.
    pub overwrite: bool,
    /// Files to copy, already filtered by extension.
    pub files: Vec<PathBuf>,
}

impl PlannedJob {
    /// Number of files in the job.
    #[must_use]
    pub fn file_count(&self) -> usize {
        self.files.len()
    }
}

/// Plan every copy job described by `config`.
///
/// When at least one copy group is enabled, one job is planned per enabled
/// destination of every enabled group, using the destination's overwrite
/// flag. Otherwise the top-level `source`/`destination` pair is used with the
/// top-level overwrite flag. Each source directory is listed once.
///
/// # Errors
///
/// * If single-pair mode is missing its source or destination
/// * If a destination is the source directory itself
/// * If a source directory does not exist or cannot be read
pub fn plan_jobs(config: &Config) -> Result<Vec<PlannedJob>, OperationError> {
    let filter = config.extension_filter();
    let mut listings: HashMap<PathBuf, Vec<PathBuf>> = HashMap::new();
    let mut jobs = Vec::new();

    if config.enabled_groups().next().is_none() {
        if config.source.trim().is_empty() {
            return Err(ConfigError::MissingSource.into());
        }
        if config.destination.trim().is_empty() {
            return Err(ConfigError::MissingDestination.into());
        }

        let source = PathBuf::from(&config.source);
        let destination = PathBuf::from(&config.destination);
        let label = format!("{} -> {}", config.source, config.destination);
        ensure_distinct(&source, &destination, &label)?;
        let files = list_cached(&mut listings, &source, &filter, &label)?;

        jobs.push(PlannedJob {
            label,
            origin: JobOrigin::Single,
            source,
            destination,
            overwrite: config.overwrite,
            files,
        });
    } else {
        for group in config.enabled_groups() {
            let source = PathBuf::from(&group.source);
            let name = if group.name.is_empty() {
                &group.id
            } else {
                &group.name
            };

            for destination in group.enabled_destinations() {
                let label = format!("{name} -> {}", destination.path);
                let target = PathBuf::from(&destination.path);
                ensure_distinct(&source, &target, &label)?;
                let files = list_cached(&mut listings, &source, &filter, &label)?;

                jobs.push(PlannedJob {
                    label,
                    origin: JobOrigin::Group {
                        group_id: group.id.clone(),
                        destination_id: destination.id.clone(),
                    },
                    source: source.clone(),
                    destination: target,
                    overwrite: destination.overwrite,
                    files,
                });
            }
        }
    }

    log::debug!("Planned {} copy jobs", jobs.len());

    Ok(jobs)
}

fn ensure_distinct(source: &Path, destination: &Path, label: &str) -> Result<(), OperationError> {
    let resolve = |p: &Path| fs::canonicalize(p).unwrap_or_else(|_| p.to_path_buf());

    if resolve(source) == resolve(destination) {
        return Err(OperationError::SameDirectory {
            label: label.to_string(),
            path: source.to_path_buf(),
        });
    }

    Ok(())
}

fn list_cached(
    listings: &mut HashMap<PathBuf, Vec<PathBuf>>,
    source: &Path,
    filter: &ExtensionFilter,
    label: &str,
) -> Result<Vec<PathBuf>, OperationError> {
    if let Some(files) = listings.get(source) {
        return Ok(files.clone());
    }

    let files = list_files(source, filter).map_err(|error| OperationError::ListError {
        label: label.to_string(),
        error,
    })?;
    listings.insert(source.to_path_buf(), files.clone());

    Ok(files)
}
