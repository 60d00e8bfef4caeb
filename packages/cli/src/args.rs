//! CLI argument definitions.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::path::{Path, PathBuf};

use clap::Parser;
use copy_image_config::{Config, DEFAULT_CONFIG_FILE, parse_extensions};
use path_clean::PathClean;

/// CLI arguments for copy-image.
#[derive(Debug, Parser)]
#[command(
    name = "copy-image",
    about = "Copy files in bulk with parallel workers, retries and progress",
    version
)]
#[allow(clippy::struct_excessive_bools)]
pub struct Args {
    /// Source directory.
    #[arg(long, short = 's')]
    pub source: Option<PathBuf>,

    /// Destination directory.
    #[arg(long = "dest", short = 'd')]
    pub destination: Option<PathBuf>,

    /// Overwrite existing files.
    #[arg(long)]
    pub overwrite: bool,

    /// Number of concurrent workers (1-50).
    #[arg(long, short = 'w', allow_negative_numbers = true)]
    pub workers: Option<i64>,

    /// Retries per file after the first failed attempt.
    #[arg(long, allow_negative_numbers = true)]
    pub retries: Option<i64>,

    /// Path to the config file.
    #[arg(long = "config", short = 'c', default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Show what would be copied without copying.
    #[arg(long)]
    pub dry_run: bool,

    /// Comma-separated list of extensions to include (e.g. .jpg,.png).
    #[arg(long = "ext", short = 'e')]
    pub extensions: Option<String>,

    /// Run without prompts.
    #[arg(long)]
    pub non_interactive: bool,

    /// Disable progress bars (useful for CI environments).
    #[arg(long = "no-progress")]
    pub no_progress: bool,

    /// Print progress as JSON lines instead of a progress bar.
    #[arg(long)]
    pub json: bool,

    /// Write the effective configuration back to the config file.
    #[arg(long)]
    pub save_config: bool,

    /// Enable verbose output.
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

impl Args {
    /// Apply command-line values on top of a loaded configuration.
    ///
    /// Flags only override the file when given; `--overwrite` and `--dry-run`
    /// can turn the setting on but never off. Relative paths are resolved
    /// against `cwd`.
    pub fn apply_overrides(&self, config: &mut Config, cwd: &Path) {
        if let Some(source) = &self.source {
            config.source = resolve_path(source, cwd);
        }
        if let Some(destination) = &self.destination {
            config.destination = resolve_path(destination, cwd);
        }
        if self.overwrite {
            config.overwrite = true;
        }
        if let Some(workers) = self.workers {
            config.workers = workers;
        }
        if let Some(retries) = self.retries {
            config.max_retries = retries;
        }
        if self.dry_run {
            config.dry_run = true;
        }
        if let Some(extensions) = &self.extensions {
            config.extensions = parse_extensions(extensions);
        }
    }

    /// Determine if we should prompt the user.
    #[must_use]
    pub const fn is_interactive(&self) -> bool {
        !self.non_interactive && !self.json
    }

    /// Determine if we should show progress bars.
    #[must_use]
    pub const fn should_show_progress(&self) -> bool {
        !self.no_progress
    }
}

/// Make `path` absolute against `cwd` and normalize `.`/`..` components.
#[must_use]
pub fn resolve_path(path: &Path, cwd: &Path) -> String {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    };
    absolute.clean().to_string_lossy().to_string()
}
