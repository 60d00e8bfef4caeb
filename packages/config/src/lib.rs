//! Configuration loading for copy-image.
//!
//! This crate provides the configuration types, validation, and TOML
//! persistence used by the copy-image CLI.
//!
//! # Example
//!
//! ```rust,ignore
//! use copy_image_config::{DEFAULT_CONFIG_FILE, discover_config, load_config, Config};
//!
//! let mut config = match discover_config(DEFAULT_CONFIG_FILE.as_ref()) {
//!     Some(path) => load_config(&path)?,
//!     None => Config::default(),
//! };
//! config.validate()?;
//! ```

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

mod discovery;
mod error;
mod toml_loader;
mod types;

pub use discovery::{DEFAULT_CONFIG_FILE, config_search_paths, discover_config, find_existing};
pub use error::ConfigError;
pub use toml_loader::{load_config, save_config};
pub use types::{Config, CopyGroup, Destination, parse_extensions};
