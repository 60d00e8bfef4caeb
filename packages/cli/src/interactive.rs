//! Interactive prompts using dialoguer.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::io;

use dialoguer::{Input, Select};

/// What the user picked from the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    /// Leave without copying.
    Exit,
    /// Copy and replace files that already exist.
    Overwrite,
    /// Copy and keep files that already exist.
    SkipExisting,
}

impl MenuChoice {
    const ITEMS: [&'static str; 3] = [
        "0. Exit",
        "1. Copy files (overwrite existing)",
        "2. Copy files (skip existing)",
    ];

    /// Map a menu index to a choice.
    #[must_use]
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Exit),
            1 => Some(Self::Overwrite),
            2 => Some(Self::SkipExisting),
            _ => None,
        }
    }

    /// Overwrite policy for this choice, or `None` for [`MenuChoice::Exit`].
    #[must_use]
    pub const fn overwrite(self) -> Option<bool> {
        match self {
            Self::Exit => None,
            Self::Overwrite => Some(true),
            Self::SkipExisting => Some(false),
        }
    }
}

/// Show the copy menu.
///
/// The cursor starts on the option matching the configured overwrite policy.
///
/// # Errors
///
/// * If the terminal cannot be read
pub fn select_action(overwrite: bool) -> io::Result<MenuChoice> {
    let default = if overwrite { 1 } else { 2 };

    let index = Select::new()
        .with_prompt("Select an option")
        .items(&MenuChoice::ITEMS)
        .default(default)
        .interact()
        .map_err(io::Error::other)?;

    Ok(MenuChoice::from_index(index).unwrap_or(MenuChoice::Exit))
}

/// Prompt for a directory path.
///
/// # Errors
///
/// * If the user cancels the input
pub fn prompt_path(prompt: &str) -> io::Result<String> {
    let path: String = Input::new()
        .with_prompt(prompt)
        .interact_text()
        .map_err(io::Error::other)?;

    Ok(path.trim().to_string())
}
