//! Terminal output formatting.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::path::Path;

use colored::Colorize;
use copy_image_config::Config;
use copy_image_copier::CopySummary;

/// Print a header message.
pub fn print_header(message: &str) {
    println!("\n{} {}\n", "📷", message.bold());
}

/// Print the effective configuration.
pub fn print_config(config: &Config, config_path: Option<&Path>) {
    if let Some(path) = config_path {
        println!("Config:      {}", path.display().to_string().cyan());
    }
    if config.enabled_groups().next().is_none() {
        println!("Source:      {}", config.source.cyan());
        println!("Destination: {}", config.destination.cyan());
    } else {
        println!(
            "Groups:      {}",
            config
                .enabled_groups()
                .map(|g| g.name.as_str())
                .collect::<Vec<_>>()
                .join(", ")
                .cyan()
        );
    }
    println!("Workers:     {}", config.workers);
    println!("Retries:     {}", config.max_retries);
    println!(
        "Extensions:  {}",
        if config.has_extension_filter() {
            config.extensions.join(", ")
        } else {
            "all files".to_string()
        }
    );
    if config.dry_run {
        println!("{}", "Dry run: no files will be written".yellow());
    }
    println!();
}

/// Print the header for one copy job.
pub fn print_job(label: &str, file_count: usize) {
    println!(
        "{} {} ({} file{})",
        "→".cyan(),
        label.bold(),
        file_count,
        if file_count == 1 { "" } else { "s" }
    );
}

/// Print the summary of a finished batch.
pub fn print_summary(summary: &CopySummary) {
    println!();
    println!("{}", "Summary".bold());
    println!("  Total:      {}", summary.total_files);
    println!("  Successful: {}", summary.successful.to_string().green());
    println!("  Skipped:    {}", summary.skipped.to_string().dimmed());
    println!("  Failed:     {}", failed_count(summary.failed));
    if summary.cancelled > 0 || summary.not_started() > 0 {
        println!(
            "  Cancelled:  {}",
            (summary.cancelled + summary.not_started()).to_string().yellow()
        );
    }
    println!("  Duration:   {:.2}s", summary.duration.as_secs_f64());

    if !summary.failed_files.is_empty() {
        println!("\n{}", "Failed files:".red().bold());
        for name in &summary.failed_files {
            println!("  {} {}", "✗".red(), name);
        }
    }
    println!();
}

fn failed_count(failed: usize) -> String {
    if failed == 0 {
        "0".to_string()
    } else {
        failed.to_string().red().to_string()
    }
}

/// Print success message.
pub fn print_success() {
    println!("{} Copy complete!", "✅");
}

/// Print error message.
pub fn print_error(message: &str) {
    eprintln!("{} {}", "Error:".red().bold(), message);
}

/// Print a warning message.
pub fn print_warning(message: &str) {
    println!("{} {}", "Warning:".yellow().bold(), message);
}
