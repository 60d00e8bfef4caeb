//! copy-image CLI entry point.
//!
//! A tool for copying files in bulk from one directory to another, with
//! parallel workers, retries and progress reporting.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

mod args;
mod events;
mod interactive;
mod output;
mod progress;

use std::env;
use std::path::{Path, PathBuf};

use clap::Parser;

use args::{Args, resolve_path};
use copy_image_config::{Config, discover_config, load_config, save_config};
use copy_image_copier::CancelToken;
use copy_image_operations::{
    JobReport, JobStage, PlannedJob, execute_job_blocking, execute_jobs, plan_jobs,
};
use events::{JsonEvent, JsonEventSink};
use progress::ProgressManager;

fn main() {
    let args = Args::parse();

    // Set up logging
    if args.verbose {
        // SAFETY: We're setting this before any other threads are spawned
        unsafe {
            env::set_var("RUST_LOG", "debug");
        }
    }
    pretty_env_logger::init();

    match run(&args) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            output::print_error(&e.to_string());
            std::process::exit(1);
        }
    }
}

/// Main application logic.
///
/// Returns whether every job completed without failures or cancellation.
fn run(args: &Args) -> Result<bool, Box<dyn std::error::Error>> {
    let cwd = env::current_dir()?;

    // Load the config file, if there is one
    let config_path = discover_config(&args.config);
    let mut config = match &config_path {
        Some(path) => load_config(path)?,
        None => Config::default(),
    };

    args.apply_overrides(&mut config, &cwd);

    let prompt = args.is_interactive() && console::user_attended();
    let single_pair = config.enabled_groups().next().is_none();

    if prompt && single_pair && !prompt_for_pair(&mut config, &cwd)? {
        println!("Exiting.");
        return Ok(true);
    }

    config.validate()?;

    if args.save_config {
        let save_path = config_path
            .clone()
            .unwrap_or_else(|| cwd.join(&args.config));
        save_config(&config, &save_path)?;
        if !args.json {
            println!("Saved configuration to {}", save_path.display());
        }
    }

    let jobs = plan_jobs(&config)?;

    if args.json {
        return run_json(&jobs, &config).map_err(Into::into);
    }

    output::print_header("Copy Image");
    output::print_config(&config, config_path.as_deref());

    Ok(run_console(&jobs, &config, args.should_show_progress()))
}

/// Ask for missing paths and show the copy menu.
///
/// Returns `false` if the user chose to exit.
fn prompt_for_pair(config: &mut Config, cwd: &Path) -> std::io::Result<bool> {
    if config.source.trim().is_empty() {
        let source = interactive::prompt_path("Source directory")?;
        config.source = resolve_path(&PathBuf::from(source), cwd);
    }
    if config.destination.trim().is_empty() {
        let destination = interactive::prompt_path("Destination directory")?;
        config.destination = resolve_path(&PathBuf::from(destination), cwd);
    }

    match interactive::select_action(config.overwrite)?.overwrite() {
        Some(overwrite) => {
            config.overwrite = overwrite;
            Ok(true)
        }
        None => Ok(false),
    }
}

/// Run every job with a progress bar, printing a summary per job.
fn run_console(jobs: &[PlannedJob], config: &Config, show_progress: bool) -> bool {
    let progress_mgr = ProgressManager::new(show_progress, config.dry_run);
    let mut reports: Vec<JobReport> = Vec::with_capacity(jobs.len());

    for job in jobs {
        output::print_job(&job.label, job.file_count());

        if job.files.is_empty() {
            output::print_warning("No matching files found.");
            continue;
        }

        let sink = progress_mgr.create_sink(job.file_count());
        let report = execute_job_blocking(job, config, &sink);
        sink.finish();

        output::print_summary(&report.summary);
        reports.push(report);
    }

    let all_ok = reports.iter().all(JobReport::is_success);
    if all_ok {
        output::print_success();
    } else {
        let failed: usize = reports.iter().map(|r| r.summary.failed).sum();
        output::print_warning(&format!("{failed} file(s) failed to copy."));
    }

    all_ok
}

/// Run every job emitting JSON lines, stopping when Ctrl-C is pressed.
fn run_json(jobs: &[PlannedJob], config: &Config) -> Result<bool, ctrlc::Error> {
    let cancel = CancelToken::new();
    let handler_token = cancel.clone();
    ctrlc::set_handler(move || {
        log::info!("Interrupt received, cancelling");
        handler_token.cancel();
    })?;

    let sink = JsonEventSink::stdout();
    let reports = execute_jobs(jobs, config, &cancel, &sink, |stage| match stage {
        JobStage::Started(job) => sink.emit(&JsonEvent::Start {
            job: job.label.clone(),
            total_files: job.file_count(),
        }),
        JobStage::Finished(report) => {
            sink.emit(&JsonEvent::complete(&report.label, &report.summary));
        }
    });

    if cancel.is_cancelled() {
        sink.emit(&JsonEvent::Cancelled);
        return Ok(false);
    }

    Ok(reports.iter().all(JobReport::is_success))
}
