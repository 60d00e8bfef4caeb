//! Job execution.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use copy_image_config::Config;
use copy_image_copier::{
    CancelToken, CopySummary, ProgressSink, copy_batch_blocking, copy_batch_with_events,
};

use crate::plan::PlannedJob;

/// Outcome of one executed job.
#[derive(Debug, Clone)]
pub struct JobReport {
    /// Label of the job.
    pub label: String,
    /// Batch summary for the job.
    pub summary: CopySummary,
}

impl JobReport {
    /// Whether every file in the job was copied or skipped.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.summary.is_complete_success()
    }
}

/// Execute one job and wait for it, without cancellation.
#[must_use]
pub fn execute_job_blocking<S>(job: &PlannedJob, config: &Config, sink: &S) -> JobReport
where
    S: ProgressSink + ?Sized,
{
    log::info!("Executing job {}", job.label);

    let settings = config.copy_settings(&job.destination, job.overwrite);
    let summary = copy_batch_blocking(&job.files, &settings, sink);

    JobReport {
        label: job.label.clone(),
        summary,
    }
}

/// Execute one job with a cancellation token and progress callback.
#[must_use]
pub fn execute_job<S>(
    job: &PlannedJob,
    config: &Config,
    cancel: &CancelToken,
    sink: &S,
) -> JobReport
where
    S: ProgressSink + ?Sized,
{
    log::info!("Executing job {}", job.label);

    let settings = config.copy_settings(&job.destination, job.overwrite);
    let summary = copy_batch_with_events(&job.files, &settings, cancel, sink);

    JobReport {
        label: job.label.clone(),
        summary,
    }
}

/// Where [`execute_jobs`] is in the job list.
#[derive(Debug, Clone, Copy)]
pub enum JobStage<'a> {
    /// The job is about to run.
    Started(&'a PlannedJob),
    /// The job finished, possibly cut short by cancellation.
    Finished(&'a JobReport),
}

/// Execute jobs in order, stopping before the next job once `cancel` fires.
///
/// `on_stage` is called before and after every job that runs. Jobs that were
/// never started produce no report.
#[must_use]
pub fn execute_jobs<S, F>(
    jobs: &[PlannedJob],
    config: &Config,
    cancel: &CancelToken,
    sink: &S,
    mut on_stage: F,
) -> Vec<JobReport>
where
    S: ProgressSink + ?Sized,
    F: FnMut(JobStage<'_>),
{
    let mut reports = Vec::with_capacity(jobs.len());

    for job in jobs {
        if cancel.is_cancelled() {
            log::info!("Cancelled; skipping remaining jobs");
            break;
        }
        on_stage(JobStage::Started(job));
        let report = execute_job(job, config, cancel, sink);
        on_stage(JobStage::Finished(&report));
        reports.push(report);
    }

    reports
}
