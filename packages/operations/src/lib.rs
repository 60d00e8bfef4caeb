//! Copy job planning and execution for copy-image.
//!
//! A configuration describes either one source/destination pair or several
//! copy groups, each with its own destinations. This crate turns it into a
//! list of jobs and runs each job through the copy engine.
//!
//! # Example
//!
//! ```rust,ignore
//! use copy_image_operations::{plan_jobs, execute_jobs};
//!
//! // Plan first, so the file counts are known up front
//! let jobs = plan_jobs(&config)?;
//!
//! let on_event = |event: &ProgressEvent| {
//!     println!("{}/{} {}", event.current, event.total, event.file_name);
//! };
//! let reports = execute_jobs(&jobs, &config, &cancel, &on_event, |_| {});
//! ```

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

mod apply;
mod error;
mod plan;

pub use apply::{JobReport, JobStage, execute_job, execute_job_blocking, execute_jobs};
pub use error::OperationError;
pub use plan::{JobOrigin, PlannedJob, plan_jobs};
