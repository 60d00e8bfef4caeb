//! Bounded worker pool that copies a batch of files.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::path::{Path, PathBuf};

use crate::cancel::CancelToken;
use crate::copy::{CopyResult, file_name_of};
use crate::progress::{ProgressEvent, ProgressSink, ProgressTracker};
use crate::retry::copy_with_retry;
use crate::settings::CopySettings;
use crate::summary::{BatchAggregator, CopySummary};

/// Copy a batch of files and wait for all of them.
///
/// The batch cannot be cancelled. `sink` receives one event per file, which
/// is how the console progress bar is driven.
///
/// # Arguments
///
/// * `files` - Absolute source file paths
/// * `settings` - Destination, worker count, overwrite, retries, dry-run
/// * `sink` - Progress receiver
#[must_use]
pub fn copy_batch_blocking<S>(files: &[PathBuf], settings: &CopySettings, sink: &S) -> CopySummary
where
    S: ProgressSink + ?Sized,
{
    copy_batch(files, settings, &CancelToken::new(), sink)
}

/// Copy a batch of files with a caller-owned cancellation token.
///
/// Once `cancel` fires, no new file is started; files already streaming
/// finish, and files waiting between retries give up. Files that never
/// started are not counted in any bucket of the summary.
///
/// # Arguments
///
/// * `files` - Absolute source file paths
/// * `settings` - Destination, worker count, overwrite, retries, dry-run
/// * `cancel` - Cancellation token for this batch
/// * `on_progress` - Called once per completed file
#[must_use]
pub fn copy_batch_with_events<S>(
    files: &[PathBuf],
    settings: &CopySettings,
    cancel: &CancelToken,
    on_progress: &S,
) -> CopySummary
where
    S: ProgressSink + ?Sized,
{
    copy_batch(files, settings, cancel, on_progress)
}

fn copy_batch<S>(
    files: &[PathBuf],
    settings: &CopySettings,
    cancel: &CancelToken,
    sink: &S,
) -> CopySummary
where
    S: ProgressSink + ?Sized,
{
    run_batch(files, settings, cancel, sink, |file| {
        if settings.dry_run {
            log::debug!("Dry run: would copy {}", file.display());
            CopyResult::success(file_name_of(file))
        } else {
            copy_with_retry(file, settings, cancel)
        }
    })
}

/// Dispatch `copy_file` over `files`, aggregating results and reporting progress.
pub(crate) fn run_batch<S, F>(
    files: &[PathBuf],
    settings: &CopySettings,
    cancel: &CancelToken,
    sink: &S,
    copy_file: F,
) -> CopySummary
where
    S: ProgressSink + ?Sized,
    F: Fn(&Path) -> CopyResult + Sync,
{
    let total = files.len();
    log::info!(
        "Copying {} files to {} with {} workers{}",
        total,
        settings.destination.display(),
        settings.effective_workers(),
        if settings.dry_run { " (dry run)" } else { "" }
    );

    let aggregator = BatchAggregator::new();
    let tracker = ProgressTracker::new();

    dispatch(files, settings.effective_workers(), cancel, |file| {
        let result = copy_file(file);

        let status = aggregator.record(&result);
        let current = tracker.advance();
        sink.report(&ProgressEvent::new(current, total, result.file_name, status));
    });

    let summary = aggregator.finish(total);
    log::info!(
        "Batch finished in {:.2}s: {} copied, {} skipped, {} failed, {} cancelled, {} not started",
        summary.duration.as_secs_f64(),
        summary.successful,
        summary.skipped,
        summary.failed,
        summary.cancelled,
        summary.not_started()
    );

    summary
}

/// Run `task` once per file with at most `workers` running at a time.
///
/// The rayon pool's threads are the admission slots. Queued files that get a
/// slot after cancellation are dropped without running `task`.
pub(crate) fn dispatch<F>(files: &[PathBuf], workers: usize, cancel: &CancelToken, task: F)
where
    F: Fn(&Path) + Sync,
{
    let run = |file: &Path| {
        if cancel.is_cancelled() {
            log::trace!("Dropping {} after cancellation", file.display());
            return;
        }
        task(file);
    };

    match rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .thread_name(|i| format!("copy-worker-{i}"))
        .build()
    {
        Ok(pool) => pool.scope(|scope| {
            let run = &run;
            for file in files {
                if cancel.is_cancelled() {
                    log::debug!("Cancelled; not starting remaining files");
                    break;
                }
                scope.spawn(move |_| run(file));
            }
        }),
        Err(e) => {
            log::warn!("Failed to build worker pool, copying sequentially: {e}");
            for file in files {
                run(file);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::list::{ExtensionFilter, list_files};
    use crate::progress::{FileStatus, NoProgress};
    use crate::retry::retry_copy;
    use std::fs;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::thread;
    use std::time::Duration;
    use tempfile::TempDir;

    fn make_files(dir: &Path, count: usize) -> Vec<PathBuf> {
        (0..count)
            .map(|i| {
                let path = dir.join(format!("file{i:03}.jpg"));
                fs::write(&path, format!("content {i}")).unwrap();
                path
            })
            .collect()
    }

    #[test]
    fn test_copy_batch_blocking_copies_everything() {
        let src = TempDir::new().unwrap();
        let dst = TempDir::new().unwrap();
        let files = make_files(src.path(), 10);
        let settings = CopySettings::new(dst.path()).with_workers(3);

        let summary = copy_batch_blocking(&files, &settings, &NoProgress);

        assert_eq!(summary.total_files, 10);
        assert_eq!(summary.successful, 10);
        assert_eq!(summary.failed, 0);
        assert_eq!(summary.skipped, 0);
        for file in &files {
            let target = dst.path().join(file.file_name().unwrap());
            assert_eq!(fs::read(file).unwrap(), fs::read(target).unwrap());
        }
    }

    #[test]
    fn test_example_scenario() {
        let src = TempDir::new().unwrap();
        let dst = TempDir::new().unwrap();
        fs::write(src.path().join("a.jpg"), "12345").unwrap();
        fs::write(src.path().join("b.png"), "0123456789").unwrap();
        fs::write(src.path().join("c.txt"), "abc").unwrap();

        let files = list_files(src.path(), &ExtensionFilter::new([".jpg", ".png"])).unwrap();
        assert_eq!(files.len(), 2);

        let settings = CopySettings::new(dst.path())
            .with_workers(2)
            .with_overwrite(true)
            .with_max_retries(1);
        let summary = copy_batch_blocking(&files, &settings, &NoProgress);

        assert_eq!(summary.total_files, 2);
        assert_eq!(summary.successful, 2);
        assert_eq!(summary.failed, 0);
        assert_eq!(summary.skipped, 0);
        assert_eq!(fs::metadata(dst.path().join("a.jpg")).unwrap().len(), 5);
        assert_eq!(fs::metadata(dst.path().join("b.png")).unwrap().len(), 10);
        assert!(!dst.path().join("c.txt").exists());
    }

    #[test]
    fn test_existing_files_are_skipped() {
        let src = TempDir::new().unwrap();
        let dst = TempDir::new().unwrap();
        let files = make_files(src.path(), 4);
        fs::write(dst.path().join("file000.jpg"), "existing").unwrap();
        fs::write(dst.path().join("file001.jpg"), "existing").unwrap();

        let settings = CopySettings::new(dst.path()).with_max_retries(3);
        let summary = copy_batch_blocking(&files, &settings, &NoProgress);

        assert_eq!(summary.successful, 2);
        assert_eq!(summary.skipped, 2);
        assert_eq!(summary.successful + summary.failed + summary.skipped, summary.total_files);
        assert_eq!(fs::read_to_string(dst.path().join("file000.jpg")).unwrap(), "existing");
    }

    #[test]
    fn test_overwrite_twice_is_identical() {
        let src = TempDir::new().unwrap();
        let dst = TempDir::new().unwrap();
        let files = make_files(src.path(), 5);
        fs::write(dst.path().join("file002.jpg"), "stale content that is longer").unwrap();
        let settings = CopySettings::new(dst.path()).with_overwrite(true);

        let first = copy_batch_blocking(&files, &settings, &NoProgress);
        let snapshot: Vec<Vec<u8>> = files
            .iter()
            .map(|f| fs::read(dst.path().join(f.file_name().unwrap())).unwrap())
            .collect();
        let second = copy_batch_blocking(&files, &settings, &NoProgress);

        assert_eq!(first.successful, 5);
        assert_eq!(second.successful, 5);
        for (file, before) in files.iter().zip(snapshot) {
            let after = fs::read(dst.path().join(file.file_name().unwrap())).unwrap();
            assert_eq!(before, after);
            assert_eq!(fs::read(file).unwrap(), after);
        }
    }

    #[test]
    fn test_failures_are_collected() {
        let src = TempDir::new().unwrap();
        let dst = TempDir::new().unwrap();
        let mut files = make_files(src.path(), 2);
        files.push(src.path().join("missing.jpg"));
        let settings = CopySettings::new(dst.path()).with_max_retries(0);

        let summary = copy_batch_blocking(&files, &settings, &NoProgress);

        assert_eq!(summary.successful, 2);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.failed_files.len(), 1);
        assert!(summary.failed_files[0].starts_with("missing.jpg: "));
        assert_eq!(summary.processed(), summary.total_files);
    }

    #[test]
    fn test_dry_run_touches_nothing() {
        let src = TempDir::new().unwrap();
        let dst = TempDir::new().unwrap();
        let target = dst.path().join("out");
        let mut files = make_files(src.path(), 6);
        files.push(src.path().join("missing.jpg"));
        let settings = CopySettings::new(&target).with_dry_run(true);

        let summary = copy_batch_blocking(&files, &settings, &NoProgress);

        assert_eq!(summary.successful, 7);
        assert_eq!(summary.failed, 0);
        assert!(!target.exists());
    }

    #[test]
    fn test_empty_batch() {
        let dst = TempDir::new().unwrap();
        let settings = CopySettings::new(dst.path());

        let summary = copy_batch_blocking(&[], &settings, &NoProgress);

        assert_eq!(summary.total_files, 0);
        assert_eq!(summary.processed(), 0);
    }

    #[test]
    fn test_events_report_every_file() {
        let src = TempDir::new().unwrap();
        let dst = TempDir::new().unwrap();
        let files = make_files(src.path(), 20);
        fs::write(dst.path().join("file005.jpg"), "existing").unwrap();
        let settings = CopySettings::new(dst.path()).with_workers(4);
        let events = Mutex::new(Vec::new());

        let summary = copy_batch_with_events(
            &files,
            &settings,
            &CancelToken::new(),
            &|event: &ProgressEvent| events.lock().unwrap().push(event.clone()),
        );

        let events = events.into_inner().unwrap();
        assert_eq!(events.len(), 20);
        assert!(events.iter().all(|e| e.total == 20));
        let mut currents: Vec<usize> = events.iter().map(|e| e.current).collect();
        currents.sort_unstable();
        assert_eq!(currents, (1..=20).collect::<Vec<_>>());
        assert_eq!(
            events.iter().filter(|e| e.status == FileStatus::Skipped).count(),
            1
        );
        assert_eq!(summary.successful, 19);
        assert_eq!(summary.skipped, 1);
    }

    #[test]
    fn test_cancel_before_dispatch_drops_files() {
        let src = TempDir::new().unwrap();
        let dst = TempDir::new().unwrap();
        let files = make_files(src.path(), 50);
        let settings = CopySettings::new(dst.path()).with_workers(2);
        let cancel = CancelToken::new();
        cancel.cancel();

        let summary = copy_batch_with_events(&files, &settings, &cancel, &NoProgress);

        assert_eq!(summary.total_files, 50);
        assert!(summary.successful + summary.failed + summary.skipped < summary.total_files);
        assert!(summary.not_started() > 0);
    }

    #[test]
    fn test_cancel_mid_batch_stops_new_work() {
        let src = TempDir::new().unwrap();
        let dst = TempDir::new().unwrap();
        let files = make_files(src.path(), 200);
        let settings = CopySettings::new(dst.path()).with_workers(1);
        let cancel = CancelToken::new();

        let summary = copy_batch_with_events(&files, &settings, &cancel, &|event: &ProgressEvent| {
            if event.current == 1 {
                cancel.cancel();
            }
        });

        assert!(summary.successful >= 1);
        assert!(summary.successful + summary.failed + summary.skipped < summary.total_files);

        // Cancelling again after the batch is a no-op.
        cancel.cancel();
        assert!(cancel.is_cancelled());
    }

    #[test]
    fn test_copy_in_flight_when_cancelled_is_successful() {
        let src = TempDir::new().unwrap();
        let dst = TempDir::new().unwrap();
        let files = make_files(src.path(), 3);
        let settings = CopySettings::new(dst.path()).with_workers(1);
        let cancel = CancelToken::new();
        let first = AtomicBool::new(true);

        let summary = run_batch(&files, &settings, &cancel, &NoProgress, |file| {
            retry_copy(file, &settings, &cancel, |cancel| {
                if first.swap(false, Ordering::SeqCst) {
                    cancel.cancel();
                }
                fs::copy(file, dst.path().join(file.file_name().unwrap())).unwrap();
                Ok(())
            })
        });

        assert_eq!(summary.successful, 1);
        assert_eq!(summary.cancelled, 0);
        assert_eq!(summary.failed, 0);
        assert_eq!(summary.not_started(), 2);
    }

    #[test]
    fn test_copy_into_source_directory_fails_without_truncating() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("a.jpg");
        fs::write(&source, "12345").unwrap();
        let settings = CopySettings::new(dir.path()).with_overwrite(true);

        let summary = copy_batch_blocking(&[source.clone()], &settings, &NoProgress);

        assert_eq!(summary.successful, 0);
        assert_eq!(summary.failed, 1);
        assert_eq!(fs::read(&source).unwrap().len(), 5);
    }

    #[test]
    fn test_dispatch_respects_worker_bound() {
        let src = TempDir::new().unwrap();
        let files = make_files(src.path(), 30);
        let active = AtomicUsize::new(0);
        let peak = AtomicUsize::new(0);
        let ran = AtomicUsize::new(0);

        dispatch(&files, 3, &CancelToken::new(), |_| {
            let now = active.fetch_add(1, Ordering::SeqCst) + 1;
            peak.fetch_max(now, Ordering::SeqCst);
            thread::sleep(Duration::from_millis(10));
            active.fetch_sub(1, Ordering::SeqCst);
            ran.fetch_add(1, Ordering::SeqCst);
        });

        assert_eq!(ran.load(Ordering::SeqCst), 30);
        assert!(peak.load(Ordering::SeqCst) <= 3);
        assert!(peak.load(Ordering::SeqCst) >= 1);
    }

    #[test]
    fn test_dispatch_single_worker_is_serial() {
        let src = TempDir::new().unwrap();
        let files = make_files(src.path(), 10);
        let active = AtomicUsize::new(0);
        let peak = AtomicUsize::new(0);

        dispatch(&files, 1, &CancelToken::new(), |_| {
            let now = active.fetch_add(1, Ordering::SeqCst) + 1;
            peak.fetch_max(now, Ordering::SeqCst);
            thread::sleep(Duration::from_millis(2));
            active.fetch_sub(1, Ordering::SeqCst);
        });

        assert_eq!(peak.load(Ordering::SeqCst), 1);
    }
}
