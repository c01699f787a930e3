//! Progress reporting for executor runs
//!
//! The executor reports completions through an injectable observer rather than
//! driving a console widget directly, so callers can swap in a CLI progress
//! bar, a no-op, or a test spy.

/// Observer notified once per completed task
///
/// `completed` is monotonically non-decreasing over a run and reaches `total`
/// exactly when the last task finishes. Updates are delivered from the
/// executor's single collection loop, never concurrently.
pub trait ProgressObserver: Send + Sync {
    /// Called after each task completion with the running count, the total
    /// number of tasks, and the label supplied to the run
    fn on_update(&self, completed: usize, total: usize, label: &str);
}

/// Observer that discards all updates
#[derive(Clone, Copy, Debug, Default)]
pub struct NoOpProgress;

impl ProgressObserver for NoOpProgress {
    fn on_update(&self, _completed: usize, _total: usize, _label: &str) {}
}

/// Observer that reports progress through `tracing`
///
/// Intermediate completions log at debug level; the final completion logs at
/// info level.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogProgress;

impl ProgressObserver for LogProgress {
    fn on_update(&self, completed: usize, total: usize, label: &str) {
        if completed == total {
            tracing::info!(completed, total, "{} finished", label);
        } else {
            tracing::debug!(completed, total, "{}", label);
        }
    }
}
