//! Bounded-concurrency task executor with ordered results
//!
//! The executor fans a list of independent units of work out across a pool of
//! at most `concurrency` simultaneous worker invocations and hands back the
//! outputs in the same order as the inputs, regardless of the order in which
//! workers actually finish. Every network operation in this crate runs through
//! it.
//!
//! Completion order is reconciled with input order by tagging each task with
//! its 0-based input index at dispatch time, collecting `(index, output)`
//! pairs as workers race, and sorting by index once the last task finishes.
//!
//! This is a one-shot, fixed-pool, submit-all-then-wait-all primitive: no
//! priorities, no mid-flight cancellation, no retries, no pool resizing. The
//! pool exists only for the duration of one [`TaskExecutor::run`] call.
//!
//! # Examples
//!
//! ```
//! use futures::FutureExt;
//! use taxa_dl::executor::{FnWorker, TaskExecutor};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let worker = FnWorker::new(|name: &'static str| {
//!     async move { format!("hello {name}") }.boxed()
//! });
//! let executor = TaskExecutor::new(worker, 2)?;
//! let greetings = executor.run("greeting", vec!["a", "b", "c"]).await?;
//! assert_eq!(greetings, vec!["hello a", "hello b", "hello c"]);
//! # Ok(())
//! # }
//! ```

mod progress;
mod worker;

pub use progress::{LogProgress, NoOpProgress, ProgressObserver};
pub use worker::{FnWorker, ProcessWorker, Worker};

use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::error::{Error, Result};

/// Bounded-concurrency runner returning outputs in input order
///
/// Generic over the [`Worker`] strategy: [`FnWorker`] runs invocations in the
/// executor's address space, [`ProcessWorker`] spawns a fresh child process
/// per task. Both satisfy the identical `run` contract.
pub struct TaskExecutor<W: Worker> {
    worker: Arc<W>,
    concurrency: usize,
    observer: Arc<dyn ProgressObserver>,
}

impl<W: Worker> TaskExecutor<W> {
    /// Create an executor over `worker` with at most `concurrency`
    /// simultaneous in-flight invocations
    ///
    /// Progress is reported through [`LogProgress`] unless replaced with
    /// [`with_observer`](Self::with_observer). Fails with a configuration
    /// error if `concurrency` is zero.
    pub fn new(worker: W, concurrency: usize) -> Result<Self> {
        if concurrency == 0 {
            return Err(Error::config(
                "concurrency must be at least 1",
                "concurrency",
            ));
        }
        Ok(Self {
            worker: Arc::new(worker),
            concurrency,
            observer: Arc::new(LogProgress),
        })
    }

    /// Replace the progress observer
    pub fn with_observer(mut self, observer: Arc<dyn ProgressObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Run every task to completion and return the outputs in input order
    ///
    /// Tasks are dispatched in input order; completion order is unconstrained.
    /// The observer receives one update per completion, delivered as each
    /// task finishes while the run is still in flight, with a monotonically
    /// increasing completed count; `label` is passed through verbatim. An
    /// empty task list returns immediately without touching the observer.
    ///
    /// # Failure semantics
    ///
    /// Fail-fast: the first worker invocation that returns `Err` — or panics,
    /// surfacing as [`Error::Worker`] — aborts the whole run. Still-running
    /// siblings are aborted when the pool is dropped and partial results are
    /// discarded; the observer simply stops receiving updates. Workers whose
    /// per-task failures are expected must encode them in their output type
    /// instead (see [`crate::fetcher::PhotoDownloader`]).
    pub async fn run(&self, label: &str, tasks: Vec<W::Args>) -> Result<Vec<W::Output>> {
        let total = tasks.len();
        if total == 0 {
            return Ok(Vec::new());
        }

        let limiter = Arc::new(Semaphore::new(self.concurrency));
        let mut pool: JoinSet<(usize, Result<W::Output>)> = JoinSet::new();

        for (index, args) in tasks.into_iter().enumerate() {
            // Each task acquires its permit inside the spawned future: the
            // semaphore's FIFO queue keeps dispatch in input order and bounds
            // in-flight work, while completions drain below as they happen.
            let limiter = Arc::clone(&limiter);
            let worker = Arc::clone(&self.worker);
            pool.spawn(async move {
                let _permit = match limiter.acquire_owned().await {
                    Ok(permit) => permit,
                    Err(_) => {
                        return (
                            index,
                            Err(Error::Worker("concurrency limiter closed".to_string())),
                        );
                    }
                };
                (index, worker.run(args).await)
            });
        }

        let mut indexed: Vec<(usize, W::Output)> = Vec::with_capacity(total);
        let mut completed = 0usize;
        while let Some(joined) = pool.join_next().await {
            let (index, output) =
                joined.map_err(|e| Error::Worker(format!("worker task failed: {e}")))?;
            indexed.push((index, output?));
            completed += 1;
            self.observer.on_update(completed, total, label);
        }

        // Every submitted task produces exactly one result; a shortfall here
        // is an executor bug, not a caller error.
        if indexed.len() != total {
            return Err(Error::Worker(format!(
                "expected {total} results, collected {}",
                indexed.len()
            )));
        }

        indexed.sort_unstable_by_key(|(index, _)| *index);
        Ok(indexed.into_iter().map(|(_, output)| output).collect())
    }
}
