//! Worker strategies for the task executor
//!
//! A [`Worker`] turns one argument tuple into one output. The executor is
//! generic over the strategy, so the same ordered-results contract holds
//! whether invocations share the executor's address space ([`FnWorker`]) or
//! run in freshly spawned child processes ([`ProcessWorker`]).

use async_trait::async_trait;
use futures::future::BoxFuture;
use std::marker::PhantomData;
use std::process::Stdio;

use crate::error::{Error, Result};

/// A unit-of-work handler invoked once per task
///
/// Invocation order across workers is not guaranteed, so implementations must
/// not depend on call order. Expected, per-task failures should be encoded in
/// `Output`; an `Err` here is treated as unexpected and aborts the whole run
/// (see [`crate::executor::TaskExecutor::run`]).
#[async_trait]
pub trait Worker: Send + Sync + 'static {
    /// Argument tuple consumed by one invocation
    type Args: Send + 'static;
    /// Value produced by one invocation
    type Output: Send + 'static;

    /// Perform one unit of work
    async fn run(&self, args: Self::Args) -> Result<Self::Output>;
}

/// Shared-memory worker strategy wrapping an async closure
///
/// Invocations run as tasks in the executor's own address space, which suits
/// I/O-bound handlers (network calls) where waiting on one invocation must not
/// block the others. This is the default strategy for photo downloads.
///
/// # Examples
///
/// ```
/// use futures::FutureExt;
/// use taxa_dl::executor::{FnWorker, TaskExecutor};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let worker = FnWorker::new(|n: u64| async move { n * 2 }.boxed());
/// let executor = TaskExecutor::new(worker, 4)?;
/// let doubled = executor.run("doubling", vec![1, 2, 3]).await?;
/// assert_eq!(doubled, vec![2, 4, 6]);
/// # Ok(())
/// # }
/// ```
pub struct FnWorker<A, R, F> {
    handler: F,
    _marker: PhantomData<fn(A) -> R>,
}

impl<A, R, F> FnWorker<A, R, F>
where
    A: Send + 'static,
    R: Send + 'static,
    F: Fn(A) -> BoxFuture<'static, R> + Send + Sync + 'static,
{
    /// Wrap an async closure as a worker
    pub fn new(handler: F) -> Self {
        Self {
            handler,
            _marker: PhantomData,
        }
    }
}

#[async_trait]
impl<A, R, F> Worker for FnWorker<A, R, F>
where
    A: Send + 'static,
    R: Send + 'static,
    F: Fn(A) -> BoxFuture<'static, R> + Send + Sync + 'static,
{
    type Args = A;
    type Output = R;

    async fn run(&self, args: A) -> Result<R> {
        Ok((self.handler)(args).await)
    }
}

/// Isolated-process worker strategy
///
/// Each invocation spawns a fresh child process (never forked, so nothing from
/// the parent's open resources is inherited beyond the standard streams) and
/// waits for it to exit, yielding the captured [`std::process::Output`]. Suits
/// CPU-bound handlers or work that must be isolated from shared mutable state.
///
/// The builder closure maps an argument tuple to the command to spawn. A spawn
/// failure is an unexpected error and aborts the run.
pub struct ProcessWorker<A, F> {
    build: F,
    _marker: PhantomData<fn(A)>,
}

impl<A, F> ProcessWorker<A, F>
where
    A: Send + 'static,
    F: Fn(&A) -> tokio::process::Command + Send + Sync + 'static,
{
    /// Create a process worker from a command builder
    pub fn new(build: F) -> Self {
        Self {
            build,
            _marker: PhantomData,
        }
    }
}

#[async_trait]
impl<A, F> Worker for ProcessWorker<A, F>
where
    A: Send + 'static,
    F: Fn(&A) -> tokio::process::Command + Send + Sync + 'static,
{
    type Args = A;
    type Output = std::process::Output;

    async fn run(&self, args: A) -> Result<std::process::Output> {
        let mut command = (self.build)(&args);
        command.stdin(Stdio::null()).kill_on_drop(true);
        command
            .output()
            .await
            .map_err(|e| Error::WorkerProcess(format!("failed to run worker process: {e}")))
    }
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use futures::FutureExt;

    #[tokio::test]
    async fn test_fn_worker_invokes_closure() {
        let worker = FnWorker::new(|s: String| async move { s.to_uppercase() }.boxed());
        let result = worker.run("chromis".to_string()).await.unwrap();
        assert_eq!(result, "CHROMIS");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_process_worker_captures_stdout() {
        let worker = ProcessWorker::new(|n: &u32| {
            let mut command = tokio::process::Command::new("echo");
            command.arg(n.to_string());
            command
        });
        let output = worker.run(7).await.unwrap();
        assert!(output.status.success());
        assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "7");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_process_worker_spawn_failure_is_error() {
        let worker = ProcessWorker::new(|_: &u32| {
            tokio::process::Command::new("taxa-dl-no-such-binary-xyz")
        });
        let err = worker.run(1).await.unwrap_err();
        assert!(matches!(err, Error::WorkerProcess(_)));
    }
}
