//! Units of work.
//!
//! A [`UnitOfWork`] is the pluggable piece of logic a
//! [`TaskRunner`](crate::TaskRunner) executes. Implement the trait directly,
//! wrap an async closure with [`work_fn`], or fall back to [`SimulatedWork`]
//! until real logic is available.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::error::WorkFailure;

/// Delay used by [`SimulatedWork::default`].
pub const DEFAULT_DELAY: Duration = Duration::from_millis(100);

/// Status string reported by [`SimulatedWork`].
pub const COMPLETED_STATUS: &str = "completed";

/// Asynchronous logic executed by a runner.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
  /// Payload produced on success.
  type Output: Send;

  /// Perform the work once.
  async fn perform(&self, ctx: &WorkContext) -> Result<Self::Output, WorkFailure>;

  /// Called by the runner once a run has succeeded and been counted.
  ///
  /// `completed_runs` is the runner's total including this run. The default
  /// leaves the output untouched.
  fn completed(&self, _output: &mut Self::Output, _completed_runs: u64) {}
}

/// Per-invocation view of the runner that owns the work.
#[derive(Debug)]
pub struct WorkContext {
  completions: Arc<AtomicU64>,
}

impl WorkContext {
  pub(crate) fn new(completions: Arc<AtomicU64>) -> Self {
    Self { completions }
  }

  /// Number of successful runs the owning runner has completed so far.
  pub fn completed_runs(&self) -> u64 {
    self.completions.load(Ordering::SeqCst)
  }
}

/// A [`UnitOfWork`] backed by an async closure. Created with [`work_fn`].
#[derive(Clone)]
pub struct WorkFn<F> {
  f: F,
}

/// Wrap an async closure as a [`UnitOfWork`].
///
/// ```ignore
/// let runner = TaskRunner::with_work(config, work_fn(|| async {
///   Err::<(), _>(WorkFailure::new("boom"))
/// }));
/// ```
pub fn work_fn<F>(f: F) -> WorkFn<F> {
  WorkFn { f }
}

#[async_trait]
impl<F, Fut, T> UnitOfWork for WorkFn<F>
where
  F: Fn() -> Fut + Send + Sync,
  Fut: Future<Output = Result<T, WorkFailure>> + Send,
  T: Send,
{
  type Output = T;

  async fn perform(&self, _ctx: &WorkContext) -> Result<T, WorkFailure> {
    (self.f)().await
  }
}

/// Payload produced by [`SimulatedWork`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulatedOutput {
  /// Successful runs of the owning runner, including this one. Filled in by
  /// the runner after the run is counted; zero straight out of `perform`.
  pub processed: u64,
  /// Always [`COMPLETED_STATUS`].
  pub status: String,
  /// RFC 3339 time at which the work finished.
  pub timestamp: String,
}

/// Stand-in work that waits a fixed delay and reports a canned payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulatedWork {
  delay: Duration,
}

impl SimulatedWork {
  pub fn with_delay(delay: Duration) -> Self {
    Self { delay }
  }

  pub fn delay(&self) -> Duration {
    self.delay
  }
}

impl Default for SimulatedWork {
  fn default() -> Self {
    Self::with_delay(DEFAULT_DELAY)
  }
}

#[async_trait]
impl UnitOfWork for SimulatedWork {
  type Output = SimulatedOutput;

  async fn perform(&self, _ctx: &WorkContext) -> Result<SimulatedOutput, WorkFailure> {
    tokio::time::sleep(self.delay).await;

    Ok(SimulatedOutput {
      processed: 0,
      status: COMPLETED_STATUS.to_string(),
      timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    })
  }

  fn completed(&self, output: &mut SimulatedOutput, completed_runs: u64) {
    output.processed = completed_runs;
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn context() -> (Arc<AtomicU64>, WorkContext) {
    let completions = Arc::new(AtomicU64::new(0));
    let ctx = WorkContext::new(completions.clone());
    (completions, ctx)
  }

  #[test]
  fn test_context_reads_runner_total() {
    let (completions, ctx) = context();
    assert_eq!(ctx.completed_runs(), 0);

    completions.store(4, Ordering::SeqCst);
    assert_eq!(ctx.completed_runs(), 4);
  }

  #[tokio::test(start_paused = true)]
  async fn test_simulated_work_waits_delay() {
    let (completions, ctx) = context();
    let work = SimulatedWork::default();
    let started = tokio::time::Instant::now();

    let mut output = work.perform(&ctx).await.unwrap();

    assert!(started.elapsed() >= DEFAULT_DELAY);
    assert_eq!(output.processed, 0);
    assert_eq!(completions.load(Ordering::SeqCst), 0);

    work.completed(&mut output, 7);
    assert_eq!(output.processed, 7);
    assert_eq!(output.status, COMPLETED_STATUS);
    assert!(chrono::DateTime::parse_from_rfc3339(&output.timestamp).is_ok());
  }

  #[tokio::test]
  async fn test_work_fn_passes_through_result() {
    let (completions, ctx) = context();

    let ok = work_fn(|| async { Ok::<_, WorkFailure>("done") });
    assert_eq!(ok.perform(&ctx).await, Ok("done"));

    let err = work_fn(|| async { Err::<(), _>(WorkFailure::new("boom")) });
    assert_eq!(err.perform(&ctx).await, Err(WorkFailure::new("boom")));

    assert_eq!(completions.load(Ordering::SeqCst), 0);
  }
}
