//! Task runner implementation.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use futures::FutureExt;
use genesis_config::RunnerConfig;
use tokio::time::Instant;
use tracing::{info, instrument, warn};

use crate::error::WorkFailure;
use crate::result::RunResult;
use crate::work::{SimulatedWork, UnitOfWork, WorkContext};

/// Runs a unit of work and reports every outcome as a [`RunResult`].
///
/// # Usage
///
/// ```ignore
/// let runner = TaskRunner::new(RunnerConfig::default());
///
/// let first = runner.run().await;
/// assert_eq!(first.data.unwrap().processed, 1);
///
/// let second = runner.run().await;
/// assert_eq!(second.data.unwrap().processed, 2);
/// ```
///
/// The configured timeout and retry budget are carried but not enforced: a
/// slow unit of work runs to completion and a failure is reported after a
/// single attempt.
pub struct TaskRunner<W = SimulatedWork> {
  config: RunnerConfig,
  work: W,
  completions: Arc<AtomicU64>,
}

impl TaskRunner<SimulatedWork> {
  /// Create a runner that executes [`SimulatedWork`].
  pub fn new(config: RunnerConfig) -> Self {
    Self::with_work(config, SimulatedWork::default())
  }
}

impl Default for TaskRunner<SimulatedWork> {
  fn default() -> Self {
    Self::new(RunnerConfig::default())
  }
}

impl<W: UnitOfWork> TaskRunner<W> {
  /// Create a runner that executes the given unit of work.
  pub fn with_work(config: RunnerConfig, work: W) -> Self {
    Self {
      config,
      work,
      completions: Arc::new(AtomicU64::new(0)),
    }
  }

  pub fn config(&self) -> &RunnerConfig {
    &self.config
  }

  pub fn work(&self) -> &W {
    &self.work
  }

  /// Number of successful runs completed by this runner.
  pub fn completed_runs(&self) -> u64 {
    self.completions.load(Ordering::SeqCst)
  }

  /// Execute the unit of work once.
  ///
  /// Never fails: an error or panic from the unit of work is captured in the
  /// returned envelope.
  #[instrument(name = "task_run", skip_all)]
  pub async fn run(&self) -> RunResult<W::Output> {
    let started = Instant::now();
    let verbose = self.config.verbose();

    if verbose {
      info!(
        timeout_ms = self.config.timeout_ms(),
        max_retries = self.config.max_retries(),
        "task run started"
      );
    }

    let ctx = WorkContext::new(self.completions.clone());

    let outcome = AssertUnwindSafe(self.work.perform(&ctx))
      .catch_unwind()
      .await
      .unwrap_or_else(|payload| Err(WorkFailure::from_panic(payload)));

    match outcome {
      Ok(mut data) => {
        let completed_runs = self.completions.fetch_add(1, Ordering::SeqCst) + 1;
        self.work.completed(&mut data, completed_runs);

        if verbose {
          let elapsed_ms = elapsed_millis(started);
          info!(elapsed_ms, completed_runs, "task run completed");
        }

        RunResult::completed(data)
      }
      Err(failure) => {
        if verbose {
          let elapsed_ms = elapsed_millis(started);
          warn!(elapsed_ms, error = %failure, "task run failed");
        }

        RunResult::failed(&failure)
      }
    }
  }
}

fn elapsed_millis(started: Instant) -> u64 {
  u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}
