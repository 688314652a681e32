//! Run result envelope.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::WorkFailure;

/// Message attached to every successful run.
pub const SUCCESS_MESSAGE: &str = "Processing completed successfully";

/// Result of a single [`TaskRunner::run`](crate::TaskRunner::run) call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunResult<T> {
  /// Whether the unit of work completed without failure.
  pub success: bool,
  /// Output of the unit of work. Only present on success.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub data: Option<T>,
  /// Human-readable outcome summary.
  pub message: String,
  /// When this result was produced.
  pub timestamp: DateTime<Utc>,
}

impl<T> RunResult<T> {
  pub(crate) fn completed(data: T) -> Self {
    Self {
      success: true,
      data: Some(data),
      message: SUCCESS_MESSAGE.to_string(),
      timestamp: Utc::now(),
    }
  }

  pub(crate) fn failed(failure: &WorkFailure) -> Self {
    Self {
      success: false,
      data: None,
      message: failure.message().to_string(),
      timestamp: Utc::now(),
    }
  }

  /// Convert into a `Result`, yielding the payload on success and a
  /// [`WorkFailure`] carrying the message otherwise.
  pub fn into_result(self) -> Result<T, WorkFailure> {
    match (self.success, self.data) {
      (true, Some(data)) => Ok(data),
      _ => Err(WorkFailure::new(self.message)),
    }
  }
}
