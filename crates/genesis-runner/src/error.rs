//! Unit of work failures.

use std::any::Any;

/// Message reported when a failure carries no description.
pub const UNKNOWN_ERROR: &str = "unknown error";

/// A failure raised by a unit of work.
///
/// This is the only error kind the runner knows about. It is always
/// converted into a failed [`RunResult`](crate::RunResult) and never
/// returned from [`TaskRunner::run`](crate::TaskRunner::run).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}", message_or_unknown(.description))]
pub struct WorkFailure {
  description: Option<String>,
}

impl WorkFailure {
  /// Create a failure with a human-readable description.
  pub fn new(description: impl Into<String>) -> Self {
    Self {
      description: Some(description.into()),
    }
  }

  /// Create a failure that carries no description.
  pub fn unknown() -> Self {
    Self { description: None }
  }

  /// Create a failure from any error, using its `Display` output.
  pub fn from_error<E: std::error::Error + ?Sized>(error: &E) -> Self {
    Self::new(error.to_string())
  }

  /// Map a panic payload to a failure.
  ///
  /// `panic!` with a literal or formatted message yields that message; any
  /// other payload yields an unknown failure.
  pub(crate) fn from_panic(payload: Box<dyn Any + Send>) -> Self {
    if let Some(message) = payload.downcast_ref::<&str>() {
      Self::new(*message)
    } else if let Ok(message) = payload.downcast::<String>() {
      Self::new(*message)
    } else {
      Self::unknown()
    }
  }

  /// The description, if one was given and is not blank.
  pub fn description(&self) -> Option<&str> {
    non_blank(&self.description)
  }

  /// The display string for this failure, falling back to [`UNKNOWN_ERROR`].
  pub fn message(&self) -> &str {
    message_or_unknown(&self.description)
  }
}

fn non_blank(description: &Option<String>) -> Option<&str> {
  description
    .as_deref()
    .filter(|description| !description.trim().is_empty())
}

fn message_or_unknown(description: &Option<String>) -> &str {
  non_blank(description).unwrap_or(UNKNOWN_ERROR)
}

impl From<String> for WorkFailure {
  fn from(description: String) -> Self {
    Self::new(description)
  }
}

impl From<&str> for WorkFailure {
  fn from(description: &str) -> Self {
    Self::new(description)
  }
}
