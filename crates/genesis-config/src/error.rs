//! Configuration errors.

/// Errors that can occur while resolving a runner configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
  /// A numeric field was given a negative value.
  #[error("'{field}' must not be negative, got {value}")]
  Negative { field: &'static str, value: i64 },

  /// A numeric field does not fit the range of its resolved type.
  #[error("'{field}' is out of range: {value}")]
  OutOfRange { field: &'static str, value: i64 },
}
