//! Task runner configuration.
//!
//! # Examples
//!
//! ```json
//! {
//!   "verbose": true,
//!   "timeout_ms": 5000
//! }
//! ```
//!
//! Fields that are not present keep their defaults, so the above resolves to
//! `verbose = true`, `timeout_ms = 5000`, `max_retries = 3`. The camelCase
//! spellings `timeoutMs` (or `timeout`) and `maxRetries` are accepted too.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default upper bound on a single run, in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Default retry budget.
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Partial runner configuration.
///
/// Numeric fields are signed so that negative input survives deserialization
/// and is reported by [`RunnerConfigDef::resolve`] instead of a parse error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunnerConfigDef {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub verbose: Option<bool>,
  #[serde(
    default,
    alias = "timeoutMs",
    alias = "timeout",
    skip_serializing_if = "Option::is_none"
  )]
  pub timeout_ms: Option<i64>,
  #[serde(default, alias = "maxRetries", skip_serializing_if = "Option::is_none")]
  pub max_retries: Option<i64>,
}

impl RunnerConfigDef {
  pub fn with_verbose(mut self, verbose: bool) -> Self {
    self.verbose = Some(verbose);
    self
  }

  pub fn with_timeout_ms(mut self, timeout_ms: i64) -> Self {
    self.timeout_ms = Some(timeout_ms);
    self
  }

  pub fn with_max_retries(mut self, max_retries: i64) -> Self {
    self.max_retries = Some(max_retries);
    self
  }

  /// Resolve into an effective configuration.
  ///
  /// Unset fields take their defaults; set fields override them.
  pub fn resolve(self) -> Result<RunnerConfig, ConfigError> {
    let timeout_ms = match self.timeout_ms {
      Some(value) => non_negative("timeout_ms", value)?,
      None => DEFAULT_TIMEOUT_MS,
    };

    let max_retries = match self.max_retries {
      Some(value) => {
        u32::try_from(non_negative("max_retries", value)?).map_err(|_| {
          ConfigError::OutOfRange {
            field: "max_retries",
            value,
          }
        })?
      }
      None => DEFAULT_MAX_RETRIES,
    };

    Ok(RunnerConfig {
      verbose: self.verbose.unwrap_or(false),
      timeout_ms,
      max_retries,
    })
  }
}

fn non_negative(field: &'static str, value: i64) -> Result<u64, ConfigError> {
  u64::try_from(value).map_err(|_| ConfigError::Negative { field, value })
}

/// Effective runner configuration.
///
/// `timeout_ms` and `max_retries` are carried for callers and diagnostics.
/// The runner does not enforce either of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunnerConfig {
  verbose: bool,
  timeout_ms: u64,
  max_retries: u32,
}

impl RunnerConfig {
  /// Whether diagnostic logging around execution is enabled.
  pub fn verbose(&self) -> bool {
    self.verbose
  }

  pub fn timeout_ms(&self) -> u64 {
    self.timeout_ms
  }

  pub fn timeout(&self) -> Duration {
    Duration::from_millis(self.timeout_ms)
  }

  pub fn max_retries(&self) -> u32 {
    self.max_retries
  }
}

impl Default for RunnerConfig {
  fn default() -> Self {
    Self {
      verbose: false,
      timeout_ms: DEFAULT_TIMEOUT_MS,
      max_retries: DEFAULT_MAX_RETRIES,
    }
  }
}

impl TryFrom<RunnerConfigDef> for RunnerConfig {
  type Error = ConfigError;

  fn try_from(def: RunnerConfigDef) -> Result<Self, Self::Error> {
    def.resolve()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_empty_def_resolves_to_defaults() {
    let config = RunnerConfigDef::default().resolve().unwrap();

    assert!(!config.verbose());
    assert_eq!(config.timeout_ms(), 30_000);
    assert_eq!(config.max_retries(), 3);
    assert_eq!(config, RunnerConfig::default());
  }

  #[test]
  fn test_explicit_fields_override_defaults() {
    let config = RunnerConfigDef::default()
      .with_verbose(true)
      .with_max_retries(0)
      .resolve()
      .unwrap();

    assert!(config.verbose());
    assert_eq!(config.max_retries(), 0);
    assert_eq!(config.timeout_ms(), DEFAULT_TIMEOUT_MS);
  }

  #[test]
  fn test_timeout_only_override() {
    let config = RunnerConfigDef::default()
      .with_timeout_ms(250)
      .resolve()
      .unwrap();

    assert!(!config.verbose());
    assert_eq!(config.timeout(), Duration::from_millis(250));
    assert_eq!(config.max_retries(), DEFAULT_MAX_RETRIES);
  }

  #[test]
  fn test_negative_timeout_rejected() {
    let err = RunnerConfigDef::default()
      .with_timeout_ms(-1)
      .resolve()
      .unwrap_err();

    assert_eq!(
      err,
      ConfigError::Negative {
        field: "timeout_ms",
        value: -1
      }
    );
    assert_eq!(err.to_string(), "'timeout_ms' must not be negative, got -1");
  }

  #[test]
  fn test_negative_retries_rejected() {
    let err = RunnerConfig::try_from(RunnerConfigDef::default().with_max_retries(-3)).unwrap_err();

    assert_eq!(
      err,
      ConfigError::Negative {
        field: "max_retries",
        value: -3
      }
    );
  }

  #[test]
  fn test_retries_out_of_range() {
    let value = i64::from(u32::MAX) + 1;
    let err = RunnerConfigDef::default()
      .with_max_retries(value)
      .resolve()
      .unwrap_err();

    assert_eq!(
      err,
      ConfigError::OutOfRange {
        field: "max_retries",
        value
      }
    );
  }

  #[test]
  fn test_deserialize_partial_json() {
    let def: RunnerConfigDef = serde_json::from_str(r#"{"verbose": true}"#).unwrap();

    assert_eq!(def.verbose, Some(true));
    assert_eq!(def.timeout_ms, None);

    let config = def.resolve().unwrap();
    assert_eq!(config.timeout_ms(), DEFAULT_TIMEOUT_MS);
  }

  #[test]
  fn test_deserialize_camel_case_aliases() {
    let def: RunnerConfigDef =
      serde_json::from_str(r#"{"timeoutMs": 1000, "maxRetries": 5}"#).unwrap();
    assert_eq!(def.timeout_ms, Some(1000));
    assert_eq!(def.max_retries, Some(5));

    let def: RunnerConfigDef = serde_json::from_str(r#"{"timeout": 42}"#).unwrap();
    assert_eq!(def.timeout_ms, Some(42));
  }

  #[test]
  fn test_serialize_skips_unset_fields() {
    let def = RunnerConfigDef::default().with_verbose(false);
    let json = serde_json::to_value(&def).unwrap();

    assert_eq!(json, serde_json::json!({"verbose": false}));
  }
}
