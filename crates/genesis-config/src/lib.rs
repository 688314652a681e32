//! Genesis Config
//!
//! This crate contains the configuration types for the genesis task runner.
//!
//! A [`RunnerConfigDef`] is the partial, serializable form: every field is
//! optional and may come from a JSON file or be built in code. Resolving it
//! produces a [`RunnerConfig`], which carries the effective values and is
//! never mutated afterwards.

mod error;
mod runner;

pub use error::ConfigError;
pub use runner::{DEFAULT_MAX_RETRIES, DEFAULT_TIMEOUT_MS, RunnerConfig, RunnerConfigDef};
