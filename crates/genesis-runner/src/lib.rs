//! Task running for genesis.
//!
//! This crate provides the [`TaskRunner`], which wraps a pluggable
//! [`UnitOfWork`] with configuration, timing and uniform result reporting.
//! Every call to [`TaskRunner::run`] yields a [`RunResult`]; failures of the
//! unit of work are reported through the envelope and never propagate to the
//! caller.

mod error;
mod result;
mod runner;
mod work;

pub use error::{UNKNOWN_ERROR, WorkFailure};
pub use result::{RunResult, SUCCESS_MESSAGE};
pub use runner::TaskRunner;
pub use work::{
  COMPLETED_STATUS, DEFAULT_DELAY, SimulatedOutput, SimulatedWork, UnitOfWork, WorkContext, WorkFn,
  work_fn,
};
