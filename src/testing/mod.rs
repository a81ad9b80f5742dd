//! Smoke-test runner
//!
//! Checks are judged by a literal substring in the raw response body, never
//! by status code or decoded JSON. Runs are strictly sequential and stop at
//! the first failing check.

mod config;
mod runner;
pub mod scenarios;

pub use config::*;
pub use runner::{run_check, run_scenario, CheckFailure, FailureReason, RunConfig, RunReport};
pub use scenarios::ScenarioKind;
