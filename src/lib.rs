//! Meal max smoke test
//!
//! A fail-fast HTTP smoke-test harness for the meal max API. The runner can
//! be driven from the `smoketest` binary or called directly as a library.

pub mod api;
pub mod cli;
pub mod commands;
pub mod common;
pub mod testing;

// Re-export commonly used types for tests
pub use common::{Error, Result};
pub use testing::{run_scenario, Check, RunConfig, RunReport, Scenario, ScenarioKind};
