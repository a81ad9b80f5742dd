//! CLI command definitions
//!
//! Defines the clap commands for the smoke-test CLI.

use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::testing::ScenarioKind;

#[derive(Subcommand)]
pub enum Commands {
    /// Run a scenario against the service (the default)
    Run(RunArgs),

    /// Print the checks a scenario would run, without sending requests
    #[command(alias = "ls")]
    List(ScenarioArgs),
}

/// Which scenario to use
#[derive(Args, Debug, Clone, Default)]
pub struct ScenarioArgs {
    /// Built-in scenario
    #[arg(long, short, value_enum, default_value_t = ScenarioKind::Battle)]
    pub scenario: ScenarioKind,

    /// YAML scenario file, used instead of a built-in scenario
    #[arg(long, short, conflicts_with = "scenario")]
    pub file: Option<PathBuf>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    #[command(flatten)]
    pub scenario: ScenarioArgs,

    /// Base URL of the meal max API (default: http://localhost:5000/api)
    #[arg(long, env = "MEAL_MAX_BASE_URL")]
    pub base_url: Option<String>,

    /// Configuration file (default: platform config dir)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Echo every response body
    #[arg(long, short)]
    pub verbose: bool,
}
