//! CLI command handling
//!
//! Resolves configuration, picks the scenario and hands it to the runner.

use colored::Colorize;

use crate::api::HttpTransport;
use crate::commands::{Commands, RunArgs, ScenarioArgs};
use crate::common::config::Config;
use crate::common::Result;
use crate::testing::{run_scenario, RunConfig, RunReport, Scenario};

/// Dispatch a CLI command
///
/// Returns whether the command succeeded; only `main` turns that into an
/// exit code.
pub async fn dispatch(command: Commands) -> Result<bool> {
    match command {
        Commands::Run(args) => {
            let report = run(&args).await?;
            print_summary(&report);
            Ok(report.passed())
        }
        Commands::List(args) => {
            let scenario = load_scenario(&args)?;
            print_scenario(&scenario);
            Ok(true)
        }
    }
}

/// Build the transport and run the selected scenario
pub async fn run(args: &RunArgs) -> Result<RunReport> {
    let config = Config::resolve(args.config.as_ref())?;
    let scenario = load_scenario(&args.scenario)?;
    let base_url = config.base_url(args.base_url.as_deref());

    tracing::debug!(%base_url, scenario = %scenario.name, "starting run");

    let transport = HttpTransport::new(&base_url, &config.http)?;
    let run_config = RunConfig {
        markers: config.markers,
        verbose: args.verbose,
    };

    Ok(run_scenario(&transport, &scenario, &run_config).await)
}

/// The YAML file when given, otherwise the built-in scenario
pub fn load_scenario(args: &ScenarioArgs) -> Result<Scenario> {
    match &args.file {
        Some(path) => Scenario::load(path),
        None => Ok(args.scenario.scenario()),
    }
}

fn print_summary(report: &RunReport) {
    match &report.failure {
        None => println!(
            "{} {}/{} checks passed",
            report.name.bold(),
            report.checks_run,
            report.checks_total
        ),
        Some(failure) => eprintln!(
            "{} {}: {} ({} of {} checks run)",
            "Smoke test failed".red().bold(),
            report.name,
            failure,
            report.checks_run,
            report.checks_total
        ),
    }
}

fn print_scenario(scenario: &Scenario) {
    println!("{}", scenario.name.bold());
    if let Some(desc) = &scenario.description {
        println!("  {}", desc.dimmed());
    }
    for (i, check) in scenario.steps.iter().enumerate() {
        let request = check.request();
        println!(
            "  {:>2}. {} {}",
            i + 1,
            check,
            format!("{} {}", request.method, request.path).dimmed()
        );
    }
}
