//! Scenario runner
//!
//! Sends one request per check, in order, and stops at the first check whose
//! response body lacks its marker. Transport failures take the same path: an
//! unreachable service simply produces no body to match.

use std::fmt;

use colored::Colorize;

use crate::api::{ApiResponse, Transport};
use crate::common::config::Markers;

use super::config::{Check, Scenario};

/// Settings the runner needs besides the transport
#[derive(Debug, Clone, Default)]
pub struct RunConfig {
    /// Marker strings checks are judged against
    pub markers: Markers,
    /// Echo every response body
    pub verbose: bool,
}

/// Why a check failed
#[derive(Debug, Clone, PartialEq)]
pub enum FailureReason {
    /// The service answered but the body did not contain the marker
    MarkerMissing { expected: String, status: u16 },
    /// No body came back at all
    Transport(String),
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureReason::MarkerMissing { expected, status } => {
                write!(f, "expected {expected} in response (HTTP {status})")
            }
            FailureReason::Transport(message) => write!(f, "no response: {message}"),
        }
    }
}

/// The check that ended a run
#[derive(Debug, Clone, PartialEq)]
pub struct CheckFailure {
    /// Check identifier, e.g. `check_health`
    pub check: &'static str,
    /// Check with its arguments, for messages
    pub detail: String,
    /// 1-based position in the scenario
    pub step: usize,
    pub reason: FailureReason,
}

impl fmt::Display for CheckFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} failed at step {}: {}", self.detail, self.step, self.reason)
    }
}

/// Result of a scenario run
#[derive(Debug)]
pub struct RunReport {
    pub name: String,
    pub checks_run: usize,
    pub checks_total: usize,
    /// Set when the run aborted
    pub failure: Option<CheckFailure>,
}

impl RunReport {
    pub fn passed(&self) -> bool {
        self.failure.is_none()
    }
}

/// Run every check of `scenario` in order, aborting at the first failure
pub async fn run_scenario<T>(transport: &T, scenario: &Scenario, config: &RunConfig) -> RunReport
where
    T: Transport + ?Sized,
{
    let checks_total = scenario.steps.len();

    println!(
        "\n{} {} {}",
        "Running Scenario:".blue().bold(),
        scenario.name.white().bold(),
        format!("against {}", transport.base_url()).dimmed()
    );
    if let Some(desc) = &scenario.description {
        println!("  {}", desc.dimmed());
    }
    println!("\n{}", "Checks:".cyan());

    for (i, check) in scenario.steps.iter().enumerate() {
        let step = i + 1;

        match run_check(transport, check, &config.markers).await {
            Ok(response) => {
                println!("  {} Step {}: {}", "✓".green(), step, check.to_string().dimmed());
                if config.verbose {
                    echo_body(&response);
                }
            }
            Err((reason, response)) => {
                println!("  {} Step {}: {}", "✗".red(), step, check);
                if config.verbose {
                    if let Some(response) = &response {
                        echo_body(response);
                    }
                }

                let failure = CheckFailure {
                    check: check.name(),
                    detail: check.to_string(),
                    step,
                    reason,
                };
                println!("    {}", failure.reason.to_string().red());

                return RunReport {
                    name: scenario.name.clone(),
                    checks_run: step,
                    checks_total,
                    failure: Some(failure),
                };
            }
        }
    }

    println!(
        "\n{} {}\n",
        "✓".green().bold(),
        "All Checks Passed".green().bold()
    );

    RunReport {
        name: scenario.name.clone(),
        checks_run: checks_total,
        checks_total,
        failure: None,
    }
}

/// Issue one check and judge its body
///
/// On failure the response is handed back too (when there was one) so the
/// caller can still echo it.
pub async fn run_check<T>(
    transport: &T,
    check: &Check,
    markers: &Markers,
) -> std::result::Result<ApiResponse, (FailureReason, Option<ApiResponse>)>
where
    T: Transport + ?Sized,
{
    let expected = check.marker_kind().resolve(markers);

    let response = match transport.send(&check.request()).await {
        Ok(response) => response,
        Err(e) => {
            tracing::warn!(check = check.name(), error = %e, "request failed");
            return Err((FailureReason::Transport(e.to_string()), None));
        }
    };

    if response.contains(expected) {
        Ok(response)
    } else {
        tracing::debug!(check = check.name(), status = response.status, "marker missing");
        let reason = FailureReason::MarkerMissing {
            expected: expected.to_string(),
            status: response.status,
        };
        Err((reason, Some(response)))
    }
}

fn echo_body(response: &ApiResponse) {
    for line in response.pretty_body().lines() {
        println!("    {}", line.dimmed());
    }
}
