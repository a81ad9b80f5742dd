//! End-to-end tests for the smoketest binary
//!
//! These tests run the compiled binary against a wiremock stand-in for the
//! meal max API and check:
//! 1. Exit codes for passing, failing and mis-invoked runs
//! 2. That checks hit the service in order, one request each
//! 3. That nothing runs after the first failed check

use std::path::PathBuf;

use serde_json::json;
use tempfile::TempDir;
use tokio::process::Command;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const HEALTHY: &str = "{\n  \"status\": \"healthy\"\n}";
const DB_HEALTHY: &str = "{\n  \"database_status\": \"healthy\"\n}";
const SUCCESS: &str = "{\n  \"status\": \"success\"\n}";

/// Test context with a mock service and an isolated config file
struct TestContext {
    /// Stand-in for the meal max API
    server: MockServer,
    /// Holds the empty config file
    _temp_dir: TempDir,
    /// Passed as `--config` so a user config never leaks in
    config_path: PathBuf,
}

impl TestContext {
    /// Start a mock service with no endpoints mounted
    async fn new() -> Self {
        let server = MockServer::start().await;
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join("config.toml");
        std::fs::write(&config_path, "").expect("Failed to write config");

        Self {
            server,
            _temp_dir: temp_dir,
            config_path,
        }
    }

    /// Start a mock service where every endpoint answers as a healthy service
    async fn healthy() -> Self {
        let ctx = Self::new().await;
        ctx.mount("GET", "/health", HEALTHY).await;
        ctx.mount("GET", "/db-check", DB_HEALTHY).await;
        ctx.mount_service_endpoints().await;
        ctx
    }

    async fn mount(&self, verb: &str, route: &str, body: &str) {
        Mock::given(method(verb))
            .and(path(format!("/api{route}")))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .mount(&self.server)
            .await;
    }

    async fn mount_service_endpoints(&self) {
        for (verb, route) in [
            ("DELETE", "/clear-meals"),
            ("POST", "/create-meal"),
            ("POST", "/prep-combatant"),
            ("POST", "/clear-combatants"),
            ("GET", "/get-combatants"),
            ("GET", "/battle"),
            ("GET", "/leaderboard"),
            ("DELETE", "/delete-meal/1"),
            ("GET", "/get-meal-by-id/1"),
            ("GET", "/get-meal-by-name/Pasta"),
        ] {
            self.mount(verb, route, SUCCESS).await;
        }
    }

    fn base_url(&self) -> String {
        format!("{}/api", self.server.uri())
    }

    /// Run the binary against the mock service
    ///
    /// A leading `run` subcommand stays first; target flags go after it.
    async fn run_smoketest(&self, args: &[&str]) -> SmokeOutput {
        let base_url = self.base_url();
        let config = self.config_path.to_string_lossy().into_owned();

        let (subcommand, rest) = match args.split_first() {
            Some((&"run", rest)) => (Some("run"), rest),
            _ => (None, args),
        };

        let mut full_args: Vec<&str> = subcommand.into_iter().collect();
        full_args.extend(["--base-url", base_url.as_str(), "--config", config.as_str()]);
        full_args.extend_from_slice(rest);
        run_binary(&full_args).await
    }

    /// Paths the mock service saw, in arrival order
    async fn received_paths(&self) -> Vec<String> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .map(|r| match r.url.query() {
                Some(q) => format!("{} {}?{}", r.method, r.url.path(), q),
                None => format!("{} {}", r.method, r.url.path()),
            })
            .collect()
    }
}

/// Output from a smoketest invocation
#[derive(Debug)]
struct SmokeOutput {
    stdout: String,
    stderr: String,
    code: Option<i32>,
}

async fn run_binary(args: &[&str]) -> SmokeOutput {
    let output = Command::new(env!("CARGO_BIN_EXE_smoketest"))
        .args(args)
        .env_remove("MEAL_MAX_BASE_URL")
        .env("NO_COLOR", "1")
        .output()
        .await
        .expect("Failed to run smoketest");

    SmokeOutput {
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        code: output.status.code(),
    }
}

fn fixture(name: &str) -> String {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
        .to_string_lossy()
        .into_owned()
}

#[tokio::test]
async fn test_battle_scenario_passes_against_healthy_service() {
    let ctx = TestContext::healthy().await;

    let out = ctx.run_smoketest(&[]).await;
    assert_eq!(out.code, Some(0), "stdout: {}\nstderr: {}", out.stdout, out.stderr);
    assert!(out.stdout.contains("15/15 checks passed"), "{}", out.stdout);

    assert_eq!(
        ctx.received_paths().await,
        vec![
            "GET /api/health",
            "GET /api/db-check",
            "DELETE /api/clear-meals",
            "POST /api/clear-combatants",
            "POST /api/create-meal",
            "POST /api/create-meal",
            "POST /api/create-meal",
            "POST /api/prep-combatant",
            "POST /api/prep-combatant",
            "GET /api/get-combatants",
            "GET /api/battle",
            "GET /api/get-combatants",
            "GET /api/leaderboard?sort=wins",
            "DELETE /api/clear-meals",
            "POST /api/clear-combatants",
        ]
    );
}

#[tokio::test]
async fn test_create_meal_sends_json_body() {
    let ctx = TestContext::new().await;
    ctx.mount("GET", "/health", HEALTHY).await;
    ctx.mount("GET", "/db-check", DB_HEALTHY).await;
    Mock::given(method("POST"))
        .and(path("/api/create-meal"))
        .and(body_json(json!({
            "meal": "Pasta",
            "cuisine": "Italian",
            "price": 15.0,
            "difficulty": "MED",
        })))
        .respond_with(ResponseTemplate::new(201).set_body_string(SUCCESS))
        .with_priority(1)
        .expect(1)
        .mount(&ctx.server)
        .await;
    ctx.mount_service_endpoints().await;

    let out = ctx.run_smoketest(&["--scenario", "lifecycle"]).await;
    assert_eq!(out.code, Some(0), "stdout: {}\nstderr: {}", out.stdout, out.stderr);
}

#[tokio::test]
async fn test_lifecycle_scenario_clears_twice_and_deletes() {
    let ctx = TestContext::healthy().await;

    let out = ctx.run_smoketest(&["run", "--scenario", "lifecycle"]).await;
    assert_eq!(out.code, Some(0), "stdout: {}\nstderr: {}", out.stdout, out.stderr);

    let paths = ctx.received_paths().await;
    assert_eq!(&paths[2..4], ["DELETE /api/clear-meals", "DELETE /api/clear-meals"]);
    assert_eq!(
        &paths[4..6],
        ["POST /api/clear-combatants", "POST /api/clear-combatants"]
    );
    let get = paths.iter().position(|p| p == "GET /api/get-meal-by-id/1").unwrap();
    let delete = paths.iter().position(|p| p == "DELETE /api/delete-meal/1").unwrap();
    assert!(get < delete);
}

#[tokio::test]
async fn test_missing_marker_stops_the_run() {
    let ctx = TestContext::new().await;
    ctx.mount("GET", "/health", HEALTHY).await;
    ctx.mount("GET", "/db-check", "{\n  \"database_status\": \"unhealthy\"\n}")
        .await;
    ctx.mount_service_endpoints().await;

    let out = ctx.run_smoketest(&[]).await;
    assert_eq!(out.code, Some(1));
    assert!(out.stderr.contains("check_db failed at step 2"), "{}", out.stderr);
    assert_eq!(
        ctx.received_paths().await,
        vec!["GET /api/health", "GET /api/db-check"]
    );
}

#[tokio::test]
async fn test_error_status_with_marker_still_passes() {
    let ctx = TestContext::new().await;
    Mock::given(method("GET"))
        .and(path("/api/health"))
        .respond_with(ResponseTemplate::new(503).set_body_string(HEALTHY))
        .mount(&ctx.server)
        .await;
    ctx.mount("GET", "/db-check", DB_HEALTHY).await;
    ctx.mount_service_endpoints().await;

    let out = ctx.run_smoketest(&[]).await;
    assert_eq!(out.code, Some(0), "stdout: {}\nstderr: {}", out.stdout, out.stderr);
}

#[tokio::test]
async fn test_unreachable_service_fails_on_health() {
    // Grab a free port, then release it so nothing is listening there
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let base_url = format!("http://127.0.0.1:{port}/api");

    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");
    std::fs::write(&config, "").unwrap();

    let out = run_binary(&[
        "--base-url",
        &base_url,
        "--config",
        &config.to_string_lossy(),
    ])
    .await;

    assert_eq!(out.code, Some(1));
    assert!(out.stderr.contains("check_health failed at step 1"), "{}", out.stderr);
    assert!(out.stderr.contains("1 of 15 checks run"), "{}", out.stderr);
    assert!(!out.stdout.contains("Step 2"), "{}", out.stdout);
}

#[tokio::test]
async fn test_unknown_flag_exits_one_without_requests() {
    let ctx = TestContext::healthy().await;

    let out = ctx.run_smoketest(&["--explode"]).await;
    assert_eq!(out.code, Some(1));
    assert!(out.stderr.contains("--explode"), "{}", out.stderr);
    assert!(ctx.received_paths().await.is_empty());
}

#[tokio::test]
async fn test_help_exits_zero() {
    let out = run_binary(&["--help"]).await;
    assert_eq!(out.code, Some(0));
    assert!(out.stdout.contains("--verbose"));
}

#[tokio::test]
async fn test_verbose_echoes_response_bodies() {
    let ctx = TestContext::new().await;
    ctx.mount("GET", "/health", r#"{"status": "healthy", "uptime": 42}"#)
        .await;
    ctx.mount("GET", "/db-check", DB_HEALTHY).await;
    ctx.mount_service_endpoints().await;

    let out = ctx.run_smoketest(&["--verbose"]).await;
    assert_eq!(out.code, Some(0), "stdout: {}\nstderr: {}", out.stdout, out.stderr);
    // Pretty-printed, one field per line
    assert!(out.stdout.contains(r#""uptime": 42"#), "{}", out.stdout);
}

#[tokio::test]
async fn test_yaml_scenario_file() {
    let ctx = TestContext::healthy().await;
    Mock::given(method("GET"))
        .and(path("/api/leaderboard"))
        .and(query_param("sort", "win_pct"))
        .respond_with(ResponseTemplate::new(200).set_body_string(SUCCESS))
        .with_priority(1)
        .expect(1)
        .mount(&ctx.server)
        .await;

    let file = fixture("leaderboard.yaml");
    let out = ctx.run_smoketest(&["--file", &file]).await;
    assert_eq!(out.code, Some(0), "stdout: {}\nstderr: {}", out.stdout, out.stderr);
    assert!(out.stdout.contains("11/11 checks passed"), "{}", out.stdout);
}

#[tokio::test]
async fn test_list_sends_nothing() {
    let ctx = TestContext::healthy().await;

    let out = run_binary(&["list", "--scenario", "all"]).await;
    assert_eq!(out.code, Some(0));
    assert!(out.stdout.contains("GET /health"), "{}", out.stdout);
    assert!(out.stdout.contains("prep_combatant(Pasta)"), "{}", out.stdout);
    assert!(out.stdout.contains("delete_meal(1)"), "{}", out.stdout);
    assert!(ctx.received_paths().await.is_empty());
}

#[tokio::test]
async fn test_bad_scenario_file_exits_one() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("broken.yaml");
    std::fs::write(&file, "name: broken\nsteps:\n  - check: reboot_server\n").unwrap();

    let ctx = TestContext::healthy().await;
    let out = ctx.run_smoketest(&["--file", &file.to_string_lossy()]).await;
    assert_eq!(out.code, Some(1));
    assert!(out.stderr.contains("Invalid scenario file"), "{}", out.stderr);
    assert!(ctx.received_paths().await.is_empty());
}
