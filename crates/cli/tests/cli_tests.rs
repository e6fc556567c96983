//! CLI integration tests

use std::io::Write;
use std::process::{Command, Output};

const FACTS: &str = r#"{
    "cluster": "prod-aks",
    "capacity": {"total_cpu_cores": 32, "total_memory_gb": 128},
    "namespaces": [
        {"name": "web", "cpu_cores_requested": 8, "memory_gb_requested": 32, "pod_count": 12, "spot_eligible_pods": 6},
        {"name": "batch", "cpu_cores_requested": 4, "memory_gb_requested": 16, "pod_count": 4, "idle_pods": 2}
    ],
    "security": {
        "security_score": 62,
        "risks": {"privileged_containers": 3}
    }
}"#;

/// Run the CLI in local mode with an empty home directory
fn ccre(args: &[&str]) -> Output {
    let home = tempfile::tempdir().expect("Failed to create temp home");
    Command::new("cargo")
        .args(["run", "-q", "-p", "ccre-cli", "--"])
        .args(args)
        .env("HOME", home.path())
        .env_remove("CCRE_API_URL")
        .env_remove("CCRE_MONTHLY_COST")
        .env_remove("CCRE_INDUSTRY")
        .output()
        .expect("Failed to execute command")
}

fn facts_file() -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("Failed to create fact file");
    file.write_all(FACTS.as_bytes()).expect("Failed to write fact file");
    file
}

fn stdout_json(output: &Output) -> serde_json::Value {
    let stdout = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str(&stdout).expect("stdout should be JSON")
}

/// Test that the CLI shows help
#[test]
fn test_cli_help() {
    let output = ccre(&["--help"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "CLI help should succeed");
    assert!(
        stdout.contains("Cluster Cost & Risk Estimator"),
        "Should show app name"
    );
    assert!(stdout.contains("costs"), "Should show costs command");
    assert!(stdout.contains("risk"), "Should show risk command");
    assert!(stdout.contains("report"), "Should show report command");
    assert!(stdout.contains("profiles"), "Should show profiles command");
}

/// Test that the CLI shows version
#[test]
fn test_cli_version() {
    let output = ccre(&["--version"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "CLI version should succeed");
    assert!(stdout.contains("ccre"), "Should show binary name");
}

/// Test costs subcommand help
#[test]
fn test_costs_help() {
    let output = ccre(&["costs", "--help"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Costs help should succeed");
    assert!(stdout.contains("--facts"), "Should show facts option");
    assert!(stdout.contains("--monthly-cost"), "Should show monthly cost option");
    assert!(stdout.contains("--namespace"), "Should show namespace option");
}

/// Test risk subcommand help
#[test]
fn test_risk_help() {
    let output = ccre(&["risk", "--help"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Risk help should succeed");
    assert!(stdout.contains("--industry"), "Should show industry option");
    assert!(stdout.contains("CCRE_INDUSTRY"), "Should show env var");
}

/// Test format and api-url options
#[test]
fn test_global_options() {
    let output = ccre(&["--help"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(stdout.contains("--format"), "Should show format option");
    assert!(stdout.contains("table"), "Should show table format");
    assert!(stdout.contains("json"), "Should show json format");
    assert!(stdout.contains("--api-url"), "Should show api-url option");
    assert!(stdout.contains("CCRE_API_URL"), "Should show env var");
}

/// Test invalid command error handling
#[test]
fn test_invalid_command() {
    let output = ccre(&["invalid-command"]);
    assert!(!output.status.success(), "Invalid command should fail");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("error") || stderr.contains("invalid"),
        "Should show error message"
    );
}

/// Test missing required argument error handling
#[test]
fn test_missing_facts_argument() {
    let output = ccre(&["risk"]);
    assert!(!output.status.success(), "Missing --facts should fail");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("--facts"), "Should name the missing argument");
}

/// Costs needs a monthly cost from a flag, env var or config file
#[test]
fn test_costs_without_monthly_cost_fails() {
    let facts = facts_file();
    let output = ccre(&["costs", "--facts", facts.path().to_str().unwrap()]);

    assert!(!output.status.success(), "Costs without a monthly cost should fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("--monthly-cost"), "Should explain how to pass the cost");
}

#[test]
fn test_local_costs_json() {
    let facts = facts_file();
    let output = ccre(&[
        "--format",
        "json",
        "costs",
        "--facts",
        facts.path().to_str().unwrap(),
        "--monthly-cost",
        "3000",
    ]);

    assert!(output.status.success(), "Local costs should succeed");
    let report = stdout_json(&output);
    assert_eq!(report["estimate"]["total_cluster_cost"], 3000.0);
    assert_eq!(report["estimate"]["namespace_costs"][0]["namespace"], "web");
    assert_eq!(report["utilization"]["namespaces"].as_array().unwrap().len(), 2);
}

#[test]
fn test_local_costs_unknown_namespace_fails() {
    let facts = facts_file();
    let output = ccre(&[
        "costs",
        "--facts",
        facts.path().to_str().unwrap(),
        "--monthly-cost",
        "3000",
        "--namespace",
        "missing",
    ]);

    assert!(!output.status.success(), "Unknown namespace should fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("missing"), "Should name the namespace");
}

#[test]
fn test_local_risk_json_resolves_alias() {
    let facts = facts_file();
    let output = ccre(&[
        "-f",
        "json",
        "risk",
        "--facts",
        facts.path().to_str().unwrap(),
        "--industry",
        "healthcare",
    ]);

    assert!(output.status.success(), "Local risk should succeed");
    let analysis = stdout_json(&output);
    assert_eq!(analysis["industry"], "pharma");
    assert_eq!(analysis["security_score"], 62);
    assert_eq!(analysis["total_risk_exposure"]["best"], 22500.0);
    assert_eq!(analysis["remediation_plan"]["estimated_cost"], 1200.0);
}

/// Without a monthly cost the report still carries the risk section
#[test]
fn test_local_report_json() {
    let facts = facts_file();
    let output = ccre(&[
        "--format",
        "json",
        "report",
        "--facts",
        facts.path().to_str().unwrap(),
    ]);

    assert!(output.status.success(), "Local report should succeed");
    let report = stdout_json(&output);
    assert_eq!(report["cluster"], "prod-aks");
    assert_eq!(report["costs"]["status"], "unavailable");
    assert_eq!(report["risk"]["status"], "available");
    assert_eq!(report["risk"]["data"]["industry"], "generic");
    assert!(report["generated_at"].is_string());
}

#[test]
fn test_local_report_table() {
    let facts = facts_file();
    let output = ccre(&[
        "report",
        "--facts",
        facts.path().to_str().unwrap(),
        "--monthly-cost",
        "3000",
    ]);

    assert!(output.status.success(), "Table report should succeed");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("prod-aks"), "Should show cluster name");
    assert!(stdout.contains("Cost Analysis"), "Should show cost section");
    assert!(stdout.contains("Security Risk Exposure"), "Should show risk section");
}

#[test]
fn test_profiles_json() {
    let output = ccre(&["--format", "json", "profiles"]);

    assert!(output.status.success(), "Profiles should succeed");
    let profiles = stdout_json(&output);
    let industries: Vec<_> = profiles
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["industry"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(industries, ["generic", "pharma", "fintech", "startup"]);
}
