// End-to-end tests of the fittrack binary against a throwaway data directory.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn fittrack(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("fittrack").unwrap();
    cmd.env("FITTRACK_HOME", home.path())
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG");
    cmd
}

fn plan_id_from_json(output: &[u8]) -> i64 {
    let value: serde_json::Value = serde_json::from_slice(output).unwrap();
    value["id"].as_i64().unwrap()
}

#[test]
fn test_plan_create_list_show() {
    let home = TempDir::new().unwrap();

    let output = fittrack(&home)
        .args(["plan", "create", "Monday", "-e", "Push ups:3:10:30:45", "-e", "Plank:2:0:60"])
        .args(["--output", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let id = plan_id_from_json(&output.stdout);

    fittrack(&home)
        .args(["plan", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Monday").and(predicate::str::contains("2 exercises")));

    fittrack(&home)
        .args(["plan", "show", &id.to_string()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Push ups").and(predicate::str::contains("Plank")));

    assert!(home.path().join("fittrack.db").exists());
}

#[test]
fn test_invalid_exercise_is_rejected() {
    let home = TempDir::new().unwrap();

    fittrack(&home)
        .args(["plan", "create", "Bad", "-e", "Squats:zero:10:30"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("sets must be a whole number"));
}

#[test]
fn test_missing_plan_exits_with_not_found() {
    let home = TempDir::new().unwrap();

    fittrack(&home)
        .args(["plan", "show", "42"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_headless_session_is_recorded_and_survives_plan_deletion() {
    let home = TempDir::new().unwrap();

    let output = fittrack(&home)
        .args(["plan", "create", "Instant", "-e", "Jump:2:5:0:0", "-o", "json"])
        .output()
        .unwrap();
    let id = plan_id_from_json(&output.stdout);

    fittrack(&home)
        .args(["session", "run", &id.to_string(), "--headless"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Instant finished"));

    fittrack(&home)
        .args(["plan", "delete", &id.to_string()])
        .assert()
        .success();

    fittrack(&home)
        .args(["history", "list", "-o", "json"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("\"count\": 1").and(predicate::str::contains("\"plan_name\": \"Instant\"")),
        );
}

#[test]
fn test_history_empty_and_clear_needs_force() {
    let home = TempDir::new().unwrap();

    fittrack(&home)
        .args(["history", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No sessions recorded"));

    fittrack(&home).args(["history", "clear"]).assert().code(3);

    fittrack(&home)
        .args(["history", "report", "--period", "all"])
        .assert()
        .success()
        .stdout(predicate::str::contains("All Time"));
}

#[test]
fn test_config_default_output() {
    let home = TempDir::new().unwrap();
    std::fs::write(home.path().join("config.yaml"), "general:\n  default_output: json\n").unwrap();

    fittrack(&home)
        .args(["plan", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"count\": 0"));
}

#[test]
fn test_completions() {
    let home = TempDir::new().unwrap();

    fittrack(&home)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("fittrack"));
}
