use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn visioncare(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("visioncare").unwrap();
    cmd.arg("--data-dir")
        .arg(dir.path())
        .env_remove("VISIONCARE_HOME")
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1");
    cmd
}

#[test]
fn test_help() {
    let dir = TempDir::new().unwrap();
    visioncare(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Screen time tracking"));
}

#[test]
fn test_status_on_fresh_data_dir() {
    let dir = TempDir::new().unwrap();
    visioncare(&dir)
        .args(["status", "-o", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"state\": \"idle\""))
        .stdout(predicate::str::contains("\"interval_minutes\": 20"));

    assert!(dir.path().join("visioncare.db").exists());
}

#[test]
fn test_policy_persists_across_invocations() {
    let dir = TempDir::new().unwrap();
    visioncare(&dir)
        .args(["policy", "set", "--interval", "45", "--duration", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("45 minutes"));

    visioncare(&dir)
        .args(["policy", "show", "-o", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"interval_minutes\": 45"))
        .stdout(predicate::str::contains("\"duration_minutes\": 3"));
}

#[test]
fn test_policy_out_of_range_fails() {
    let dir = TempDir::new().unwrap();
    visioncare(&dir)
        .args(["policy", "set", "--duration", "31"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("break duration must be 1-30 minutes"));
}

#[test]
fn test_log_add_and_list() {
    let dir = TempDir::new().unwrap();
    visioncare(&dir)
        .args(["log", "add", "-s", "3", "--symptom", "Dryness", "--notes", "long call"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged severity 3"));

    visioncare(&dir)
        .args(["log", "list", "-o", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"count\": 1"))
        .stdout(predicate::str::contains("\"dryness\""))
        .stdout(predicate::str::contains("long call"));
}

#[test]
fn test_log_add_rejects_bad_severity() {
    let dir = TempDir::new().unwrap();
    visioncare(&dir)
        .args(["log", "add", "-s", "9"])
        .assert()
        .failure();
}

#[test]
fn test_checkup_set_show_clear() {
    let dir = TempDir::new().unwrap();
    visioncare(&dir)
        .args(["checkup", "set", "2030-05-01"])
        .assert()
        .success();

    visioncare(&dir)
        .args(["checkup", "-o", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"next_checkup_date\": \"2030-05-01\""));

    visioncare(&dir)
        .args(["checkup", "clear"])
        .assert()
        .success()
        .stdout(predicate::str::contains("not scheduled"));
}

#[test]
fn test_exercise_list_and_show() {
    let dir = TempDir::new().unwrap();
    visioncare(&dir)
        .args(["exercise", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("palming"));

    visioncare(&dir)
        .args(["exercise", "show", "blinking"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Conscious Blinking"));

    visioncare(&dir)
        .args(["exercise", "show", "squinting"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No exercise 'squinting'"));
}

#[test]
fn test_reset_reports_notification() {
    let dir = TempDir::new().unwrap();
    visioncare(&dir)
        .arg("reset")
        .assert()
        .success()
        .stdout(predicate::str::contains("screen time reset"))
        .stderr(predicate::str::contains("Daily stats reset"));
}

#[test]
fn test_week_report() {
    let dir = TempDir::new().unwrap();
    visioncare(&dir)
        .args(["week", "-o", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"total_minutes\": 0.0"))
        .stdout(predicate::str::contains("\"busiest_day\": null"));
}

#[test]
fn test_config_default_output() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("config.yaml"),
        "general:\n  default_output: json\nbreaks:\n  interval_minutes: 50\n",
    )
    .unwrap();

    visioncare(&dir)
        .arg("policy")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"interval_minutes\": 50"));
}

#[test]
fn test_invalid_config_fails() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("config.yaml"), "general: [not, a, map").unwrap();

    visioncare(&dir)
        .arg("status")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

#[test]
fn test_completions() {
    let dir = TempDir::new().unwrap();
    visioncare(&dir)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("visioncare"));
}

#[test]
fn test_out_of_range_config_policy_falls_back_to_default() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("config.yaml"),
        "breaks:\n  interval_minutes: 0\n  duration_minutes: 500\n",
    )
    .unwrap();

    visioncare(&dir)
        .args(["policy", "set", "--duration", "7", "-o", "json"])
        .assert()
        .success();

    visioncare(&dir)
        .args(["policy", "show", "-o", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"interval_minutes\": 20"))
        .stdout(predicate::str::contains("\"duration_minutes\": 7"));
}

#[test]
fn test_run_rejects_huge_tick_seconds() {
    let dir = TempDir::new().unwrap();
    visioncare(&dir)
        .args(["run", "--tick-seconds", "10000000000000000"])
        .assert()
        .failure();
}
