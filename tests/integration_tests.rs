//! Integration tests for the threadkeep CLI

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn threadkeep() -> Command {
    let mut cmd = Command::cargo_bin("threadkeep").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

/// Test CLI binary exists and responds to --help
#[test]
fn test_cli_help() {
    threadkeep()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("deterministic parallel reduction"));
}

/// Test CLI responds to --version
#[test]
fn test_cli_version() {
    threadkeep()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("threadkeep"));
}

/// Test invalid subcommand shows error
#[test]
fn test_invalid_subcommand() {
    threadkeep()
        .arg("invalid-command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

#[test]
fn test_sum_hundred_on_four_threads() {
    threadkeep()
        .args(["sum", "--from", "1", "--to", "100", "--threads", "4", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"result\": 5050"))
        .stdout(predicate::str::contains("\"worker_count\": 4"))
        .stdout(predicate::str::contains("\"spawned_threads\": 3"));
}

#[test]
fn test_sum_small_range_runs_inline() {
    threadkeep()
        .args(["sum", "--to", "10", "--threads", "16", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"result\": 55"))
        .stdout(predicate::str::contains("\"spawned_threads\": 0"));
}

#[test]
fn test_sum_quiet_prints_bare_result() {
    threadkeep()
        .args(["--quiet", "sum", "--from", "1", "--to", "1000"])
        .assert()
        .success()
        .stdout("500500\n");
}

#[test]
fn test_plan_lists_partitions() {
    threadkeep()
        .args(["plan", "--length", "103", "--hint", "4", "--min-per-thread", "10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[75, 103) 28 elements (inline)"))
        .stdout(predicate::str::contains("[0, 25) 25 elements (spawned)"));
}

#[test]
fn test_workers_joins_every_thread() {
    threadkeep()
        .args(["workers", "--count", "20"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Joined 20 workers"))
        .stdout(predicate::str::contains("master thread").not());
}

#[test]
fn test_config_file_changes_plan() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("threadkeep.toml");
    fs::write(
        &config_path,
        r#"
[reduce]
min_per_thread = 50
hardware_threads = 8
"#,
    )
    .unwrap();

    threadkeep()
        .arg("--config")
        .arg(&config_path)
        .args(["plan", "--length", "100", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"worker_count\": 2"))
        .stdout(predicate::str::contains("\"block_size\": 50"));
}

#[test]
fn test_repository_config_is_picked_up() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("threadkeep.toml"),
        "[reduce]\nhardware_threads = 3\n",
    )
    .unwrap();

    threadkeep()
        .current_dir(temp_dir.path())
        .args(["plan", "--length", "300", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"hint\": 3"))
        .stdout(predicate::str::contains("\"worker_count\": 3"));
}

#[test]
fn test_environment_overrides_config() {
    threadkeep()
        .env("THREADKEEP_REDUCE__MIN_PER_THREAD", "1")
        .env("THREADKEEP_REDUCE__HARDWARE_THREADS", "5")
        .args(["config", "show", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"min_per_thread\": 1"))
        .stdout(predicate::str::contains("\"hardware_threads\": 5"));
}

#[test]
fn test_invalid_config_fails() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("broken.toml");
    fs::write(&config_path, "[reduce]\nmax_threads = \"many\"\n").unwrap();

    threadkeep()
        .arg("--config")
        .arg(&config_path)
        .args(["plan", "--length", "10"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("configuration"));
}

#[test]
fn test_sum_large_range_is_generated_per_index() {
    threadkeep()
        .args(["--quiet", "sum", "--from", "1", "--to", "20000000"])
        .assert()
        .success()
        .stdout("200000010000000\n");
}

#[test]
fn test_sum_range_too_large_fails() {
    threadkeep()
        .args(["sum", "--from", "0", "--to", "18446744073709551615"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("too large"));
}
