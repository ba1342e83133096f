//! Integration tests for the command-line interface.

mod common;

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn help_lists_all_subcommands() {
    Command::cargo_bin("linewatch")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("watch"))
        .stdout(predicate::str::contains("stats"))
        .stdout(predicate::str::contains("camera"))
        .stdout(predicate::str::contains("reset"))
        .stdout(predicate::str::contains("completions"));
}

#[test]
fn unknown_subcommand_fails() {
    Command::cargo_bin("linewatch")
        .unwrap()
        .arg("frobnicate")
        .assert()
        .failure();
}

#[test]
fn config_init_writes_a_parseable_file() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("linewatch.toml");

    Command::cargo_bin("linewatch")
        .unwrap()
        .args(["config", "init", "--output"])
        .arg(&output)
        .assert()
        .success();
    assert!(output.exists());

    // refuses to clobber without --force
    Command::cargo_bin("linewatch")
        .unwrap()
        .args(["config", "init", "--output"])
        .arg(&output)
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn completions_cover_the_binary_name() {
    Command::cargo_bin("linewatch")
        .unwrap()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("linewatch"));
}

#[test]
fn stats_reports_a_connection_error_cleanly() {
    // nothing listens on this port; the command should fail with a transport
    // error, not a panic
    Command::cargo_bin("linewatch")
        .unwrap()
        .args(["stats", "--url", "http://127.0.0.1:9", "--config", "/nonexistent.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}

#[tokio::test(flavor = "multi_thread")]
async fn stats_json_renders_the_mock_backend() {
    let server = wiremock::MockServer::start().await;
    common::mount_stats(&server, 7, 3).await;
    common::mount_breakdown(&server, 1, 1, 1).await;

    let uri = server.uri();
    let output = tokio::task::spawn_blocking(move || {
        Command::cargo_bin("linewatch")
            .unwrap()
            .args(["stats", "--json", "--url", &uri, "--config", "/nonexistent.toml"])
            .output()
            .unwrap()
    })
    .await
    .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["stats"]["good"], 7);
    assert_eq!(parsed["stats"]["defect"], 3);
    assert_eq!(parsed["stats"]["percent_good"], "70.00%");
    assert_eq!(parsed["breakdown"]["counts"], serde_json::json!([1, 1, 1]));
}
