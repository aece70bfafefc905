//! Smoke tests to verify command wiring

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_help_lists_serve() {
    let mut cmd = Command::cargo_bin("posts").unwrap();
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("serve"));
}

#[test]
fn test_serve_help() {
    let mut cmd = Command::cargo_bin("posts").unwrap();
    cmd.arg("serve").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("--database-url"))
        .stdout(predicate::str::contains("--allowed-origins"))
        .stdout(predicate::str::contains("4000"));
}

#[test]
fn test_serve_without_database_url_fails() {
    let mut cmd = Command::cargo_bin("posts").unwrap();
    cmd.arg("serve")
        .env_remove("DATABASE_URL")
        .env_remove("CONNECTION_STRING")
        // keep a stray .env in the working directory out of the picture
        .current_dir(std::env::temp_dir());

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("DATABASE_URL not set"));
}

#[test]
fn test_serve_rejects_invalid_port() {
    let mut cmd = Command::cargo_bin("posts").unwrap();
    cmd.arg("serve").arg("--port").arg("not-a-port");

    cmd.assert().failure();
}
