//! End-to-end checks on the `tether` binary surface.

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn help_lists_commands() {
    Command::cargo_bin("tether")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("init"))
        .stdout(predicate::str::contains("install"))
        .stdout(predicate::str::contains("integrations"));
}

#[test]
fn integrations_prints_the_catalog() {
    Command::cargo_bin("tether")
        .unwrap()
        .arg("integrations")
        .assert()
        .success()
        .stdout(predicate::str::contains("pagerduty"))
        .stdout(predicate::str::contains("sentry"));
}

#[test]
fn install_rejects_unknown_integrations() {
    Command::cargo_bin("tether")
        .unwrap()
        .args(["install", "no-such-integration", "--provider", "aws"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown integration"));
}

#[test]
fn init_outside_an_integration_directory_fails() {
    let dir = tempfile::tempdir().unwrap();
    Command::cargo_bin("tether")
        .unwrap()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("tether_manifest.yml"));
}
