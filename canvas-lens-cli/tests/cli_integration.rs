//! End-to-end smoke tests for the binary.

use assert_cmd::Command;
use predicates::prelude::*;

fn canvas_lens() -> Command {
    let mut cmd = Command::cargo_bin("canvas-lens").unwrap();
    // Isolate from any ambient configuration.
    cmd.env_remove("CANVAS_BASE_URL")
        .env_remove("CANVAS_API_TOKEN")
        .env_remove("CANVAS_STUDENT_ID");
    cmd
}

#[test]
fn no_arguments_prints_help() {
    canvas_lens()
        .assert()
        .success()
        .stdout(predicate::str::contains("canvas-lens"))
        .stdout(predicate::str::contains("Usage"));
}

#[test]
fn help_lists_every_subcommand() {
    let assert = canvas_lens().arg("--help").assert().success();
    let output = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    for subcommand in [
        "courses",
        "missing",
        "unsubmitted",
        "assignments",
        "grades",
        "due",
        "upcoming",
        "todo",
        "stats",
        "status",
        "feedback",
        "people",
        "students",
        "announcements",
        "inbox",
        "communications",
        "calendar",
        "discussions",
        "serve",
        "api",
    ] {
        assert!(output.contains(subcommand), "help is missing {subcommand}");
    }
}

#[test]
fn missing_configuration_is_a_config_error() {
    canvas_lens()
        .arg("courses")
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Error:"))
        .stderr(predicate::str::contains("CANVAS_BASE_URL"));
}

#[test]
fn missing_token_is_reported_by_name() {
    canvas_lens()
        .arg("courses")
        .env("CANVAS_BASE_URL", "https://school.instructure.com")
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("CANVAS_API_TOKEN"));
}

#[test]
fn unknown_bucket_is_rejected_before_any_request() {
    canvas_lens()
        .arg("assignments")
        .arg("--bucket")
        .arg("bogus")
        .env("CANVAS_BASE_URL", "https://school.instructure.com")
        .env("CANVAS_API_TOKEN", "token")
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("unknown bucket"));
}
