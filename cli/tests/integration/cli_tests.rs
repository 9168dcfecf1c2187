//! Integration tests for the CLI surface: help, version and argument parsing.

#![allow(clippy::expect_used)]

use assert_cmd::Command;
use predicates::prelude::*;

fn tubedeck() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("tubedeck"));
    cmd.env("NO_COLOR", "1");
    cmd
}

// --- Help and version tests ---

#[test]
fn test_cli_no_args_shows_help_and_exits_two() {
    tubedeck().assert().code(2).stderr(predicate::str::contains(
        "Build, run and bootstrap the YouTube Downloader app",
    ));
}

#[test]
fn test_no_color_env_accepts_any_value() {
    for value in ["1", "yes", ""] {
        tubedeck()
            .env("NO_COLOR", value)
            .arg("version")
            .assert()
            .success()
            .stdout(predicate::str::contains("tubedeck"));
    }
}

#[test]
fn test_cli_help_lists_commands() {
    let assert = tubedeck().arg("--help").assert().success();
    let out = String::from_utf8_lossy(&assert.get_output().stdout).into_owned();
    for cmd in [
        "deploy", "bootstrap", "stop", "status", "logs", "doctor", "config", "version",
    ] {
        assert!(out.contains(cmd), "help is missing `{cmd}`:\n{out}");
    }
}

#[test]
fn test_cli_version_flag_shows_version() {
    tubedeck()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("tubedeck"));
}

#[test]
fn test_version_command_shows_version() {
    tubedeck()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(concat!(
            "tubedeck ",
            env!("CARGO_PKG_VERSION")
        )));
}

#[test]
fn test_version_command_json_outputs_valid_json() {
    let assert = tubedeck().args(["version", "--json"]).assert().success();
    let v: serde_json::Value =
        serde_json::from_slice(&assert.get_output().stdout).expect("valid JSON");
    assert_eq!(v["version"], env!("CARGO_PKG_VERSION"));
}

#[test]
fn test_unknown_command_is_rejected() {
    tubedeck()
        .arg("launch-rockets")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("unrecognized subcommand"));
}

#[test]
fn test_logs_tail_requires_number() {
    tubedeck()
        .args(["logs", "--tail", "many"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn test_deploy_help_describes_command() {
    tubedeck()
        .args(["deploy", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Build the image"));
}
