//! Integration tests for the `resin` CLI binary.
//!
//! Argument parsing, help output, local-only commands, and a few
//! end-to-end commands against a wiremock API.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// JWT whose payload decodes to {"id":1}.
const TOKEN: &str = "header.eyJpZCI6MX0.sig";

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `resin` binary with env isolation.
///
/// Clears all `RESIN_*` env vars and points config directories at a
/// nonexistent path so tests never touch the user's real configuration.
fn resin_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("resin");
    cmd.env("HOME", "/tmp/resin-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/resin-cli-test-nonexistent")
        .env_remove("RESIN_PROFILE")
        .env_remove("RESIN_API_URL")
        .env_remove("RESIN_TOKEN")
        .env_remove("RESIN_OUTPUT")
        .env_remove("RESIN_TIMEOUT")
        .env_remove("RUST_LOG");
    cmd
}

fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = resin_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    assert!(combined_output(&output).contains("Usage"));
}

#[test]
fn test_help_lists_command_groups() {
    resin_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("apps")
            .and(predicate::str::contains("devices"))
            .and(predicate::str::contains("device-types"))
            .and(predicate::str::contains("os")),
    );
}

#[test]
fn test_version_flag() {
    resin_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("resin"));
}

#[test]
fn test_completions_zsh() {
    resin_cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

#[test]
fn test_devices_subcommands_exist() {
    resin_cmd()
        .args(["devices", "--help"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("register")
                .and(predicate::str::contains("identify"))
                .and(predicate::str::contains("move"))
                .and(predicate::str::contains("url")),
        );
}

// ── Local-only commands ─────────────────────────────────────────────

#[test]
fn test_devices_uuid_needs_no_config() {
    let output = resin_cmd().args(["devices", "uuid"]).output().unwrap();
    assert!(output.status.success());
    let uuid = String::from_utf8(output.stdout).unwrap();
    let uuid = uuid.trim();
    assert_eq!(uuid.len(), 62);
    assert!(uuid.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
}

#[test]
fn test_config_show_no_config() {
    resin_cmd()
        .args(["config", "show", "--output", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"active_profile\": \"default\""));
}

// ── Error cases ─────────────────────────────────────────────────────

#[test]
fn test_apps_list_without_token() {
    resin_cmd()
        .args(["apps", "list"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("session token"));
}

#[test]
fn test_unknown_profile() {
    resin_cmd()
        .args(["--profile", "nowhere", "apps", "list"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("nowhere"));
}

#[test]
fn test_invalid_output_format() {
    let output = resin_cmd()
        .args(["--output", "invalid", "apps", "list"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    let text = combined_output(&output);
    assert!(text.contains("invalid") || text.contains("possible values"));
}

#[test]
fn test_rm_requires_yes_when_not_interactive() {
    resin_cmd()
        .args(["--token", TOKEN, "--api-url", "http://127.0.0.1:9", "apps", "rm", "MyApp"])
        .write_stdin("")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--yes"));
}

// ── Against a mock API ──────────────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn test_apps_list_plain() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ewa/application"))
        .and(query_param("$filter", "user eq 1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "d": [
                { "id": 1, "app_name": "Alpha", "device_type": "raspberry-pi", "device": [] },
                { "id": 2, "app_name": "Beta", "device_type": "intel-edison", "device": [] }
            ]
        })))
        .mount(&server)
        .await;

    resin_cmd()
        .args(["--api-url", &server.uri(), "--token", TOKEN, "-o", "plain", "apps", "list"])
        .assert()
        .success()
        .stdout("Alpha\nBeta\n");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_device_info_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ewa/device"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "d": [] })))
        .mount(&server)
        .await;

    resin_cmd()
        .args(["--api-url", &server.uri(), "--token", TOKEN, "devices", "info", "abc"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("devices list"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_expired_token_exits_with_auth_code() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
        .mount(&server)
        .await;

    resin_cmd()
        .args(["--api-url", &server.uri(), "--token", TOKEN, "devices", "list"])
        .assert()
        .code(3);
}
