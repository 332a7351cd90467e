//! Integration tests for the `netbl` CLI binary.
//!
//! These tests validate argument parsing, help output, config handling,
//! and live-request behavior against a wiremock backend.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `netbl` binary with env isolation.
///
/// Clears all `NETBL_*` env vars and points config directories at a
/// nonexistent path so tests never touch the user's real configuration.
fn netbl_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("netbl");
    cmd.env("HOME", "/tmp/netbl-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/netbl-cli-test-nonexistent")
        .env_remove("NETBL_PROFILE")
        .env_remove("NETBL_URL")
        .env_remove("NETBL_OUTPUT")
        .env_remove("NETBL_INSECURE")
        .env_remove("NETBL_TIMEOUT");
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
    let output = netbl_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    netbl_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("bandwidth")
            .and(predicate::str::contains("summary"))
            .and(predicate::str::contains("devices"))
            .and(predicate::str::contains("report")),
    );
}

#[test]
fn test_version_flag() {
    netbl_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("netbl"));
}

#[test]
fn test_invalid_report_period_is_usage_error() {
    let output = netbl_cmd().args(["report", "yearly"]).output().unwrap();
    assert_eq!(output.status.code(), Some(2));
    let text = combined_output(&output);
    assert!(
        text.contains("daily") && text.contains("weekly") && text.contains("monthly"),
        "Expected the valid periods in the error:\n{text}"
    );
}

#[test]
fn test_unknown_profile_fails() {
    netbl_cmd()
        .args(["--profile", "nonexistent", "summary"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nonexistent"));
}

// ── Config commands ─────────────────────────────────────────────────

#[test]
fn test_config_path_prints_a_path() {
    netbl_cmd()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn test_config_show_prints_defaults_without_a_file() {
    netbl_cmd()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("default_profile").and(predicate::str::contains("[defaults]")),
        );
}

#[test]
fn test_config_init_writes_file() {
    let dir = tempfile::tempdir().unwrap();
    netbl_cmd()
        .env("HOME", dir.path())
        .env("XDG_CONFIG_HOME", dir.path().join(".config"))
        .args(["config", "init"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Wrote starter config"));
}

// ── Live requests against a mock backend ────────────────────────────

/// Spin up a wiremock backend on a private runtime.
///
/// The runtime is returned alongside the server: the mock listener
/// lives on it, so it must stay alive for the duration of the test.
fn start_mock_backend() -> (tokio::runtime::Runtime, MockServer) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let server = rt.block_on(mount_backend());
    (rt, server)
}

async fn mount_backend() -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/devices"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "name": "Gaming PC", "mac": "00:1A:2B:3C:4D:5E",
             "ip": "192.168.1.100", "type": "computer",
             "first_seen": "2026-01-15T08:00:00", "last_seen": "2026-08-26T14:30:00",
             "month_download": 322_122_547_200_u64, "month_upload": 53_687_091_200_u64}
        ])))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/devices/7"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"error": "Device not found"})),
        )
        .mount(&server)
        .await;

    server
}

#[test]
fn test_devices_table_formats_usage() {
    let (_rt, server) = start_mock_backend();

    netbl_cmd()
        .args(["--url", &server.uri(), "devices"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Gaming PC")
                .and(predicate::str::contains("350 GB"))
                .and(predicate::str::contains("Aug 26, 2026, 14:30")),
        );
}

#[test]
fn test_devices_json_output() {
    let (_rt, server) = start_mock_backend();

    let output = netbl_cmd()
        .args(["--url", &server.uri(), "--output", "json", "devices"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let parsed: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be valid JSON");
    assert_eq!(parsed[0]["name"], "Gaming PC");
    assert_eq!(parsed[0]["device_type"], "computer");
}

#[test]
fn test_device_not_found_exit_code() {
    let (_rt, server) = start_mock_backend();

    let output = netbl_cmd()
        .args(["--url", &server.uri(), "device", "7"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(4), "not-found exit code");
    let text = combined_output(&output);
    assert!(text.contains("not found"), "Expected not-found message:\n{text}");
}

#[test]
fn test_connection_refused_exit_code() {
    let output = netbl_cmd()
        .args(["--url", "http://127.0.0.1:9", "--timeout", "2", "summary"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(7), "connection exit code");
}
