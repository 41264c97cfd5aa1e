//! Integration tests for the `ccprov` binary.
//!
//! Argument parsing, configuration errors and a read-only `status` run
//! against a mock controller.
#![allow(clippy::unwrap_used)]

use std::io::Write;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::{Value, json};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// `ccprov` with every `CC_*` variable cleared so the host environment
/// never leaks into a test.
fn ccprov_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("ccprov");
    cmd.env_remove("CC_IP")
        .env_remove("CC_USERNAME")
        .env_remove("CC_PASSWORD")
        .env_remove("CC_INSECURE")
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1");
    cmd
}

fn config_file(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = ccprov_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("Usage"));
}

#[test]
fn test_help_lists_subcommands() {
    ccprov_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("create")
            .and(predicate::str::contains("delete"))
            .and(predicate::str::contains("status"))
            .and(predicate::str::contains("--config")),
    );
}

#[test]
fn test_version_flag() {
    ccprov_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("ccprov"));
}

#[test]
fn test_delete_help_mentions_include_pools() {
    ccprov_cmd()
        .args(["delete", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--include-pools"));
}

#[test]
fn test_unknown_output_format_is_usage_error() {
    ccprov_cmd()
        .args(["status", "-o", "xml"])
        .assert()
        .code(2);
}

#[test]
fn test_zero_poll_interval_is_rejected() {
    ccprov_cmd()
        .args(["create", "--poll-interval", "0"])
        .assert()
        .code(2);
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn test_completions_bash() {
    ccprov_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ccprov"));
}

#[test]
fn test_completions_need_no_config() {
    ccprov_cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

// ── Configuration errors ────────────────────────────────────────────

#[test]
fn test_create_without_config_flag() {
    ccprov_cmd()
        .arg("create")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("needs a configuration file"));
}

#[test]
fn test_missing_config_file() {
    ccprov_cmd()
        .args(["status", "--config", "/nonexistent/ccprov.yaml"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("config file not found"));
}

#[test]
fn test_missing_required_key() {
    let file = config_file("CC_IP: 10.0.0.1\nCC_USERNAME: admin\n");
    ccprov_cmd()
        .arg("status")
        .arg("--config")
        .arg(file.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("CC_PASSWORD"));
}

#[test]
fn test_missing_key_supplied_by_environment() {
    let file = config_file("CC_IP: 'not a host'\nCC_USERNAME: admin\n");
    // The bad CC_IP in the file is replaced by the environment, so the
    // run gets past validation and fails on confirmation instead.
    ccprov_cmd()
        .arg("delete")
        .arg("--config")
        .arg(file.path())
        .env("CC_IP", "127.0.0.1:9")
        .env("CC_PASSWORD", "secret")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("requires confirmation"));
}

// ── Delete confirmation ─────────────────────────────────────────────

#[test]
fn test_delete_without_tty_requires_yes() {
    let file = config_file("CC_IP: 127.0.0.1:9\nCC_USERNAME: admin\nCC_PASSWORD: pw\n");
    let output = ccprov_cmd()
        .arg("delete")
        .arg("--config")
        .arg(file.path())
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    let text = combined_output(&output);
    assert!(text.contains("--yes"), "expected --yes hint in:\n{text}");
}

// ── Status against a mock controller ────────────────────────────────

async fn mock_controller() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/dna/system/api/v1/auth/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"Token": "tok"})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/dna/intent/api/v1/global-pool"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"response": [{
            "id": "p1",
            "ipPoolName": "US_CORP",
            "ipPoolCidr": "10.201.0.0/16",
            "usedIpAddressCount": 4,
            "totalAssignableIpAddressCount": 65534
        }]})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/dna/intent/api/v1/site"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"response": [
            {"id": "g", "name": "Global", "siteNameHierarchy": "Global"},
            {"id": "a1", "name": "United States", "siteNameHierarchy": "Global/United States"},
            {
                "id": "b1",
                "name": "Sunset Tower",
                "siteNameHierarchy": "Global/United States/Golden Hills Campus/Sunset Tower"
            }
        ]})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/dna/intent/api/v1/reserve-ip-subpool"))
        .and(query_param("siteId", "b1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"response": [{
            "id": "r1",
            "groupName": "ST_CORP",
            "siteId": "b1",
            "ipPools": [{
                "ipPoolCidr": "10.201.2.0/24",
                "usedIpAddressCount": 3,
                "totalIpAddressCount": 256
            }]
        }]})))
        .mount(&server)
        .await;
    server
}

#[tokio::test(flavor = "multi_thread")]
async fn test_status_json_against_mock_controller() {
    let server = mock_controller().await;
    let file = config_file(&format!(
        "CC_IP: {}\nCC_USERNAME: admin\nCC_PASSWORD: pw\nCC_INSECURE: false\n",
        server.uri()
    ));
    let path = file.path().to_path_buf();

    let output = tokio::task::spawn_blocking(move || {
        ccprov_cmd()
            .arg("status")
            .arg("--config")
            .arg(&path)
            .args(["-o", "json"])
            .output()
            .unwrap()
    })
    .await
    .unwrap();

    assert!(output.status.success(), "{}", combined_output(&output));
    let report: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["pools"]["rows"][0]["name"], "US_CORP");
    assert_eq!(report["pools"]["rows"][0]["used"], 4);

    let sites = report["sites"]["rows"].as_array().unwrap();
    assert_eq!(sites.len(), 2, "Global is never listed");
    assert_eq!(sites[0]["kind"], "area");
    assert_eq!(sites[1]["kind"], "building");

    let reservation = &report["reservations"]["rows"][0];
    assert_eq!(reservation["building"], "Sunset Tower");
    assert_eq!(reservation["name"], "ST_CORP");
    assert_eq!(reservation["cidr"], "10.201.2.0/24");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_status_table_against_mock_controller() {
    let server = mock_controller().await;
    let file = config_file(&format!(
        "CC_IP: {}\nCC_USERNAME: admin\nCC_PASSWORD: pw\n",
        server.uri()
    ));
    let path = file.path().to_path_buf();

    let output = tokio::task::spawn_blocking(move || {
        ccprov_cmd()
            .arg("status")
            .arg("--config")
            .arg(&path)
            .output()
            .unwrap()
    })
    .await
    .unwrap();

    assert!(output.status.success(), "{}", combined_output(&output));
    let text = String::from_utf8_lossy(&output.stdout);
    assert!(text.contains("Global pools (1)"), "{text}");
    assert!(text.contains("Sites (2)"), "{text}");
    assert!(text.contains("ST_CORP"), "{text}");
    assert!(text.contains("3/256"), "{text}");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_rejected_credentials_exit_1() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/dna/system/api/v1/auth/token"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    let file = config_file(&format!(
        "CC_IP: {}\nCC_USERNAME: admin\nCC_PASSWORD: wrong\n",
        server.uri()
    ));
    let path = file.path().to_path_buf();

    let output = tokio::task::spawn_blocking(move || {
        ccprov_cmd()
            .arg("status")
            .arg("--config")
            .arg(&path)
            .output()
            .unwrap()
    })
    .await
    .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(combined_output(&output).contains("Authentication failed"));
}
