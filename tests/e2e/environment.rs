//! Environment variable and config file behavior end-to-end tests.

use assert_cmd::Command;
use predicates::prelude::*;

use crate::common::env::ZKEV_VARS;
use crate::common::fixtures::FakeBackend;
use crate::common::{FIVE_LINE_TABLE, init_test_logging};

/// `zkev` with a clean environment wired to `backend`.
fn zkev(backend: &FakeBackend) -> Command {
    let mut cmd = Command::cargo_bin("zkev").expect("zkev binary");
    for key in ZKEV_VARS {
        cmd.env_remove(key);
    }
    cmd.env("RUST_LOG", "off")
        .env("NO_COLOR", "1")
        .env("ZKEV_BACKEND", backend.script())
        .env("ZKEV_CONFIG", backend.config());
    cmd
}

#[test]
fn zkev_ip_env_supplies_devices() {
    init_test_logging();
    let backend = FakeBackend::new().with_output("10.0.0.7", FIVE_LINE_TABLE);

    zkev(&backend)
        .env("ZKEV_IP", "10.0.0.7")
        .args(["get_events", "all"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("[10.0.0.7] RESULT:\n"));
}

#[test]
fn ip_flag_overrides_env() {
    let backend = FakeBackend::new();

    zkev(&backend)
        .env("ZKEV_IP", "10.0.0.7")
        .args(["get_events", "--ip", "10.0.0.8", "all"])
        .assert()
        .success();

    let calls = backend.calls();
    assert_eq!(calls.len(), 1);
    assert!(calls[0].starts_with("10.0.0.8|"), "{calls:?}");
}

#[test]
fn config_file_supplies_devices_and_credentials() {
    let backend = FakeBackend::new()
        .with_config("devices = [\"10.0.0.1\", \"10.0.0.2\"]\npassword = \"777\"\nmodel = \"ZK200\"\n");

    zkev(&backend)
        .args(["get_events", "unread"])
        .assert()
        .success()
        .stderr(predicate::str::contains("2 devices: 2 ok, 0 failed"));

    assert_eq!(
        backend.calls(),
        vec![
            "10.0.0.1|ZK200|777|connect ENV events poll",
            "10.0.0.2|ZK200|777|connect ENV events poll",
        ]
    );
}

#[test]
fn env_overrides_config_file() {
    let backend = FakeBackend::new().with_config("model = \"ZK200\"\n");

    zkev(&backend)
        .env("ZKEV_MODEL", "ZK400")
        .args(["get_events", "--ip", "10.0.0.1", "all"])
        .assert()
        .success();

    assert_eq!(backend.calls(), vec!["10.0.0.1|ZK400||connect ENV table Event"]);
}

#[test]
fn relative_backend_in_config_resolves_against_config_dir() {
    let backend = FakeBackend::new()
        .with_output("10.0.0.1", FIVE_LINE_TABLE)
        .with_config("backend = \"./fake-backend.sh\"\n");

    zkev(&backend)
        .env_remove("ZKEV_BACKEND")
        .args(["get_events", "--ip", "10.0.0.1", "all"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[10.0.0.1] RESULT:"));
}

#[test]
fn missing_explicit_config_is_an_error() {
    let backend = FakeBackend::new();
    let missing = backend.path().join("missing.toml");

    zkev(&backend)
        .env("ZKEV_CONFIG", &missing)
        .args(["get_events", "--ip", "10.0.0.1", "all"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Configuration file not found"));
    assert!(backend.calls().is_empty());
}

#[test]
fn unknown_config_key_is_rejected() {
    let backend = FakeBackend::new().with_config("ip = \"10.0.0.1\"\n");

    zkev(&backend)
        .args(["get_events", "all"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Configuration parse error"));
}

#[test]
fn zkev_format_env_sets_compact_json() {
    let backend = FakeBackend::new();

    let output = zkev(&backend)
        .env("ZKEV_FORMAT", "json-compact")
        .arg("version")
        .output()
        .expect("run zkev");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.trim_end().lines().count(), 1);
    let json: serde_json::Value = serde_json::from_str(stdout.trim()).expect("compact JSON");
    assert!(json.get("version").is_some());
}

#[test]
fn config_path_prints_selected_file() {
    let backend = FakeBackend::new();
    let expected = backend.config().display().to_string();

    zkev(&backend)
        .args(["config", "--path"])
        .assert()
        .success()
        .stdout(predicate::str::contains(expected));
}

#[test]
fn completions_generate_for_bash() {
    let backend = FakeBackend::new();

    zkev(&backend)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("zkev"));
}

#[test]
fn no_color_one_gives_plain_output() {
    let backend = FakeBackend::new().with_output("10.0.0.1", FIVE_LINE_TABLE);

    zkev(&backend)
        .env("NO_COLOR", "1")
        .args(["get_events", "--ip", "10.0.0.1", "all"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("[10.0.0.1] RESULT:\n"))
        .stdout(predicate::str::contains("\u{1b}[").not());
}

#[test]
fn empty_no_color_is_accepted() {
    let backend = FakeBackend::new().with_output("10.0.0.1", FIVE_LINE_TABLE);

    zkev(&backend)
        .env("NO_COLOR", "")
        .args(["get_events", "--ip", "10.0.0.1", "all"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[10.0.0.1] RESULT:"));
}
