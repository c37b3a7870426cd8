//! Config files and precedence resolution.

use std::fs;
use std::num::NonZeroUsize;
use std::path::PathBuf;

use tempfile::TempDir;
use zkev::config::{Overrides, load_settings, run_config};
use zkev::error::ZkError;

fn write_config(text: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, text).unwrap();
    (dir, path)
}

#[test]
fn file_values_fill_in_missing_flags() {
    let (dir, path) = write_config(
        r#"
devices = ["192.168.1.201", "192.168.1.202"]
password = "123456"
model = "ZK400"
backend = "bin/pyzkaccess.exe"
jobs = 2
"#,
    );

    let loaded = load_settings(Some(&path)).unwrap();
    assert!(loaded.loaded);

    let run = run_config(&Overrides::default(), &loaded.settings).unwrap();
    let devices: Vec<&str> = run.devices.iter().map(|d| d.as_str()).collect();
    assert_eq!(devices, vec!["192.168.1.201", "192.168.1.202"]);
    assert_eq!(run.credentials.password, "123456");
    assert_eq!(run.credentials.model, "ZK400");
    assert_eq!(run.backend, dir.path().join("bin/pyzkaccess.exe"));
    assert_eq!(run.jobs.get(), 2);
}

#[test]
fn overrides_beat_file_values() {
    let (_dir, path) = write_config("devices = [\"10.0.0.1\"]\nmodel = \"ZK400\"\njobs = 4\n");
    let loaded = load_settings(Some(&path)).unwrap();

    let overrides = Overrides {
        ip: Some("10.0.0.9".into()),
        model: Some("ZK200".into()),
        jobs: NonZeroUsize::new(1),
        ..Overrides::default()
    };
    let run = run_config(&overrides, &loaded.settings).unwrap();

    assert_eq!(run.devices.len(), 1);
    assert_eq!(run.devices[0].as_str(), "10.0.0.9");
    assert_eq!(run.credentials.model, "ZK200");
    assert_eq!(run.jobs.get(), 1);
}

#[test]
fn zero_jobs_in_file_is_rejected() {
    let (_dir, path) = write_config("jobs = 0\n");
    let loaded = load_settings(Some(&path)).unwrap();

    let overrides = Overrides {
        ip: Some("10.0.0.1".into()),
        ..Overrides::default()
    };
    let err = run_config(&overrides, &loaded.settings).unwrap_err();
    assert!(matches!(err, ZkError::InvalidSetting { ref field, .. } if field == "jobs"));
}

#[test]
fn explicit_missing_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let err = load_settings(Some(&dir.path().join("nope.toml"))).unwrap_err();
    assert!(matches!(err, ZkError::ConfigNotFound { .. }));
    assert!(err.is_user_recoverable());
}

#[test]
fn invalid_toml_names_the_file() {
    let (_dir, path) = write_config("devices = [\n");
    let err = load_settings(Some(&path)).unwrap_err();
    assert!(matches!(err, ZkError::ConfigParse(_)));
    assert!(err.to_string().contains("config.toml"));
}
