//! Offline CLI tests
//!
//! Drive the bucketsite binary against an isolated config directory. None
//! of these reach a storage service.

use std::path::Path;
use std::process::{Command, Output};

fn run(args: &[&str], config_dir: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_bucketsite"))
        .args(args)
        .env("BUCKETSITE_CONFIG_DIR", config_dir)
        .env_remove("BUCKETSITE_PROFILE")
        .output()
        .expect("Failed to execute bucketsite")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

#[test]
fn test_profile_set_list_remove() {
    let config_dir = tempfile::tempdir().unwrap();

    let output = run(
        &[
            "profile",
            "set",
            "local",
            "--endpoint",
            "http://localhost:9000",
            "--access-key",
            "AKIDEXAMPLE",
            "--secret-key",
            "very-secret",
            "--path-style",
        ],
        config_dir.path(),
    );
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert!(config_dir.path().join("config.toml").exists());

    let output = run(&["profile", "list", "--json"], config_dir.path());
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    let profiles = json["profiles"].as_array().unwrap();
    assert_eq!(profiles.len(), 1);
    assert_eq!(profiles[0]["name"], "local");
    assert_eq!(profiles[0]["endpoint"], "http://localhost:9000");
    assert_eq!(profiles[0]["static_credentials"], true);
    assert!(!stdout(&output).contains("very-secret"));

    let output = run(&["profile", "remove", "local"], config_dir.path());
    assert!(output.status.success());

    let output = run(&["profile", "list", "--json"], config_dir.path());
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert!(json["profiles"].as_array().unwrap().is_empty());
}

#[test]
fn test_profile_remove_unknown() {
    let config_dir = tempfile::tempdir().unwrap();
    let output = run(&["profile", "remove", "missing"], config_dir.path());
    assert_eq!(output.status.code(), Some(5));
}

#[test]
fn test_profile_set_rejects_invalid_endpoint() {
    let config_dir = tempfile::tempdir().unwrap();
    let output = run(
        &["profile", "set", "broken", "--endpoint", "not a url"],
        config_dir.path(),
    );
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_sync_missing_directory() {
    let config_dir = tempfile::tempdir().unwrap();
    let output = run(
        &[
            "profile",
            "set",
            "local",
            "--endpoint",
            "http://127.0.0.1:9",
            "--access-key",
            "AKIDEXAMPLE",
            "--secret-key",
            "very-secret",
        ],
        config_dir.path(),
    );
    assert!(output.status.success());

    let missing = config_dir.path().join("no-such-site");
    let output = run(
        &[
            "--profile",
            "local",
            "sync",
            missing.to_str().unwrap(),
            "my-site",
        ],
        config_dir.path(),
    );
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_sync_dry_run_lists_content_types() {
    let config_dir = tempfile::tempdir().unwrap();
    let site = tempfile::tempdir().unwrap();
    std::fs::write(site.path().join("index.html"), "<h1>hi</h1>").unwrap();
    std::fs::create_dir(site.path().join("css")).unwrap();
    std::fs::write(site.path().join("css/site.css"), "body {}").unwrap();

    let output = run(
        &[
            "profile",
            "set",
            "local",
            "--endpoint",
            "http://127.0.0.1:9",
            "--access-key",
            "AKIDEXAMPLE",
            "--secret-key",
            "very-secret",
        ],
        config_dir.path(),
    );
    assert!(output.status.success());

    let output = run(
        &[
            "--profile",
            "local",
            "--json",
            "sync",
            "--dry-run",
            site.path().to_str().unwrap(),
            "my-site",
        ],
        config_dir.path(),
    );
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["dry_run"], true);
    assert_eq!(json["total_size_bytes"], 18);
    let files = json["files"].as_array().unwrap();
    assert_eq!(files.len(), 2);
    assert_eq!(files[0]["key"], "css/site.css");
    assert_eq!(files[0]["content_type"], "text/css");
    assert_eq!(files[1]["key"], "index.html");
    assert_eq!(files[1]["content_type"], "text/html");
}
