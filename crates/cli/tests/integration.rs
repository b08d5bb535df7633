//! Integration tests for the bucketsite CLI
//!
//! These tests require a running S3-compatible server.
//!
//! Run with:
//! ```bash
//! export TEST_S3_ENDPOINT=http://localhost:9000
//! export TEST_S3_ACCESS_KEY=accesskey
//! export TEST_S3_SECRET_KEY=secretkey
//! cargo test --features integration
//! ```

#![cfg(feature = "integration")]

use std::path::Path;
use std::process::{Command, Output};
use std::time::Duration;

use tempfile::TempDir;

/// Run bucketsite with an isolated config directory and the test profile
fn run(args: &[&str], config_dir: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_bucketsite"))
        .args(args)
        .env("BUCKETSITE_CONFIG_DIR", config_dir)
        .env("BUCKETSITE_PROFILE", "test")
        .output()
        .expect("Failed to execute bucketsite")
}

/// Get S3 test configuration from environment
fn get_test_config() -> Option<(String, String, String)> {
    let endpoint = std::env::var("TEST_S3_ENDPOINT").ok()?;
    let access_key = std::env::var("TEST_S3_ACCESS_KEY").ok()?;
    let secret_key = std::env::var("TEST_S3_SECRET_KEY").ok()?;
    Some((endpoint, access_key, secret_key))
}

/// Wait for the S3 service to respond to list requests
fn wait_for_s3_ready(config_dir: &Path) -> bool {
    for _ in 0..30 {
        if run(&["list-buckets", "--json"], config_dir).status.success() {
            return true;
        }
        std::thread::sleep(Duration::from_secs(1));
    }
    false
}

/// Generate unique suffix for test resources
fn uuid_suffix() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let duration = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    format!("{:x}", duration.as_nanos() % 0xFFFFFFFF)
}

/// Store the test profile and return the config directory
fn setup_profile() -> Option<TempDir> {
    let (endpoint, access_key, secret_key) = get_test_config()?;
    let config_dir = tempfile::tempdir().ok()?;

    let output = run(
        &[
            "profile",
            "set",
            "test",
            "--endpoint",
            &endpoint,
            "--access-key",
            &access_key,
            "--secret-key",
            &secret_key,
            "--profile-region",
            "us-east-1",
            "--path-style",
        ],
        config_dir.path(),
    );
    if !output.status.success() {
        eprintln!(
            "Failed to set profile: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        return None;
    }

    if !wait_for_s3_ready(config_dir.path()) {
        eprintln!("S3 service did not become ready in time");
        return None;
    }

    Some(config_dir)
}

fn write_site(root: &Path) {
    std::fs::write(root.join("index.html"), "<h1>home</h1>").unwrap();
    std::fs::write(root.join("error.html"), "<h1>oops</h1>").unwrap();
    std::fs::create_dir_all(root.join("css")).unwrap();
    std::fs::write(root.join("css/site.css"), "body { margin: 0 }").unwrap();
    std::fs::create_dir_all(root.join("drafts")).unwrap();
}

mod setup_bucket {
    use super::*;

    #[test]
    fn test_setup_bucket_is_idempotent() {
        let Some(config_dir) = setup_profile() else {
            eprintln!("Skipping: S3 test config not available");
            return;
        };
        let bucket = format!("site-{}", uuid_suffix());

        let output = run(&["setup-bucket", &bucket, "--json"], config_dir.path());
        assert!(
            output.status.success(),
            "First setup failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        let json: serde_json::Value =
            serde_json::from_slice(&output.stdout).expect("Invalid JSON output");
        assert_eq!(json["bucket"], bucket.as_str());
        assert_eq!(json["index_document"], "index.html");
        assert_eq!(json["error_document"], "error.html");

        let output = run(&["setup-bucket", &bucket], config_dir.path());
        assert!(output.status.success(), "Second setup should succeed");

        let output = run(&["list-buckets", "--json"], config_dir.path());
        assert!(output.status.success());
        assert!(String::from_utf8_lossy(&output.stdout).contains(&bucket));
    }

    #[test]
    fn test_setup_bucket_rejects_invalid_name() {
        let Some(config_dir) = setup_profile() else {
            eprintln!("Skipping: S3 test config not available");
            return;
        };

        let output = run(&["setup-bucket", "Not_A_Bucket"], config_dir.path());
        assert_eq!(output.status.code(), Some(6));
    }
}

mod sync {
    use super::*;

    #[test]
    fn test_sync_uploads_site() {
        let Some(config_dir) = setup_profile() else {
            eprintln!("Skipping: S3 test config not available");
            return;
        };
        let bucket = format!("site-{}", uuid_suffix());
        let site = tempfile::tempdir().unwrap();
        write_site(site.path());

        let output = run(&["setup-bucket", &bucket], config_dir.path());
        assert!(output.status.success());

        let output = run(
            &["sync", site.path().to_str().unwrap(), &bucket, "--json"],
            config_dir.path(),
        );
        assert!(
            output.status.success(),
            "Sync failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(json["files"].as_array().unwrap().len(), 3);

        let output = run(
            &["list-bucket-objects", &bucket, "--json", "--summarize"],
            config_dir.path(),
        );
        assert!(output.status.success());
        let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        let keys: Vec<&str> = json["objects"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|o| o["key"].as_str())
            .collect();
        assert_eq!(keys, vec!["css/site.css", "error.html", "index.html"]);
        assert_eq!(json["summary"]["total_objects"], 3);
    }

    #[test]
    fn test_sync_into_missing_bucket() {
        let Some(config_dir) = setup_profile() else {
            eprintln!("Skipping: S3 test config not available");
            return;
        };
        let site = tempfile::tempdir().unwrap();
        write_site(site.path());

        let bucket = format!("missing-{}", uuid_suffix());
        let output = run(
            &["sync", site.path().to_str().unwrap(), &bucket],
            config_dir.path(),
        );
        assert_eq!(output.status.code(), Some(5));
    }
}

mod list_bucket_objects {
    use super::*;

    #[test]
    fn test_list_missing_bucket() {
        let Some(config_dir) = setup_profile() else {
            eprintln!("Skipping: S3 test config not available");
            return;
        };

        let bucket = format!("missing-{}", uuid_suffix());
        let output = run(&["list-bucket-objects", &bucket], config_dir.path());
        assert_eq!(output.status.code(), Some(5));
    }
}
