// CLI tests
//
// Runs the cache-validators binary against the bundled demo request and
// checks what it prints and how it exits.

use std::path::PathBuf;
use std::process::{Command, Output};

use cache_validators::config::HeaderConfig;
use cache_validators::engine::compute_etag;
use cache_validators::resolver::{resolve, RequestContext};

fn demo_request() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("demos/request.json")
}

fn run_cli(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_cache-validators"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to spawn cache-validators")
}

fn demo_etag() -> String {
    let request = RequestContext::from_json_file(demo_request()).unwrap();
    compute_etag(&resolve(&request).unwrap(), &HeaderConfig::default())
}

#[test]
fn test_first_visit_prints_headers_and_proceeds() {
    let request = demo_request();
    let output = run_cli(&["--request", request.to_str().unwrap()]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(&format!("ETag: {}", demo_etag())));
    assert!(stdout.contains("Last-Modified: Tue, 02 Jan 2024 10:30:00 GMT"));
    assert!(stdout.contains("# proceed"));
    assert!(!stdout.contains("Not Modified"));
}

#[test]
fn test_matching_etag_prints_raw_304_line() {
    let request = demo_request();
    let etag = demo_etag();
    let output = run_cli(&[
        "--request",
        request.to_str().unwrap(),
        "--if-none-match",
        &etag,
    ]);

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.lines().next(), Some("HTTP/1.1 304 Not Modified"));
    assert!(stdout.contains("# not modified (ETag match, RawStatusLine)"));
}

#[test]
fn test_missing_config_file_exits_with_1() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.yaml");
    let request = demo_request();

    let output = run_cli(&[
        "--config",
        missing.to_str().unwrap(),
        "--request",
        request.to_str().unwrap(),
    ]);

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("loading configuration"));
}
