mod common;

use std::process::{Command, Output};

use common::{closed_url, scratch_dir, serve_once};

fn run_picker(url: &str, scratch: &str) -> Output {
    let dir = scratch_dir(scratch);
    Command::new(env!("CARGO_BIN_EXE_siege-picker"))
        .env("OPERATORS_API_URL", url)
        .env("SIEGE_PICKER_CACHE_TTL_SECS", "0")
        .env("SIEGE_PICKER_TIMEOUT_SECS", "5")
        .env("XDG_CACHE_HOME", &dir)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run picker binary")
}

#[test]
fn http_error_exits_nonzero_without_menu() {
    let url = serve_once("500 Internal Server Error", "boom");
    let output = run_picker(&url, "cli-500");
    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty(), "menu must not be drawn");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("500"), "{stderr}");
}

#[test]
fn connection_failure_exits_nonzero_without_menu() {
    let output = run_picker(&closed_url(), "cli-refused");
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty(), "menu must not be drawn");
}

#[test]
fn malformed_payload_exits_nonzero_without_menu() {
    let url = serve_once("200 OK", r#"{"not":"an array"}"#);
    let output = run_picker(&url, "cli-malformed");
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty(), "menu must not be drawn");
}
