//! Integration tests for the github-mcp-server binary.
//!
//! These tests exercise the actual compiled binary using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;

/// Get a Command for the server binary with a fixed, offline environment
fn server_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("github-mcp-server"));
    cmd.env("GITHUB_TOKEN", "test-token")
        .env("GITHUB_API_URL", "http://127.0.0.1:9")
        .env_remove("RUST_LOG");
    cmd
}

fn parse_lines(stdout: &[u8]) -> Vec<Value> {
    String::from_utf8(stdout.to_vec())
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).expect("stdout must only carry JSON lines"))
        .collect()
}

#[test]
fn test_version_output() {
    server_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("github-mcp-server"));
}

#[test]
fn test_help_lists_flags() {
    server_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--api-url"))
        .stdout(predicate::str::contains("--git"))
        .stdout(predicate::str::contains("--http-timeout-secs"));
}

#[test]
fn test_end_of_input_exits_cleanly() {
    server_cmd()
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_session_answers_on_stdout_and_logs_on_stderr() {
    let input = concat!(
        r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{}}"#,
        "\n",
        r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#,
        "\n",
        "not json at all\n",
        r#"{"jsonrpc":"2.0","id":2,"method":"tools/list"}"#,
        "\n",
        r#"{"jsonrpc":"2.0","id":3,"method":"tools/call","params":{"name":"frobnicate"}}"#,
        "\n",
    );

    let assert = server_cmd()
        .write_stdin(input)
        .assert()
        .success()
        .stderr(predicate::str::contains("Starting github-mcp-server"));

    let replies = parse_lines(&assert.get_output().stdout);
    assert_eq!(replies.len(), 3);
    assert_eq!(replies[0]["result"]["serverInfo"]["name"], "github-mcp-server");
    assert_eq!(replies[1]["result"]["tools"].as_array().unwrap().len(), 6);
    assert_eq!(replies[2]["error"]["code"], -32603);
    assert_eq!(replies[2]["error"]["message"], "Unknown tool: frobnicate");
}

#[test]
fn test_commit_on_missing_path_reports_failure() {
    let input = r#"{"jsonrpc":"2.0","id":"c1","method":"tools/call","params":{"name":"commit_and_push","arguments":{"repo_path":"/definitely/not/here","commit_message":"m"}}}"#;

    let assert = server_cmd().write_stdin(format!("{input}\n")).assert().success();

    let replies = parse_lines(&assert.get_output().stdout);
    assert_eq!(replies[0]["id"], "c1");
    assert_eq!(replies[0]["result"]["isError"], true);
    assert_eq!(
        replies[0]["result"]["content"][0]["text"],
        "❌ Repository path does not exist: /definitely/not/here"
    );
}

#[test]
fn test_invalid_api_url_fails_at_startup() {
    server_cmd()
        .args(["--api-url", "not a url"])
        .write_stdin("")
        .assert()
        .failure();
}

#[test]
fn test_zero_timeout_rejected() {
    server_cmd()
        .args(["--http-timeout-secs", "0"])
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("HTTP timeout"));
}
