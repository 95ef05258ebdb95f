//! End-to-end sessions for the version-control tools
//!
//! Drives the production server wiring (real `git`, unauthenticated GitHub
//! client) through the stdio transport against local repositories.

use gh_mcp::{serve, LoopState, McpServer, ServerConfig};
use gh_test_utils::git::{head_commit_message, real_git_repo_with_commit};
use gh_test_utils::remote::RemotePair;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tempfile::TempDir;

fn production_server() -> McpServer {
    McpServer::from_config(&ServerConfig::default(), None).unwrap()
}

fn tool_call(id: u64, name: &str, arguments: Value) -> String {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "method": "tools/call",
        "params": {"name": name, "arguments": arguments}
    })
    .to_string()
}

/// Run `lines` through the transport and return the text of each reply.
async fn session(lines: &[String]) -> Vec<String> {
    let input = lines.join("\n") + "\n";
    let mut output = Vec::new();

    let state = serve(&production_server(), input.as_bytes(), &mut output)
        .await
        .unwrap();
    assert_eq!(state, LoopState::Stopped);

    String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|line| {
            let reply: Value = serde_json::from_str(line).unwrap();
            reply["result"]["content"][0]["text"]
                .as_str()
                .unwrap_or_else(|| panic!("not a tool result: {reply}"))
                .to_string()
        })
        .collect()
}

#[tokio::test]
async fn test_commit_push_then_nothing_to_commit() {
    let pair = RemotePair::new();
    pair.write_file("notes.txt", "first draft\n");
    let work = pair.work().to_string_lossy().into_owned();

    let replies = session(&[
        tool_call(
            1,
            "commit_and_push",
            json!({"repo_path": work, "commit_message": "Add notes", "branch": "main"}),
        ),
        tool_call(
            2,
            "commit_and_push",
            json!({"repo_path": work, "commit_message": "Again"}),
        ),
    ])
    .await;

    assert_eq!(
        replies,
        vec![
            "✅ Committed: Add notes\n✅ Pushed to GitHub successfully".to_string(),
            "ℹ️ No changes to commit".to_string(),
        ]
    );
    assert_eq!(pair.remote_head_message(), "Add notes");
    assert_eq!(head_commit_message(&pair.work()), "Add notes");
}

#[tokio::test]
async fn test_commit_selected_files_only() {
    let pair = RemotePair::new();
    pair.write_file("keep.txt", "staged\n");
    pair.write_file("skip.txt", "left alone\n");

    let replies = session(&[tool_call(
        1,
        "commit_and_push",
        json!({
            "repo_path": pair.work().to_string_lossy(),
            "commit_message": "Only keep",
            "files": ["keep.txt"]
        }),
    )])
    .await;

    assert!(replies[0].starts_with("✅ Committed: Only keep"));
    assert_eq!(pair.remote_head_message(), "Only keep");

    // skip.txt was never staged, so a second commit of everything still has work to do.
    let replies = session(&[tool_call(
        2,
        "commit_and_push",
        json!({"repo_path": pair.work().to_string_lossy(), "commit_message": "Rest"}),
    )])
    .await;
    assert!(replies[0].starts_with("✅ Committed: Rest"));
}

#[tokio::test]
async fn test_push_without_remote_fails() {
    let temp = TempDir::new().unwrap();
    real_git_repo_with_commit(temp.path());
    std::fs::write(temp.path().join("new.txt"), "x").unwrap();

    let replies = session(&[tool_call(
        1,
        "commit_and_push",
        json!({"repo_path": temp.path().to_string_lossy(), "commit_message": "Local only"}),
    )])
    .await;

    assert!(replies[0].starts_with("❌ Failed to push:"), "got: {}", replies[0]);
}

#[tokio::test]
async fn test_clone_into_destination() {
    let pair = RemotePair::new();
    let target = TempDir::new().unwrap();
    let destination = target.path().join("copy");

    let replies = session(&[tool_call(
        1,
        "clone_repo",
        json!({
            "repo_url": pair.remote_url(),
            "destination": destination.to_string_lossy(),
            "branch": "main"
        }),
    )])
    .await;

    assert_eq!(
        replies[0],
        format!(
            "✅ Repository cloned successfully\n📁 Location: {}",
            destination.display()
        )
    );
    assert!(destination.join("README.md").exists());
}

#[tokio::test]
async fn test_clone_missing_repository() {
    let target = TempDir::new().unwrap();
    let missing = target.path().join("nowhere.git");

    let replies = session(&[tool_call(
        1,
        "clone_repo",
        json!({
            "repo_url": missing.to_string_lossy(),
            "destination": target.path().join("out").to_string_lossy()
        }),
    )])
    .await;

    assert!(replies[0].starts_with("❌ Failed to clone repository:"));
}

#[tokio::test]
async fn test_hosting_tools_without_credentials() {
    let replies = session(&[
        tool_call(1, "create_repo", json!({"name": "demo"})),
        tool_call(2, "list_repos", json!({"limit": 0})),
    ])
    .await;

    for reply in replies {
        assert_eq!(
            reply,
            "❌ GitHub authentication required. Set GITHUB_TOKEN environment variable or use 'gh auth login'"
        );
    }
}
