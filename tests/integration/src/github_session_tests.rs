//! End-to-end sessions for the hosting tools
//!
//! The production server wiring talks to a mocked GitHub REST API.

use gh_api::Token;
use gh_mcp::{McpServer, ServerConfig};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn repo_json(name: &str, private: bool, description: Option<&str>) -> Value {
    json!({
        "name": name,
        "full_name": format!("octocat/{name}"),
        "description": description,
        "private": private,
        "html_url": format!("https://github.com/octocat/{name}"),
        "clone_url": format!("https://github.com/octocat/{name}.git"),
        "stargazers_count": 5,
        "forks_count": 2,
        "language": "Rust",
        "created_at": "2023-07-14T10:00:00Z",
        "updated_at": "2024-02-29T18:30:00Z",
        "size": 1024
    })
}

fn server_for(mock: &MockServer) -> McpServer {
    let config = ServerConfig {
        api_url: mock.uri(),
        ..Default::default()
    };
    McpServer::from_config(&config, Token::new("ghp_integration")).unwrap()
}

async fn call_tool(server: &McpServer, name: &str, arguments: Value) -> Value {
    let request = json!({
        "jsonrpc": "2.0",
        "id": name,
        "method": "tools/call",
        "params": {"name": name, "arguments": arguments}
    });
    let line = server
        .handle_message(&request.to_string())
        .await
        .unwrap()
        .unwrap();
    let reply: Value = serde_json::from_str(&line).unwrap();
    assert_eq!(reply["id"], name);
    reply["result"].clone()
}

fn text(result: &Value) -> &str {
    result["content"][0]["text"].as_str().unwrap()
}

#[tokio::test]
async fn test_create_repo_round_trip() {
    let mock = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/user/repos"))
        .and(header("authorization", "Bearer ghp_integration"))
        .and(body_partial_json(json!({"name": "demo", "private": true, "auto_init": false})))
        .respond_with(ResponseTemplate::new(201).set_body_json(repo_json("demo", true, None)))
        .expect(1)
        .mount(&mock)
        .await;

    let result = call_tool(
        &server_for(&mock),
        "create_repo",
        json!({"name": "demo", "private": true, "initialize": false}),
    )
    .await;

    assert_eq!(
        text(&result),
        "✅ Repository created successfully!\n🔗 URL: https://github.com/octocat/demo\n📝 Clone: git clone https://github.com/octocat/demo.git"
    );
}

#[tokio::test]
async fn test_create_issue_round_trip() {
    let mock = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/repos/octocat/demo/issues"))
        .and(body_partial_json(json!({"title": "Crash", "body": "", "labels": ["bug"]})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "number": 17,
            "title": "Crash",
            "html_url": "https://github.com/octocat/demo/issues/17"
        })))
        .expect(1)
        .mount(&mock)
        .await;

    let result = call_tool(
        &server_for(&mock),
        "create_issue",
        json!({"repo": "octocat/demo", "title": "Crash", "labels": ["bug"]}),
    )
    .await;

    assert_eq!(
        text(&result),
        "✅ Issue created successfully!\n🔗 URL: https://github.com/octocat/demo/issues/17\n#️⃣ Number: #17"
    );
}

#[tokio::test]
async fn test_list_repos_round_trip() {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/user/repos"))
        .and(query_param("type", "public"))
        .and(query_param("per_page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            repo_json("one", false, Some("First one")),
            repo_json("two", false, None)
        ])))
        .expect(1)
        .mount(&mock)
        .await;
    Mock::given(method("GET"))
        .and(path("/user/repos"))
        .and(query_param("type", "public"))
        .and(query_param("per_page", "1"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header(
                    "link",
                    format!("<{}/user/repos?per_page=1&page=7>; rel=\"last\"", mock.uri()).as_str(),
                )
                .set_body_json(json!([repo_json("one", false, None)])),
        )
        .expect(1)
        .mount(&mock)
        .await;

    let result = call_tool(
        &server_for(&mock),
        "list_repos",
        json!({"type": "public", "limit": 2}),
    )
    .await;

    assert_eq!(
        text(&result),
        "📚 Your repositories (2 of 7):\n\n\
         📁 one - 🌍 Public\n   🔗 https://github.com/octocat/one\n   📝 First one\n\n\
         📁 two - 🌍 Public\n   🔗 https://github.com/octocat/two\n   📝 No description"
    );
}

#[tokio::test]
async fn test_get_repo_info_round_trip() {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/octocat/demo"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(repo_json("demo", false, Some("Demo"))),
        )
        .mount(&mock)
        .await;

    let result = call_tool(&server_for(&mock), "get_repo_info", json!({"repo": "octocat/demo"})).await;

    assert_eq!(
        text(&result),
        "📁 Repository: octocat/demo\n\
         📝 Description: Demo\n\
         🌍 Visibility: Public\n\
         ⭐ Stars: 5\n\
         🍴 Forks: 2\n\
         📊 Language: Rust\n\
         🔗 URL: https://github.com/octocat/demo\n\
         📅 Created: 2023-07-14\n\
         📅 Updated: 2024-02-29\n\
         📏 Size: 1024 KB"
    );
    assert!(result.get("isError").is_none());
}

#[tokio::test]
async fn test_api_failure_is_business_failure() {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/octocat/private-thing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "Not Found"})))
        .mount(&mock)
        .await;

    let result = call_tool(
        &server_for(&mock),
        "get_repo_info",
        json!({"repo": "octocat/private-thing"}),
    )
    .await;

    assert_eq!(result["isError"], true);
    assert_eq!(
        text(&result),
        "❌ Failed to get repository info: GitHub API error (status 404): Not Found"
    );
}

#[tokio::test]
async fn test_invalid_repo_name_never_reaches_github() {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock)
        .await;

    let result = call_tool(&server_for(&mock), "get_repo_info", json!({"repo": "just-a-name"})).await;
    assert!(text(&result).starts_with("❌ Failed to get repository info: Invalid repository name"));
}
