//! Shared fixtures for gh-mcp integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use gh_api::{
    HostingService, Issue, NewIssue, NewRepository, RepoName, RepoPage, RepoVisibility,
    Repository,
};
use gh_git::GitCli;
use gh_mcp::McpServer;
use serde_json::Value;

/// In-memory stand-in for GitHub.
#[derive(Default)]
pub struct FakeHosting {
    pub authenticated: bool,
    pub repos: Mutex<Vec<Repository>>,
    pub issues: Mutex<Vec<(String, NewIssue)>>,
}

impl FakeHosting {
    pub fn authenticated() -> Self {
        Self {
            authenticated: true,
            ..Default::default()
        }
    }

    pub fn with_repos(repos: Vec<Repository>) -> Self {
        Self {
            authenticated: true,
            repos: Mutex::new(repos),
            ..Default::default()
        }
    }

    fn require_auth(&self) -> gh_api::Result<()> {
        if self.authenticated {
            Ok(())
        } else {
            Err(gh_api::Error::Unauthenticated)
        }
    }
}

pub fn repository(name: &str, private: bool) -> Repository {
    Repository {
        name: name.to_string(),
        full_name: format!("octocat/{name}"),
        description: None,
        private,
        html_url: format!("https://github.com/octocat/{name}"),
        clone_url: format!("https://github.com/octocat/{name}.git"),
        stargazers_count: 0,
        forks_count: 0,
        language: Some("Rust".to_string()),
        created_at: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
        updated_at: Utc.with_ymd_and_hms(2024, 3, 2, 12, 0, 0).unwrap(),
        size: 1,
    }
}

#[async_trait]
impl HostingService for FakeHosting {
    async fn create_repo(&self, repo: &NewRepository) -> gh_api::Result<Repository> {
        self.require_auth()?;
        let mut repos = self.repos.lock().unwrap();
        if repos.iter().any(|r| r.name == repo.name) {
            return Err(gh_api::Error::Api {
                status: 422,
                message: "name already exists on this account".to_string(),
            });
        }
        let mut created = repository(&repo.name, repo.private);
        created.description = Some(repo.description.clone()).filter(|d| !d.is_empty());
        repos.push(created.clone());
        Ok(created)
    }

    async fn create_issue(&self, repo: &RepoName, issue: &NewIssue) -> gh_api::Result<Issue> {
        self.require_auth()?;
        let mut issues = self.issues.lock().unwrap();
        issues.push((repo.to_string(), issue.clone()));
        let number = issues.len() as u64;
        Ok(Issue {
            number,
            title: issue.title.clone(),
            html_url: format!("https://github.com/{repo}/issues/{number}"),
        })
    }

    async fn list_repos(
        &self,
        visibility: RepoVisibility,
        limit: u32,
    ) -> gh_api::Result<RepoPage> {
        self.require_auth()?;
        let matching: Vec<Repository> = self
            .repos
            .lock()
            .unwrap()
            .iter()
            .filter(|r| match visibility {
                RepoVisibility::Private => r.private,
                RepoVisibility::Public => !r.private,
                RepoVisibility::All | RepoVisibility::Owner => true,
            })
            .cloned()
            .collect();
        Ok(RepoPage {
            total: matching.len() as u64,
            repos: matching.into_iter().take(limit as usize).collect(),
        })
    }

    async fn get_repo(&self, repo: &RepoName) -> gh_api::Result<Repository> {
        self.require_auth()?;
        self.repos
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.full_name == repo.to_string())
            .cloned()
            .ok_or(gh_api::Error::Api {
                status: 404,
                message: "Not Found".to_string(),
            })
    }
}

/// Built-in catalog over `hosting` and the real `git`.
pub fn server_with(hosting: FakeHosting) -> McpServer {
    McpServer::with_collaborators(Arc::new(hosting), Arc::new(GitCli::new())).unwrap()
}

/// Authenticated server with no repositories.
pub fn server() -> McpServer {
    server_with(FakeHosting::authenticated())
}

/// Send one message and parse the single reply line.
pub async fn call(server: &McpServer, request: Value) -> Value {
    let line = server
        .handle_message(&request.to_string())
        .await
        .expect("request should parse")
        .expect("request should be answered");
    serde_json::from_str(&line).unwrap()
}

/// Text of a `tools/call` reply.
pub fn tool_text(response: &Value) -> &str {
    response["result"]["content"][0]["text"]
        .as_str()
        .expect("tool reply should carry text content")
}
