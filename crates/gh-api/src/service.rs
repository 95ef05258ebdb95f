//! Hosting collaborator contract

use async_trait::async_trait;

use crate::models::{
    Issue, NewIssue, NewRepository, RepoName, RepoPage, RepoVisibility, Repository,
};
use crate::Result;

/// Operations the MCP server needs from a repository-hosting platform.
///
/// [`GitHubClient`](crate::GitHubClient) is the production implementation;
/// tests substitute in-memory fakes.
#[async_trait]
pub trait HostingService: Send + Sync {
    /// Create a repository owned by the authenticated user.
    async fn create_repo(&self, repo: &NewRepository) -> Result<Repository>;

    async fn create_issue(&self, repo: &RepoName, issue: &NewIssue) -> Result<Issue>;

    /// First page of the authenticated user's repositories, newest activity
    /// first, with the total number matching `visibility`.
    async fn list_repos(&self, visibility: RepoVisibility, limit: u32) -> Result<RepoPage>;

    async fn get_repo(&self, repo: &RepoName) -> Result<Repository>;
}
