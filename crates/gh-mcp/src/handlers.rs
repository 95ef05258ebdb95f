//! MCP Tool Handlers
//!
//! One [`ToolHandler`] per catalog entry. Hosting tools delegate to a
//! [`HostingService`], version-control tools to the `gh-git` workflows over a
//! [`VersionControl`]. Collaborator errors are phrased here as `❌` text;
//! only argument type errors are left to the invoker.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use gh_api::{
    HostingService, NewIssue, NewRepository, RepoName, RepoPage, RepoVisibility, Repository,
};
use gh_git::{CloneRequest, CommitOutcome, CommitRequest, VersionControl};

use crate::arguments::ToolArguments;
use crate::invoker::{CapabilityInvoker, TextResult, ToolHandler, SUCCESS_MARKER};
use crate::tools::{
    CLONE_REPO, COMMIT_AND_PUSH, CREATE_ISSUE, CREATE_REPO, GET_REPO_INFO, LIST_REPOS,
};
use crate::{Error, Result};

const DEFAULT_LIST_LIMIT: i64 = 10;

/// Bind every catalog tool to its handler.
pub fn bind_defaults(
    invoker: CapabilityInvoker,
    hosting: Arc<dyn HostingService>,
    vc: Arc<dyn VersionControl>,
) -> Result<CapabilityInvoker> {
    invoker
        .bind(CREATE_REPO, Arc::new(CreateRepo { hosting: hosting.clone() }))?
        .bind(COMMIT_AND_PUSH, Arc::new(CommitAndPush { vc: vc.clone() }))?
        .bind(CLONE_REPO, Arc::new(CloneRepo { vc }))?
        .bind(CREATE_ISSUE, Arc::new(CreateIssue { hosting: hosting.clone() }))?
        .bind(LIST_REPOS, Arc::new(ListRepos { hosting: hosting.clone() }))?
        .bind(GET_REPO_INFO, Arc::new(GetRepoInfo { hosting }))
}

/// Phrase a hosting error. Missing credentials read the same for every tool.
fn hosting_failure(action: &str, error: gh_api::Error) -> TextResult {
    match error {
        gh_api::Error::Unauthenticated => TextResult::failure(error.to_string()),
        other => TextResult::failure(format!("Failed to {action}: {other}")),
    }
}

// ============================================================================
// Repository hosting
// ============================================================================

/// Handle create_repo - Create a repository for the authenticated user
struct CreateRepo {
    hosting: Arc<dyn HostingService>,
}

#[async_trait]
impl ToolHandler for CreateRepo {
    async fn call(&self, args: ToolArguments) -> Result<TextResult> {
        let request = NewRepository {
            name: args.required_str("name")?,
            description: args.optional_str("description")?.unwrap_or_default(),
            private: args.optional_bool("private")?.unwrap_or(false),
            auto_init: args.optional_bool("initialize")?.unwrap_or(true),
        };

        Ok(match self.hosting.create_repo(&request).await {
            Ok(repo) => TextResult::success(format!(
                "{SUCCESS_MARKER} Repository created successfully!\n🔗 URL: {}\n📝 Clone: git clone {}",
                repo.html_url, repo.clone_url
            )),
            Err(e) => hosting_failure("create repository", e),
        })
    }
}

/// Handle create_issue - Open an issue in `owner/repo`
struct CreateIssue {
    hosting: Arc<dyn HostingService>,
}

#[async_trait]
impl ToolHandler for CreateIssue {
    async fn call(&self, args: ToolArguments) -> Result<TextResult> {
        let repo = args.required_str("repo")?;
        let issue = NewIssue {
            title: args.required_str("title")?,
            body: args.optional_str("body")?.unwrap_or_default(),
            labels: args.optional_str_list("labels")?.unwrap_or_default(),
        };

        let created = match repo.parse::<RepoName>() {
            Ok(name) => self.hosting.create_issue(&name, &issue).await,
            Err(e) => Err(e),
        };

        Ok(match created {
            Ok(issue) => TextResult::success(format!(
                "{SUCCESS_MARKER} Issue created successfully!\n🔗 URL: {}\n#️⃣ Number: #{}",
                issue.html_url, issue.number
            )),
            Err(e) => hosting_failure("create issue", e),
        })
    }
}

/// Handle list_repos - First page of the user's repositories
struct ListRepos {
    hosting: Arc<dyn HostingService>,
}

#[async_trait]
impl ToolHandler for ListRepos {
    async fn call(&self, args: ToolArguments) -> Result<TextResult> {
        let visibility = match args.optional_str("type")? {
            Some(raw) => raw.parse::<RepoVisibility>().map_err(Error::InvalidArgument)?,
            None => RepoVisibility::default(),
        };
        let limit = args.optional_i64("limit")?.unwrap_or(DEFAULT_LIST_LIMIT);

        // Non-positive limits still query so that credential problems surface.
        let page_size = u32::try_from(limit.max(1)).unwrap_or(u32::MAX);
        let shown = usize::try_from(limit.max(0)).unwrap_or(usize::MAX);

        Ok(match self.hosting.list_repos(visibility, page_size).await {
            Ok(RepoPage { repos, total }) => {
                let repos: Vec<Repository> = repos.into_iter().take(shown).collect();
                TextResult::success(format_repo_list(&repos, total))
            }
            Err(e) => hosting_failure("list repositories", e),
        })
    }
}

/// Render the `list_repos` answer; `total` counts every matching repository.
pub fn format_repo_list(repos: &[Repository], total: u64) -> String {
    if repos.is_empty() {
        return "No repositories found".to_string();
    }

    let entries: Vec<String> = repos
        .iter()
        .map(|repo| {
            let visibility = if repo.private {
                "🔒 Private"
            } else {
                "🌍 Public"
            };
            format!(
                "📁 {} - {}\n   🔗 {}\n   📝 {}",
                repo.name,
                visibility,
                repo.html_url,
                describe(repo)
            )
        })
        .collect();

    format!(
        "📚 Your repositories ({} of {total}):\n\n{}",
        repos.len(),
        entries.join("\n\n")
    )
}

/// Handle get_repo_info - Metadata block for one repository
struct GetRepoInfo {
    hosting: Arc<dyn HostingService>,
}

#[async_trait]
impl ToolHandler for GetRepoInfo {
    async fn call(&self, args: ToolArguments) -> Result<TextResult> {
        let repo = args.required_str("repo")?;

        let fetched = match repo.parse::<RepoName>() {
            Ok(name) => self.hosting.get_repo(&name).await,
            Err(e) => Err(e),
        };

        Ok(match fetched {
            Ok(repository) => TextResult::success(format_repo_info(&repository)),
            Err(e) => hosting_failure("get repository info", e),
        })
    }
}

/// Render the `get_repo_info` answer.
pub fn format_repo_info(repo: &Repository) -> String {
    let visibility = if repo.private { "Private" } else { "Public" };
    [
        format!("📁 Repository: {}", repo.full_name),
        format!("📝 Description: {}", describe(repo)),
        format!("🌍 Visibility: {visibility}"),
        format!("⭐ Stars: {}", repo.stargazers_count),
        format!("🍴 Forks: {}", repo.forks_count),
        format!(
            "📊 Language: {}",
            repo.language.as_deref().unwrap_or("Not specified")
        ),
        format!("🔗 URL: {}", repo.html_url),
        format!("📅 Created: {}", repo.created_at.format("%Y-%m-%d")),
        format!("📅 Updated: {}", repo.updated_at.format("%Y-%m-%d")),
        format!("📏 Size: {} KB", repo.size),
    ]
    .join("\n")
}

fn describe(repo: &Repository) -> &str {
    match repo.description.as_deref() {
        Some(text) if !text.is_empty() => text,
        _ => "No description",
    }
}

// ============================================================================
// Version control
// ============================================================================

/// Handle commit_and_push - Stage, commit and push a working copy
struct CommitAndPush {
    vc: Arc<dyn VersionControl>,
}

#[async_trait]
impl ToolHandler for CommitAndPush {
    async fn call(&self, args: ToolArguments) -> Result<TextResult> {
        let request = CommitRequest {
            repo_path: PathBuf::from(args.required_str("repo_path")?),
            message: args.required_str("commit_message")?,
            files: args.optional_str_list("files")?,
            branch: args.optional_str("branch")?,
        };

        Ok(
            match gh_git::commit_and_push(self.vc.as_ref(), &request).await {
                Ok(CommitOutcome::Pushed { message }) => TextResult::success(format!(
                    "{SUCCESS_MARKER} Committed: {message}\n{SUCCESS_MARKER} Pushed to GitHub successfully"
                )),
                Ok(CommitOutcome::NothingToCommit) => TextResult::info("No changes to commit"),
                Err(e) => TextResult::failure(e.to_string()),
            },
        )
    }
}

/// Handle clone_repo - Clone into the working directory or a destination
struct CloneRepo {
    vc: Arc<dyn VersionControl>,
}

#[async_trait]
impl ToolHandler for CloneRepo {
    async fn call(&self, args: ToolArguments) -> Result<TextResult> {
        let request = CloneRequest {
            repo_url: args.required_str("repo_url")?,
            destination: args.optional_str("destination")?,
            branch: args.optional_str("branch")?,
        };

        Ok(match gh_git::clone(self.vc.as_ref(), &request).await {
            Ok(cloned) => TextResult::success(format!(
                "{SUCCESS_MARKER} Repository cloned successfully\n📁 Location: {}",
                cloned.location
            )),
            Err(e) => TextResult::failure(e.to_string()),
        })
    }
}
