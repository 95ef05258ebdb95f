//! Built-in tool catalog
//!
//! # Repository hosting
//! - `create_repo` - Create a new GitHub repository
//! - `create_issue` - Open an issue in an existing repository
//! - `list_repos` - List the authenticated user's repositories
//! - `get_repo_info` - Show metadata for one repository
//!
//! # Version control
//! - `commit_and_push` - Stage, commit and push a local working copy
//! - `clone_repo` - Clone a repository locally

use gh_api::RepoVisibility;
use serde::{Deserialize, Serialize};

use crate::invoker::TextResult;
use crate::registry::ToolDescriptor;
use crate::schema::{SchemaKind, SchemaNode};

pub const CREATE_REPO: &str = "create_repo";
pub const COMMIT_AND_PUSH: &str = "commit_and_push";
pub const CLONE_REPO: &str = "clone_repo";
pub const CREATE_ISSUE: &str = "create_issue";
pub const LIST_REPOS: &str = "list_repos";
pub const GET_REPO_INFO: &str = "get_repo_info";

/// Result payload of `tools/call`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolResult {
    pub content: Vec<ToolContent>,
    #[serde(rename = "isError", default, skip_serializing_if = "Option::is_none")]
    pub is_error: Option<bool>,
}

/// Content types for tool results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ToolContent {
    #[serde(rename = "text")]
    Text { text: String },
}

impl ToolResult {
    /// Create a successful text result
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: vec![ToolContent::Text {
                text: content.into(),
            }],
            is_error: None,
        }
    }

    /// Create an error result
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            content: vec![ToolContent::Text {
                text: message.into(),
            }],
            is_error: Some(true),
        }
    }
}

impl From<TextResult> for ToolResult {
    fn from(result: TextResult) -> Self {
        if result.is_error {
            Self::error(result.text)
        } else {
            Self::text(result.text)
        }
    }
}

fn string_list(description: &str) -> SchemaNode {
    SchemaNode::array(SchemaNode::of(SchemaKind::String), description)
}

/// The six built-in tools in registration order.
pub fn catalog() -> Vec<ToolDescriptor> {
    vec![
        ToolDescriptor::new(
            CREATE_REPO,
            "Create a new GitHub repository",
            SchemaNode::object()
                .required_property("name", SchemaNode::string("Repository name"))
                .property(
                    "description",
                    SchemaNode::string("Repository description (optional)"),
                )
                .property(
                    "private",
                    SchemaNode::boolean(
                        "Whether the repository should be private (default: false)",
                    ),
                )
                .property(
                    "initialize",
                    SchemaNode::boolean("Initialize with README (default: true)"),
                ),
        ),
        ToolDescriptor::new(
            COMMIT_AND_PUSH,
            "Commit changes and push to GitHub repository",
            SchemaNode::object()
                .required_property("repo_path", SchemaNode::string("Local repository path"))
                .required_property("commit_message", SchemaNode::string("Commit message"))
                .property(
                    "files",
                    string_list(
                        "Specific files to commit (optional, commits all changes if not specified)",
                    ),
                )
                .property(
                    "branch",
                    SchemaNode::string("Branch to push to (default: current branch)"),
                ),
        ),
        ToolDescriptor::new(
            CLONE_REPO,
            "Clone a GitHub repository",
            SchemaNode::object()
                .required_property(
                    "repo_url",
                    SchemaNode::string("GitHub repository URL or owner/repo format"),
                )
                .property(
                    "destination",
                    SchemaNode::string("Local destination path (optional)"),
                )
                .property(
                    "branch",
                    SchemaNode::string("Specific branch to clone (optional)"),
                ),
        ),
        ToolDescriptor::new(
            CREATE_ISSUE,
            "Create a new issue in a GitHub repository",
            SchemaNode::object()
                .required_property("repo", SchemaNode::string("Repository in owner/repo format"))
                .required_property("title", SchemaNode::string("Issue title"))
                .property("body", SchemaNode::string("Issue description (optional)"))
                .property("labels", string_list("Issue labels (optional)")),
        ),
        ToolDescriptor::new(
            LIST_REPOS,
            "List GitHub repositories for the authenticated user",
            SchemaNode::object()
                .property(
                    "type",
                    SchemaNode::enumeration(
                        &RepoVisibility::VALUES,
                        "Type of repositories to list (default: all)",
                    ),
                )
                .property(
                    "limit",
                    SchemaNode::integer("Maximum number of repositories to return (default: 10)"),
                ),
        ),
        ToolDescriptor::new(
            GET_REPO_INFO,
            "Get information about a specific GitHub repository",
            SchemaNode::object()
                .required_property("repo", SchemaNode::string("Repository in owner/repo format")),
        ),
    ]
}
