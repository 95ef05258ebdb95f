//! Error types for gh-git

use std::path::PathBuf;

/// Result type for gh-git operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in gh-git operations
///
/// The `Display` text of each variant is what the server reports back to the
/// calling agent, so it names the failed step and carries git's own stderr.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Repository path does not exist: {}", path.display())]
    PathNotFound { path: PathBuf },

    #[error("Not a git repository: {}", path.display())]
    NotARepository { path: PathBuf },

    #[error("Invalid branch name: {branch}")]
    InvalidBranch { branch: String },

    #[error("Failed to add file {file}: {stderr}")]
    AddFailed { file: String, stderr: String },

    #[error("Failed to add files: {stderr}")]
    AddAllFailed { stderr: String },

    #[error("Failed to commit: {stderr}")]
    CommitFailed { stderr: String },

    #[error("Failed to push: {stderr}")]
    PushFailed { stderr: String },

    #[error("Failed to clone repository: {stderr}")]
    CloneFailed { stderr: String },
}
