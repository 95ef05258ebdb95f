//! Git collaborator for the GitHub MCP server
//!
//! Runs the `git` executable as a subprocess and layers the two workflows the
//! server exposes on top of it: stage/commit/push and clone.

pub mod command;
pub mod error;
pub mod workflow;

pub use command::{CommandOutput, GitCli, VersionControl};
pub use error::{Error, Result};
pub use workflow::{
    clone, commit_and_push, expand_repo_url, CloneRequest, ClonedRepository, CommitOutcome,
    CommitRequest,
};
