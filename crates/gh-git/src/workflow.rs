//! Commit/push and clone workflows built from individual git invocations.

use std::path::{Path, PathBuf};

use crate::command::VersionControl;
use crate::{Error, Result};

/// Inputs for [`commit_and_push`].
#[derive(Debug, Clone)]
pub struct CommitRequest {
    pub repo_path: PathBuf,
    pub message: String,
    /// Paths to stage; `None` or empty stages everything (`git add .`)
    pub files: Option<Vec<String>>,
    /// Push to `origin <branch>` instead of the upstream of the current branch
    pub branch: Option<String>,
}

/// What [`commit_and_push`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome {
    /// A commit was created and pushed.
    Pushed { message: String },
    /// The working tree had nothing staged; nothing was committed or pushed.
    NothingToCommit,
}

/// Stage, commit and push in `repo_path`.
///
/// Each step short-circuits on failure with an error naming that step.
/// A commit that fails only because the tree is clean is reported as
/// [`CommitOutcome::NothingToCommit`] rather than an error.
pub async fn commit_and_push(
    vc: &dyn VersionControl,
    request: &CommitRequest,
) -> Result<CommitOutcome> {
    let repo = request.repo_path.as_path();
    if let Some(branch) = &request.branch {
        check_branch(branch)?;
    }

    if !repo.exists() {
        return Err(Error::PathNotFound {
            path: repo.to_path_buf(),
        });
    }
    if !repo.join(".git").exists() {
        return Err(Error::NotARepository {
            path: repo.to_path_buf(),
        });
    }

    match request.files.as_deref() {
        Some(files) if !files.is_empty() => {
            for file in files {
                let out = vc.run(&argv(&["add", "--", file]), Some(repo)).await?;
                if !out.success {
                    return Err(Error::AddFailed {
                        file: file.clone(),
                        stderr: out.stderr,
                    });
                }
            }
        }
        _ => {
            let out = vc.run(&argv(&["add", "--", "."]), Some(repo)).await?;
            if !out.success {
                return Err(Error::AddAllFailed { stderr: out.stderr });
            }
        }
    }

    let out = vc
        .run(&argv(&["commit", "-m", &request.message]), Some(repo))
        .await?;
    if !out.success {
        if out.mentions("nothing to commit") {
            tracing::info!(repo = %repo.display(), "Nothing to commit");
            return Ok(CommitOutcome::NothingToCommit);
        }
        return Err(Error::CommitFailed { stderr: out.stderr });
    }

    let mut push = argv(&["push"]);
    if let Some(branch) = &request.branch {
        push.push("origin".to_string());
        push.push(branch.clone());
    }
    let out = vc.run(&push, Some(repo)).await?;
    if !out.success {
        return Err(Error::PushFailed { stderr: out.stderr });
    }

    tracing::info!(repo = %repo.display(), branch = ?request.branch, "Committed and pushed");

    Ok(CommitOutcome::Pushed {
        message: request.message.clone(),
    })
}

/// Inputs for [`clone`].
#[derive(Debug, Clone)]
pub struct CloneRequest {
    pub repo_url: String,
    pub destination: Option<String>,
    pub branch: Option<String>,
}

/// A successfully cloned repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClonedRepository {
    /// Destination as given, or the directory name git derives from the URL
    pub location: String,
}

/// Clone `repo_url`, optionally into `destination` and at `branch`.
///
/// Runs in the server's working directory when no destination is given.
/// The URL and destination always follow `--`, so git never reads them as
/// options.
pub async fn clone(vc: &dyn VersionControl, request: &CloneRequest) -> Result<ClonedRepository> {
    let url = expand_repo_url(&request.repo_url);

    let mut args = argv(&["clone"]);
    if let Some(branch) = &request.branch {
        check_branch(branch)?;
        args.push("-b".to_string());
        args.push(branch.clone());
    }
    args.push("--".to_string());
    args.push(url.clone());
    if let Some(destination) = &request.destination {
        args.push(destination.clone());
    }

    let out = vc.run(&args, None).await?;
    if !out.success {
        return Err(Error::CloneFailed { stderr: out.stderr });
    }

    let location = match &request.destination {
        Some(destination) => destination.clone(),
        None => directory_name(&url),
    };

    tracing::info!(%url, %location, "Cloned repository");

    Ok(ClonedRepository { location })
}

/// Branch names go where git accepts options (`-b <branch>`,
/// `push origin <branch>`); one starting with `-` would be parsed as a flag.
fn check_branch(branch: &str) -> Result<()> {
    if branch.is_empty() || branch.starts_with('-') {
        return Err(Error::InvalidBranch {
            branch: branch.to_string(),
        });
    }
    Ok(())
}

/// Expand `owner/repo` shorthand into a GitHub HTTPS clone URL.
///
/// Anything that already looks like a URL, an scp-style remote, or an
/// existing local path is returned unchanged.
pub fn expand_repo_url(repo_url: &str) -> String {
    let trimmed = repo_url.trim();
    let is_shorthand = !trimmed.contains("://")
        && !trimmed.contains(':')
        && !trimmed.starts_with(['.', '/', '~'])
        && trimmed.matches('/').count() == 1
        && trimmed.split('/').all(|part| !part.is_empty())
        && !Path::new(trimmed).exists();

    if is_shorthand {
        let repo = trimmed.trim_end_matches(".git");
        format!("https://github.com/{repo}.git")
    } else {
        trimmed.to_string()
    }
}

/// Directory name git picks when cloning `url` without a destination.
fn directory_name(url: &str) -> String {
    let last = url
        .trim_end_matches('/')
        .rsplit(['/', ':'])
        .next()
        .unwrap_or(url);
    last.strip_suffix(".git").unwrap_or(last).to_string()
}

fn argv(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|p| p.to_string()).collect()
}
