//! Subprocess execution for git commands

use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;

use crate::{Error, Result};

/// Captured result of a single git invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub success: bool,
    /// Exit code, `None` when the process was killed by a signal
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    /// True when `needle` appears in either captured stream.
    pub fn mentions(&self, needle: &str) -> bool {
        self.stdout.contains(needle) || self.stderr.contains(needle)
    }
}

/// Version-control collaborator contract.
///
/// Takes an argument list and an optional working directory and reports
/// success plus captured output. A non-zero exit is *not* an `Err`; only a
/// failure to start the process is.
#[async_trait]
pub trait VersionControl: Send + Sync {
    async fn run(&self, args: &[String], cwd: Option<&Path>) -> Result<CommandOutput>;
}

/// [`VersionControl`] backed by the `git` executable.
#[derive(Debug, Clone)]
pub struct GitCli {
    program: PathBuf,
}

impl GitCli {
    /// Use `git` from `PATH`.
    pub fn new() -> Self {
        Self::with_program("git")
    }

    /// Use a specific git executable.
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for GitCli {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VersionControl for GitCli {
    async fn run(&self, args: &[String], cwd: Option<&Path>) -> Result<CommandOutput> {
        let mut cmd = Command::new(&self.program);
        cmd.args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            // Never let git block on a credential prompt; stdin is the protocol stream.
            .env("GIT_TERMINAL_PROMPT", "0")
            .kill_on_drop(true);
        if let Some(dir) = cwd {
            cmd.current_dir(dir);
        }

        tracing::debug!(program = %self.program.display(), ?args, ?cwd, "Running git");

        let output = cmd.output().await.map_err(|source| Error::Spawn {
            program: self.program.display().to_string(),
            source,
        })?;

        let result = CommandOutput {
            success: output.status.success(),
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).trim().to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        };

        if !result.success {
            tracing::debug!(code = ?result.code, stderr = %result.stderr, "git exited with failure");
        }

        Ok(result)
    }
}
