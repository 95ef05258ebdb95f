//! [`RemotePair`]: a working repository whose `origin` is a local bare repo.
//!
//! Lets push and clone tests run end to end without network access.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::git::{real_git_repo_with_commit, run_git};

/// A temporary directory holding `remote.git` (bare) and `work` (a clone of
/// it with one pushed commit on `main`).
///
/// # Example
///
/// ```rust,no_run
/// use gh_test_utils::remote::RemotePair;
///
/// let pair = RemotePair::new();
/// pair.write_file("notes.txt", "hello");
/// assert!(pair.work().join("notes.txt").exists());
/// ```
pub struct RemotePair {
    temp_dir: TempDir,
}

impl Default for RemotePair {
    fn default() -> Self {
        Self::new()
    }
}

impl RemotePair {
    /// Create the bare remote and the working repository, and push `main`.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let remote = temp_dir.path().join("remote.git");
        let work = temp_dir.path().join("work");
        fs::create_dir_all(&remote).unwrap();
        fs::create_dir_all(&work).unwrap();

        run_git(&remote, &["init", "--bare"]);
        real_git_repo_with_commit(&work);
        run_git(&work, &["remote", "add", "origin", &path_str(&remote)]);
        run_git(&work, &["push", "-u", "origin", "main"]);

        Self { temp_dir }
    }

    /// Root of the temporary directory.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// The working repository.
    pub fn work(&self) -> PathBuf {
        self.root().join("work")
    }

    /// The bare remote.
    pub fn remote(&self) -> PathBuf {
        self.root().join("remote.git")
    }

    /// The remote as a string usable as a clone URL.
    pub fn remote_url(&self) -> String {
        path_str(&self.remote())
    }

    /// Write `content` to `relative` inside the working repository.
    pub fn write_file(&self, relative: &str, content: &str) {
        let path = self.work().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content)
            .unwrap_or_else(|e| panic!("write_file: failed to write {}: {e}", path.display()));
    }

    /// Message of the newest commit on `main` in the bare remote.
    pub fn remote_head_message(&self) -> String {
        let repo = git2::Repository::open_bare(self.remote()).unwrap();
        let reference = repo.find_reference("refs/heads/main").unwrap();
        let commit = reference.peel_to_commit().unwrap();
        commit.message().unwrap_or_default().trim().to_string()
    }
}

fn path_str(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
