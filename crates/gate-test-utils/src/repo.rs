//! [`TestRepo`] builder for registry validation scenarios.

use std::fs;
use std::path::Path;

use serde_json::Value;
use tempfile::TempDir;

use crate::git;

/// A temporary git repository holding registry files.
///
/// # Example
///
/// ```rust,no_run
/// use gate_test_utils::repo::TestRepo;
/// use serde_json::json;
///
/// let repo = TestRepo::with_history();
/// repo.write_json("plugins.json", &json!([]));
/// repo.commit("Add empty registry");
/// repo.branch("feature");
/// ```
pub struct TestRepo {
    temp_dir: TempDir,
}

impl TestRepo {
    /// An empty temporary directory, not yet a repository.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    /// A repository with an initial commit on `main`.
    pub fn with_history() -> Self {
        let repo = Self::new();
        git::real_git_repo_with_commit(repo.root());
        repo
    }

    /// Root of the working tree.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Write `content` to `path` (relative to the root), creating parents.
    pub fn write_file(&self, path: &str, content: &str) {
        let full_path = self.root().join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(full_path, content).unwrap();
    }

    /// Write a JSON document pretty-printed, the way registries are stored.
    pub fn write_json(&self, path: &str, value: &Value) {
        let mut content = serde_json::to_string_pretty(value).unwrap();
        content.push('\n');
        self.write_file(path, &content);
    }

    /// Stage everything and commit.
    pub fn commit(&self, message: &str) {
        git::commit_all(self.root(), message);
    }

    /// Create and switch to branch `name`.
    pub fn branch(&self, name: &str) {
        git::run_git(self.root(), &["checkout", "-b", name]);
    }

    /// Switch to an existing branch.
    pub fn checkout(&self, name: &str) {
        git::run_git(self.root(), &["checkout", name]);
    }
}

impl Default for TestRepo {
    fn default() -> Self {
        Self::new()
    }
}
