//! Git repository fixtures.
//!
//! The fixtures shell out to the `git` CLI so that the repositories they
//! produce look exactly like the ones a CI checkout would hand the pipeline.

use std::fs;
use std::path::Path;
use std::process::Command;

/// Run `git` with `args` inside `path`, panicking with stderr on failure.
///
/// # Panics
/// Panics if git cannot be spawned or exits non-zero.
pub fn run_git(path: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(path)
        .output()
        .unwrap_or_else(|e| panic!("run_git: failed to run `git {args:?}`: {e}"));
    if !output.status.success() {
        panic!(
            "run_git: `git {args:?}` failed:\n{}",
            String::from_utf8_lossy(&output.stderr)
        );
    }
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// Initialises a git repository with one commit on `main`.
///
/// Configures a throwaway identity and disables signing so commits work on
/// any machine, then commits a `README.md`.
///
/// # Panics
/// Panics if any git operation fails.
pub fn real_git_repo_with_commit(path: &Path) {
    run_git(path, &["init"]);
    run_git(path, &["config", "user.email", "test@test.com"]);
    run_git(path, &["config", "user.name", "Test User"]);
    run_git(path, &["config", "commit.gpgsign", "false"]);

    fs::write(path.join("README.md"), "# Registry")
        .unwrap_or_else(|e| panic!("real_git_repo_with_commit: failed to write README.md: {e}"));

    run_git(path, &["add", "."]);
    run_git(path, &["commit", "-m", "Initial commit"]);
    // Older git versions may already be on `main` or refuse the rename.
    let _ = Command::new("git")
        .args(["branch", "-M", "main"])
        .current_dir(path)
        .output();
}

/// Stage everything and commit it with `message`.
///
/// # Panics
/// Panics if any git operation fails.
pub fn commit_all(path: &Path, message: &str) {
    run_git(path, &["add", "-A"]);
    run_git(path, &["commit", "--allow-empty", "-m", message]);
}
