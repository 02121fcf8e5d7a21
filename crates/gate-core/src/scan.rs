//! Forbidden-content scanning of a plugin's source repository
//!
//! The scan itself is an external program; this module only decides how to
//! invoke it and how to read its result.

use async_trait::async_trait;
use tokio::process::Command;

use gate_meta::{RepoRef, ValidationVerdict};

/// Scans the source repository of a changed plugin.
#[async_trait]
pub trait ContentScanner: Send + Sync {
    async fn scan(&self, repo: &RepoRef) -> ValidationVerdict;
}

/// Runs a configured program with the repository URL as its last argument.
///
/// Exit status zero passes; anything else, including a failure to spawn,
/// fails the entry.
#[derive(Debug, Clone)]
pub struct CommandScanner {
    program: String,
    args: Vec<String>,
}

impl CommandScanner {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Build from `[program, args...]`; `None` for an empty command.
    pub fn from_command(command: &[String]) -> Option<Self> {
        let (program, args) = command.split_first()?;
        Some(Self::new(program.clone(), args.to_vec()))
    }
}

#[async_trait]
impl ContentScanner for CommandScanner {
    async fn scan(&self, repo: &RepoRef) -> ValidationVerdict {
        let url = repo.web_url();
        tracing::debug!(program = %self.program, repo = %url, "Running content scan");

        let output = match Command::new(&self.program)
            .args(&self.args)
            .arg(&url)
            .output()
            .await
        {
            Ok(output) => output,
            Err(e) => {
                return ValidationVerdict::fail(format!(
                    "content scan could not start '{}': {e}",
                    self.program
                ));
            }
        };

        if output.status.success() {
            let mut verdict = ValidationVerdict::pass();
            verdict.info(format!("content scan of {url} passed"));
            return verdict;
        }

        let mut verdict = ValidationVerdict::fail(format!(
            "content scan of {url} failed ({})",
            output.status
        ));
        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        for line in stdout.lines().chain(stderr.lines()).filter(|l| !l.trim().is_empty()) {
            verdict.info(format!("  {line}"));
        }
        verdict
    }
}
