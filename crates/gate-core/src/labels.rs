//! Pull-request labels derived from a finished run

use async_trait::async_trait;
use serde::Serialize;
use tokio::process::Command;

use crate::classify::ChangeClassification;
use crate::{Error, Result};

pub const LABEL_PLUGIN: &str = "plugin";
pub const LABEL_THEME: &str = "theme";
pub const LABEL_WAITING: &str = "waiting-for-review";
pub const LABEL_ERROR: &str = "validation-error";

/// Labels to add and remove on a pull request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LabelPlan {
    pub add: Vec<&'static str>,
    pub remove: Vec<&'static str>,
}

impl LabelPlan {
    /// Labels for a run that ended with `passed` after classifying as
    /// `classification`.
    pub fn for_outcome(classification: ChangeClassification, passed: bool) -> Self {
        let mut plan = Self::default();

        match classification {
            ChangeClassification::PluginsOnly => {
                plan.add.push(LABEL_PLUGIN);
                plan.remove.push(LABEL_THEME);
            }
            ChangeClassification::ThemesOnly => {
                plan.add.push(LABEL_THEME);
                plan.remove.push(LABEL_PLUGIN);
            }
            ChangeClassification::Both => {}
            ChangeClassification::Neither => {
                plan.remove.push(LABEL_ERROR);
                return plan;
            }
        }

        if passed {
            plan.add.push(LABEL_WAITING);
            plan.remove.push(LABEL_ERROR);
        } else {
            plan.add.push(LABEL_ERROR);
            plan.remove.push(LABEL_WAITING);
        }

        plan
    }

    pub fn is_empty(&self) -> bool {
        self.add.is_empty() && self.remove.is_empty()
    }
}

/// Applies a [`LabelPlan`] to a pull request.
#[async_trait]
pub trait Labeler: Send + Sync {
    async fn apply(&self, pull_request: u64, plan: &LabelPlan) -> Result<()>;
}

/// Labels through a CLI such as `gh pr edit`.
///
/// Invoked as `<command...> <pr> --add-label a --remove-label b`.
#[derive(Debug, Clone)]
pub struct CommandLabeler {
    program: String,
    args: Vec<String>,
}

impl CommandLabeler {
    /// Build from `[program, args...]`; `None` for an empty command.
    pub fn from_command(command: &[String]) -> Option<Self> {
        let (program, args) = command.split_first()?;
        Some(Self {
            program: program.clone(),
            args: args.to_vec(),
        })
    }

    /// Full argument list for one invocation, program excluded.
    pub fn arguments(&self, pull_request: u64, plan: &LabelPlan) -> Vec<String> {
        let mut args = self.args.clone();
        args.push(pull_request.to_string());
        for label in &plan.add {
            args.push("--add-label".to_string());
            args.push(label.to_string());
        }
        for label in &plan.remove {
            args.push("--remove-label".to_string());
            args.push(label.to_string());
        }
        args
    }
}

#[async_trait]
impl Labeler for CommandLabeler {
    async fn apply(&self, pull_request: u64, plan: &LabelPlan) -> Result<()> {
        if plan.is_empty() {
            return Ok(());
        }

        let output = Command::new(&self.program)
            .args(self.arguments(pull_request, plan))
            .output()
            .await
            .map_err(|e| Error::Label {
                message: format!("could not run '{}': {e}", self.program),
            })?;

        if !output.status.success() {
            return Err(Error::Label {
                message: format!(
                    "'{}' exited with {}: {}",
                    self.program,
                    output.status,
                    String::from_utf8_lossy(&output.stderr).trim()
                ),
            });
        }

        tracing::info!(pr = pull_request, add = ?plan.add, remove = ?plan.remove, "Labels updated");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_plan_plugins_passed() {
        let plan = LabelPlan::for_outcome(ChangeClassification::PluginsOnly, true);
        assert_eq!(plan.add, vec![LABEL_PLUGIN, LABEL_WAITING]);
        assert_eq!(plan.remove, vec![LABEL_THEME, LABEL_ERROR]);
    }

    #[test]
    fn test_plan_themes_failed() {
        let plan = LabelPlan::for_outcome(ChangeClassification::ThemesOnly, false);
        assert_eq!(plan.add, vec![LABEL_THEME, LABEL_ERROR]);
        assert_eq!(plan.remove, vec![LABEL_PLUGIN, LABEL_WAITING]);
    }

    #[test]
    fn test_plan_both_is_an_error() {
        let plan = LabelPlan::for_outcome(ChangeClassification::Both, false);
        assert_eq!(plan.add, vec![LABEL_ERROR]);
        assert_eq!(plan.remove, vec![LABEL_WAITING]);
    }

    #[test]
    fn test_plan_neither_only_clears_errors() {
        let plan = LabelPlan::for_outcome(ChangeClassification::Neither, true);
        assert!(plan.add.is_empty());
        assert_eq!(plan.remove, vec![LABEL_ERROR]);
    }

    #[test]
    fn test_command_arguments() {
        let labeler = CommandLabeler::from_command(&[
            "gh".to_string(),
            "pr".to_string(),
            "edit".to_string(),
        ])
        .unwrap();
        let plan = LabelPlan::for_outcome(ChangeClassification::PluginsOnly, true);

        assert_eq!(
            labeler.arguments(42, &plan),
            vec![
                "pr",
                "edit",
                "42",
                "--add-label",
                "plugin",
                "--add-label",
                "waiting-for-review",
                "--remove-label",
                "theme",
                "--remove-label",
                "validation-error",
            ]
        );
    }

    #[tokio::test]
    async fn test_missing_program_is_label_error() {
        let labeler =
            CommandLabeler::from_command(&["registry-gate-no-such-labeler".to_string()]).unwrap();
        let plan = LabelPlan::for_outcome(ChangeClassification::ThemesOnly, true);

        let err = labeler.apply(1, &plan).await.unwrap_err();
        assert!(matches!(err, Error::Label { .. }));
    }
}
