//! Configuration as seen by a single command invocation

use std::path::{Path, PathBuf};

use gate_meta::GateConfig;

use crate::cli::RefArgs;
use crate::error::{CliError, Result};

/// Resolved root and configuration for one command.
#[derive(Debug, Clone)]
pub struct Context {
    pub root: PathBuf,
    pub config: GateConfig,
}

impl Context {
    /// Load the configuration under `root` and apply `refs` on top of it.
    pub fn load(root: &Path, refs: &RefArgs) -> Result<Self> {
        if !root.is_dir() {
            return Err(CliError::user(format!(
                "root '{}' is not a directory",
                root.display()
            )));
        }

        let mut config = GateConfig::load(root)?;
        if let Some(base) = &refs.base {
            config.git.base_ref = base.clone();
        }
        if let Some(head) = &refs.head {
            config.git.head_ref = Some(head.clone());
        }

        tracing::debug!(
            root = %root.display(),
            base = %config.git.base_ref,
            head = ?config.git.head_ref,
            "Configuration resolved"
        );

        Ok(Self {
            root: root.to_path_buf(),
            config,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_flags_override_config() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(".registry-gate.toml"),
            "[git]\nbase_ref = \"upstream/master\"\nhead_ref = \"feature\"\n",
        )
        .unwrap();

        let refs = RefArgs {
            base: Some("main".to_string()),
            head: None,
        };
        let context = Context::load(temp.path(), &refs).unwrap();

        assert_eq!(context.config.git.base_ref, "main");
        assert_eq!(context.config.git.head_ref.as_deref(), Some("feature"));
    }

    #[test]
    fn test_defaults_without_config() {
        let temp = TempDir::new().unwrap();
        let context = Context::load(temp.path(), &RefArgs::default()).unwrap();
        assert_eq!(context.config.git.base_ref, "origin/main");
        assert!(context.config.git.head_ref.is_none());
    }

    #[test]
    fn test_missing_root_is_user_error() {
        let temp = TempDir::new().unwrap();
        let result = Context::load(&temp.path().join("nope"), &RefArgs::default());
        assert!(matches!(result, Err(CliError::User { .. })));
    }
}
