//! Lint command implementation

use std::path::{Path, PathBuf};

use colored::Colorize;
use serde_json::json;

use gate_meta::RegistryKind;
use gate_meta::lint::lint_registry;

use super::{exit_code, print_verdict};
use crate::context::Context;
use crate::error::{CliError, Result};

/// Run the lint command against `file`, or the configured registry file.
pub fn run_lint(
    context: &Context,
    kind: RegistryKind,
    file: Option<&Path>,
    json: bool,
) -> Result<i32> {
    let path: PathBuf = match file {
        Some(file) => context.root.join(file),
        None => context.root.join(context.config.registries.file_for(kind)),
    };

    let content = std::fs::read_to_string(&path)
        .map_err(|e| CliError::user(format!("cannot read '{}': {e}", path.display())))?;
    let verdict = lint_registry(kind, &content, &context.config.http.github_host);

    if json {
        let output = json!({
            "success": verdict.is_ok(),
            "registry": kind,
            "file": path.display().to_string(),
            "diagnostics": verdict.diagnostics(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{} {}", "Lint".blue().bold(), path.display().to_string().yellow());
        println!();
        print_verdict(&verdict);
    }

    Ok(exit_code(&verdict))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::RefArgs;
    use std::fs;
    use tempfile::TempDir;

    fn context(dir: &Path) -> Context {
        Context::load(dir, &RefArgs::default()).unwrap()
    }

    #[test]
    fn test_lint_valid_registry() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("plugins.json"),
            r#"[{"id": "p", "name": "P", "author": "A", "version": "1.0",
                 "description": "D", "repo": "owner/p"}]"#,
        )
        .unwrap();

        let code = run_lint(&context(temp.path()), RegistryKind::Plugins, None, false).unwrap();
        assert_eq!(code, 0);
    }

    #[test]
    fn test_lint_invalid_registry() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("themes.json"), "{}").unwrap();

        let code = run_lint(&context(temp.path()), RegistryKind::Themes, None, true).unwrap();
        assert_eq!(code, 1);
    }

    #[test]
    fn test_lint_missing_file_is_error() {
        let temp = TempDir::new().unwrap();
        let result = run_lint(&context(temp.path()), RegistryKind::Plugins, None, false);
        assert!(matches!(result, Err(CliError::User { .. })));
    }

    #[test]
    fn test_lint_explicit_file() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("staged.json"), "[]").unwrap();

        let code = run_lint(
            &context(temp.path()),
            RegistryKind::Plugins,
            Some(Path::new("staged.json")),
            false,
        )
        .unwrap();
        assert_eq!(code, 0);
    }
}
