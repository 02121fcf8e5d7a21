//! Whole-file format check run before any per-entry work

use gate_meta::lint::lint_registry;
use gate_meta::{RegistryKind, ValidationVerdict};

/// Checks the structure of a registry file.
pub trait FormatCheck: Send + Sync {
    fn check(&self, kind: RegistryKind, content: &str) -> ValidationVerdict;
}

/// [`FormatCheck`] backed by [`gate_meta::lint`].
pub struct LintFormatCheck {
    host: String,
}

impl LintFormatCheck {
    pub fn new(host: impl Into<String>) -> Self {
        Self { host: host.into() }
    }
}

impl FormatCheck for LintFormatCheck {
    fn check(&self, kind: RegistryKind, content: &str) -> ValidationVerdict {
        let verdict = lint_registry(kind, content, &self.host);
        if verdict.is_ok() {
            tracing::info!(registry = %kind, "Format check passed");
        } else {
            tracing::warn!(
                registry = %kind,
                problems = verdict.errors().count(),
                "Format check failed"
            );
        }
        verdict
    }
}
