//! Boolean-with-diagnostics results shared by every check

use std::fmt;

use serde::Serialize;

/// Severity of a diagnostic line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    /// A check outcome worth reporting that does not fail validation.
    Info,
    /// A failed check.
    Error,
}

/// One human-readable line produced by a check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub level: Level,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.level {
            Level::Info => write!(f, "{}", self.message),
            Level::Error => write!(f, "error: {}", self.message),
        }
    }
}

/// Outcome of one or more checks.
///
/// Diagnostics are only ever appended; `ok` turns false as soon as any
/// error is recorded and never turns back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationVerdict {
    ok: bool,
    diagnostics: Vec<Diagnostic>,
}

impl ValidationVerdict {
    /// A passing verdict with no diagnostics yet.
    pub fn pass() -> Self {
        Self {
            ok: true,
            diagnostics: Vec::new(),
        }
    }

    /// A failing verdict carrying a single error.
    pub fn fail(message: impl Into<String>) -> Self {
        let mut verdict = Self::pass();
        verdict.error(message);
        verdict
    }

    /// Record a non-failing outcome.
    pub fn info(&mut self, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic {
            level: Level::Info,
            message: message.into(),
        });
    }

    /// Record a failed check.
    pub fn error(&mut self, message: impl Into<String>) {
        self.ok = false;
        self.diagnostics.push(Diagnostic {
            level: Level::Error,
            message: message.into(),
        });
    }

    /// Fold another verdict into this one, keeping its diagnostics in order.
    pub fn merge(&mut self, other: ValidationVerdict) {
        self.ok &= other.ok;
        self.diagnostics.extend(other.diagnostics);
    }

    /// Prefix every message, typically with the entry or file it concerns.
    pub fn with_prefix(mut self, prefix: &str) -> Self {
        for diagnostic in &mut self.diagnostics {
            diagnostic.message = format!("{prefix}: {}", diagnostic.message);
        }
        self
    }

    pub fn is_ok(&self) -> bool {
        self.ok
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Messages of the failed checks only.
    pub fn errors(&self) -> impl Iterator<Item = &str> {
        self.diagnostics
            .iter()
            .filter(|d| d.level == Level::Error)
            .map(|d| d.message.as_str())
    }
}

impl Default for ValidationVerdict {
    fn default() -> Self {
        Self::pass()
    }
}
