//! Registry entries and registry documents
//!
//! A registry is a JSON array of entries keyed by `id`. The same entry shape
//! serves both the plugin and the theme registry; only themes carry `modes`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{Error, Result};

/// Colour scheme a theme ships a stylesheet for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    Dark,
}

impl ThemeMode {
    /// Stylesheet a release must publish for this mode.
    pub fn stylesheet(&self) -> &'static str {
        match self {
            ThemeMode::Light => "light.css",
            ThemeMode::Dark => "dark.css",
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThemeMode::Light => write!(f, "light"),
            ThemeMode::Dark => write!(f, "dark"),
        }
    }
}

/// Modes assumed for a theme entry that does not list any.
pub const DEFAULT_THEME_MODES: &[ThemeMode] = &[ThemeMode::Dark];

/// Which registry a file or entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegistryKind {
    Plugins,
    Themes,
}

impl RegistryKind {
    /// Conventional file name of the registry.
    pub fn default_file(&self) -> &'static str {
        match self {
            RegistryKind::Plugins => "plugins.json",
            RegistryKind::Themes => "themes.json",
        }
    }

    /// Asset whose presence proves a release exists for an entry.
    pub fn required_asset(&self) -> &'static str {
        match self {
            RegistryKind::Plugins => "main.js",
            RegistryKind::Themes => "theme.json",
        }
    }

    /// Singular noun, also used as the pull-request label.
    pub fn label(&self) -> &'static str {
        match self {
            RegistryKind::Plugins => "plugin",
            RegistryKind::Themes => "theme",
        }
    }
}

impl FromStr for RegistryKind {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "plugins" | "plugin" => Ok(RegistryKind::Plugins),
            "themes" | "theme" => Ok(RegistryKind::Themes),
            _ => Err(Error::InvalidKind {
                kind: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for RegistryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryKind::Plugins => write!(f, "plugins"),
            RegistryKind::Themes => write!(f, "themes"),
        }
    }
}

/// One record of a registry.
///
/// Only `id` is required for the entry to be read at all; the format check
/// in [`crate::lint`] is what enforces the remaining fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryEntry {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub repo: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modes: Option<Vec<ThemeMode>>,
}

impl RegistryEntry {
    /// Apply kind-specific defaults.
    ///
    /// Theme entries without `modes` get [`DEFAULT_THEME_MODES`]. This is the
    /// only place the default is applied.
    pub fn normalized(mut self, kind: RegistryKind) -> Self {
        if kind == RegistryKind::Themes && self.modes.is_none() {
            self.modes = Some(DEFAULT_THEME_MODES.to_vec());
        }
        self
    }

    /// Declared modes; empty for entries that were never normalized as themes.
    pub fn modes(&self) -> &[ThemeMode] {
        self.modes.as_deref().unwrap_or(&[])
    }
}

/// A registry element that could not be read as an entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectedEntry {
    /// Position in the registry array.
    pub index: usize,
    /// The element's `id`, when it has a string one.
    pub id: Option<String>,
    pub message: String,
}

impl fmt::Display for RejectedEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.id {
            Some(id) => write!(f, "entry #{} ({id}): {}", self.index, self.message),
            None => write!(f, "entry #{}: {}", self.index, self.message),
        }
    }
}

/// A parsed registry document.
///
/// Elements are read one by one; an element that does not deserialize is
/// kept aside in [`Registry::rejected`] instead of failing the document.
#[derive(Debug, Clone, PartialEq)]
pub struct Registry {
    kind: RegistryKind,
    entries: Vec<RegistryEntry>,
    rejected: Vec<RejectedEntry>,
}

impl Registry {
    /// Parse registry JSON, normalizing every entry for `kind`.
    ///
    /// Fails only when the document is not JSON or its root is not an array.
    pub fn parse(kind: RegistryKind, content: &str) -> Result<Self> {
        let raw: Vec<Value> = serde_json::from_str(content).map_err(|e| Error::RegistryParse {
            kind: kind.to_string(),
            message: e.to_string(),
        })?;

        let mut entries = Vec::with_capacity(raw.len());
        let mut rejected = Vec::new();

        for (index, value) in raw.into_iter().enumerate() {
            let id = value.get("id").and_then(Value::as_str).map(str::to_string);
            match serde_json::from_value::<RegistryEntry>(value) {
                Ok(entry) => entries.push(entry.normalized(kind)),
                Err(e) => {
                    tracing::warn!(
                        registry = %kind,
                        index,
                        id = ?id,
                        error = %e,
                        "Unreadable entry"
                    );
                    rejected.push(RejectedEntry {
                        index,
                        id,
                        message: e.to_string(),
                    });
                }
            }
        }

        Ok(Self {
            kind,
            entries,
            rejected,
        })
    }

    pub fn kind(&self) -> RegistryKind {
        self.kind
    }

    pub fn entries(&self) -> &[RegistryEntry] {
        &self.entries
    }

    /// Elements that were skipped because they are not valid entries.
    pub fn rejected(&self) -> &[RejectedEntry] {
        &self.rejected
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
