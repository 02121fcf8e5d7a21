//! Bucketing a change by the registries it touches

use std::fmt;

use serde::Serialize;

use gate_meta::config::RegistryFiles;
use gate_meta::{MatchMode, RegistryKind};

/// Which registries a change touches. Exactly one variant applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeClassification {
    PluginsOnly,
    ThemesOnly,
    Neither,
    Both,
}

impl ChangeClassification {
    /// Classify a set of changed paths.
    pub fn classify<S: AsRef<str>>(
        paths: &[S],
        files: &RegistryFiles,
        mode: MatchMode,
    ) -> Self {
        let touches = |kind: RegistryKind| {
            let file = files.file_for(kind);
            paths.iter().any(|p| mode.matches(p.as_ref(), file))
        };

        let classification =
            Self::from_flags(touches(RegistryKind::Plugins), touches(RegistryKind::Themes));
        tracing::debug!(paths = paths.len(), classification = %classification, "Classified change");
        classification
    }

    pub fn from_flags(plugins: bool, themes: bool) -> Self {
        match (plugins, themes) {
            (true, true) => Self::Both,
            (true, false) => Self::PluginsOnly,
            (false, true) => Self::ThemesOnly,
            (false, false) => Self::Neither,
        }
    }

    /// The single registry this change is about, if there is exactly one.
    pub fn kind(&self) -> Option<RegistryKind> {
        match self {
            Self::PluginsOnly => Some(RegistryKind::Plugins),
            Self::ThemesOnly => Some(RegistryKind::Themes),
            Self::Neither | Self::Both => None,
        }
    }
}

impl fmt::Display for ChangeClassification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PluginsOnly => write!(f, "plugins only"),
            Self::ThemesOnly => write!(f, "themes only"),
            Self::Neither => write!(f, "no registry"),
            Self::Both => write!(f, "plugins and themes"),
        }
    }
}
