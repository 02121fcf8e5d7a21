//! Configuration types and loading for registry-gate
//!
//! Configuration lives in an optional `.registry-gate.toml` (or `.json`) at
//! the root of the registry repository. Every key has a default, so a
//! repository without the file behaves like the stock plugin/theme setup.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::registry::RegistryKind;
use crate::repo_ref::DEFAULT_HOST;
use crate::{Error, Result};

/// File names probed, in order, by [`GateConfig::load`].
pub const CONFIG_FILE_NAMES: &[&str] = &[".registry-gate.toml", ".registry-gate.json"];

/// Format-agnostic configuration loader.
///
/// Detects the format from the file extension.
#[derive(Debug, Default)]
pub struct ConfigStore;

impl ConfigStore {
    pub fn new() -> Self {
        Self
    }

    /// Load configuration from a file.
    ///
    /// - `.toml` -> TOML
    /// - `.json` -> JSON
    pub fn load<T: DeserializeOwned>(&self, path: &Path) -> Result<T> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match extension.as_str() {
            "toml" => toml::from_str(&content).map_err(|e| Error::ConfigParse {
                path: path.to_path_buf(),
                format: "TOML".into(),
                message: e.to_string(),
            }),
            "json" => serde_json::from_str(&content).map_err(|e| Error::ConfigParse {
                path: path.to_path_buf(),
                format: "JSON".into(),
                message: e.to_string(),
            }),
            _ => Err(Error::UnsupportedFormat { extension }),
        }
    }
}

/// How a changed path is matched against a registry file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// The path contains the file name anywhere.
    #[default]
    Substring,
    /// The last path component equals the file name.
    Basename,
}

impl MatchMode {
    pub fn matches(&self, path: &str, file_name: &str) -> bool {
        match self {
            MatchMode::Substring => path.contains(file_name),
            MatchMode::Basename => path.rsplit('/').next() == Some(file_name),
        }
    }
}

impl FromStr for MatchMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "substring" => Ok(MatchMode::Substring),
            "basename" | "exact" => Ok(MatchMode::Basename),
            _ => Err(format!("invalid match mode '{s}' (expected substring or basename)")),
        }
    }
}

impl fmt::Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchMode::Substring => write!(f, "substring"),
            MatchMode::Basename => write!(f, "basename"),
        }
    }
}

/// Registry file locations, relative to the repository root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryFiles {
    pub plugins: String,
    pub themes: String,
}

impl RegistryFiles {
    pub fn file_for(&self, kind: RegistryKind) -> &str {
        match kind {
            RegistryKind::Plugins => &self.plugins,
            RegistryKind::Themes => &self.themes,
        }
    }
}

impl Default for RegistryFiles {
    fn default() -> Self {
        Self {
            plugins: RegistryKind::Plugins.default_file().to_string(),
            themes: RegistryKind::Themes.default_file().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    #[serde(rename = "match")]
    pub match_mode: MatchMode,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GitConfig {
    /// Reference the pull request is compared against.
    pub base_ref: String,
    /// Reference holding the proposed change. The working tree when unset.
    pub head_ref: Option<String>,
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            base_ref: "origin/main".to_string(),
            head_ref: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub user_agent: String,
    /// Connect timeout; the transport default applies when unset.
    pub connect_timeout_secs: Option<u64>,
    pub github_host: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: concat!("registry-gate/", env!("CARGO_PKG_VERSION")).to_string(),
            connect_timeout_secs: None,
            github_host: DEFAULT_HOST.to_string(),
        }
    }
}

/// External forbidden-content scanner. Disabled when `command` is empty.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Program and leading arguments; the repository URL is appended.
    pub command: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelConfig {
    /// Program and leading arguments; the PR number and label flags are appended.
    pub command: Vec<String>,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            command: vec!["gh".into(), "pr".into(), "edit".into()],
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GateConfig {
    pub registries: RegistryFiles,
    pub classifier: ClassifierConfig,
    pub git: GitConfig,
    pub http: HttpConfig,
    pub scan: ScanConfig,
    pub labels: LabelConfig,
}

impl GateConfig {
    /// Load the first config file found under `root`, or the defaults.
    pub fn load(root: &Path) -> Result<Self> {
        match Self::find(root) {
            Some(path) => {
                tracing::debug!(path = %path.display(), "Loading configuration");
                ConfigStore::new().load(&path)
            }
            None => Ok(Self::default()),
        }
    }

    /// Path of the config file under `root`, if any.
    pub fn find(root: &Path) -> Option<PathBuf> {
        CONFIG_FILE_NAMES
            .iter()
            .map(|name| root.join(name))
            .find(|path| path.is_file())
    }
}
