//! Cross-checks between a registry entry and its published release
//!
//! Each check records its own diagnostic and the checks do not stop at the
//! first failure, so a single run reports every defect of an entry.

use serde_json::Value;

use gate_meta::{RegistryEntry, RegistryKind, RepoRef, ValidationVerdict};

use crate::Error;
use crate::http::HttpProbe;
use crate::locator::{AssetLocation, ReleaseAssetLocator};

const MANIFEST: &str = "manifest.json";
const PLUGIN_STYLES: &str = "styles.css";

/// Validates the release behind a registry entry.
pub struct ReleaseValidator<'a> {
    http: &'a dyn HttpProbe,
    host: String,
}

impl<'a> ReleaseValidator<'a> {
    /// `host` is the code host entries' `repo` fields are resolved against.
    pub fn new(http: &'a dyn HttpProbe, host: impl Into<String>) -> Self {
        Self {
            http,
            host: host.into(),
        }
    }

    pub async fn validate(&self, kind: RegistryKind, entry: &RegistryEntry) -> ValidationVerdict {
        match kind {
            RegistryKind::Plugins => self.validate_plugin(entry).await,
            RegistryKind::Themes => self.validate_theme(entry).await,
        }
    }

    /// Locate `main.js`, then compare `manifest.json` with the entry.
    pub async fn validate_plugin(&self, entry: &RegistryEntry) -> ValidationVerdict {
        let mut verdict = ValidationVerdict::pass();

        let Some(location) = self
            .locate(&mut verdict, entry, RegistryKind::Plugins)
            .await
        else {
            return verdict;
        };

        let manifest_url = location.asset_url(MANIFEST);
        match self.http.fetch_json(&manifest_url).await {
            Some(manifest) => {
                verdict.info(format!("{MANIFEST} fetched from {manifest_url}"));
                check_field(&mut verdict, &manifest, "id", &entry.id);
                check_field(&mut verdict, &manifest, "version", &entry.version);
            }
            None => {
                tracing::warn!(entry = %entry.id, url = %manifest_url, "Manifest missing");
                verdict.error(format!(
                    "{MANIFEST} missing or not valid JSON at {manifest_url}"
                ));
            }
        }

        if self.http.exists(&location.asset_url(PLUGIN_STYLES)).await {
            tracing::info!(entry = %entry.id, "Optional {PLUGIN_STYLES} found");
            verdict.info(format!("{PLUGIN_STYLES} found"));
        } else {
            tracing::info!(entry = %entry.id, "No {PLUGIN_STYLES} published");
            verdict.info(format!("{PLUGIN_STYLES} not published (optional)"));
        }

        verdict
    }

    /// Locate `theme.json`, then require one stylesheet per declared mode.
    pub async fn validate_theme(&self, entry: &RegistryEntry) -> ValidationVerdict {
        let mut verdict = ValidationVerdict::pass();

        let Some(location) = self
            .locate(&mut verdict, entry, RegistryKind::Themes)
            .await
        else {
            return verdict;
        };

        let entry = entry.clone().normalized(RegistryKind::Themes);
        for mode in entry.modes() {
            let stylesheet = mode.stylesheet();
            if self.http.exists(&location.asset_url(stylesheet)).await {
                tracing::info!(entry = %entry.id, mode = %mode, "Stylesheet found");
                verdict.info(format!("{stylesheet} found for {mode} mode"));
            } else {
                tracing::warn!(entry = %entry.id, mode = %mode, "Stylesheet missing");
                verdict.error(format!(
                    "{stylesheet} missing for declared {mode} mode at {}",
                    location.base_url
                ));
            }
        }

        verdict
    }

    async fn locate(
        &self,
        verdict: &mut ValidationVerdict,
        entry: &RegistryEntry,
        kind: RegistryKind,
    ) -> Option<AssetLocation> {
        let repo = match RepoRef::parse_with_host(&entry.repo, &self.host) {
            Ok(repo) => repo,
            Err(e) => {
                verdict.error(
                    Error::Parse {
                        what: "repository reference".to_string(),
                        message: e.to_string(),
                    }
                    .to_string(),
                );
                return None;
            }
        };

        let asset = kind.required_asset();
        match ReleaseAssetLocator::new(self.http)
            .locate(&repo, &entry.version, asset)
            .await
        {
            Ok(location) => {
                verdict.info(format!(
                    "{asset} found in release {}",
                    location.resolved_tag
                ));
                Some(location)
            }
            Err(e) => {
                verdict.error(e.to_string());
                None
            }
        }
    }
}

fn check_field(verdict: &mut ValidationVerdict, manifest: &Value, field: &str, expected: &str) {
    let found = manifest.get(field).and_then(Value::as_str);

    if found == Some(expected) {
        verdict.info(format!("manifest {field} matches ({expected})"));
        return;
    }

    let error = Error::Mismatch {
        field: field.to_string(),
        registry: expected.to_string(),
        manifest: found.unwrap_or("<missing>").to_string(),
    };
    tracing::warn!(field = %field, "{error}");
    verdict.error(error.to_string());
}
