//! Release asset location under ambiguous tag naming
//!
//! Registry entries record a bare version, while projects tag releases
//! either with that version or with a `v` prefix. The locator tries the
//! candidates in a fixed order and keeps the first one that actually serves
//! the required asset.

use serde::Serialize;

use gate_meta::RepoRef;

use crate::http::HttpProbe;
use crate::{Error, Result};

/// Tags to try for `version`, in order.
///
/// `"1.2.0"` yields `["1.2.0", "v1.2.0"]`; `"v1.2.0"` yields `["v1.2.0"]`.
pub fn candidate_tags(version: &str) -> Vec<String> {
    let mut tags = vec![version.to_string()];
    if !version.starts_with('v') {
        tags.push(format!("v{version}"));
    }
    tags
}

/// Where the assets of a located release live.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssetLocation {
    /// Download prefix, ending in `/`.
    pub base_url: String,
    pub resolved_tag: String,
}

impl AssetLocation {
    pub fn asset_url(&self, asset: &str) -> String {
        format!("{}{}", self.base_url, asset)
    }
}

pub struct ReleaseAssetLocator<'a> {
    http: &'a dyn HttpProbe,
}

impl<'a> ReleaseAssetLocator<'a> {
    pub fn new(http: &'a dyn HttpProbe) -> Self {
        Self { http }
    }

    /// Find the first candidate tag of `version` whose release has `asset`.
    ///
    /// Returns [`Error::NotFound`] listing every tag tried when none do.
    pub async fn locate(
        &self,
        repo: &RepoRef,
        version: &str,
        asset: &str,
    ) -> Result<AssetLocation> {
        let tried = candidate_tags(version);

        for tag in &tried {
            let base_url = repo.release_download_url(tag);
            let url = format!("{base_url}{asset}");

            if self.http.exists(&url).await {
                tracing::info!(repo = %repo, tag = %tag, asset = %asset, "Release asset found");
                return Ok(AssetLocation {
                    base_url,
                    resolved_tag: tag.clone(),
                });
            }

            tracing::debug!(repo = %repo, tag = %tag, asset = %asset, "Release asset absent");
        }

        tracing::warn!(
            repo = %repo,
            version = %version,
            asset = %asset,
            "No release carries asset"
        );
        Err(Error::NotFound {
            asset: asset.to_string(),
            repo: repo.slug(),
            tried,
        })
    }
}
