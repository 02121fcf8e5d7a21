//! Locate command implementation

use colored::Colorize;
use serde_json::json;

use gate_core::{Error, ReleaseAssetLocator, ReqwestProbe};
use gate_meta::RepoRef;

use crate::context::Context;
use crate::error::Result;

/// Run the locate command
///
/// Exits 1 when no candidate tag carries the asset.
pub async fn run_locate(
    context: &Context,
    repo: &str,
    version: &str,
    asset: &str,
    json: bool,
) -> Result<i32> {
    let http_config = &context.config.http;
    let repo = RepoRef::parse_with_host(repo, &http_config.github_host)?;
    let http = ReqwestProbe::new(http_config)?;

    let result = ReleaseAssetLocator::new(&http)
        .locate(&repo, version, asset)
        .await;

    match result {
        Ok(location) => {
            if json {
                let output = json!({
                    "success": true,
                    "repo": repo.slug(),
                    "tag": location.resolved_tag,
                    "base_url": location.base_url,
                    "asset_url": location.asset_url(asset),
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else {
                println!(
                    "{} {} in release {}",
                    "Found".green().bold(),
                    asset,
                    location.resolved_tag.cyan()
                );
                println!("  {}", location.asset_url(asset));
            }
            Ok(0)
        }
        Err(Error::NotFound { tried, .. }) if json => {
            let output = json!({
                "success": false,
                "repo": repo.slug(),
                "tried": tried,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
            Ok(1)
        }
        Err(e) => {
            println!("{} {}", "FAIL".red().bold(), e);
            Ok(1)
        }
    }
}
