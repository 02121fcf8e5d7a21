//! Pipeline scenarios against real git repositories
//!
//! Each test builds a repository with the `git` CLI, edits a registry the
//! way a contributor would, and runs the pipeline with an in-memory HTTP
//! client standing in for the release host.

use gate_core::{
    ChangeClassification, ChangeKind, MemoryProbe, Outcome, Pipeline, PipelineReport,
};
use gate_git::GitRepository;
use gate_meta::GateConfig;
use gate_test_utils::repo::TestRepo;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

// =============================================================================
// Test Infrastructure
// =============================================================================

fn plugin(id: &str, version: &str) -> Value {
    json!({
        "id": id,
        "name": format!("Plugin {id}"),
        "author": "Someone",
        "version": version,
        "description": "Does things",
        "repo": format!("https://github.com/owner/{id}"),
    })
}

fn theme(id: &str, version: &str, modes: &[&str]) -> Value {
    json!({
        "id": id,
        "name": format!("Theme {id}"),
        "author": "Someone",
        "version": version,
        "description": "Looks nice",
        "repo": format!("owner/{id}.git"),
        "modes": modes,
    })
}

fn asset(id: &str, tag: &str, name: &str) -> String {
    format!("https://github.com/owner/{id}/releases/download/{tag}/{name}")
}

/// A repository with both registries committed on `main`.
fn registry_repo(plugins: Value, themes: Value) -> TestRepo {
    let repo = TestRepo::with_history();
    repo.write_json("plugins.json", &plugins);
    repo.write_json("themes.json", &themes);
    repo.commit("Add registries");
    repo
}

/// Working tree compared against `main`.
fn config() -> GateConfig {
    let mut config = GateConfig::default();
    config.git.base_ref = "main".to_string();
    config
}

async fn validate(repo: &TestRepo, config: GateConfig, http: &MemoryProbe) -> PipelineReport {
    let vcs = GitRepository::open(repo.root()).unwrap();
    Pipeline::new(repo.root(), config, &vcs, http).run().await
}

fn errors(report: &PipelineReport) -> Vec<String> {
    report.verdict.errors().map(str::to_string).collect()
}

// =============================================================================
// Change sets
// =============================================================================

#[tokio::test]
async fn test_only_the_added_entry_is_validated() {
    let repo = registry_repo(json!([plugin("foo", "1.0")]), json!([]));
    repo.write_json("plugins.json", &json!([plugin("foo", "1.0"), plugin("bar", "2.0")]));
    let http = MemoryProbe::new();

    let report = validate(&repo, config(), &http).await;

    assert_eq!(report.classification, ChangeClassification::PluginsOnly);
    let ids: Vec<_> = report.entries.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["bar"]);
    assert_eq!(report.entries[0].change, ChangeKind::Added);
    assert!(http.requests().iter().all(|url| url.contains("/owner/bar/")));
}

#[tokio::test]
async fn test_metadata_edit_without_version_bump_checks_nothing() {
    let repo = registry_repo(json!([plugin("foo", "1.0")]), json!([]));
    let mut edited = plugin("foo", "1.0");
    edited["description"] = json!("Does other things");
    repo.write_json("plugins.json", &json!([edited]));
    let http = MemoryProbe::new();

    let report = validate(&repo, config(), &http).await;

    assert!(report.passed(), "{:?}", errors(&report));
    assert!(report.entries.is_empty());
    assert!(http.requests().is_empty());
}

// =============================================================================
// Plugin releases
// =============================================================================

#[tokio::test]
async fn test_plugin_release_under_v_tag_passes() {
    let repo = registry_repo(json!([]), json!([]));
    repo.write_json("plugins.json", &json!([plugin("p", "3.0")]));
    let http = MemoryProbe::new()
        .with_asset(asset("p", "v3.0", "main.js"))
        .with_asset(asset("p", "v3.0", "styles.css"))
        .with_json(
            asset("p", "v3.0", "manifest.json"),
            json!({"id": "p", "version": "3.0", "minAppVersion": "1.0.0"}),
        );

    let report = validate(&repo, config(), &http).await;

    assert!(report.passed(), "{:?}", errors(&report));
    assert_eq!(report.exit_code(), 0);
    assert_eq!(
        http.requests()[..2],
        [asset("p", "3.0", "main.js"), asset("p", "v3.0", "main.js")]
    );
}

#[tokio::test]
async fn test_plugin_manifest_mismatches_are_reported_separately() {
    let repo = registry_repo(json!([]), json!([]));
    repo.write_json("plugins.json", &json!([plugin("p", "3.0")]));
    let http = MemoryProbe::new()
        .with_asset(asset("p", "v3.0", "main.js"))
        .with_json(
            asset("p", "v3.0", "manifest.json"),
            json!({"id": "q", "version": "3.0.1"}),
        );

    let report = validate(&repo, config(), &http).await;

    assert_eq!(report.exit_code(), 1);
    assert_eq!(
        errors(&report),
        vec![
            "p: manifest id 'q' does not match registry id 'p'".to_string(),
            "p: manifest version '3.0.1' does not match registry version '3.0'".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_committed_head_ref_is_read_from_history() {
    let repo = registry_repo(json!([]), json!([]));
    repo.branch("feature");
    repo.write_json("plugins.json", &json!([plugin("p", "1.0")]));
    repo.commit("Add p");
    // The checkout no longer has the change; only the ref does.
    repo.checkout("main");

    let mut config = config();
    config.git.head_ref = Some("feature".to_string());
    let http = MemoryProbe::new()
        .with_asset(asset("p", "1.0", "main.js"))
        .with_json(
            asset("p", "1.0", "manifest.json"),
            json!({"id": "p", "version": "1.0"}),
        );

    let report = validate(&repo, config, &http).await;

    assert!(report.passed(), "{:?}", errors(&report));
    assert_eq!(report.entries.len(), 1);
}

#[cfg(unix)]
#[tokio::test]
async fn test_configured_scan_command_gates_plugins() {
    let repo = registry_repo(json!([]), json!([]));
    repo.write_json("plugins.json", &json!([plugin("p", "1.0")]));
    let http = MemoryProbe::new()
        .with_asset(asset("p", "1.0", "main.js"))
        .with_json(
            asset("p", "1.0", "manifest.json"),
            json!({"id": "p", "version": "1.0"}),
        );

    let mut passing = config();
    passing.scan.command = vec!["true".to_string()];
    assert!(validate(&repo, passing, &http).await.passed());

    let mut failing = config();
    failing.scan.command = vec!["false".to_string()];
    let report = validate(&repo, failing, &http).await;
    assert!(!report.passed());
    assert_eq!(report.verdict.errors().count(), 1);
}

// =============================================================================
// Theme releases
// =============================================================================

#[tokio::test]
async fn test_theme_missing_light_stylesheet_fails() {
    let repo = registry_repo(json!([]), json!([]));
    repo.write_json("themes.json", &json!([theme("t", "1.0", &["light", "dark"])]));
    let http = MemoryProbe::new()
        .with_asset(asset("t", "1.0", "theme.json"))
        .with_asset(asset("t", "1.0", "dark.css"));

    let report = validate(&repo, config(), &http).await;

    assert_eq!(report.classification, ChangeClassification::ThemesOnly);
    assert_eq!(report.exit_code(), 1);
    let all: Vec<_> = report
        .verdict
        .diagnostics()
        .iter()
        .map(|d| d.message.clone())
        .collect();
    assert!(all.iter().any(|m| m.starts_with("t: light.css missing")));
    assert!(all.contains(&"t: dark.css found for dark mode".to_string()));
}

// =============================================================================
// Exclusivity and history
// =============================================================================

#[tokio::test]
async fn test_both_registries_rejected_with_zero_requests() {
    let repo = registry_repo(json!([]), json!([]));
    repo.branch("feature");
    repo.write_json("plugins.json", &json!([plugin("p", "1.0")]));
    repo.write_json("themes.json", &json!([theme("t", "1.0", &["dark"])]));
    repo.commit("Touch both registries");

    let mut config = config();
    config.git.head_ref = Some("feature".to_string());
    let http = MemoryProbe::new();

    let report = validate(&repo, config, &http).await;

    assert_eq!(report.outcome, Outcome::Rejected);
    assert_eq!(report.exit_code(), 1);
    assert!(http.requests().is_empty());
}

#[tokio::test]
async fn test_unfetched_base_rejects_change() {
    let repo = registry_repo(json!([]), json!([]));
    repo.write_json("plugins.json", &json!([plugin("p", "1.0")]));
    let http = MemoryProbe::new();

    // Default base is origin/main, which a local-only repository lacks.
    let report = validate(&repo, GateConfig::default(), &http).await;

    assert_eq!(report.outcome, Outcome::Rejected);
    assert!(!report.passed());
    assert!(errors(&report)[0].contains("origin/main"));
    assert!(http.requests().is_empty());
}

#[tokio::test]
async fn test_registry_new_on_branch_treats_every_entry_as_changed() {
    let repo = TestRepo::with_history();
    repo.write_json(
        "themes.json",
        &json!([theme("a", "1.0", &["dark"]), theme("b", "1.0", &["dark"])]),
    );
    let http = MemoryProbe::new();

    let report = validate(&repo, config(), &http).await;

    assert_eq!(report.classification, ChangeClassification::ThemesOnly);
    assert_eq!(report.entries.len(), 2);
    assert!(report.entries.iter().all(|e| e.change == ChangeKind::Unverified));
}
