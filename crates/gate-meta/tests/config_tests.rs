//! Tests for loading `.registry-gate.*` configuration files

use std::fs;

use gate_meta::{GateConfig, MatchMode};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

#[test]
fn test_missing_config_uses_defaults() {
    let temp = TempDir::new().unwrap();
    let config = GateConfig::load(temp.path()).unwrap();
    assert_eq!(config, GateConfig::default());
}

#[test]
fn test_partial_toml_keeps_other_defaults() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join(".registry-gate.toml"),
        r#"
[registries]
plugins = "community-plugins.json"

[classifier]
match = "basename"

[git]
base_ref = "upstream/master"
"#,
    )
    .unwrap();

    let config = GateConfig::load(temp.path()).unwrap();
    assert_eq!(config.registries.plugins, "community-plugins.json");
    assert_eq!(config.registries.themes, "themes.json");
    assert_eq!(config.classifier.match_mode, MatchMode::Basename);
    assert_eq!(config.git.base_ref, "upstream/master");
    assert_eq!(config.git.head_ref, None);
    assert_eq!(config.http.github_host, "github.com");
}

#[test]
fn test_json_config_is_supported() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join(".registry-gate.json"),
        r#"{"scan": {"command": ["scanner", "--strict"]}, "http": {"connect_timeout_secs": 5}}"#,
    )
    .unwrap();

    let config = GateConfig::load(temp.path()).unwrap();
    assert_eq!(config.scan.command, vec!["scanner", "--strict"]);
    assert_eq!(config.http.connect_timeout_secs, Some(5));
}

#[test]
fn test_toml_wins_over_json() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join(".registry-gate.toml"),
        "[git]\nbase_ref = \"from-toml\"\n",
    )
    .unwrap();
    fs::write(
        temp.path().join(".registry-gate.json"),
        r#"{"git": {"base_ref": "from-json"}}"#,
    )
    .unwrap();

    let config = GateConfig::load(temp.path()).unwrap();
    assert_eq!(config.git.base_ref, "from-toml");
}

#[test]
fn test_invalid_config_reports_path() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join(".registry-gate.toml"), "[git\nbase_ref = 1").unwrap();

    let err = GateConfig::load(temp.path()).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("TOML"), "got: {message}");
    assert!(message.contains(".registry-gate.toml"), "got: {message}");
}
