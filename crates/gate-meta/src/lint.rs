//! Structural checks on a registry file
//!
//! Works on the raw JSON rather than on [`RegistryEntry`](crate::RegistryEntry)
//! so that every defect can be reported, including ones that would stop a
//! typed parse at the first error.

use std::collections::HashSet;

use serde_json::{Map, Value};

use crate::registry::RegistryKind;
use crate::repo_ref::RepoRef;
use crate::verdict::ValidationVerdict;

/// Fields every entry must carry as non-empty strings.
pub const REQUIRED_FIELDS: &[&str] = &["id", "name", "author", "version", "description", "repo"];

const KNOWN_MODES: &[&str] = &["light", "dark"];

/// Check `content` as a `kind` registry file.
///
/// `host` is the code host repository references must point at.
pub fn lint_registry(kind: RegistryKind, content: &str, host: &str) -> ValidationVerdict {
    let mut verdict = ValidationVerdict::pass();

    let document: Value = match serde_json::from_str(content) {
        Ok(value) => value,
        Err(e) => {
            verdict.error(format!("{kind} registry is not valid JSON: {e}"));
            return verdict;
        }
    };

    let Some(items) = document.as_array() else {
        verdict.error(format!("{kind} registry root must be an array"));
        return verdict;
    };

    let mut seen_ids = HashSet::new();

    for (index, item) in items.iter().enumerate() {
        let Some(object) = item.as_object() else {
            verdict.error(format!("entry #{index} is not an object"));
            continue;
        };

        let label = match object.get("id").and_then(Value::as_str) {
            Some(id) if !id.trim().is_empty() => format!("entry #{index} ({id})"),
            _ => format!("entry #{index}"),
        };

        check_required_fields(&mut verdict, &label, object);

        if let Some(id) = object.get("id").and_then(Value::as_str)
            && !id.is_empty()
            && !seen_ids.insert(id.to_string())
        {
            verdict.error(format!("{label}: duplicate id '{id}'"));
        }

        if let Some(repo) = object.get("repo").and_then(Value::as_str)
            && !repo.trim().is_empty()
            && let Err(e) = RepoRef::parse_with_host(repo, host)
        {
            verdict.error(format!("{label}: {e}"));
        }

        check_modes(&mut verdict, &label, kind, object);
    }

    if verdict.is_ok() {
        verdict.info(format!("{kind} registry well-formed ({} entries)", items.len()));
    }

    verdict
}

fn check_required_fields(
    verdict: &mut ValidationVerdict,
    label: &str,
    object: &Map<String, Value>,
) {
    for field in REQUIRED_FIELDS {
        match object.get(*field) {
            None => verdict.error(format!("{label}: missing required field '{field}'")),
            Some(Value::String(s)) if s.trim().is_empty() => {
                verdict.error(format!("{label}: field '{field}' is empty"))
            }
            Some(Value::String(s)) if s.trim() != s => verdict.error(format!(
                "{label}: field '{field}' has leading or trailing whitespace"
            )),
            Some(Value::String(_)) => {}
            Some(_) => verdict.error(format!("{label}: field '{field}' must be a string")),
        }
    }
}

fn check_modes(
    verdict: &mut ValidationVerdict,
    label: &str,
    kind: RegistryKind,
    object: &Map<String, Value>,
) {
    let Some(modes) = object.get("modes") else {
        return;
    };

    if kind == RegistryKind::Plugins {
        verdict.error(format!("{label}: plugins do not declare 'modes'"));
        return;
    }

    let Some(modes) = modes.as_array() else {
        verdict.error(format!("{label}: 'modes' must be an array"));
        return;
    };

    if modes.is_empty() {
        verdict.error(format!("{label}: 'modes' must not be empty"));
    }

    let mut seen = HashSet::new();
    for mode in modes {
        match mode.as_str() {
            Some(m) if KNOWN_MODES.contains(&m) => {
                if !seen.insert(m) {
                    verdict.error(format!("{label}: mode '{m}' listed twice"));
                }
            }
            Some(m) => verdict.error(format!(
                "{label}: unknown mode '{m}' (expected one of {})",
                KNOWN_MODES.join(", ")
            )),
            None => verdict.error(format!("{label}: modes must be strings")),
        }
    }
}
