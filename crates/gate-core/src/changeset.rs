//! Entries a change actually touched
//!
//! Registries are append-only and large; a pull request should only pay for
//! the entries it adds or re-versions. Matching is by `id` and version
//! comparison is purely textual.

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use gate_meta::RegistryEntry;

/// Why an entry is part of a [`ChangeSet`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChangeKind {
    /// No base entry shares the `id`.
    Added,
    /// The base entry carries a different version string.
    VersionChanged { previous: String },
    /// No base snapshot was available; every entry counts as changed.
    Unverified,
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChangeKind::Added => write!(f, "added"),
            ChangeKind::VersionChanged { previous } => write!(f, "was {previous}"),
            ChangeKind::Unverified => write!(f, "no base to compare"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangedEntry {
    pub entry: RegistryEntry,
    pub change: ChangeKind,
}

/// Changed entries in the order they appear in the current registry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ChangeSet {
    changes: Vec<ChangedEntry>,
}

impl ChangeSet {
    /// Compare `current` against `base`.
    ///
    /// With no `base` every current entry is returned as
    /// [`ChangeKind::Unverified`], so validation still runs when history is
    /// unavailable.
    pub fn resolve(current: &[RegistryEntry], base: Option<&[RegistryEntry]>) -> Self {
        let Some(base) = base else {
            tracing::warn!(
                entries = current.len(),
                "No base snapshot; treating every entry as changed"
            );
            return Self {
                changes: current
                    .iter()
                    .map(|entry| ChangedEntry {
                        entry: entry.clone(),
                        change: ChangeKind::Unverified,
                    })
                    .collect(),
            };
        };

        let mut by_id: HashMap<&str, &RegistryEntry> = HashMap::with_capacity(base.len());
        for entry in base {
            by_id.entry(entry.id.as_str()).or_insert(entry);
        }

        let changes = current
            .iter()
            .filter_map(|entry| {
                let change = match by_id.get(entry.id.as_str()) {
                    None => ChangeKind::Added,
                    Some(previous) if previous.version == entry.version => return None,
                    Some(previous) => ChangeKind::VersionChanged {
                        previous: previous.version.clone(),
                    },
                };
                tracing::debug!(entry = %entry.id, change = ?change, "Entry changed");
                Some(ChangedEntry {
                    entry: entry.clone(),
                    change,
                })
            })
            .collect();

        Self { changes }
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChangedEntry> {
        self.changes.iter()
    }

    /// The changed entries themselves.
    pub fn entries(&self) -> impl Iterator<Item = &RegistryEntry> {
        self.changes.iter().map(|c| &c.entry)
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }
}

impl IntoIterator for ChangeSet {
    type Item = ChangedEntry;
    type IntoIter = std::vec::IntoIter<ChangedEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.changes.into_iter()
    }
}
