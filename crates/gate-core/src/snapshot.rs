//! Registry contents at the two points a change is judged between

use std::path::{Path, PathBuf};

use gate_git::VersionControl;
use gate_meta::{Registry, RegistryKind};

use crate::changeset::ChangeSet;
use crate::{Error, Result};

/// Where the proposed registry contents are read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Revision {
    /// The checked-out files under the repository root.
    WorkingTree,
    /// A committed reference, read through version control.
    Ref(String),
}

impl Revision {
    pub fn from_option(reference: Option<&str>) -> Self {
        match reference {
            Some(r) => Revision::Ref(r.to_string()),
            None => Revision::WorkingTree,
        }
    }

    /// Read `file` (relative to `root`) as of this revision.
    pub fn read(&self, root: &Path, vcs: &dyn VersionControl, file: &str) -> Result<String> {
        match self {
            Revision::WorkingTree => {
                let path: PathBuf = root.join(file);
                std::fs::read_to_string(&path).map_err(|e| Error::io(path, e))
            }
            Revision::Ref(reference) => vcs
                .show_file_at_ref(reference, file)?
                .ok_or_else(|| Error::Parse {
                    what: file.to_string(),
                    message: format!("file does not exist at '{reference}'"),
                }),
        }
    }
}

/// A registry as proposed, paired with the same registry on the base.
#[derive(Debug, Clone)]
pub struct RegistrySnapshot {
    pub current: Registry,
    /// `None` when the base could not be read, did not contain the file, or
    /// did not parse.
    pub base: Option<Registry>,
}

impl RegistrySnapshot {
    /// Pair already-parsed current contents with the base copy of `file`.
    pub fn with_base(
        current: Registry,
        vcs: &dyn VersionControl,
        base_ref: &str,
        file: &str,
    ) -> Self {
        let base = load_base(vcs, current.kind(), base_ref, file);
        Self { current, base }
    }

    /// Read and parse both sides.
    pub fn load(
        root: &Path,
        vcs: &dyn VersionControl,
        kind: RegistryKind,
        file: &str,
        base_ref: &str,
        head: &Revision,
    ) -> Result<Self> {
        let content = head.read(root, vcs, file)?;
        let current = Registry::parse(kind, &content)?;
        Ok(Self::with_base(current, vcs, base_ref, file))
    }

    /// Entries that are new or re-versioned relative to the base.
    pub fn changes(&self) -> ChangeSet {
        ChangeSet::resolve(
            self.current.entries(),
            self.base.as_ref().map(|b| b.entries()),
        )
    }
}

/// Read the base copy, degrading every failure to `None`.
fn load_base(
    vcs: &dyn VersionControl,
    kind: RegistryKind,
    base_ref: &str,
    file: &str,
) -> Option<Registry> {
    let content = match vcs.show_file_at_ref(base_ref, file) {
        Ok(Some(content)) => content,
        Ok(None) => {
            tracing::info!(reference = %base_ref, file = %file, "Registry absent on base");
            return None;
        }
        Err(e) => {
            let error = Error::ReferenceUnavailable {
                reference: base_ref.to_string(),
                message: e.to_string(),
            };
            tracing::warn!("{error}; treating every entry as changed");
            return None;
        }
    };

    match Registry::parse(kind, &content) {
        Ok(registry) => Some(registry),
        Err(e) => {
            tracing::warn!(reference = %base_ref, error = %e, "Base registry unreadable");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gate_git::MemoryRepository;
    use tempfile::TempDir;

    const BASE: &str = r#"[{"id": "foo", "version": "1.0"}]"#;
    const HEAD: &str = r#"[{"id": "foo", "version": "1.0"}, {"id": "bar", "version": "2.0"}]"#;

    #[test]
    fn test_load_from_refs() {
        let vcs = MemoryRepository::new()
            .with_file("main", "plugins.json", BASE)
            .with_file("head", "plugins.json", HEAD);

        let snapshot = RegistrySnapshot::load(
            Path::new("/unused"),
            &vcs,
            RegistryKind::Plugins,
            "plugins.json",
            "main",
            &Revision::Ref("head".to_string()),
        )
        .unwrap();

        let ids: Vec<_> = snapshot.changes().entries().map(|e| e.id.clone()).collect();
        assert_eq!(ids, vec!["bar"]);
    }

    #[test]
    fn test_load_from_working_tree() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("plugins.json"), HEAD).unwrap();
        let vcs = MemoryRepository::new().with_file("main", "plugins.json", BASE);

        let snapshot = RegistrySnapshot::load(
            temp.path(),
            &vcs,
            RegistryKind::Plugins,
            "plugins.json",
            "main",
            &Revision::WorkingTree,
        )
        .unwrap();

        assert_eq!(snapshot.current.len(), 2);
        assert_eq!(snapshot.changes().len(), 1);
    }

    #[test]
    fn test_unavailable_base_fails_open() {
        let vcs = MemoryRepository::new().with_file("head", "plugins.json", HEAD);

        let snapshot = RegistrySnapshot::load(
            Path::new("/unused"),
            &vcs,
            RegistryKind::Plugins,
            "plugins.json",
            "origin/main",
            &Revision::Ref("head".to_string()),
        )
        .unwrap();

        assert!(snapshot.base.is_none());
        assert_eq!(snapshot.changes().len(), 2);
    }

    #[test]
    fn test_unparsable_base_fails_open() {
        let vcs = MemoryRepository::new()
            .with_file("main", "plugins.json", "not json")
            .with_file("head", "plugins.json", HEAD);

        let snapshot = RegistrySnapshot::load(
            Path::new("/unused"),
            &vcs,
            RegistryKind::Plugins,
            "plugins.json",
            "main",
            &Revision::Ref("head".to_string()),
        )
        .unwrap();

        assert!(snapshot.base.is_none());
        assert_eq!(snapshot.changes().len(), 2);
    }

    #[test]
    fn test_missing_current_file_is_error() {
        let temp = TempDir::new().unwrap();
        let vcs = MemoryRepository::new().with_ref("main");

        let result = RegistrySnapshot::load(
            temp.path(),
            &vcs,
            RegistryKind::Themes,
            "themes.json",
            "main",
            &Revision::WorkingTree,
        );

        assert!(matches!(result, Err(Error::Io { .. })));
    }
}
