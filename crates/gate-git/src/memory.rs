//! In-memory [`VersionControl`] for dry runs and tests

use std::collections::HashMap;

use crate::provider::VersionControl;
use crate::{Error, Result};

/// A fixed set of refs, files and changed paths.
///
/// A ref is known once any file has been added under it or it was
/// registered with [`MemoryRepository::with_ref`]; every other ref answers
/// [`Error::RefNotFound`], the way an unfetched base branch would.
#[derive(Debug, Default, Clone)]
pub struct MemoryRepository {
    files: HashMap<String, HashMap<String, String>>,
    changed: Vec<String>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an empty ref.
    pub fn with_ref(mut self, reference: &str) -> Self {
        self.files.entry(reference.to_string()).or_default();
        self
    }

    /// Add `content` at `path` under `reference`.
    pub fn with_file(mut self, reference: &str, path: &str, content: &str) -> Self {
        self.files
            .entry(reference.to_string())
            .or_default()
            .insert(path.to_string(), content.to_string());
        self
    }

    /// Paths reported by both diff operations.
    pub fn with_changed_paths<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.changed = paths.into_iter().map(Into::into).collect();
        self
    }

    fn tree(&self, reference: &str) -> Result<&HashMap<String, String>> {
        self.files.get(reference).ok_or_else(|| Error::RefNotFound {
            reference: reference.to_string(),
        })
    }
}

impl VersionControl for MemoryRepository {
    fn show_file_at_ref(&self, reference: &str, path: &str) -> Result<Option<String>> {
        Ok(self.tree(reference)?.get(path).cloned())
    }

    fn diff_names(&self, base: &str) -> Result<Vec<String>> {
        self.tree(base)?;
        Ok(self.changed.clone())
    }

    fn diff_names_between(&self, base: &str, head: &str) -> Result<Vec<String>> {
        self.tree(base)?;
        self.tree(head)?;
        Ok(self.changed.clone())
    }
}
