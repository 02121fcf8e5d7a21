//! git2-backed implementation of [`VersionControl`]

use std::path::Path;

use git2::{Diff, DiffOptions, ErrorCode, Repository, Tree};

use crate::provider::VersionControl;
use crate::{Error, Result};

/// A git working copy opened at an explicit root path.
///
/// Nothing here consults or changes the process working directory; every
/// lookup goes through the root handed to [`GitRepository::open`].
pub struct GitRepository {
    repo: Repository,
}

impl GitRepository {
    /// Open the repository whose working tree is `root`.
    pub fn open(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref();
        let repo = Repository::open(root).map_err(|e| match e.code() {
            ErrorCode::NotFound => Error::NotARepository {
                path: root.to_path_buf(),
            },
            _ => Error::Git(e),
        })?;
        Ok(Self { repo })
    }

    fn resolve(&self, reference: &str) -> Result<git2::Object<'_>> {
        self.repo
            .revparse_single(reference)
            .map_err(|e| match e.code() {
                ErrorCode::NotFound | ErrorCode::InvalidSpec | ErrorCode::Ambiguous => {
                    Error::RefNotFound {
                        reference: reference.to_string(),
                    }
                }
                _ => Error::Git(e),
            })
    }

    fn tree_at(&self, reference: &str) -> Result<Tree<'_>> {
        Ok(self.resolve(reference)?.peel_to_tree()?)
    }
}

impl VersionControl for GitRepository {
    fn show_file_at_ref(&self, reference: &str, path: &str) -> Result<Option<String>> {
        let tree = self.tree_at(reference)?;

        let entry = match tree.get_path(Path::new(path)) {
            Ok(entry) => entry,
            Err(e) if e.code() == ErrorCode::NotFound => {
                tracing::debug!(reference = %reference, path = %path, "File absent at reference");
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        let blob = self.repo.find_blob(entry.id())?;
        let text = String::from_utf8(blob.content().to_vec()).map_err(|_| Error::NotUtf8 {
            reference: reference.to_string(),
            path: path.to_string(),
        })?;

        Ok(Some(text))
    }

    fn diff_names(&self, base: &str) -> Result<Vec<String>> {
        let tree = self.tree_at(base)?;

        let mut opts = DiffOptions::new();
        opts.include_untracked(true).recurse_untracked_dirs(true);

        let diff = self
            .repo
            .diff_tree_to_workdir_with_index(Some(&tree), Some(&mut opts))?;

        Ok(changed_paths(&diff))
    }

    fn diff_names_between(&self, base: &str, head: &str) -> Result<Vec<String>> {
        let base_commit = self.resolve(base)?.peel_to_commit()?;
        let head_commit = self.resolve(head)?.peel_to_commit()?;

        // Unrelated histories have no merge base; compare the tips directly.
        let from = match self.repo.merge_base(base_commit.id(), head_commit.id()) {
            Ok(oid) => self.repo.find_commit(oid)?,
            Err(e) => {
                tracing::debug!(
                    base = %base,
                    head = %head,
                    error = %e,
                    "No merge base, diffing tips"
                );
                base_commit
            }
        };

        let from_tree = from.tree()?;
        let head_tree = head_commit.tree()?;
        let diff = self
            .repo
            .diff_tree_to_tree(Some(&from_tree), Some(&head_tree), None)?;

        Ok(changed_paths(&diff))
    }
}

/// Collect each delta's path once, in diff order, with forward slashes.
fn changed_paths(diff: &Diff<'_>) -> Vec<String> {
    let mut paths: Vec<String> = Vec::new();

    for delta in diff.deltas() {
        let Some(path) = delta.new_file().path().or_else(|| delta.old_file().path()) else {
            continue;
        };
        let path = path.to_string_lossy().replace('\\', "/");
        if !paths.contains(&path) {
            paths.push(path);
        }
    }

    paths
}
