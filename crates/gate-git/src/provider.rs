//! Version-control trait consumed by the validation pipeline

use crate::Result;

/// Read-only view of a version-controlled working copy.
///
/// Every path is relative to the repository root and uses forward slashes.
/// Callers in the pipeline treat any `Err` as "absent"; implementations
/// should still return precise errors so they can be logged.
pub trait VersionControl {
    /// Contents of `path` as of `reference`.
    ///
    /// Returns `Ok(None)` when the reference resolves but the file does not
    /// exist in its tree.
    fn show_file_at_ref(&self, reference: &str, path: &str) -> Result<Option<String>>;

    /// Paths that differ between `base` and the working copy (index included).
    fn diff_names(&self, base: &str) -> Result<Vec<String>>;

    /// Paths that differ between `base` and `head`.
    ///
    /// The comparison starts from the merge base of the two commits, the way a
    /// pull request diff is computed, so changes that landed on `base` after
    /// the branch point are not attributed to `head`.
    fn diff_names_between(&self, base: &str, head: &str) -> Result<Vec<String>>;
}
