//! Registry-change validation pipeline.
//!
//! Leaves first:
//!
//! - [`snapshot`] reads a registry file from the working copy and the base
//! - [`changeset`] isolates the entries a change actually touched
//! - [`locator`] finds the release that carries an entry's assets
//! - [`release`] cross-checks a release against its registry entry
//! - [`classify`] buckets changed paths by registry
//! - [`pipeline`] sequences everything and folds the verdict
//!
//! The remaining modules are the collaborators the pipeline talks to:
//! [`http`], [`format`], [`scan`] and [`labels`].

pub mod changeset;
pub mod classify;
pub mod error;
pub mod format;
pub mod http;
pub mod labels;
pub mod locator;
pub mod pipeline;
pub mod release;
pub mod scan;
pub mod snapshot;

pub use changeset::{ChangeKind, ChangeSet, ChangedEntry};
pub use classify::ChangeClassification;
pub use error::{Error, Result};
pub use format::{FormatCheck, LintFormatCheck};
pub use http::{HttpProbe, MemoryProbe, ReqwestProbe};
pub use labels::{CommandLabeler, LabelPlan, Labeler};
pub use locator::{AssetLocation, ReleaseAssetLocator, candidate_tags};
pub use pipeline::{EntryReport, Outcome, Pipeline, PipelineReport};
pub use release::ReleaseValidator;
pub use scan::{CommandScanner, ContentScanner};
pub use snapshot::{RegistrySnapshot, Revision};
