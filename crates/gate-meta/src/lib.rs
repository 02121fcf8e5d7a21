//! Registry data model and configuration for registry-gate.
//!
//! This crate holds the types every other crate speaks: registry entries and
//! their kinds, parsed repository references, validation verdicts, the
//! workspace configuration, and the built-in registry format check.

pub mod config;
pub mod error;
pub mod lint;
pub mod registry;
pub mod repo_ref;
pub mod verdict;

pub use config::{ConfigStore, GateConfig, MatchMode};
pub use error::{Error, Result};
pub use registry::{
    DEFAULT_THEME_MODES, Registry, RegistryEntry, RegistryKind, RejectedEntry, ThemeMode,
};
pub use repo_ref::RepoRef;
pub use verdict::{Diagnostic, Level, ValidationVerdict};
