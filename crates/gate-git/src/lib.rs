//! Version-control access for registry-gate
//!
//! The pipeline only needs two read primitives from git: the contents of a
//! file at a reference, and the list of paths changed against a base. Both
//! live behind [`VersionControl`] so the core can be driven by fakes.

pub mod error;
pub mod memory;
pub mod provider;
pub mod repository;

pub use error::{Error, Result};
pub use memory::MemoryRepository;
pub use provider::VersionControl;
pub use repository::GitRepository;
