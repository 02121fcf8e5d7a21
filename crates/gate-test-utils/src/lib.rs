//! Shared test utilities for the registry-gate workspace.
//!
//! This crate provides git fixtures and a registry-repository builder so the
//! crate test suites do not each reinvent them. It is a dev-dependency only.
//!
//! # Modules
//!
//! - [`git`] - git repository fixtures driven through the `git` CLI
//! - [`repo`] - [`TestRepo`](repo::TestRepo) builder for registry scenarios

pub mod git;
pub mod repo;
