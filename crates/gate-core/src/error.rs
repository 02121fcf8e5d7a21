//! Error types for gate-core
//!
//! Everything here except [`Error::PolicyViolation`] is recovered by the
//! owning check into a failing diagnostic; none of them abort a run.

use std::path::PathBuf;

/// Result type for gate-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while validating a registry change
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Git(#[from] gate_git::Error),

    #[error(transparent)]
    Meta(#[from] gate_meta::Error),

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A document could not be read as what it claims to be.
    #[error("Could not parse {what}: {message}")]
    Parse { what: String, message: String },

    /// A remote asset is absent under every candidate tag.
    #[error("{asset} not found in any release of {repo} (tried tags: {})", .tried.join(", "))]
    NotFound {
        asset: String,
        repo: String,
        tried: Vec<String>,
    },

    /// A release manifest disagrees with its registry entry.
    #[error("manifest {field} '{manifest}' does not match registry {field} '{registry}'")]
    Mismatch {
        field: String,
        registry: String,
        manifest: String,
    },

    /// A change breaks a repository rule; the run stops here.
    #[error("{message}")]
    PolicyViolation { message: String },

    /// The base reference could not be read.
    #[error("Base reference '{reference}' unavailable: {message}")]
    ReferenceUnavailable { reference: String, message: String },

    #[error("HTTP client error: {message}")]
    Http { message: String },

    #[error("Labeling failed: {message}")]
    Label { message: String },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_lists_tried_tags() {
        let err = Error::NotFound {
            asset: "main.js".to_string(),
            repo: "owner/repo".to_string(),
            tried: vec!["1.0".to_string(), "v1.0".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "main.js not found in any release of owner/repo (tried tags: 1.0, v1.0)"
        );
    }

    #[test]
    fn test_mismatch_display() {
        let err = Error::Mismatch {
            field: "version".to_string(),
            registry: "3.0".to_string(),
            manifest: "3.0.1".to_string(),
        };
        assert!(err.to_string().contains("manifest version '3.0.1'"));
    }
}
