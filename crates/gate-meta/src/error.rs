//! Error types for gate-meta

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {format} config at {path}: {message}")]
    ConfigParse {
        path: PathBuf,
        format: String,
        message: String,
    },

    #[error("Unsupported config format: {extension}")]
    UnsupportedFormat { extension: String },

    #[error("Invalid {kind} registry: {message}")]
    RegistryParse { kind: String, message: String },

    #[error("Invalid repository reference '{input}': {reason}")]
    InvalidRepoRef { input: String, reason: String },

    #[error("Unknown registry kind: {kind} (expected 'plugins' or 'themes')")]
    InvalidKind { kind: String },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
