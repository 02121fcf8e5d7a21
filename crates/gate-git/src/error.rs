//! Error types for gate-git

use std::path::PathBuf;

/// Result type for gate-git operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in gate-git operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Git error: {0}")]
    Git(#[from] git2::Error),

    #[error("Not a git repository: {path}")]
    NotARepository { path: PathBuf },

    #[error("Reference '{reference}' not found")]
    RefNotFound { reference: String },

    #[error("File '{path}' at '{reference}' is not valid UTF-8")]
    NotUtf8 { reference: String, path: String },
}
