//! Error types for gate-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that stop a command before it reaches a verdict
///
/// Every one of these exits with status 2; failing checks are not errors
/// and exit with status 1.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from gate-core
    #[error(transparent)]
    Core(#[from] gate_core::Error),

    /// Error from gate-meta
    #[error(transparent)]
    Meta(#[from] gate_meta::Error),

    /// Error from gate-git
    #[error(transparent)]
    Git(#[from] gate_git::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON output error
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// User-facing error with a message
    #[error("{message}")]
    User { message: String },
}

impl CliError {
    /// Create a new user error with the given message
    pub fn user(message: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
        }
    }
}
