//! Error types for fittrack.

use thiserror::Error;

/// Errors produced by the storage, configuration and command layers.
///
/// The session timer itself never fails; misuse there is a no-op.
#[derive(Debug, Error)]
pub enum FitTrackError {
    /// A database operation failed.
    #[error("database error: {0}")]
    Database(String),

    /// Configuration could not be read, parsed or written.
    #[error("configuration error: {0}")]
    Config(String),

    /// A requested plan, exercise or log entry does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// User input was rejected.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The terminal could not be set up or drawn to.
    #[error("terminal error: {0}")]
    Terminal(String),

    /// Generic I/O failure.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON serialization failed.
    #[error("failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),
}

impl FitTrackError {
    /// Process exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::NotFound(_) => 2,
            Self::InvalidInput(_) => 3,
            _ => 1,
        }
    }
}
