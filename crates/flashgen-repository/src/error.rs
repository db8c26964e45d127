//! Error types for the repository layer

use thiserror::Error;

/// Result type alias for repository operations
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Errors that can occur during repository operations
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// I/O error occurred
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Imported content is not a list of decks
    #[error("The file does not look like a deck backup.")]
    NotADeckBackup,

    /// Deck id in the path disagrees with the id in the body
    #[error("Deck id mismatch: expected {expected}, got {actual}")]
    IdMismatch { expected: String, actual: String },
}
