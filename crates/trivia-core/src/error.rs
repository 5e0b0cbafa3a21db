//! Error types for trivia-core

use thiserror::Error;

/// Result type alias for trivia operations
pub type Result<T> = std::result::Result<T, TriviaError>;

/// Main error type for trivia operations
#[derive(Error, Debug)]
pub enum TriviaError {
    /// Malformed request
    #[error("Validation error: {0}")]
    Validation(String),

    /// Referenced entity is absent
    #[error("Not found: {0}")]
    NotFound(String),

    /// Store rejected a read or mutation
    #[error("Persistence error: {0}")]
    Persistence(#[from] PersistenceError),

    /// Anything else
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Persistence-specific errors
#[derive(Error, Debug)]
pub enum PersistenceError {
    /// Database error, including constraint violations
    #[error("Database error: {0}")]
    Database(String),

    /// Migration error
    #[error("Migration error: {0}")]
    Migration(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(String),
}

impl From<rusqlite::Error> for PersistenceError {
    fn from(err: rusqlite::Error) -> Self {
        PersistenceError::Database(err.to_string())
    }
}

impl From<std::io::Error> for PersistenceError {
    fn from(err: std::io::Error) -> Self {
        PersistenceError::Io(err.to_string())
    }
}

impl From<rusqlite::Error> for TriviaError {
    fn from(err: rusqlite::Error) -> Self {
        TriviaError::Persistence(PersistenceError::from(err))
    }
}
