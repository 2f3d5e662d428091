//! Storage error types

use thiserror::Error;

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors raised by the record store
#[derive(Debug, Error)]
pub enum StorageError {
    /// SQLite reported a failure
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A foreign key or NOT NULL constraint rejected the write
    #[error("constraint violated: {0}")]
    Constraint(String),

    /// A migration could not be applied
    #[error("migration {version} ({name}) failed: {reason}")]
    Migration {
        version: u32,
        name: &'static str,
        reason: String,
    },

    /// The connection mutex was poisoned by a panicking writer
    #[error("storage lock poisoned")]
    LockPoisoned,
}

impl StorageError {
    /// Splits constraint violations out of generic SQLite errors.
    pub(crate) fn classify(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(code, msg)
                if code.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                StorageError::Constraint(msg.clone().unwrap_or_else(|| code.to_string()))
            }
            _ => StorageError::Database(err),
        }
    }
}
