//! Validation error type
//!
//! A `ValidationError` names the rejected field and carries a
//! human-readable reason. The HTTP layer never exposes the reason; it is
//! kept for logs and tests.

use thiserror::Error;

/// Result type for validated writes
pub type ValidationResult<T> = Result<T, ValidationError>;

/// A guarded field rejected the value it was given
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("field '{field}': {message}")]
pub struct ValidationError {
    field: &'static str,
    message: String,
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }

    /// A reference column points at a row that does not exist
    pub fn missing_reference(field: &'static str, id: i64) -> Self {
        Self::new(field, format!("no record with id {} exists", id))
    }

    /// Returns the rejected field name
    pub fn field(&self) -> &'static str {
        self.field
    }

    /// Returns the reason the value was rejected
    pub fn message(&self) -> &str {
        &self.message
    }
}
