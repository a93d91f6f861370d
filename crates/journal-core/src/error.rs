//! Error types for Journal core operations.
//!
//! Errors are descriptive at the core level; the CLI layer maps these
//! to user-friendly messages and exit codes.

use thiserror::Error;

/// Result type alias for Journal operations.
pub type Result<T> = std::result::Result<T, JournalError>;

/// Core error type for Journal operations.
#[derive(Debug, Error)]
pub enum JournalError {
    /// Storage backend error (SQLite, file I/O)
    #[error("Storage error: {0}")]
    Storage(String),

    /// Unknown table/column or unsupported database layout
    #[error("Schema error: {0}")]
    Schema(String),

    /// Registration or PIN input rejected before any write
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Gate operation attempted in the wrong state
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Entries requested before the PIN was accepted
    #[error("Journal is locked; enter the PIN first")]
    Locked,

    /// Registration was abandoned; the application must not continue
    #[error("Registration was cancelled")]
    RegistrationAbandoned,

    /// PIN hashing error
    #[error("Crypto error: {0}")]
    Crypto(String),
}

/// Input problems surfaced to the user during registration or PIN changes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Name cannot be empty")]
    EmptyName,

    #[error("PIN must be at least {min} characters")]
    PinTooShort { min: usize },

    #[error("PINs do not match")]
    PinMismatch,

    #[error("User \"{0}\" already exists")]
    DuplicateUser(String),
}

impl From<std::io::Error> for JournalError {
    fn from(err: std::io::Error) -> Self {
        JournalError::Storage(err.to_string())
    }
}

impl From<rusqlite::Error> for JournalError {
    fn from(err: rusqlite::Error) -> Self {
        JournalError::Storage(err.to_string())
    }
}

impl From<argon2::password_hash::Error> for JournalError {
    fn from(err: argon2::password_hash::Error) -> Self {
        JournalError::Crypto(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_messages() {
        let err: JournalError = ValidationError::PinTooShort { min: 4 }.into();
        assert_eq!(err.to_string(), "PIN must be at least 4 characters");

        let err: JournalError = ValidationError::DuplicateUser("amy".to_string()).into();
        assert!(err.to_string().contains("\"amy\""));
    }

    #[test]
    fn test_io_error_maps_to_storage() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: JournalError = io.into();
        assert!(matches!(err, JournalError::Storage(_)));
    }
}
