//! Error types for Diary core operations.
//!
//! Errors are descriptive at the core level; the CLI layer maps them to
//! user-facing messages and exit codes.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for Diary operations.
pub type Result<T> = std::result::Result<T, DiaryError>;

/// Core error type for Diary operations.
#[derive(Debug, Error)]
pub enum DiaryError {
    /// Write target already exists; entries are never overwritten
    #[error("Diary entry already exists: {}", .0.display())]
    AlreadyExists(PathBuf),

    /// Read target absent both as given and under the diary directory
    #[error("Entry not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Token failed authentication or is malformed.
    ///
    /// Wrong password, corruption and tampering all surface as this variant
    /// with the same message.
    #[error("Entry failed integrity check (wrong password or corrupted data)")]
    Integrity,

    /// Identifier could not be turned into a usable filename
    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),

    /// Invalid parameters (e.g. zero KDF iterations)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Cryptographic primitive failure (RNG, key setup)
    #[error("Encryption error: {0}")]
    Crypto(String),

    /// I/O error
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integrity_message_does_not_leak_cause() {
        let message = DiaryError::Integrity.to_string();
        assert!(message.contains("wrong password or corrupted data"));
    }

    #[test]
    fn test_io_error_converts() {
        let err: DiaryError = std::io::Error::new(std::io::ErrorKind::Other, "disk gone").into();
        assert!(matches!(err, DiaryError::Io { .. }));
        assert!(err.to_string().contains("disk gone"));
    }
}
