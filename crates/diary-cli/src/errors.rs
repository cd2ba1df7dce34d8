//! CLI error types for structured error handling.
//!
//! Typed errors map to specific exit codes. Core errors are classified here so
//! command handlers can simply propagate them with `?`.

use std::fmt;

use diary_core::DiaryError;

use crate::constants::exit_codes;

/// CLI-specific errors with associated exit codes.
#[derive(Debug)]
pub enum CliError {
    /// Entry or template not found
    NotFound { message: String, hint: String },

    /// Entry already exists
    AlreadyExists { message: String, hint: String },

    /// Decryption failed: wrong password or corrupted entry
    IntegrityFailed { message: String },

    /// Invalid user input
    InvalidInput(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::NotFound { message, hint } | CliError::AlreadyExists { message, hint } => {
                write!(f, "{}\n{}", message, hint)
            }
            CliError::IntegrityFailed { message } => write!(f, "{}", message),
            CliError::InvalidInput(message) => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for CliError {}

impl CliError {
    /// Create a NotFound error with message and hint.
    pub fn not_found(message: impl Into<String>, hint: impl Into<String>) -> Self {
        CliError::NotFound {
            message: message.into(),
            hint: hint.into(),
        }
    }

    /// Create an AlreadyExists error with message and hint.
    pub fn already_exists(message: impl Into<String>, hint: impl Into<String>) -> Self {
        CliError::AlreadyExists {
            message: message.into(),
            hint: hint.into(),
        }
    }

    /// Create an InvalidInput error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        CliError::InvalidInput(message.into())
    }

    /// Get the exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::NotFound { .. } => exit_codes::NOT_FOUND,
            CliError::AlreadyExists { .. } => exit_codes::ALREADY_EXISTS,
            CliError::IntegrityFailed { .. } => exit_codes::INTEGRITY_FAILED,
            CliError::InvalidInput(_) => exit_codes::INVALID_INPUT,
        }
    }
}

impl From<DiaryError> for CliError {
    fn from(err: DiaryError) -> Self {
        match err {
            DiaryError::NotFound(path) => CliError::not_found(
                format!("Entry not found: {}", path.display()),
                "Hint: Run `diary list` to see entries and their offsets.",
            ),
            DiaryError::AlreadyExists(path) => CliError::already_exists(
                format!("Diary entry already exists: {}", path.display()),
                "Hint: Entries cannot be overwritten; pick another name with --name.",
            ),
            DiaryError::Integrity => CliError::IntegrityFailed {
                message: DiaryError::Integrity.to_string(),
            },
            DiaryError::InvalidIdentifier(message) | DiaryError::InvalidInput(message) => {
                CliError::InvalidInput(message)
            }
            other => CliError::InvalidInput(other.to_string()),
        }
    }
}

/// Attach CLI hints to the core errors that have one.
pub fn with_hints(err: anyhow::Error) -> anyhow::Error {
    match err.downcast::<DiaryError>() {
        Ok(core @ (DiaryError::NotFound(_) | DiaryError::AlreadyExists(_))) => {
            CliError::from(core).into()
        }
        Ok(core) => core.into(),
        Err(err) => err,
    }
}

/// Exit code for an error bubbled up to `main`.
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    if let Some(cli_err) = err.downcast_ref::<CliError>() {
        return cli_err.exit_code();
    }
    match err.downcast_ref::<DiaryError>() {
        Some(DiaryError::NotFound(_)) => exit_codes::NOT_FOUND,
        Some(DiaryError::AlreadyExists(_)) => exit_codes::ALREADY_EXISTS,
        Some(DiaryError::Integrity) => exit_codes::INTEGRITY_FAILED,
        Some(DiaryError::InvalidIdentifier(_)) | Some(DiaryError::InvalidInput(_)) => {
            exit_codes::INVALID_INPUT
        }
        _ => exit_codes::GENERAL,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_core_errors_map_to_exit_codes() {
        let cases = [
            (DiaryError::NotFound(PathBuf::from("x.txt")), exit_codes::NOT_FOUND),
            (
                DiaryError::AlreadyExists(PathBuf::from("x.txt")),
                exit_codes::ALREADY_EXISTS,
            ),
            (DiaryError::Integrity, exit_codes::INTEGRITY_FAILED),
            (
                DiaryError::InvalidIdentifier("bad".to_string()),
                exit_codes::INVALID_INPUT,
            ),
        ];
        for (err, code) in cases {
            assert_eq!(CliError::from(err).exit_code(), code);
        }
    }

    #[test]
    fn test_exit_code_for_anyhow_errors() {
        let wrapped = anyhow::Error::new(CliError::from(DiaryError::Integrity));
        assert_eq!(exit_code_for(&wrapped), exit_codes::INTEGRITY_FAILED);

        let raw = anyhow::Error::new(DiaryError::NotFound(PathBuf::from("x.txt")));
        assert_eq!(exit_code_for(&raw), exit_codes::NOT_FOUND);

        let other = anyhow::anyhow!("something else");
        assert_eq!(exit_code_for(&other), exit_codes::GENERAL);
    }

    #[test]
    fn test_with_hints_keeps_exit_code() {
        let err = with_hints(anyhow::Error::new(DiaryError::AlreadyExists(PathBuf::from(
            "/d/2024-01-01.txt",
        ))));
        assert_eq!(exit_code_for(&err), exit_codes::ALREADY_EXISTS);
        assert!(err.to_string().contains("Hint:"));

        let err = with_hints(anyhow::Error::new(DiaryError::Integrity));
        assert_eq!(exit_code_for(&err), exit_codes::INTEGRITY_FAILED);
    }

    #[test]
    fn test_not_found_message_has_hint() {
        let err = CliError::from(DiaryError::NotFound(PathBuf::from("/d/ghost.txt")));
        let message = err.to_string();
        assert!(message.contains("/d/ghost.txt"));
        assert!(message.contains("diary list"));
    }
}
