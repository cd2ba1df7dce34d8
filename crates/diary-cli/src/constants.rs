//! Constants used throughout the CLI.

/// Exit codes for the CLI.
///
/// These follow common Unix conventions:
/// - 0: Success
/// - 1: General error (used by anyhow for unhandled errors)
/// - 2: Misuse of shell command (reserved by shells, and clap usage errors)
/// - 3+: Application-specific errors
pub mod exit_codes {
    /// General failure.
    pub const GENERAL: i32 = 1;

    /// Entry (or explicitly named template) not found.
    pub const NOT_FOUND: i32 = 3;

    /// Invalid user input or arguments.
    pub const INVALID_INPUT: i32 = 4;

    /// Integrity check failed (wrong password or corrupted entry).
    pub const INTEGRITY_FAILED: i32 = 6;

    /// Entry already exists.
    pub const ALREADY_EXISTS: i32 = 7;
}

/// Password environment variable, for scripted use.
pub const PASSWORD_ENV: &str = "DIARY_PASSWORD";

/// Template looked up in the working directory when none is configured.
pub const DEFAULT_TEMPLATE: &str = "template.txt";

/// Editor used when nothing else is configured.
pub const FALLBACK_EDITOR: &str = "vi";
