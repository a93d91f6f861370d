//! Constants used throughout the CLI.

/// Exit codes for the CLI.
///
/// These follow common Unix conventions:
/// - 0: Success
/// - 1: General error (used by anyhow for unhandled errors)
/// - 2: Misuse of shell command (reserved by shells)
/// - 3+: Application-specific errors
pub mod exit_codes {
    /// General failure.
    pub const FAILURE: i32 = 1;

    /// Resource not found (journal, user, entry).
    pub const NOT_FOUND: i32 = 3;

    /// Invalid user input or arguments.
    pub const INVALID_INPUT: i32 = 4;

    /// Authentication failed (wrong PIN, too many attempts).
    pub const AUTH_FAILED: i32 = 5;

    /// Integrity check failed.
    pub const INTEGRITY_FAILED: i32 = 6;
}

/// Environment variable holding the PIN for non-interactive use.
pub const PIN_ENV: &str = "JOURNAL_PIN";

/// Environment variable holding the replacement PIN for `change-pin`.
pub const NEW_PIN_ENV: &str = "JOURNAL_NEW_PIN";

/// Environment variable overriding the config file location.
pub const CONFIG_ENV: &str = "JOURNAL_CONFIG";

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "JOURNAL_LOG";
