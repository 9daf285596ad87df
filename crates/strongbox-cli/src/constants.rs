//! Constants used throughout the CLI.

/// Exit codes for the CLI.
///
/// These follow common Unix conventions:
/// - 0: Success
/// - 1: General error (used by anyhow for unhandled errors)
/// - 2: Misuse of shell command (reserved by shells, used by clap)
/// - 3+: Application-specific errors
pub mod exit_codes {
    /// Resource not found (password entry).
    pub const NOT_FOUND: i32 = 3;

    /// Invalid user input or arguments.
    pub const INVALID_INPUT: i32 = 4;

    /// Authentication failed (passphrase does not match the directory token).
    pub const AUTH_FAILED: i32 = 5;

    /// A stored file failed to decrypt, or rotation did not complete.
    pub const INTEGRITY_FAILED: i32 = 6;
}

/// Environment variable holding the passphrase for non-interactive use.
pub const PASSPHRASE_ENV: &str = "STRONGBOX_PASSPHRASE";

/// Environment variable holding the replacement passphrase for `rotate`.
pub const NEW_PASSPHRASE_ENV: &str = "STRONGBOX_NEW_PASSPHRASE";

/// Environment variable overriding the config file location.
pub const CONFIG_ENV: &str = "STRONGBOX_CONFIG";

/// Environment variable holding a tracing filter directive.
pub const LOG_ENV: &str = "STRONGBOX_LOG";
