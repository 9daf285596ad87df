//! CLI error types for structured error handling.
//!
//! This module provides typed errors that map to specific exit codes,
//! enabling consistent error handling across the CLI.

use std::fmt;

use strongbox_core::VaultError;

/// CLI-specific errors with associated exit codes.
#[derive(Debug, Clone)]
pub enum CliError {
    /// Password entry not found
    NotFound { message: String, hint: String },

    /// Authentication failed (wrong passphrase)
    AuthFailed {
        message: String,
        hint: Option<String>,
    },

    /// Invalid user input
    InvalidInput(String),

    /// Stored data failed to decrypt, or a rotation left files behind
    Integrity { message: String, hint: String },
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::NotFound { message, hint } | CliError::Integrity { message, hint } => {
                write!(f, "{}\n{}", message, hint)
            }
            CliError::AuthFailed { message, hint } => {
                if let Some(h) = hint {
                    write!(f, "{}\n{}", message, h)
                } else {
                    write!(f, "{}", message)
                }
            }
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

    /// Create an AuthFailed error with message and hint.
    pub fn auth_failed_with_hint(message: impl Into<String>, hint: impl Into<String>) -> Self {
        CliError::AuthFailed {
            message: message.into(),
            hint: Some(hint.into()),
        }
    }

    /// Create an InvalidInput error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        CliError::InvalidInput(message.into())
    }

    /// Create an Integrity error with message and hint.
    pub fn integrity(message: impl Into<String>, hint: impl Into<String>) -> Self {
        CliError::Integrity {
            message: message.into(),
            hint: hint.into(),
        }
    }

    /// Classify an error bubbling out of a command.
    ///
    /// Returns `None` for environment failures (I/O, prompts) that should
    /// surface as a plain error with exit code 1.
    pub fn classify(err: &anyhow::Error) -> Option<CliError> {
        if let Some(cli_err) = err.downcast_ref::<CliError>() {
            return Some(cli_err.clone());
        }
        match err.downcast_ref::<VaultError>()? {
            VaultError::AuthenticationFailed => Some(CliError::auth_failed_with_hint(
                "Incorrect passphrase.",
                "Hint: The passphrase must match the one this password directory was created with.",
            )),
            VaultError::NotFound(name) => Some(CliError::not_found(
                format!("No such entry: {}", name),
                "Hint: Run `strongbox list` to see stored entries.",
            )),
            VaultError::Format { name, reason } => Some(CliError::integrity(
                format!("Entry {} could not be decrypted: {}", name, reason),
                "Hint: The file may be corrupted or not belong to this password directory.",
            )),
            VaultError::InvalidName(message) => {
                Some(CliError::invalid_input(format!("Invalid entry name: {}", message)))
            }
            VaultError::InvalidInput(message) => Some(CliError::invalid_input(message.clone())),
            VaultError::Crypto(_) | VaultError::Io { .. } => None,
        }
    }

    /// Get the exit code for this error.
    pub fn exit_code(&self) -> i32 {
        use super::constants::exit_codes;
        match self {
            CliError::NotFound { .. } => exit_codes::NOT_FOUND,
            CliError::AuthFailed { .. } => exit_codes::AUTH_FAILED,
            CliError::InvalidInput(_) => exit_codes::INVALID_INPUT,
            CliError::Integrity { .. } => exit_codes::INTEGRITY_FAILED,
        }
    }

    /// Print error message to stderr and exit with appropriate code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);
        std::process::exit(self.exit_code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_errors_map_to_exit_codes() {
        let cases = [
            (VaultError::AuthenticationFailed, 5),
            (VaultError::NotFound("mail".to_string()), 3),
            (VaultError::InvalidName("bad".to_string()), 4),
            (
                VaultError::Format {
                    name: "mail".to_string(),
                    reason: "bad".to_string(),
                },
                6,
            ),
        ];
        for (err, code) in cases {
            let err = anyhow::Error::new(err);
            assert_eq!(CliError::classify(&err).unwrap().exit_code(), code);
        }
    }

    #[test]
    fn test_io_errors_are_not_classified() {
        let err = anyhow::Error::new(VaultError::from(std::io::Error::other("disk full")));
        assert!(CliError::classify(&err).is_none());
    }

    #[test]
    fn test_not_found_names_entry() {
        let err = anyhow::Error::new(VaultError::NotFound("mail".to_string()));
        let message = CliError::classify(&err).unwrap().to_string();
        assert!(message.contains("No such entry: mail"));
    }
}
