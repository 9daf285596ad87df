//! Error types for Strongbox core operations.
//!
//! Authentication and not-found failures are ordinary, retryable outcomes;
//! the CLI layer maps each variant to a user-facing message and exit code.

use thiserror::Error;

/// Result type alias for Strongbox operations.
pub type Result<T> = std::result::Result<T, VaultError>;

/// Core error type for Strongbox operations.
#[derive(Debug, Error)]
pub enum VaultError {
    /// Supplied passphrase does not decrypt the directory's token file
    #[error("Provided passphrase does not match stored token")]
    AuthenticationFailed,

    /// Requested entry or file does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// File failed to decrypt or parse (wrong passphrase, corrupt or foreign file)
    #[error("Cannot decrypt {name}: {reason}")]
    Format { name: String, reason: String },

    /// Entry name is not usable as a password file name
    #[error("Invalid entry name: {0}")]
    InvalidName(String),

    /// Invalid user input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Random source or encryptor failure
    #[error("Encryption error: {0}")]
    Crypto(String),

    /// I/O error
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl VaultError {
    pub(crate) fn format(name: impl Into<String>, reason: impl ToString) -> Self {
        VaultError::Format {
            name: name.into(),
            reason: reason.to_string(),
        }
    }
}
