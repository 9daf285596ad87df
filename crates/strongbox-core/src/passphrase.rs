//! Passphrase validation.
//!
//! The store only refuses passphrases that carry no secret at all. Short
//! passphrases are accepted but flagged so a front end can warn about them.

use crate::error::{Result, VaultError};

/// Passphrases shorter than this are reported by [`is_weak_passphrase`].
pub const RECOMMENDED_PASSPHRASE_LENGTH: usize = 8;

/// Validate that a passphrase is usable.
///
/// # Examples
///
/// ```
/// use strongbox_core::passphrase::validate_passphrase;
///
/// assert!(validate_passphrase("hunter2").is_ok());
/// assert!(validate_passphrase("   ").is_err());
/// ```
pub fn validate_passphrase(passphrase: &str) -> Result<()> {
    if passphrase.trim().is_empty() {
        return Err(VaultError::InvalidInput(
            "Passphrase cannot be empty".to_string(),
        ));
    }
    Ok(())
}

/// Whether a passphrase is below the recommended length.
pub fn is_weak_passphrase(passphrase: &str) -> bool {
    passphrase.chars().count() < RECOMMENDED_PASSPHRASE_LENGTH
}
