//! Entry name validation.
//!
//! An entry name doubles as its file name inside the password directory, so
//! it must stay a single, visible path component. Names starting with `.`
//! are reserved: the token file and staged temp files live there, and any
//! other hidden file is treated as foreign.

use crate::error::{Result, VaultError};

/// Longest accepted entry name in bytes (a common filesystem limit).
pub const MAX_NAME_BYTES: usize = 255;

/// Validate an entry name.
///
/// # Examples
///
/// ```
/// use strongbox_core::name::validate_entry_name;
///
/// assert!(validate_entry_name("mail").is_ok());
/// assert!(validate_entry_name("../etc/passwd").is_err());
/// assert!(validate_entry_name(".token").is_err());
/// ```
pub fn validate_entry_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(VaultError::InvalidName("name cannot be empty".to_string()));
    }
    if name.len() > MAX_NAME_BYTES {
        return Err(VaultError::InvalidName(format!(
            "name is longer than {} bytes",
            MAX_NAME_BYTES
        )));
    }
    if name.starts_with('.') {
        return Err(VaultError::InvalidName(format!(
            "{:?} starts with '.', which is reserved",
            name
        )));
    }
    if let Some(c) = name
        .chars()
        .find(|c| matches!(c, '/' | '\\') || c.is_control())
    {
        return Err(VaultError::InvalidName(format!(
            "{:?} contains forbidden character {:?}",
            name, c
        )));
    }
    Ok(())
}

/// Whether a directory entry name is a password entry.
pub fn is_entry_name(name: &str) -> bool {
    validate_entry_name(name).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_account_names() {
        for name in ["mail", "google", "bank account", "work@example.com", "a"] {
            assert!(validate_entry_name(name).is_ok(), "{} rejected", name);
        }
    }

    #[test]
    fn test_rejects_reserved_and_hidden() {
        assert!(validate_entry_name(".token").is_err());
        assert!(validate_entry_name(".").is_err());
        assert!(validate_entry_name("..").is_err());
        assert!(validate_entry_name(".bashrc").is_err());
    }

    #[test]
    fn test_rejects_path_traversal() {
        assert!(validate_entry_name("../secret").is_err());
        assert!(validate_entry_name("a/b").is_err());
        assert!(validate_entry_name("a\\b").is_err());
    }

    #[test]
    fn test_rejects_empty_control_and_long() {
        assert!(validate_entry_name("").is_err());
        assert!(validate_entry_name("tab\there").is_err());
        assert!(validate_entry_name("nul\0").is_err());
        assert!(validate_entry_name(&"x".repeat(MAX_NAME_BYTES + 1)).is_err());
        assert!(validate_entry_name(&"x".repeat(MAX_NAME_BYTES)).is_ok());
    }
}
