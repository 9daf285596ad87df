//! Age encryption/decryption of password files.
//!
//! This module wraps the age file format in passphrase mode. The age header
//! carries the scrypt salt and work factor plus a MAC over the header, so a
//! wrong passphrase or a foreign file is rejected before any payload is
//! returned. That rejection is the only passphrase check the store has.
//!
//! Note: age fixes scrypt `r = 8` and `p = 1`; the work factor (log2 N) is
//! the only tunable cost and it is recorded in every file's header.

use std::fs;
use std::io::{ErrorKind, Read, Write};
use std::iter;
use std::path::Path;

use age::secrecy::SecretString;
use tracing::debug;

use crate::error::{Result, VaultError};

/// Smallest accepted scrypt work factor.
pub const MIN_WORK_FACTOR: u8 = 1;

/// Largest accepted scrypt work factor, for writing and for reading.
///
/// scrypt memory is `128 * r * 2^work_factor` bytes, so 22 is 4 GiB.
pub const MAX_WORK_FACTOR: u8 = 22;

/// Default scrypt work factor (64 MiB per derivation).
pub const DEFAULT_WORK_FACTOR: u8 = 16;

/// Key-derivation cost for newly written files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CostParams {
    work_factor: u8,
}

impl CostParams {
    /// Build cost parameters from a scrypt work factor (log2 N).
    ///
    /// # Errors
    ///
    /// Returns `VaultError::InvalidInput` outside
    /// `MIN_WORK_FACTOR..=MAX_WORK_FACTOR`.
    pub fn new(work_factor: u8) -> Result<Self> {
        if !(MIN_WORK_FACTOR..=MAX_WORK_FACTOR).contains(&work_factor) {
            return Err(VaultError::InvalidInput(format!(
                "Work factor must be between {} and {} (got {})",
                MIN_WORK_FACTOR, MAX_WORK_FACTOR, work_factor
            )));
        }
        Ok(Self { work_factor })
    }

    /// The scrypt work factor (log2 N).
    pub fn work_factor(&self) -> u8 {
        self.work_factor
    }
}

impl Default for CostParams {
    fn default() -> Self {
        Self {
            work_factor: DEFAULT_WORK_FACTOR,
        }
    }
}

/// Encrypt data under a passphrase.
///
/// # Examples
///
/// ```
/// use strongbox_core::codec::{decrypt, encrypt, CostParams};
///
/// let cost = CostParams::new(10).unwrap();
/// let encrypted = encrypt(b"secret data", "my-secure-passphrase", &cost).unwrap();
/// let decrypted = decrypt(&encrypted, "my-secure-passphrase", "doc").unwrap();
/// assert_eq!(decrypted.as_slice(), b"secret data");
/// ```
pub fn encrypt(data: &[u8], passphrase: &str, cost: &CostParams) -> Result<Vec<u8>> {
    let mut recipient =
        age::scrypt::Recipient::new(SecretString::from(passphrase.to_string()));
    recipient.set_work_factor(cost.work_factor);

    let encryptor = age::Encryptor::with_recipients(iter::once(&recipient as &dyn age::Recipient))
        .map_err(|e| VaultError::Crypto(format!("Failed to create encryptor: {}", e)))?;

    let mut encrypted = Vec::new();
    let mut writer = encryptor
        .wrap_output(&mut encrypted)
        .map_err(|e| VaultError::Crypto(format!("Failed to create encryptor: {}", e)))?;

    writer
        .write_all(data)
        .map_err(|e| VaultError::Crypto(format!("Encryption write failed: {}", e)))?;

    writer
        .finish()
        .map_err(|e| VaultError::Crypto(format!("Encryption finish failed: {}", e)))?;

    Ok(encrypted)
}

/// Decrypt data produced by [`encrypt`].
///
/// `name` identifies the source in error messages.
///
/// # Errors
///
/// Returns `VaultError::Format` if the passphrase is wrong, the data is not
/// an age passphrase file, it is corrupted, or it demands a work factor above
/// `MAX_WORK_FACTOR`.
pub fn decrypt(encrypted_data: &[u8], passphrase: &str, name: &str) -> Result<Vec<u8>> {
    let decryptor =
        age::Decryptor::new(encrypted_data).map_err(|e| VaultError::format(name, e))?;

    let mut identity = age::scrypt::Identity::new(SecretString::from(passphrase.to_string()));
    identity.set_max_work_factor(MAX_WORK_FACTOR);

    let mut reader = decryptor
        .decrypt(iter::once(&identity as &dyn age::Identity))
        .map_err(|e| match e {
            age::DecryptError::NoMatchingKeys
            | age::DecryptError::DecryptionFailed
            | age::DecryptError::KeyDecryptionFailed => {
                VaultError::format(name, "incorrect passphrase or corrupted file")
            }
            other => VaultError::format(name, other),
        })?;

    let mut decrypted = Vec::new();
    reader
        .read_to_end(&mut decrypted)
        .map_err(|e| VaultError::format(name, e))?;

    Ok(decrypted)
}

/// Encrypt `plaintext` and atomically store it at `path`, replacing any existing file.
pub fn write_file(path: &Path, passphrase: &str, plaintext: &[u8], cost: &CostParams) -> Result<()> {
    let encrypted = encrypt(plaintext, passphrase, cost)?;
    crate::fs::write_atomic(path, &encrypted)?;
    debug!(file = %display_name(path), work_factor = cost.work_factor, "wrote encrypted file");
    Ok(())
}

/// Read and decrypt the file at `path`.
///
/// # Errors
///
/// Returns `VaultError::NotFound` if `path` does not exist and
/// `VaultError::Format` if it does not decrypt under `passphrase`.
pub fn read_file(path: &Path, passphrase: &str) -> Result<Vec<u8>> {
    let name = display_name(path);
    let encrypted = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            return Err(VaultError::NotFound(path.display().to_string()))
        }
        Err(err) => return Err(err.into()),
    };
    debug!(file = %name, "decrypting file");
    decrypt(&encrypted, passphrase, &name)
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn fast() -> CostParams {
        CostParams::new(10).unwrap()
    }

    #[test]
    fn test_encrypt_decrypt_round_trip() {
        let passphrase = "test-passphrase-secure-123";
        let plaintext = b"Hello, World! This is secret data.";

        let encrypted = encrypt(plaintext, passphrase, &fast()).unwrap();
        let decrypted = decrypt(&encrypted, passphrase, "test").unwrap();

        assert_eq!(decrypted, plaintext);
    }

    #[test]
    fn test_wrong_passphrase_is_format_error() {
        let encrypted = encrypt(b"secret data", "correct-passphrase-123", &fast()).unwrap();

        let result = decrypt(&encrypted, "wrong-passphrase-456", "mail");
        match result {
            Err(VaultError::Format { name, .. }) => assert_eq!(name, "mail"),
            other => panic!("expected format error, got {:?}", other),
        }
    }

    #[test]
    fn test_corrupted_data_fails_decryption() {
        let passphrase = "test-passphrase-secure-123";
        let mut encrypted = encrypt(b"secret data", passphrase, &fast()).unwrap();

        let len = encrypted.len();
        encrypted[len / 2] ^= 0xFF;

        let result = decrypt(&encrypted, passphrase, "test");
        assert!(matches!(result, Err(VaultError::Format { .. })));
    }

    #[test]
    fn test_foreign_data_is_format_error() {
        let result = decrypt(b"just some notes, not an age file", "pass", "notes.txt");
        assert!(matches!(result, Err(VaultError::Format { .. })));
    }

    #[test]
    fn test_empty_data_encryption() {
        let passphrase = "test-passphrase-secure-123";

        let encrypted = encrypt(b"", passphrase, &fast()).unwrap();
        let decrypted = decrypt(&encrypted, passphrase, "test").unwrap();

        assert!(decrypted.is_empty());
    }

    #[test]
    fn test_cost_params_bounds() {
        assert!(CostParams::new(0).is_err());
        assert!(CostParams::new(MAX_WORK_FACTOR + 1).is_err());
        assert_eq!(CostParams::new(12).unwrap().work_factor(), 12);
        assert_eq!(CostParams::default().work_factor(), DEFAULT_WORK_FACTOR);
    }

    #[test]
    fn test_file_round_trip_and_overwrite() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test_password");

        write_file(&path, "world", b"hello", &fast()).unwrap();
        assert_eq!(read_file(&path, "world").unwrap(), b"hello");

        write_file(&path, "world", b"replaced", &fast()).unwrap();
        assert_eq!(read_file(&path, "world").unwrap(), b"replaced");
    }

    #[test]
    fn test_read_missing_file_is_not_found() {
        let dir = tempdir().unwrap();
        let result = read_file(&dir.path().join("absent"), "pass");
        assert!(matches!(result, Err(VaultError::NotFound(_))));
    }

    #[test]
    fn test_file_does_not_contain_plaintext() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("marker");

        write_file(&path, "pass", b"PLAINTEXT_MARKER_123", &fast()).unwrap();

        let on_disk = fs::read(&path).unwrap();
        let haystack = String::from_utf8_lossy(&on_disk);
        assert!(!haystack.contains("PLAINTEXT_MARKER_123"));
    }
}
