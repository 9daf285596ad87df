//! Passphrase verification through a sentinel token file.
//!
//! The first passphrase used with a directory encrypts a random payload into
//! the token file. Later calls succeed only if that file decrypts, so the
//! age header MAC doubles as the passphrase check and there is no separate
//! verifier hash to store.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::codec::{self, CostParams};
use crate::error::{Result, VaultError};
use crate::generator;

/// File name of the sentinel token inside a password directory.
pub const TOKEN_FILE_NAME: &str = ".token";

/// Number of random characters encrypted into a new token.
pub const TOKEN_PAYLOAD_LENGTH: usize = 64;

/// Path of the token file for `directory`.
pub fn token_path(directory: &Path) -> PathBuf {
    directory.join(TOKEN_FILE_NAME)
}

/// Whether `directory` has been bound to a passphrase.
pub fn token_exists(directory: &Path) -> bool {
    token_path(directory).is_file()
}

/// Check `passphrase` against the token in `directory`, creating it on first use.
///
/// The directory is created (with parents) if missing. If no token exists
/// yet, one is written under `passphrase` with `cost` and the check passes.
///
/// # Returns
///
/// `Ok(false)` when the token exists but does not decrypt under
/// `passphrase`. That is a normal negative answer, not an error.
///
/// # Errors
///
/// I/O failures and random source failures are propagated.
pub fn check_token(passphrase: &str, directory: &Path, cost: &CostParams) -> Result<bool> {
    crate::fs::ensure_private_dir(directory)?;
    let token = token_path(directory);

    if token.exists() {
        return match codec::read_file(&token, passphrase) {
            Ok(_) => {
                debug!(directory = %directory.display(), "token check passed");
                Ok(true)
            }
            Err(VaultError::Format { .. }) => {
                debug!(directory = %directory.display(), "token check failed");
                Ok(false)
            }
            Err(err) => Err(err),
        };
    }

    let payload = zeroize::Zeroizing::new(generator::generate(TOKEN_PAYLOAD_LENGTH)?);
    codec::write_file(&token, passphrase, payload.as_bytes(), cost)?;
    info!(directory = %directory.display(), "initialized password directory");
    Ok(true)
}
