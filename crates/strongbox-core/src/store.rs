//! Password store over a directory of encrypted entry files.
//!
//! Every operation that touches secrets first checks the passphrase against
//! the directory's token (see [`crate::token`]) and fails with
//! `VaultError::AuthenticationFailed` on mismatch. Listing only reads file
//! names and needs no passphrase.

use std::fs;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

use tracing::{debug, error, info, warn};
use zeroize::Zeroizing;

use crate::codec::{self, CostParams};
use crate::error::{Result, VaultError};
use crate::generator;
use crate::name::{is_entry_name, validate_entry_name};
use crate::passphrase::validate_passphrase;
use crate::token::{self, TOKEN_FILE_NAME};

/// Password length used when the caller does not pick one.
pub const DEFAULT_PASSWORD_LENGTH: usize = 24;

/// A password directory plus the cost parameters used for new files.
#[derive(Debug, Clone)]
pub struct PasswordStore {
    directory: PathBuf,
    cost: CostParams,
}

/// A file that could not be moved into place during rotation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotationFailure {
    pub name: String,
    pub reason: String,
}

/// Outcome of [`PasswordStore::rotate_passwords`].
///
/// When `failed` is empty the whole directory, token included, is under the
/// new passphrase. Otherwise the token was never replaced and committed
/// entries were put back, so the directory still opens with the old
/// passphrase. The only exception is `unrestored`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RotationReport {
    /// Entries now encrypted under the new passphrase.
    pub rotated: Vec<String>,
    /// Whether the token now verifies the new passphrase.
    pub token_rotated: bool,
    /// The file whose commit failed and stopped the rotation.
    pub failed: Vec<RotationFailure>,
    /// Entries that were committed before the failure and then restored to
    /// their original ciphertext.
    pub rolled_back: Vec<String>,
    /// Entries that were committed before the failure and could not be
    /// restored. They are encrypted under the new passphrase while the token
    /// still expects the old one, so only `codec::read_file` with the new
    /// passphrase opens them.
    pub unrestored: Vec<RotationFailure>,
    /// Non-entry files found in the directory and left untouched.
    pub skipped: Vec<String>,
}

impl RotationReport {
    /// True when every entry and the token moved to the new passphrase.
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty() && self.token_rotated
    }
}

struct DirectoryScan {
    entries: Vec<String>,
    skipped: Vec<String>,
}

struct StagedFile {
    name: String,
    temp: PathBuf,
}

// A file as it was before rotation started.
struct Original {
    name: String,
    ciphertext: Vec<u8>,
    plaintext: Zeroizing<Vec<u8>>,
}

impl PasswordStore {
    /// Open a store rooted at `directory` with default cost parameters.
    ///
    /// Nothing is touched on disk until an operation runs.
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            cost: CostParams::default(),
        }
    }

    /// Use `cost` for every file this store writes, including the token and
    /// the files rewritten by rotation.
    pub fn with_cost(mut self, cost: CostParams) -> Self {
        self.cost = cost;
        self
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn cost(&self) -> &CostParams {
        &self.cost
    }

    /// Whether the directory is already bound to a passphrase.
    pub fn is_initialized(&self) -> bool {
        token::token_exists(&self.directory)
    }

    /// Whether an entry named `name` exists.
    pub fn contains(&self, name: &str) -> Result<bool> {
        validate_entry_name(name)?;
        Ok(self.entry_path(name).is_file())
    }

    /// Check `passphrase` against the directory token, binding the directory
    /// to it if uninitialized.
    pub fn verify_passphrase(&self, passphrase: &str) -> Result<bool> {
        validate_passphrase(passphrase)?;
        token::check_token(passphrase, &self.directory, &self.cost)
    }

    fn authenticate(&self, passphrase: &str) -> Result<()> {
        if self.verify_passphrase(passphrase)? {
            Ok(())
        } else {
            Err(VaultError::AuthenticationFailed)
        }
    }

    fn entry_path(&self, name: &str) -> PathBuf {
        self.directory.join(name)
    }

    /// Generate, store and return a new password for `name`.
    ///
    /// An existing entry with the same name is replaced. The plaintext is
    /// returned so the caller can use it right away.
    ///
    /// # Errors
    ///
    /// - `VaultError::InvalidName` if `name` is not a legal entry name
    /// - `VaultError::AuthenticationFailed` if the passphrase does not match
    ///   the directory token
    pub fn create_password(&self, passphrase: &str, name: &str, length: usize) -> Result<String> {
        validate_entry_name(name)?;
        self.authenticate(passphrase)?;

        let password = generator::generate(length)?;
        codec::write_file(&self.entry_path(name), passphrase, password.as_bytes(), &self.cost)?;
        info!(entry = name, length, "stored password");
        Ok(password)
    }

    /// Decrypt and return the password stored under `name`.
    ///
    /// # Errors
    ///
    /// - `VaultError::AuthenticationFailed` if the passphrase does not match
    ///   the directory token
    /// - `VaultError::NotFound` if no such entry exists
    /// - `VaultError::Format` if the entry does not decrypt to text
    pub fn read_password(&self, passphrase: &str, name: &str) -> Result<String> {
        validate_entry_name(name)?;
        self.authenticate(passphrase)?;

        let plaintext = match codec::read_file(&self.entry_path(name), passphrase) {
            Ok(bytes) => bytes,
            Err(VaultError::NotFound(_)) => return Err(VaultError::NotFound(name.to_string())),
            Err(err) => return Err(err),
        };
        debug!(entry = name, "read password");
        String::from_utf8(plaintext)
            .map_err(|_| VaultError::format(name, "stored password is not valid UTF-8"))
    }

    /// Names of all stored entries, sorted.
    ///
    /// The token, hidden files, directories and names that are not legal
    /// entry names are left out. A missing directory has no entries.
    pub fn list_passwords(&self) -> Result<Vec<String>> {
        Ok(self.scan()?.entries)
    }

    fn scan(&self) -> Result<DirectoryScan> {
        let mut scan = DirectoryScan {
            entries: Vec::new(),
            skipped: Vec::new(),
        };
        let read_dir = match fs::read_dir(&self.directory) {
            Ok(read_dir) => read_dir,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(scan),
            Err(err) => return Err(err.into()),
        };

        for dir_entry in read_dir {
            let dir_entry = dir_entry?;
            if !dir_entry.file_type()?.is_file() {
                continue;
            }
            let file_name = dir_entry.file_name();
            match file_name.to_str() {
                Some(TOKEN_FILE_NAME) => {}
                Some(name) if is_entry_name(name) => scan.entries.push(name.to_string()),
                _ => scan.skipped.push(file_name.to_string_lossy().into_owned()),
            }
        }

        scan.entries.sort();
        scan.skipped.sort();
        Ok(scan)
    }

    /// Re-encrypt every entry and the token under `new_passphrase`.
    ///
    /// Runs in three phases. All files are read and decrypted under
    /// `passphrase` first; any failure aborts before anything is written.
    /// Each file is then encrypted into a staged temp file; any failure
    /// removes the staged files and aborts. Finally staged entries are
    /// renamed over their originals and the token goes last, only once every
    /// entry is in place. If a commit fails, the entries already committed
    /// are rewritten with the ciphertext read in the first phase, every
    /// remaining staged file is removed, and the report lists the failure.
    ///
    /// # Errors
    ///
    /// - `VaultError::AuthenticationFailed` if `passphrase` does not match
    /// - `VaultError::Format` naming the first entry that does not decrypt
    pub fn rotate_passwords(&self, passphrase: &str, new_passphrase: &str) -> Result<RotationReport> {
        self.rotate_with(passphrase, new_passphrase, crate::fs::commit_staged)
    }

    fn rotate_with<F>(
        &self,
        passphrase: &str,
        new_passphrase: &str,
        mut commit: F,
    ) -> Result<RotationReport>
    where
        F: FnMut(&Path, &Path) -> io::Result<()>,
    {
        validate_passphrase(new_passphrase)?;
        self.authenticate(passphrase)?;

        let scan = self.scan()?;
        for name in &scan.skipped {
            warn!(file = %name, "skipping non-entry file during rotation");
        }

        let mut targets = scan.entries;
        targets.push(TOKEN_FILE_NAME.to_string());

        let mut originals = Vec::with_capacity(targets.len());
        for name in targets {
            let ciphertext = fs::read(self.entry_path(&name))?;
            let plaintext = Zeroizing::new(codec::decrypt(&ciphertext, passphrase, &name)?);
            originals.push(Original {
                name,
                ciphertext,
                plaintext,
            });
        }

        let mut staged = Vec::with_capacity(originals.len());
        for original in &originals {
            match self.stage(&original.name, &original.plaintext, new_passphrase) {
                Ok(file) => staged.push(file),
                Err(err) => {
                    discard(&staged);
                    return Err(err);
                }
            }
        }

        let mut report = RotationReport {
            skipped: scan.skipped,
            ..RotationReport::default()
        };
        let mut committed = 0;
        for file in &staged {
            if let Err(err) = commit(&file.temp, &self.entry_path(&file.name)) {
                warn!(file = %file.name, error = %err, "failed to commit rotated file");
                report.failed.push(RotationFailure {
                    name: file.name.clone(),
                    reason: err.to_string(),
                });
                break;
            }
            if file.name == TOKEN_FILE_NAME {
                report.token_rotated = true;
            } else {
                report.rotated.push(file.name.clone());
            }
            committed += 1;
        }

        if !report.failed.is_empty() {
            discard(&staged[committed..]);
            self.roll_back(&originals[..committed], &mut report);
        }

        info!(
            rotated = report.rotated.len(),
            failed = report.failed.len(),
            rolled_back = report.rolled_back.len(),
            skipped = report.skipped.len(),
            "rotation finished"
        );
        Ok(report)
    }

    // The token is committed last, so `committed` never includes it here.
    fn roll_back(&self, committed: &[Original], report: &mut RotationReport) {
        for original in committed.iter().rev() {
            match crate::fs::write_atomic(&self.entry_path(&original.name), &original.ciphertext) {
                Ok(()) => report.rolled_back.push(original.name.clone()),
                Err(err) => {
                    error!(
                        file = %original.name,
                        error = %err,
                        "failed to restore entry after aborted rotation"
                    );
                    report.unrestored.push(RotationFailure {
                        name: original.name.clone(),
                        reason: err.to_string(),
                    });
                }
            }
        }
        report.rolled_back.reverse();
        report.unrestored.reverse();
        let RotationReport {
            rotated, unrestored, ..
        } = report;
        rotated.retain(|name| unrestored.iter().any(|failure| &failure.name == name));
    }

    fn stage(&self, name: &str, plaintext: &[u8], passphrase: &str) -> Result<StagedFile> {
        let encrypted = codec::encrypt(plaintext, passphrase, &self.cost)?;
        let temp = crate::fs::stage_file(&self.entry_path(name), &encrypted)?;
        Ok(StagedFile {
            name: name.to_string(),
            temp,
        })
    }
}

fn discard(staged: &[StagedFile]) {
    for file in staged {
        match fs::remove_file(&file.temp) {
            Ok(()) => {}
            // A failed commit already removed its own temp file.
            Err(err) if err.kind() == ErrorKind::NotFound => {}
            Err(err) => warn!(file = %file.temp.display(), error = %err, "failed to remove staged file"),
        }
    }
}
