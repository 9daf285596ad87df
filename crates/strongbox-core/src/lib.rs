//! # Strongbox Core
//!
//! Core library for Strongbox - a local, file-based password manager.
//!
//! Every stored password lives in its own age-encrypted file inside a
//! password directory. A sentinel token file in the same directory binds the
//! directory to one passphrase: decrypting the token is how a supplied
//! passphrase gets checked before anything else is touched.
//!
//! ## Architecture
//!
//! - **codec**: Encrypt/decrypt payloads to files (age, scrypt passphrase mode)
//! - **generator**: Random printable passwords from the OS CSPRNG
//! - **token**: Sentinel file creation and passphrase verification
//! - **name**: Entry name validation
//! - **store**: Create, read, list and rotate over a password directory
//!
//! ## Concurrency
//!
//! Nothing here locks the password directory. Callers must serialize access
//! to a directory; a `rotate` racing a `create` in another process can leave
//! entries encrypted under different passphrases.

pub mod codec;
pub mod error;
pub mod fs;
pub mod generator;
pub mod name;
pub mod passphrase;
pub mod store;
pub mod token;

pub use codec::CostParams;
pub use error::{Result, VaultError};
pub use generator::MAX_PASSWORD_LENGTH;
pub use store::{PasswordStore, RotationFailure, RotationReport, DEFAULT_PASSWORD_LENGTH};

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
