//! Random password generation.

use zeroize::Zeroizing;

use crate::error::{Result, VaultError};

/// Characters a generated password is drawn from: ASCII letters, digits and
/// ASCII punctuation. No whitespace.
pub const ALPHABET: &[u8] =
    b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~";

/// Longest password [`generate`] will produce.
pub const MAX_PASSWORD_LENGTH: usize = 4096;

// Largest multiple of the alphabet size that fits in a byte; random bytes at
// or above it are discarded so every symbol is equally likely.
const ACCEPT_BELOW: u8 = (256 - 256 % ALPHABET.len()) as u8;

/// Generate a password of `length` characters from [`ALPHABET`].
///
/// Randomness comes from the operating system CSPRNG. A zero length yields
/// an empty string.
///
/// # Errors
///
/// - `VaultError::InvalidInput` if `length` exceeds [`MAX_PASSWORD_LENGTH`]
/// - `VaultError::Crypto` if the OS random source fails
pub fn generate(length: usize) -> Result<String> {
    if length > MAX_PASSWORD_LENGTH {
        return Err(VaultError::InvalidInput(format!(
            "Password length {} exceeds the maximum of {}",
            length, MAX_PASSWORD_LENGTH
        )));
    }
    let mut password = String::with_capacity(length);
    let mut buffer = Zeroizing::new(vec![0u8; length.max(16)]);

    while password.len() < length {
        getrandom::getrandom(buffer.as_mut_slice())
            .map_err(|e| VaultError::Crypto(format!("Random source failed: {}", e)))?;
        for &byte in buffer.iter() {
            if password.len() == length {
                break;
            }
            if byte < ACCEPT_BELOW {
                password.push(ALPHABET[usize::from(byte) % ALPHABET.len()] as char);
            }
        }
    }

    Ok(password)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_alphabet_is_printable_without_whitespace() {
        assert_eq!(ALPHABET.len(), 94);
        assert!(ALPHABET.iter().all(|b| b.is_ascii_graphic()));
        let unique: HashSet<_> = ALPHABET.iter().collect();
        assert_eq!(unique.len(), ALPHABET.len());
    }

    #[test]
    fn test_generated_length() {
        for length in [1, 16, 24, 64, 200] {
            assert_eq!(generate(length).unwrap().len(), length);
        }
    }

    #[test]
    fn test_zero_length_is_empty() {
        assert_eq!(generate(0).unwrap(), "");
    }

    #[test]
    fn test_characters_come_from_alphabet() {
        let password = generate(512).unwrap();
        assert!(password.bytes().all(|b| ALPHABET.contains(&b)));
    }

    #[test]
    fn test_length_above_maximum_is_rejected() {
        assert_eq!(generate(MAX_PASSWORD_LENGTH).unwrap().len(), MAX_PASSWORD_LENGTH);
        assert!(matches!(
            generate(MAX_PASSWORD_LENGTH + 1),
            Err(VaultError::InvalidInput(_))
        ));
        assert!(matches!(generate(usize::MAX), Err(VaultError::InvalidInput(_))));
    }

    #[test]
    fn test_every_symbol_is_drawn_evenly() {
        let mut counts = [0usize; 256];
        let draws = 50;
        for _ in 0..draws {
            for byte in generate(MAX_PASSWORD_LENGTH).unwrap().bytes() {
                counts[usize::from(byte)] += 1;
            }
        }

        let expected = draws * MAX_PASSWORD_LENGTH / ALPHABET.len();
        for &symbol in ALPHABET {
            let count = counts[usize::from(symbol)];
            assert!(
                count > expected * 8 / 10 && count < expected * 12 / 10,
                "symbol {:?} drawn {} times, expected about {}",
                symbol as char,
                count,
                expected
            );
        }
    }

    #[test]
    fn test_repeated_calls_differ() {
        let first = generate(24).unwrap();
        let second = generate(24).unwrap();
        assert_ne!(first, second);
    }
}
