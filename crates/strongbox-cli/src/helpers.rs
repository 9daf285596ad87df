//! Passphrase input helpers for the CLI.

use dialoguer::Password;
use zeroize::Zeroizing;

use crate::constants::{NEW_PASSPHRASE_ENV, PASSPHRASE_ENV};

fn env_passphrase(var: &str) -> Option<Zeroizing<String>> {
    std::env::var(var)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .map(Zeroizing::new)
}

/// Prompt for the passphrase, or read it from STRONGBOX_PASSPHRASE.
pub fn prompt_passphrase(interactive: bool) -> anyhow::Result<Zeroizing<String>> {
    if let Some(value) = env_passphrase(PASSPHRASE_ENV) {
        return Ok(value);
    }
    if !interactive {
        return Err(anyhow::anyhow!(
            "No passphrase provided and no TTY available. Set {}.",
            PASSPHRASE_ENV
        ));
    }
    Password::new()
        .with_prompt("Passphrase")
        .interact()
        .map(Zeroizing::new)
        .map_err(|e| anyhow::anyhow!("Failed to read passphrase: {}", e))
}

/// Prompt for a passphrase that is about to be established, with confirmation.
///
/// Reads `env_var` first so scripted use works without a TTY.
pub fn prompt_confirmed_passphrase(
    env_var: &str,
    prompt: &str,
    interactive: bool,
) -> anyhow::Result<Zeroizing<String>> {
    if let Some(value) = env_passphrase(env_var) {
        return Ok(value);
    }
    if !interactive {
        return Err(anyhow::anyhow!(
            "No passphrase provided and no TTY available. Set {}.",
            env_var
        ));
    }
    Password::new()
        .with_prompt(prompt)
        .with_confirmation("Confirm passphrase", "Passphrases do not match")
        .interact()
        .map(Zeroizing::new)
        .map_err(|e| anyhow::anyhow!("Failed to read passphrase: {}", e))
}

/// Prompt for the replacement passphrase used by `rotate`.
pub fn prompt_new_passphrase(interactive: bool) -> anyhow::Result<Zeroizing<String>> {
    prompt_confirmed_passphrase(NEW_PASSPHRASE_ENV, "New passphrase", interactive)
}

/// Prompt for the passphrase that will initialize a password directory.
pub fn prompt_init_passphrase(interactive: bool) -> anyhow::Result<Zeroizing<String>> {
    prompt_confirmed_passphrase(PASSPHRASE_ENV, "Enter passphrase", interactive)
}
