//! Application context for the Strongbox CLI.
//!
//! Bundles CLI arguments with the resolved settings so handlers do not
//! re-read config or thread many parameters around.

use std::io::IsTerminal;

use strongbox_core::passphrase::is_weak_passphrase;
use strongbox_core::{CostParams, PasswordStore};
use zeroize::Zeroizing;

use crate::cli::Cli;
use crate::errors::CliError;
use crate::helpers::{prompt_init_passphrase, prompt_passphrase};
use crate::output;

use super::resolver::{resolve_settings, Settings};

/// Application context that bundles CLI args with resolved settings.
pub struct AppContext<'a> {
    cli: &'a Cli,
    settings: Settings,
}

impl<'a> AppContext<'a> {
    /// Create a new application context from CLI arguments.
    pub fn new(cli: &'a Cli) -> anyhow::Result<Self> {
        Ok(Self {
            cli,
            settings: resolve_settings(cli)?,
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Check if quiet mode is enabled.
    pub fn quiet(&self) -> bool {
        self.cli.quiet
    }

    /// Whether prompts may be shown.
    pub fn interactive(&self) -> bool {
        std::io::stdin().is_terminal() && !self.cli.no_input
    }

    /// Build the password store from the resolved settings.
    pub fn store(&self) -> anyhow::Result<PasswordStore> {
        let cost = CostParams::new(self.settings.work_factor)
            .map_err(|e| CliError::invalid_input(e.to_string()))?;
        Ok(PasswordStore::new(&self.settings.directory).with_cost(cost))
    }

    /// Obtain the passphrase for `store`.
    ///
    /// An uninitialized directory gets bound to whatever passphrase is given
    /// here, so that case asks for confirmation.
    pub fn passphrase(&self, store: &PasswordStore) -> anyhow::Result<Zeroizing<String>> {
        if store.is_initialized() {
            return prompt_passphrase(self.interactive());
        }
        let passphrase = prompt_init_passphrase(self.interactive())?;
        if is_weak_passphrase(&passphrase) && !self.quiet() {
            output::warning(
                "Passphrase is shorter than 8 characters; it cannot be changed without `strongbox rotate`.",
            );
        }
        Ok(passphrase)
    }
}
