//! Settings resolution for config and password directory paths.
//!
//! Precedence is flag (or its environment variable, via clap) over config
//! file over built-in default. The result is resolved once and passed down.

use std::path::PathBuf;

use crate::cli::Cli;
use crate::config::{default_config_path, default_store_path, expand_home, read_config};
use crate::constants::CONFIG_ENV;

/// Fully resolved runtime settings.
#[derive(Debug, Clone)]
pub struct Settings {
    pub config_path: PathBuf,
    pub directory: PathBuf,
    pub work_factor: u8,
    pub default_length: usize,
}

/// Resolve the config file path, checking STRONGBOX_CONFIG env var first.
pub fn resolve_config_path() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var(CONFIG_ENV) {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value));
        }
    }
    default_config_path()
}

/// Merge CLI arguments with the config file (if any).
pub fn resolve_settings(cli: &Cli) -> anyhow::Result<Settings> {
    let config_path = resolve_config_path()?;
    let config = if config_path.exists() {
        read_config(&config_path)?
    } else {
        Default::default()
    };

    let directory = match (&cli.dir, &config.store.path) {
        (Some(dir), _) => dir.clone(),
        (None, Some(path)) => expand_home(path)?,
        (None, None) => default_store_path()?,
    };

    Ok(Settings {
        config_path,
        directory,
        work_factor: cli.work_factor.unwrap_or(config.crypto.work_factor),
        default_length: config.generator.length,
    })
}
