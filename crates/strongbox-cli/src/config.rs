use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use strongbox_core::codec::DEFAULT_WORK_FACTOR;
use strongbox_core::DEFAULT_PASSWORD_LENGTH;

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct StrongboxConfig {
    #[serde(default)]
    pub store: StoreSection,
    #[serde(default)]
    pub crypto: CryptoSection,
    #[serde(default)]
    pub generator: GeneratorSection,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct StoreSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CryptoSection {
    #[serde(default = "default_work_factor")]
    pub work_factor: u8,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GeneratorSection {
    #[serde(default = "default_length")]
    pub length: usize,
}

impl Default for CryptoSection {
    fn default() -> Self {
        Self {
            work_factor: default_work_factor(),
        }
    }
}

impl Default for GeneratorSection {
    fn default() -> Self {
        Self {
            length: default_length(),
        }
    }
}

fn default_work_factor() -> u8 {
    DEFAULT_WORK_FACTOR
}

fn default_length() -> usize {
    DEFAULT_PASSWORD_LENGTH
}

impl StrongboxConfig {
    pub fn new(store_path: &Path, work_factor: u8, length: usize) -> Self {
        Self {
            store: StoreSection {
                path: Some(store_path.to_string_lossy().to_string()),
            },
            crypto: CryptoSection { work_factor },
            generator: GeneratorSection { length },
        }
    }
}

pub fn default_config_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_config_dir()?.join("config.toml"))
}

pub fn default_store_path() -> anyhow::Result<PathBuf> {
    Ok(home_dir()?.join(".strongbox"))
}

pub fn read_config(path: &Path) -> anyhow::Result<StrongboxConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read config {}: {}", path.display(), e))?;
    toml::from_str(&contents)
        .map_err(|e| anyhow::anyhow!("Failed to parse config {}: {}", path.display(), e))
}

pub fn write_config(path: &Path, config: &StrongboxConfig) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            anyhow::anyhow!(
                "Failed to create config directory {}: {}",
                parent.display(),
                e
            )
        })?;
    }
    let contents =
        toml::to_string_pretty(config).map_err(|e| anyhow::anyhow!("TOML error: {}", e))?;
    std::fs::write(path, contents)
        .map_err(|e| anyhow::anyhow!("Failed to write config {}: {}", path.display(), e))?;
    Ok(())
}

/// Expand a leading `~/` against the home directory.
pub fn expand_home(value: &str) -> anyhow::Result<PathBuf> {
    match value.strip_prefix("~/") {
        Some(rest) => Ok(home_dir()?.join(rest)),
        None if value == "~" => home_dir(),
        None => Ok(PathBuf::from(value)),
    }
}

pub fn xdg_config_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_CONFIG_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("strongbox"));
        }
    }
    Ok(home_dir()?.join(".config").join("strongbox"))
}

fn home_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .map_err(|_| anyhow::anyhow!("HOME is not set; cannot resolve default paths"))?;
    Ok(PathBuf::from(home))
}
