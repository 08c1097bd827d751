// src/config/app.rs
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, warn};

use super::defaults::default_source_path;
use super::params::CipherParams;
use crate::consts::{
    DEFAULT_CONFIG_FILE, ENV_CONFIG, ENV_KDF_DEADLINE_MS, ENV_NONCE, ENV_SALT, ENV_SOURCE,
};
use crate::error::{Result, RevealError};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub cipher: Cipher,
    #[serde(default)]
    pub source: SourceSection,
    #[serde(default)]
    pub limits: Limits,
}

/// Hex-encoded deployment salt and nonce
#[derive(Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Cipher {
    pub salt_hex: Option<String>,
    pub nonce_hex: Option<String>,
}

// Values stay out of logs
impl std::fmt::Debug for Cipher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cipher")
            .field("salt_hex", &self.salt_hex.as_ref().map(|_| "<set>"))
            .field("nonce_hex", &self.nonce_hex.as_ref().map(|_| "<set>"))
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourceSection {
    #[serde(default = "default_source_path")]
    pub path: PathBuf,
}

impl Default for SourceSection {
    fn default() -> Self {
        Self {
            path: default_source_path(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Limits {
    /// Upper bound on key derivation wall time; unset means no deadline
    pub kdf_deadline_ms: Option<u64>,
}

impl Config {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| RevealError::Config(e.to_string()))
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| RevealError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&content)
    }

    /// Apply `PV_*` overrides from `lookup` (normally `std::env::var`).
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(salt) = lookup(ENV_SALT) {
            self.cipher.salt_hex = Some(salt);
        }
        if let Some(nonce) = lookup(ENV_NONCE) {
            self.cipher.nonce_hex = Some(nonce);
        }
        if let Some(source) = lookup(ENV_SOURCE) {
            self.source.path = PathBuf::from(source);
        }
        if let Some(ms) = lookup(ENV_KDF_DEADLINE_MS) {
            let ms = ms.trim().parse::<u64>().map_err(|e| {
                RevealError::MalformedConfiguration(format!("{ENV_KDF_DEADLINE_MS}: {e}"))
            })?;
            self.limits.kdf_deadline_ms = Some(ms);
        }
        Ok(self)
    }

    /// Validate the hex salt/nonce. Nothing is read from disk.
    pub fn cipher_params(&self) -> Result<CipherParams> {
        CipherParams::from_hex(
            self.cipher.salt_hex.as_deref(),
            self.cipher.nonce_hex.as_deref(),
        )
    }

    pub fn kdf_deadline(&self) -> Option<Duration> {
        self.limits.kdf_deadline_ms.map(Duration::from_millis)
    }
}

/// Find the config file: `PV_CONFIG`, then `./pixel-vault.toml`, then the platform config dir.
pub fn locate_config_file<F>(lookup: F) -> Option<PathBuf>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(explicit) = lookup(ENV_CONFIG) {
        return Some(PathBuf::from(explicit));
    }

    let local = PathBuf::from(DEFAULT_CONFIG_FILE);
    if local.exists() {
        return Some(local);
    }

    dirs::config_dir()
        .map(|dir| dir.join("pixel-vault").join("config.toml"))
        .filter(|p| p.exists())
}

/// Load config from the environment — falls back to defaults if no file exists
pub fn load() -> Result<Config> {
    load_with(|key| std::env::var(key).ok())
}

/// [`load`] with an injectable variable lookup
pub fn load_with<F>(lookup: F) -> Result<Config>
where
    F: Fn(&str) -> Option<String>,
{
    let config = match locate_config_file(&lookup) {
        Some(path) => {
            debug!("loading config from {}", path.display());
            Config::from_file(&path)?
        }
        None => {
            warn!("no config file found — using built-in defaults");
            Config::default()
        }
    };
    config.with_overrides(lookup)
}
