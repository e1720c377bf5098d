//! Config module - dragonsave settings (dragonsave.toml).
//!
//! The config file holds:
//! - Base directory for the key file and save files
//! - File naming (key file name, save file extension)
//! - Argon2 work factor for password hashes

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Argon2id work factor used for new password hashes.
///
/// Verification always uses the parameters embedded in the stored hash, so
/// changing these only affects hashes written afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordConfig {
    #[serde(default = "default_memory_kib")]
    pub memory_kib: u32,
    #[serde(default = "default_iterations")]
    pub iterations: u32,
    #[serde(default = "default_parallelism")]
    pub parallelism: u32,
}

fn default_memory_kib() -> u32 {
    argon2::Params::DEFAULT_M_COST
}

fn default_iterations() -> u32 {
    argon2::Params::DEFAULT_T_COST
}

fn default_parallelism() -> u32 {
    argon2::Params::DEFAULT_P_COST
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            memory_kib: default_memory_kib(),
            iterations: default_iterations(),
            parallelism: default_parallelism(),
        }
    }
}

/// Main dragonsave config
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Config version (for future migrations)
    #[serde(default = "default_version")]
    pub version: u32,

    /// Directory holding key.bin and every <username>.sav
    #[serde(default = "default_base_dir")]
    pub base_dir: PathBuf,

    #[serde(default = "default_key_file")]
    pub key_file: String,

    /// Extension of save files, without the leading dot
    #[serde(default = "default_save_extension")]
    pub save_extension: String,

    #[serde(default)]
    pub password: PasswordConfig,
}

fn default_version() -> u32 {
    1
}

fn default_key_file() -> String {
    "key.bin".to_string()
}

fn default_save_extension() -> String {
    "sav".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: default_version(),
            base_dir: default_base_dir(),
            key_file: default_key_file(),
            save_extension: default_save_extension(),
            password: PasswordConfig::default(),
        }
    }
}

/// Default base directory (~/.dragons_game/)
pub fn default_base_dir() -> PathBuf {
    dirs::home_dir()
        .map(|d| d.join(".dragons_game"))
        .unwrap_or_else(|| PathBuf::from("./.dragons_game"))
}

/// Default config directory (~/.config/dragonsave/)
pub fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join("dragonsave"))
        .unwrap_or_else(|| PathBuf::from("."))
}

pub fn default_config_path() -> PathBuf {
    default_config_dir().join("dragonsave.toml")
}

impl Config {
    /// Config rooted at a specific base directory
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self {
            base_dir,
            ..Self::default()
        }
    }

    /// Load config from file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Cannot parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Load config from the default path, falling back to defaults if absent
    pub fn load_default() -> Result<Self> {
        let path = default_config_path();
        if path.exists() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save config to file
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content =
            toml::to_string_pretty(self).with_context(|| "Cannot serialize config to TOML")?;

        std::fs::write(path, content)
            .with_context(|| format!("Cannot write config file: {}", path.display()))?;

        Ok(())
    }

    pub fn key_path(&self) -> PathBuf {
        self.base_dir.join(&self.key_file)
    }

    /// Save files live directly in the base directory, next to the key.
    pub fn save_dir(&self) -> &Path {
        &self.base_dir
    }
}
