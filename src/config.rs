//! Configuration loading and management
//!
//! Handles parsing of `.anasa.toml` configuration files.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::query::{SortDirection, SortKey};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Store location configuration
    #[serde(default)]
    pub store: StoreConfig,

    /// Acting-user configuration
    #[serde(default)]
    pub identity: IdentityConfig,

    /// Generated-id configuration
    #[serde(default)]
    pub ids: IdsConfig,

    /// Default task ordering
    #[serde(default)]
    pub sort: SortConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store: StoreConfig::default(),
            identity: IdentityConfig::default(),
            ids: IdsConfig::default(),
            sort: SortConfig::default(),
        }
    }
}

/// Store location configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Name of the data directory under the store root
    #[serde(default = "default_store_dir")]
    pub dir: String,
}

fn default_store_dir() -> String {
    ".anasa".to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            dir: default_store_dir(),
        }
    }
}

/// Acting-user configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityConfig {
    /// Acting user id when none is supplied (empty means none)
    #[serde(default = "default_identity")]
    pub default: String,
}

fn default_identity() -> String {
    String::new()
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            default: default_identity(),
        }
    }
}

/// Generated-id configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdsConfig {
    /// Length of the random suffix on generated entity ids
    #[serde(default = "default_id_suffix_len")]
    pub suffix_len: usize,
}

fn default_id_suffix_len() -> usize {
    8
}

impl Default for IdsConfig {
    fn default() -> Self {
        Self {
            suffix_len: default_id_suffix_len(),
        }
    }
}

/// Default task ordering
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SortConfig {
    /// Default sort key for task listings
    #[serde(default = "default_sort_key")]
    pub key: String,

    /// Default sort direction for task listings
    #[serde(default = "default_sort_direction")]
    pub direction: String,
}

fn default_sort_key() -> String {
    "due_date".to_string()
}

fn default_sort_direction() -> String {
    "ascending".to_string()
}

impl Default for SortConfig {
    fn default() -> Self {
        Self {
            key: default_sort_key(),
            direction: default_sort_direction(),
        }
    }
}

impl SortConfig {
    pub fn key(&self) -> crate::error::Result<SortKey> {
        self.key.parse()
    }

    pub fn direction(&self) -> crate::error::Result<SortDirection> {
        self.direction.parse()
    }
}

impl Config {
    /// Load configuration from a `.anasa.toml` file
    pub fn load(path: &PathBuf) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from the store root, or return defaults
    pub fn load_from_root(root: &PathBuf) -> Self {
        let config_path = root.join(".anasa.toml");
        if config_path.exists() {
            Self::load(&config_path).unwrap_or_default()
        } else {
            Self::default()
        }
    }

    /// Save configuration to a file
    pub fn save(&self, path: &PathBuf) -> crate::error::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    fn validate(&self) -> crate::error::Result<()> {
        if self.store.dir.trim().is_empty() {
            return Err(crate::error::Error::InvalidConfig(
                "store.dir cannot be empty".to_string(),
            ));
        }
        if self.ids.suffix_len < 4 {
            return Err(crate::error::Error::InvalidConfig(
                "ids.suffix_len must be >= 4".to_string(),
            ));
        }
        if self.ids.suffix_len > 16 {
            return Err(crate::error::Error::InvalidConfig(
                "ids.suffix_len must be <= 16".to_string(),
            ));
        }
        self.sort.key().map_err(|_| {
            crate::error::Error::InvalidConfig(format!(
                "sort.key: invalid key '{}' (expected due_date|priority|status|title)",
                self.sort.key
            ))
        })?;
        self.sort.direction().map_err(|_| {
            crate::error::Error::InvalidConfig(format!(
                "sort.direction: invalid direction '{}' (expected ascending|descending)",
                self.sort.direction
            ))
        })?;
        Ok(())
    }
}
