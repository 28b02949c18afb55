//! Studio configuration
//!
//! Loaded from environment variables (with `.env` support) or a YAML file.
//!
//! ```yaml
//! store: file            # file | memory
//! data_dir: ./.contract-studio
//! log_filter: contract_studio=info
//! ```

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

use crate::store::{FileStore, KeyValueStore, MemoryStore};

pub const ENV_STORE: &str = "CONTRACT_STUDIO_STORE";
pub const ENV_DATA_DIR: &str = "CONTRACT_STUDIO_DATA_DIR";
pub const ENV_LOG: &str = "CONTRACT_STUDIO_LOG";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
}

/// Which key-value store backs the repository
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreBackend {
    /// One file per key under `data_dir`
    #[default]
    File,
    /// Process memory; nothing survives a restart
    Memory,
}

impl FromStr for StoreBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "file" => Ok(Self::File),
            "memory" => Ok(Self::Memory),
            _ => Err(ConfigError::InvalidValue {
                key: ENV_STORE,
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StudioConfig {
    #[serde(default)]
    pub store: StoreBackend,
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// `tracing` filter directive used when `RUST_LOG` is unset
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(".contract-studio")
}

fn default_log_filter() -> String {
    "contract_studio=info".to_string()
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            store: StoreBackend::default(),
            data_dir: default_data_dir(),
            log_filter: default_log_filter(),
        }
    }
}

impl StudioConfig {
    /// Load from the process environment, reading `.env` first if present
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary variable lookup; unset variables keep defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(store) = lookup(ENV_STORE) {
            config.store = store.parse()?;
        }
        if let Some(dir) = lookup(ENV_DATA_DIR).filter(|d| !d.trim().is_empty()) {
            config.data_dir = PathBuf::from(dir);
        }
        if let Some(filter) = lookup(ENV_LOG).filter(|f| !f.trim().is_empty()) {
            config.log_filter = filter;
        }
        Ok(config)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }

    /// Build the configured store
    pub fn open_store(&self) -> Arc<dyn KeyValueStore> {
        match self.store {
            StoreBackend::File => Arc::new(FileStore::new(&self.data_dir)),
            StoreBackend::Memory => Arc::new(MemoryStore::new()),
        }
    }
}
