use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::types::StoreConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read store config '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Store config '{path}' is not valid TOML: {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid store config: {message}")]
    ValidationError { message: String },
}

impl StoreConfig {
    /// `slicestore/config.toml` under the platform config dir, or under `.`
    /// when there is none.
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("slicestore")
            .join("config.toml")
    }

    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    /// Read and validate `path`. A missing file yields the defaults; fields
    /// absent from the file keep theirs.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No store config, using defaults");
            return Ok(StoreConfig::default());
        }

        let text = fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
            path: path.to_path_buf(),
            source,
        })?;
        let config: StoreConfig =
            toml::from_str(&text).map_err(|source| ConfigError::ParseError {
                path: path.to_path_buf(),
                source,
            })?;

        config.validate()?;
        tracing::debug!(path = %path.display(), store = %config.store.name, "Loaded store config");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.store.name.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                message: "store.name is blank".to_string(),
            });
        }
        Ok(())
    }
}
