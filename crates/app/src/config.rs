use std::{
    io,
    path::{Path, PathBuf},
};

use ascent_domain::HomeTestConfig;
use log::LevelFilter;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub home_test: HomeTestConfig,
    pub log_level: LevelFilter,
    pub data_dir: Option<PathBuf>,
}

impl Config {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads the configuration from a JSON file. A missing file results in the default
    /// configuration.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(json) => Self::from_json(&json),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                log::info!("no configuration at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(source) => Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            home_test: HomeTestConfig::default(),
            log_level: LevelFilter::Info,
            data_dir: None,
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },
    #[error("invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),
}
