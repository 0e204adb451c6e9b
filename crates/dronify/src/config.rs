//! Configuration management for dronify.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::eligibility::RuleThresholds;
use crate::error::Result;

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default data directory name.
const DATA_DIR_NAME: &str = "dronify";

/// Default catalogue file name.
const CATALOGUE_FILE_NAME: &str = "catalogue.yaml";

/// Default taxonomy file name.
const TAXONOMY_FILE_NAME: &str = "taxonomy.yaml";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `DRONIFY_`, `__` separating
///    nesting: `DRONIFY_RULES__A1_MASS_LIMIT_G`)
/// 2. TOML config file at `~/.config/dronify/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Data file locations.
    pub data: DataConfig,
    /// Rule thresholds for the eligibility evaluator.
    pub rules: RuleThresholds,
}

/// Data file locations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Path to the drone catalogue YAML file.
    /// Defaults to `~/.local/share/dronify/catalogue.yaml`
    pub catalogue_path: Option<PathBuf>,
    /// Path to the taxonomy YAML file.
    /// Defaults to `~/.local/share/dronify/taxonomy.yaml`
    pub taxonomy_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// Configuration is loaded in this order (later sources override earlier):
    /// 1. Default values
    /// 2. TOML config file (if exists)
    /// 3. Environment variables (prefixed with `DRONIFY_`)
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed("DRONIFY_").split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(DATA_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Get the default data directory path.
    #[must_use]
    pub fn default_data_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from(".local/share"))
            .join(DATA_DIR_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        self.rules.validate()
    }

    /// Get the catalogue path, resolving defaults if not set.
    #[must_use]
    pub fn catalogue_path(&self) -> PathBuf {
        self.data
            .catalogue_path
            .clone()
            .unwrap_or_else(|| Self::default_data_dir().join(CATALOGUE_FILE_NAME))
    }

    /// Get the taxonomy path, resolving defaults if not set.
    #[must_use]
    pub fn taxonomy_path(&self) -> PathBuf {
        self.data
            .taxonomy_path
            .clone()
            .unwrap_or_else(|| Self::default_data_dir().join(TAXONOMY_FILE_NAME))
    }
}
