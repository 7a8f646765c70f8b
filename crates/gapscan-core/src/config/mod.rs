//! Configuration management for gapscan.
//!
//! Configuration is loaded from multiple sources with the following priority:
//! 1. Environment variables (highest priority)
//! 2. Project-local `gapscan.toml` file
//! 3. User config `~/.config/gapscan/config.toml`
//! 4. Built-in defaults (lowest priority)

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

mod defaults;

pub use defaults::*;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Catalogue location.
    pub catalog: CatalogConfig,

    /// Template discovery settings.
    pub discovery: DiscoveryConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog: CatalogConfig::default(),
            discovery: DiscoveryConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from default locations.
    ///
    /// Searches for config in order:
    /// 1. `./gapscan.toml` (project local)
    /// 2. `~/.config/gapscan/config.toml` (user config)
    /// 3. Falls back to defaults
    ///
    /// Environment overrides apply on every path.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = if Path::new(PROJECT_CONFIG_FILE).exists() {
            Self::from_file(PROJECT_CONFIG_FILE)?
        } else if let Some(user_config) = Self::user_config_path().filter(|p| p.exists()) {
            Self::from_file(user_config)?
        } else {
            Self::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Load configuration from a specific file, without env overrides.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("gapscan").join("config.toml"))
    }

    /// Apply environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if let Ok(path) = std::env::var("GAPSCAN_CATALOG") {
            self.catalog.path = path;
        }
        if let Ok(extensions) = std::env::var("GAPSCAN_TEMPLATE_EXTENSIONS") {
            let extensions: Vec<String> = extensions
                .split(',')
                .map(|ext| ext.trim().trim_start_matches('.').to_string())
                .filter(|ext| !ext.is_empty())
                .collect();
            if !extensions.is_empty() {
                self.discovery.include_extensions = extensions;
            }
        }
    }

    /// Create a default config file content as a string.
    pub fn default_config_string() -> String {
        toml::to_string_pretty(&Config::default()).unwrap_or_default()
    }
}

/// Catalogue configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Path to the catalogue file.
    pub path: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: DEFAULT_CATALOG_FILE.to_string(),
        }
    }
}

/// Template discovery configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    /// File extensions to treat as templates (without leading dot).
    pub include_extensions: Vec<String>,

    /// Directories to exclude from scanning.
    pub exclude_dirs: Vec<String>,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            include_extensions: DEFAULT_TEMPLATE_EXTENSIONS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            exclude_dirs: DEFAULT_EXCLUDE_DIRS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.catalog.path, DEFAULT_CATALOG_FILE);
        assert!(config
            .discovery
            .include_extensions
            .iter()
            .any(|ext| ext == "yaml"));
    }

    #[test]
    fn test_config_to_toml() {
        let toml_str = Config::default_config_string();
        assert!(toml_str.contains("[catalog]"));
        assert!(toml_str.contains("[discovery]"));
    }

    #[test]
    fn test_config_from_toml() {
        let toml_str = r#"
[catalog]
path = "fixtures/patterns.json"

[discovery]
include_extensions = ["yml"]
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.catalog.path, "fixtures/patterns.json");
        assert_eq!(config.discovery.include_extensions, vec!["yml"]);
        // Unspecified sections keep their defaults.
        assert!(!config.discovery.exclude_dirs.is_empty());
    }
}
