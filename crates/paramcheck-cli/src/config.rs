//! Configuration management for the CLI
//!
//! This module handles loading configuration from:
//! - Default values
//! - Configuration files (YAML/JSON/TOML)
//! - Command-line arguments (applied by the caller)

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Output settings
    pub output: OutputConfig,

    /// Logging settings
    pub logging: LoggingConfig,

    /// Path settings
    pub paths: PathConfig,
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format (human, json, json-pretty, yaml)
    pub format: String,

    /// Use colored output by default
    pub color: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: Option<String>,

    /// Log format (compact, full, json)
    pub format: Option<String>,

    /// Log file path
    pub file: Option<PathBuf>,
}

/// Path configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PathConfig {
    /// Directory searched for schemas given by name
    pub schemas_dir: Option<PathBuf>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: "human".to_string(),
            color: true,
        }
    }
}

/// Extensions a configuration or schema file may carry, in lookup order
pub const FILE_EXTENSIONS: [&str; 4] = ["yaml", "yml", "json", "toml"];

impl Config {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path)?;

        let config = match path.extension().and_then(|s| s.to_str()) {
            Some("yaml") | Some("yml") => serde_yaml::from_str(&content)?,
            Some("toml") => toml::from_str(&content)?,
            Some("json") | None => serde_json::from_str(&content)?,
            Some(_) => {
                return Err(Error::InvalidFormat {
                    path: path.to_path_buf(),
                    expected: "YAML, JSON or TOML".to_string(),
                })
            }
        };

        tracing::debug!(path = %path.display(), "Loaded configuration file");
        Ok(config)
    }

    /// Load configuration from default locations
    pub fn load() -> Result<Self> {
        Self::load_from_paths(Self::default_config_paths())
    }

    /// Load the first existing file among `paths`.
    ///
    /// A file that exists but fails to parse is an error; this runs before
    /// logging is set up, so nothing would report a skipped file.
    fn load_from_paths(paths: Vec<PathBuf>) -> Result<Self> {
        match paths.into_iter().find(|path| path.exists()) {
            Some(path) => Self::from_file(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from a specific file or default locations
    pub fn load_with_file(file: Option<&Path>) -> Result<Self> {
        if let Some(path) = file {
            Self::from_file(path)
        } else {
            Self::load()
        }
    }

    /// Get default configuration file paths to check
    fn default_config_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        // Current directory
        for stem in [".paramcheck", "paramcheck"] {
            for ext in ["yaml", "json", "toml"] {
                paths.push(PathBuf::from(format!("{}.{}", stem, ext)));
            }
        }

        // User config directory
        if let Some(config_dir) = dirs::config_dir() {
            let paramcheck_dir = config_dir.join("paramcheck");
            for ext in ["yaml", "json", "toml"] {
                paths.push(paramcheck_dir.join(format!("config.{}", ext)));
            }
        }

        // Home directory
        if let Some(home_dir) = dirs::home_dir() {
            paths.push(home_dir.join(".paramcheck.yaml"));
            paths.push(home_dir.join(".paramcheck.json"));
        }

        paths
    }

    /// Resolve a `--schema` argument to a file.
    ///
    /// An existing path is used as is. Otherwise the argument is treated as a
    /// schema name and looked up in `paths.schemas_dir`, trying each known
    /// file extension.
    pub fn resolve_schema(&self, schema: &str) -> Result<PathBuf> {
        let direct = PathBuf::from(schema);
        if direct.is_file() {
            return Ok(direct);
        }

        let Some(dir) = &self.paths.schemas_dir else {
            return Err(Error::FileNotFound { path: direct });
        };

        let named = dir.join(schema);
        if named.is_file() {
            return Ok(named);
        }

        FILE_EXTENSIONS
            .iter()
            .map(|ext| dir.join(format!("{}.{}", schema, ext)))
            .find(|candidate| candidate.is_file())
            .ok_or_else(|| Error::SchemaNotFound {
                name: schema.to_string(),
                dir: dir.clone(),
            })
    }
}
