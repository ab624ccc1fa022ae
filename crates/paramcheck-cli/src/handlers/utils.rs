//! Shared utilities for command handlers

use crate::config::Config;
use crate::error::{Error, Result};
use paramcheck_core::Schema;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Load a JSON or YAML document, choosing the parser by file extension
pub fn load_document(path: &Path) -> Result<Value> {
    if !path.exists() {
        return Err(Error::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = fs::read_to_string(path)?;
    debug!(path = %path.display(), bytes = content.len(), "Read input document");

    let is_yaml = path
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s == "yaml" || s == "yml")
        .unwrap_or(false);

    if is_yaml {
        serde_yaml::from_str(&content).map_err(|_| Error::InvalidFormat {
            path: path.to_path_buf(),
            expected: "YAML".to_string(),
        })
    } else {
        serde_json::from_str(&content).map_err(|_| Error::InvalidFormat {
            path: path.to_path_buf(),
            expected: "JSON".to_string(),
        })
    }
}

/// Locate and load a schema given as a path or as a name in the schemas directory
pub fn load_schema(schema: &str, config: &Config) -> Result<(PathBuf, Schema)> {
    let path = config.resolve_schema(schema)?;
    let loaded = Schema::from_path(&path)?;
    debug!(path = %path.display(), fields = loaded.len(), "Loaded schema");
    Ok((path, loaded))
}
