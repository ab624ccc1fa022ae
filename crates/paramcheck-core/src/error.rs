//! Error types for parameter validation and schema loading
//!
//! Validation failures are fail-fast: the first parameter that does not
//! satisfy its field schema aborts the pass with one [`ValidationError`].
//! Every variant is a client-error classification (status 400), whether it
//! was caused by a schema authoring mistake or by bad input.
//!
//! Copyright (c) 2025 Paramcheck Team
//! Licensed under the Apache-2.0 license

use crate::schema::ParamType;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Status classification shared by every validation failure
pub const DEFAULT_STATUS: u16 = 400;

/// A single validation failure, scoped to the path of the offending parameter
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationError {
    /// A field schema (or nested item schema) declares no type
    #[error("Property type is required in {path}")]
    MissingSchemaType { path: String },

    /// The resolved value does not satisfy the declared type
    #[error("Invalid type in {path}, expected {expected}")]
    TypeMismatch { path: String, expected: ParamType },

    /// The stringified value does not match the configured regex
    #[error("Invalid regex match in {path}")]
    PatternMismatch { path: String },

    /// The configured regex cannot be compiled
    #[error("Invalid regex '{pattern}' in {path}: {reason}")]
    InvalidPattern {
        path: String,
        pattern: String,
        reason: String,
    },
}

impl ValidationError {
    pub fn missing_type(path: impl Into<String>) -> Self {
        Self::MissingSchemaType { path: path.into() }
    }

    pub fn type_mismatch(path: impl Into<String>, expected: ParamType) -> Self {
        Self::TypeMismatch {
            path: path.into(),
            expected,
        }
    }

    pub fn pattern_mismatch(path: impl Into<String>) -> Self {
        Self::PatternMismatch { path: path.into() }
    }

    pub fn invalid_pattern(
        path: impl Into<String>,
        pattern: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidPattern {
            path: path.into(),
            pattern: pattern.into(),
            reason: reason.into(),
        }
    }

    /// Path of the parameter that failed
    pub fn path(&self) -> &str {
        match self {
            Self::MissingSchemaType { path }
            | Self::TypeMismatch { path, .. }
            | Self::PatternMismatch { path }
            | Self::InvalidPattern { path, .. } => path,
        }
    }

    /// Stable, machine-readable name of the failure kind
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingSchemaType { .. } => "missing_schema_type",
            Self::TypeMismatch { .. } => "type_mismatch",
            Self::PatternMismatch { .. } => "pattern_mismatch",
            Self::InvalidPattern { .. } => "invalid_pattern",
        }
    }

    /// HTTP-equivalent status code for this failure
    pub fn status(&self) -> u16 {
        DEFAULT_STATUS
    }
}

/// Result type for validation operations
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Errors raised while loading a schema document
#[derive(Error, Debug)]
pub enum SchemaError {
    /// JSON parsing errors
    #[error("Invalid JSON schema: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("Invalid YAML schema: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// TOML parsing errors
    #[error("Invalid TOML schema: {0}")]
    Toml(#[from] toml::de::Error),

    /// IO errors while reading a schema file
    #[error("Failed to read schema {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ValidationError::missing_type("tags[0]").to_string(),
            "Property type is required in tags[0]"
        );
        assert_eq!(
            ValidationError::type_mismatch("user.age", ParamType::Number).to_string(),
            "Invalid type in user.age, expected number"
        );
        assert_eq!(
            ValidationError::pattern_mismatch("name").to_string(),
            "Invalid regex match in name"
        );
    }

    #[test]
    fn test_uniform_contract() {
        let errors = vec![
            ValidationError::missing_type("a"),
            ValidationError::type_mismatch("b", ParamType::Array),
            ValidationError::pattern_mismatch("c"),
            ValidationError::invalid_pattern("d", "(", "unclosed group"),
        ];

        for error in &errors {
            assert_eq!(error.status(), 400);
        }
        let paths: Vec<&str> = errors.iter().map(|e| e.path()).collect();
        assert_eq!(paths, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_error_serialization() {
        let error = ValidationError::type_mismatch("ids[1]", ParamType::Number);
        let value = serde_json::to_value(&error).unwrap();
        assert_eq!(value["kind"], "type_mismatch");
        assert_eq!(value["path"], "ids[1]");
        assert_eq!(value["expected"], "number");
    }
}
