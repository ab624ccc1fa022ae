//! Validation pass over a whole schema
//!
//! Copyright (c) 2025 Paramcheck Team
//! Licensed under the Apache-2.0 license

use crate::error::ValidationResult;
use crate::parameter::Parameter;
use crate::schema::Schema;
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::debug;

/// Validate `source` against every field of `schema`, in declaration order.
///
/// The first failing parameter aborts the pass. Accepted values of fields
/// marked for output are collected under their schema names.
pub fn validate(schema: &Schema, source: &Value) -> ValidationResult<Map<String, Value>> {
    let mut output = Map::new();

    for (name, field) in schema.iter() {
        let parameter = Parameter::new(name, field);
        let value = parameter.validate(source).inspect_err(|error| {
            debug!(parameter = name, kind = error.kind(), "Validation failed: {}", error);
        })?;

        if field.include_in_output {
            output.insert(name.to_string(), value);
        }
    }

    Ok(output)
}

/// A reusable validator sharing one immutable schema
#[derive(Debug, Clone)]
pub struct Validator {
    schema: Arc<Schema>,
}

impl Validator {
    pub fn new(schema: Schema) -> Self {
        Self {
            schema: Arc::new(schema),
        }
    }

    pub fn from_shared(schema: Arc<Schema>) -> Self {
        Self { schema }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Run one validation pass
    pub fn validate(&self, source: &Value) -> ValidationResult<Map<String, Value>> {
        validate(&self.schema, source)
    }
}

impl From<Schema> for Validator {
    fn from(schema: Schema) -> Self {
        Self::new(schema)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use crate::schema::{FieldSchema, ParamType};
    use serde_json::json;

    fn schema() -> Schema {
        Schema::new()
            .field("name", FieldSchema::required(ParamType::String).with_path("body.name"))
            .field("page", FieldSchema::optional(ParamType::Number, json!(1)).with_path("query.page"))
            .field(
                "token",
                FieldSchema::required(ParamType::String)
                    .with_path("headers.token")
                    .include_in_output(false),
            )
    }

    #[test]
    fn test_output_mapping() {
        let source = json!({
            "body": {"name": "ada"},
            "query": {"page": "3"},
            "headers": {"token": "t"}
        });

        let output = validate(&schema(), &source).unwrap();
        assert_eq!(Value::Object(output), json!({"name": "ada", "page": 3}));
    }

    #[test]
    fn test_output_follows_schema_order() {
        let source = json!({"body": {"name": "ada"}, "headers": {"token": "t"}});
        let output = validate(&schema(), &source).unwrap();
        let keys: Vec<&String> = output.keys().collect();
        assert_eq!(keys, vec!["name", "page"]);
    }

    #[test]
    fn test_fail_fast_on_first_error() {
        let source = json!({"query": {"page": "x"}});
        assert_eq!(
            validate(&schema(), &source),
            Err(ValidationError::type_mismatch("body.name", ParamType::String))
        );
    }

    #[test]
    fn test_excluded_fields_still_validated() {
        let source = json!({"body": {"name": "ada"}, "headers": {}});
        assert_eq!(
            validate(&schema(), &source),
            Err(ValidationError::type_mismatch("headers.token", ParamType::String))
        );
    }

    #[test]
    fn test_validator_is_reusable() {
        let validator = Validator::from(schema());
        let ok = json!({"body": {"name": "a"}, "headers": {"token": "t"}});
        assert!(validator.validate(&ok).is_ok());
        assert!(validator.validate(&json!({})).is_err());
        assert!(validator.validate(&ok).is_ok());
        assert_eq!(validator.schema().len(), 3);
    }
}
