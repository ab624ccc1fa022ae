//! Single-parameter validation pipeline
//!
//! A [`Parameter`] binds one field schema to a path and runs
//! extract → default → type check/coercion → regex → array items
//! against a source document. It lives for exactly one validation call;
//! array elements get their own short-lived `Parameter` each.
//!
//! Copyright (c) 2025 Paramcheck Team
//! Licensed under the Apache-2.0 license

use crate::error::{ValidationError, ValidationResult};
use crate::path::{index_path, ParamPath};
use crate::pattern::Pattern;
use crate::schema::{FieldSchema, ParamType, Presence};
use serde_json::{Number, Value};
use tracing::{debug, trace};

/// Largest integer an `f64` holds exactly
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// One schema-bound value to validate
#[derive(Debug, Clone)]
pub struct Parameter<'s> {
    name: String,
    path: String,
    schema: &'s FieldSchema,
}

impl<'s> Parameter<'s> {
    /// Bind `schema` to the parameter `name`; the path defaults to the name
    pub fn new(name: impl Into<String>, schema: &'s FieldSchema) -> Self {
        let name = name.into();
        let path = schema.path.clone().unwrap_or_else(|| name.clone());
        Self { name, path, schema }
    }

    /// Parameter for the element at `index` of this (array) parameter.
    ///
    /// The element path is always `<parent path>[index]`, whatever path the
    /// item schema itself declares.
    fn element(&self, index: usize, schema: &'s FieldSchema) -> Parameter<'s> {
        Parameter {
            name: index.to_string(),
            path: index_path(&self.path, index),
            schema,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn schema(&self) -> &FieldSchema {
        self.schema
    }

    pub fn is_required(&self) -> bool {
        self.schema.is_required()
    }

    /// Declared type, or a missing-type error scoped to this path
    pub fn param_type(&self) -> ValidationResult<ParamType> {
        self.schema
            .param_type
            .ok_or_else(|| ValidationError::missing_type(&self.path))
    }

    /// Value found at this parameter's path, if any
    pub fn extract(&self, source: &Value) -> Option<Value> {
        ParamPath::parse(&self.path).resolve(source).cloned()
    }

    /// Replace an absent or null value with the default of an optional parameter
    pub fn apply_default(&self, value: Option<Value>) -> Option<Value> {
        match (&self.schema.presence, value) {
            (Presence::Optional { default }, None | Some(Value::Null)) => {
                trace!(path = %self.path, "Applying default value");
                Some(default.clone())
            }
            (_, value) => value,
        }
    }

    /// Check `value` against `expected`, coercing numeric strings for `number`
    pub fn check_type(&self, expected: ParamType, value: Option<Value>) -> ValidationResult<Value> {
        let mismatch = || ValidationError::type_mismatch(&self.path, expected);

        let value = match value {
            Some(Value::Null) if !self.is_required() => return Ok(Value::Null),
            None | Some(Value::Null) => return Err(mismatch()),
            Some(value) => value,
        };

        match expected {
            ParamType::Number => coerce_number(&value).map(Value::Number).ok_or_else(mismatch),
            _ if type_of(&value) == Some(expected) => Ok(value),
            _ => Err(mismatch()),
        }
    }

    /// Apply the configured regex constraint, if any
    pub fn check_pattern(&self, value: &Value) -> ValidationResult<()> {
        self.match_pattern(value, &mut None)
    }

    /// Match against the regex constraint, compiling it into `compiled` on
    /// first use so sibling elements share one compiled pattern.
    fn match_pattern(&self, value: &Value, compiled: &mut Option<Pattern>) -> ValidationResult<()> {
        let Some(constraint) = self.schema.regex.as_deref() else {
            return Ok(());
        };

        let pattern = match compiled.take() {
            Some(pattern) => pattern,
            None => Pattern::compile(constraint).map_err(|reason| {
                ValidationError::invalid_pattern(&self.path, constraint, reason)
            })?,
        };
        let matched = pattern.matches(value);
        *compiled = Some(pattern);

        if matched {
            Ok(())
        } else {
            Err(ValidationError::pattern_mismatch(&self.path))
        }
    }

    /// Run the full pipeline and return the accepted value
    pub fn validate(&self, source: &Value) -> ValidationResult<Value> {
        self.validate_with(source, &mut None)
    }

    fn validate_with(&self, source: &Value, compiled: &mut Option<Pattern>) -> ValidationResult<Value> {
        let expected = self.param_type()?;

        let resolved = self.apply_default(self.extract(source));
        let mut value = self.check_type(expected, resolved)?;
        self.match_pattern(&value, compiled)?;

        if let (Some(items), Value::Array(elements)) = (self.schema.items.as_deref(), &mut value) {
            self.validate_elements(items, elements, source)?;
        }

        debug!(parameter = %self.name, path = %self.path, "Parameter accepted");
        Ok(value)
    }

    /// Validate every element against `items`, resolving each from the root source
    fn validate_elements(
        &self,
        items: &'s FieldSchema,
        elements: &mut [Value],
        source: &Value,
    ) -> ValidationResult<()> {
        let mut item_pattern = None;
        for (index, element) in elements.iter_mut().enumerate() {
            *element = self
                .element(index, items)
                .validate_with(source, &mut item_pattern)?;
        }
        Ok(())
    }
}

/// The type tag of a JSON value; `None` for `null`
pub fn type_of(value: &Value) -> Option<ParamType> {
    match value {
        Value::Null => None,
        Value::Bool(_) => Some(ParamType::Boolean),
        Value::Number(_) => Some(ParamType::Number),
        Value::String(_) => Some(ParamType::String),
        Value::Array(_) => Some(ParamType::Array),
        Value::Object(_) => Some(ParamType::Object),
    }
}

/// Interpret a value as a number.
///
/// Numbers pass through. Strings are trimmed and parsed as decimal numbers;
/// empty and non-finite results are rejected. Integral results within the
/// exactly-representable range become integers.
pub fn coerce_number(value: &Value) -> Option<Number> {
    match value {
        Value::Number(n) => Some(n.clone()),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            let parsed: f64 = trimmed.parse().ok()?;
            if !parsed.is_finite() {
                return None;
            }
            if parsed.fract() == 0.0 && parsed.abs() <= MAX_SAFE_INTEGER {
                Some(Number::from(parsed as i64))
            } else {
                Number::from_f64(parsed)
            }
        }
        _ => None,
    }
}
