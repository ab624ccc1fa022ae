//! Field schema definitions and schema document loading
//!
//! A [`Schema`] is an ordered mapping from parameter name to [`FieldSchema`].
//! Documents are accepted as JSON, YAML or TOML:
//!
//! ```yaml
//! page:
//!   type: number
//!   path: query.page
//!   default: 1
//! tags:
//!   type: array
//!   items:
//!     type: string
//!     regex: "/^[a-z]+$/i"
//! ```
//!
//! Copyright (c) 2025 Paramcheck Team
//! Licensed under the Apache-2.0 license

use crate::error::{SchemaError, ValidationResult};
use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Closed set of types a parameter may declare
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    String,
    Number,
    Boolean,
    Object,
    Array,
}

impl ParamType {
    pub const ALL: [ParamType; 5] = [
        ParamType::String,
        ParamType::Number,
        ParamType::Boolean,
        ParamType::Object,
        ParamType::Array,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ParamType::String => "string",
            ParamType::Number => "number",
            ParamType::Boolean => "boolean",
            ParamType::Object => "object",
            ParamType::Array => "array",
        }
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ParamType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ParamType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("unknown parameter type '{}'", s))
    }
}

/// Whether a parameter must be present in the source
#[derive(Debug, Clone, PartialEq)]
pub enum Presence {
    /// No default configured; absent or null values are rejected
    Required,
    /// A default is configured (possibly `null`) and replaces absent or null values
    Optional { default: Value },
}

impl Presence {
    pub fn is_required(&self) -> bool {
        matches!(self, Presence::Required)
    }

    pub fn default_value(&self) -> Option<&Value> {
        match self {
            Presence::Required => None,
            Presence::Optional { default } => Some(default),
        }
    }
}

/// Validation rules for one parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawFieldSchema", into = "RawFieldSchema")]
pub struct FieldSchema {
    /// Declared type; `None` is reported as a missing type at validation time
    pub param_type: Option<ParamType>,
    /// Location override; the parameter name is used when absent
    pub path: Option<String>,
    pub presence: Presence,
    /// Schema applied to every element when `param_type` is `Array`
    pub items: Option<Box<FieldSchema>>,
    pub include_in_output: bool,
    pub regex: Option<String>,
}

impl FieldSchema {
    /// A required parameter of the given type
    pub fn required(param_type: ParamType) -> Self {
        Self {
            param_type: Some(param_type),
            path: None,
            presence: Presence::Required,
            items: None,
            include_in_output: true,
            regex: None,
        }
    }

    /// An optional parameter falling back to `default`
    pub fn optional(param_type: ParamType, default: Value) -> Self {
        Self {
            presence: Presence::Optional { default },
            ..Self::required(param_type)
        }
    }

    /// A schema with no declared type
    pub fn untyped() -> Self {
        Self {
            param_type: None,
            ..Self::required(ParamType::String)
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_regex(mut self, regex: impl Into<String>) -> Self {
        self.regex = Some(regex.into());
        self
    }

    pub fn with_items(mut self, items: FieldSchema) -> Self {
        self.items = Some(Box::new(items));
        self
    }

    pub fn with_default(mut self, default: Value) -> Self {
        self.presence = Presence::Optional { default };
        self
    }

    pub fn include_in_output(mut self, include: bool) -> Self {
        self.include_in_output = include;
        self
    }

    pub fn is_required(&self) -> bool {
        self.presence.is_required()
    }
}

/// Wire shape of a field schema; the presence of `default` decides `Presence`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawFieldSchema {
    #[serde(
        rename = "type",
        default,
        deserialize_with = "deserialize_param_type",
        skip_serializing_if = "Option::is_none"
    )]
    param_type: Option<ParamType>,
    #[serde(default, alias = "location", skip_serializing_if = "Option::is_none")]
    path: Option<String>,
    #[serde(
        default,
        alias = "defaultValue",
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    default: Option<Value>,
    #[serde(
        default,
        alias = "item",
        alias = "itemSchema",
        skip_serializing_if = "Option::is_none"
    )]
    items: Option<Box<FieldSchema>>,
    #[serde(default = "default_true", alias = "dto")]
    include_in_output: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    regex: Option<String>,
}

fn default_true() -> bool {
    true
}

/// Maps a present key to `Some`, even when its value is `null`
fn deserialize_present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// An empty or null `type` counts as missing; unknown names are rejected
fn deserialize_param_type<'de, D>(deserializer: D) -> Result<Option<ParamType>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(name) if name.is_empty() => Ok(None),
        Some(name) => name.parse().map(Some).map_err(de::Error::custom),
    }
}

impl From<RawFieldSchema> for FieldSchema {
    fn from(raw: RawFieldSchema) -> Self {
        let presence = match raw.default {
            Some(default) => Presence::Optional { default },
            None => Presence::Required,
        };
        Self {
            param_type: raw.param_type,
            path: raw.path,
            presence,
            items: raw.items,
            include_in_output: raw.include_in_output,
            regex: raw.regex,
        }
    }
}

impl From<FieldSchema> for RawFieldSchema {
    fn from(schema: FieldSchema) -> Self {
        let default = match schema.presence {
            Presence::Required => None,
            Presence::Optional { default } => Some(default),
        };
        Self {
            param_type: schema.param_type,
            path: schema.path,
            default,
            items: schema.items,
            include_in_output: schema.include_in_output,
            regex: schema.regex,
        }
    }
}

/// Ordered mapping from parameter name to field schema
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    fields: Vec<(String, FieldSchema)>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field, replacing any earlier field with the same name in place
    pub fn field(mut self, name: impl Into<String>, schema: FieldSchema) -> Self {
        self.insert(name, schema);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, schema: FieldSchema) {
        let name = name.into();
        match self.fields.iter_mut().find(|(existing, _)| *existing == name) {
            Some(slot) => slot.1 = schema,
            None => self.fields.push((name, schema)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&FieldSchema> {
        self.fields
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, schema)| schema)
    }

    /// Fields in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldSchema)> {
        self.fields.iter().map(|(name, schema)| (name.as_str(), schema))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Validate `source` against this schema
    pub fn validate(&self, source: &Value) -> ValidationResult<Map<String, Value>> {
        crate::validate::validate(self, source)
    }

    pub fn from_json_str(content: &str) -> Result<Self, SchemaError> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, SchemaError> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, SchemaError> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_value(value: Value) -> Result<Self, SchemaError> {
        Ok(serde_json::from_value(value)?)
    }

    /// Load a schema file, choosing the format from its extension (JSON by default)
    pub fn from_path(path: &Path) -> Result<Self, SchemaError> {
        let content = std::fs::read_to_string(path).map_err(|source| SchemaError::Io {
            path: path.display().to_string(),
            source,
        })?;

        match path.extension().and_then(|s| s.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml_str(&content),
            Some("toml") => Self::from_toml_str(&content),
            _ => Self::from_json_str(&content),
        }
    }
}

impl<'de> Deserialize<'de> for Schema {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct SchemaVisitor;

        impl<'de> Visitor<'de> for SchemaVisitor {
            type Value = Schema;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a mapping from parameter name to field schema")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Schema, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut schema = Schema::new();
                while let Some((name, field)) = access.next_entry::<String, FieldSchema>()? {
                    schema.insert(name, field);
                }
                Ok(schema)
            }
        }

        deserializer.deserialize_map(SchemaVisitor)
    }
}

impl Serialize for Schema {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, schema) in &self.fields {
            map.serialize_entry(name, schema)?;
        }
        map.end()
    }
}
