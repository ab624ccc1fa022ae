//! Paramcheck Core - declarative request parameter validation
//!
//! Given a [`Schema`] (parameter name → [`FieldSchema`]) and a source
//! document, each parameter is extracted by its dotted/bracketed path,
//! defaulted, type checked (numeric strings are coerced for `number`),
//! matched against its regex and, for arrays, validated element by element.
//! The result is the mapping of accepted values, or the first
//! [`ValidationError`] encountered.
//!
//! # Main Components
//!
//! - **Schema**: field schemas loaded from JSON, YAML or TOML
//! - **Paths**: `user.tags[2]` style extraction
//! - **Patterns**: bare or `/pattern/flags` regex constraints
//! - **Parameter**: the per-field validation pipeline
//! - **Adapter**: request-level wrapper attaching results or rejecting
//!
//! # Example
//!
//! ```rust
//! use paramcheck_core::{validate, Schema};
//! use serde_json::json;
//!
//! let schema = Schema::from_value(json!({
//!     "page": {"type": "number", "path": "query.page", "default": 1},
//!     "tags": {"type": "array", "items": {"type": "string", "regex": "/^[a-z]+$/i"}}
//! })).unwrap();
//!
//! let output = validate(&schema, &json!({
//!     "query": {"page": "2"},
//!     "tags": ["Rust", "serde"]
//! })).unwrap();
//!
//! assert_eq!(output["page"], json!(2));
//! ```

pub mod adapter;
pub mod error;
pub mod parameter;
pub mod path;
pub mod pattern;
pub mod schema;
pub mod validate;

// Re-export main types for convenience
pub use adapter::{ErrorHandler, Rejection, RequestContext, RequestValidator};
pub use error::{SchemaError, ValidationError, ValidationResult, DEFAULT_STATUS};
pub use parameter::{coerce_number, type_of, Parameter};
pub use path::{resolve, ParamPath, PathSegment};
pub use pattern::{Pattern, PatternFlags};
pub use schema::{FieldSchema, ParamType, Presence, Schema};
pub use validate::{validate, Validator};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
