//! Request adapter around the validation engine
//!
//! [`RequestValidator`] validates a [`RequestContext`] and, on success,
//! attaches the output mapping to the context's `dto` field. On failure it
//! either hands the error to a caller-supplied handler or logs it and
//! answers with the error's default status.
//!
//! Copyright (c) 2025 Paramcheck Team
//! Licensed under the Apache-2.0 license

use crate::error::ValidationError;
use crate::schema::Schema;
use crate::validate::Validator;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;

/// A request-like value to validate
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequestContext {
    /// The document parameter paths are resolved against
    pub source: Value,
    /// Accepted parameters, set after successful validation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dto: Option<Map<String, Value>>,
}

impl RequestContext {
    pub fn new(source: Value) -> Self {
        Self { source, dto: None }
    }
}

/// Why a request was turned away
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rejection {
    /// HTTP-equivalent status code
    pub status: u16,
    pub error: ValidationError,
    /// Optional response body produced by an error handler
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
}

impl Rejection {
    /// Rejection with the error's own status and no body
    pub fn from_error(error: ValidationError) -> Self {
        Self {
            status: error.status(),
            error,
            body: None,
        }
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.error, self.status)
    }
}

/// Caller-supplied mapping from a validation failure to a rejection
pub type ErrorHandler = dyn Fn(ValidationError) -> Rejection + Send + Sync;

/// Validates requests against a shared schema
#[derive(Clone)]
pub struct RequestValidator {
    validator: Validator,
    on_error: Option<Arc<ErrorHandler>>,
}

impl RequestValidator {
    pub fn new(schema: Schema) -> Self {
        Self {
            validator: Validator::new(schema),
            on_error: None,
        }
    }

    /// Route failures through `handler` instead of the default logging rejection
    pub fn with_error_handler<F>(mut self, handler: F) -> Self
    where
        F: Fn(ValidationError) -> Rejection + Send + Sync + 'static,
    {
        let handler: Arc<ErrorHandler> = Arc::new(handler);
        self.on_error = Some(handler);
        self
    }

    pub fn schema(&self) -> &Schema {
        self.validator.schema()
    }

    /// Validate `request`, attaching the accepted parameters on success
    pub fn process(&self, request: &mut RequestContext) -> Result<(), Rejection> {
        match self.validator.validate(&request.source) {
            Ok(output) => {
                request.dto = Some(output);
                Ok(())
            }
            Err(error) => Err(self.reject(error)),
        }
    }

    fn reject(&self, error: ValidationError) -> Rejection {
        match &self.on_error {
            Some(handler) => {
                tracing::warn!(kind = error.kind(), path = error.path(), "Request rejected");
                (**handler)(error)
            }
            None => {
                tracing::error!(
                    kind = error.kind(),
                    path = error.path(),
                    status = error.status(),
                    "Request validation failed: {}",
                    error
                );
                Rejection::from_error(error)
            }
        }
    }
}

impl fmt::Debug for RequestValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestValidator")
            .field("validator", &self.validator)
            .field("custom_error_handler", &self.on_error.is_some())
            .finish()
    }
}
