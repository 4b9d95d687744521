//! Error types for schema generation and function invocation.

use thiserror::Error;

/// An owned dynamically typed error.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Error types for GPT functions.
///
/// Only [`FunctionError::UnsupportedType`] can be raised while generating a schema.
/// Missing parameter documentation is reported as a
/// [`Diagnostic`](crate::extractor::Diagnostic) instead.
#[derive(Debug, Error)]
pub enum FunctionError {
    /// A parameter is declared with a type outside of the supported set.
    #[error("unexpected type found while parsing parameter type: {0}")]
    UnsupportedType(String),
    /// The arguments can not be decoded into the callable's argument type.
    #[error("invalid arguments: {0}")]
    InvalidArguments(String),
    /// Function not found in registry.
    #[error("function `{0}` not found in registry")]
    FunctionNotFound(String),
    /// Function has already been registered under the same name.
    #[error("function `{0}` is already registered")]
    DuplicateFunction(String),
    /// The wrapped callable failed.
    #[error("function execution failed: {0}")]
    Execution(#[source] BoxError),
    /// JSON serialization or deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// The configuration can not be parsed.
    #[error("configuration error: {0}")]
    Config(#[from] toml::de::Error),
}

impl FunctionError {
    /// Returns the error raised by the wrapped callable, if any.
    pub fn execution_source(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        match self {
            FunctionError::Execution(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

/// Result type for GPT functions.
pub type FunctionResult<T> = Result<T, FunctionError>;
