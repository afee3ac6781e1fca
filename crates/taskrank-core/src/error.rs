//! Core error types for taskrank-core.
//!
//! Scoring and ranking are infallible. Errors only arise at the edges:
//! loading configuration, receiving a record that is not a mapping of
//! named fields, and boundary validation of user-supplied tasks.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for taskrank-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Record shape errors
    #[error("Record error: {0}")]
    Record(#[from] RecordError),

    /// Tasks in a batch broke the field rules
    #[error("{invalid} of {total} task(s) failed validation")]
    Validation { invalid: usize, total: usize },

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Key does not exist in the configuration tree
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

/// A record handed to the engine is not shaped like a task.
#[derive(Error, Debug)]
pub enum RecordError {
    /// Expected a mapping of named fields
    #[error("Expected a task object, found {found}")]
    NotAnObject { found: &'static str },

    /// Expected a list of tasks
    #[error("Expected a list of tasks, found {found}")]
    NotABatch { found: &'static str },

    /// One element of a batch is malformed
    #[error("Task at index {index}: {source}")]
    InBatch {
        index: usize,
        #[source]
        source: Box<RecordError>,
    },
}

/// Field-level validation errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Required field is absent or null
    #[error("This field is required.")]
    MissingField { field: String },

    /// Invalid value
    #[error("{message}")]
    InvalidValue { field: String, message: String },

    /// The task itself is not a mapping
    #[error("Invalid data. Expected a dictionary, but got {found}.")]
    NotAnObject { found: &'static str },
}

impl ValidationError {
    /// Field the error is attached to; shape errors report `non_field_errors`.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::MissingField { field } => field,
            ValidationError::InvalidValue { field, .. } => field,
            ValidationError::NotAnObject { .. } => "non_field_errors",
        }
    }
}

/// Short JSON type name used in error messages.
pub(crate) fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "list",
        serde_json::Value::Object(_) => "object",
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
