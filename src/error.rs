//! Error types for python-info operations.
//!
//! This module defines [`InfoError`], the primary error type used throughout
//! the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `InfoError` for domain-specific errors that need distinct handling
//! - Use `anyhow::Error` (via `InfoError::Other`) for unexpected errors
//! - Verification failures abort the run; there are no retries

use thiserror::Error;

/// Core error type for python-info operations.
#[derive(Debug, Error)]
pub enum InfoError {
    /// A mapping with no entries was handed to the report builder.
    #[error("Cannot render an empty mapping: no key column width")]
    EmptyMapping,

    /// External command failed.
    #[error("Command failed with exit code {code:?}: {command}")]
    CommandFailed { command: String, code: Option<i32> },

    /// The interpreter probe ran but its output was unusable.
    #[error("Interpreter probe failed for '{python}': {message}")]
    InterpreterProbe { python: String, message: String },

    /// A workflow context payload was not valid JSON.
    #[error("Invalid workflow context '{name}': {message}")]
    ContextParse { name: String, message: String },

    /// A command-line value could not be interpreted.
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    /// No line of the report matched an expected anchor.
    #[error("Check failed: no line matches {pattern}")]
    CheckFailed { pattern: String },

    /// A secret value was found in the report text.
    #[error("Secret from '{source_name}' appears in the report")]
    SecretLeaked { source_name: String },

    /// A secret that should be checked is not set in the environment.
    #[error("Secret variable '{name}' is not set")]
    MissingSecret { name: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for python-info operations.
pub type Result<T> = std::result::Result<T, InfoError>;
