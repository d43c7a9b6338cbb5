//! Error types for the configuration system

use std::path::PathBuf;
use thiserror::Error;

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that can occur during configuration operations
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file at {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to write config file
    #[error("Failed to write config file at {path}: {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Config file exists but is not a well-formed document
    #[error("Invalid configuration format in {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// Failed to serialize config
    #[error("Failed to serialize config: {0}")]
    SerializeError(#[source] serde_json::Error),

    /// Config contains values that break a field rule
    #[error("Config validation failed: {}", join_errors(.0))]
    ValidationError(Vec<ValidationError>),

    /// Failed to create config directory
    #[error("Failed to create config directory at {path}: {source}")]
    DirectoryCreationError {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Config file does not exist
    #[error("Configuration file does not exist: {path}")]
    MissingFile { path: PathBuf },

    /// No document has been loaded into the store yet
    #[error("Configuration not initialized")]
    NotInitialized,

    /// Caller-supplied document could not be bound
    #[error("Invalid request body: {0}")]
    BadInput(#[source] serde_json::Error),

    /// A thread panicked while holding the configuration lock
    #[error("Configuration lock is poisoned")]
    LockPoisoned,

    /// Generic I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Coarse classification of a [`ConfigError`]
///
/// Callers translating errors into user-facing responses match on this
/// rather than on individual variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Io,
    Format,
    Constraint,
    NotInitialized,
    BadInput,
    MissingFile,
}

impl ConfigError {
    /// Returns the kind of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            ConfigError::ReadError { .. }
            | ConfigError::WriteError { .. }
            | ConfigError::DirectoryCreationError { .. }
            | ConfigError::LockPoisoned
            | ConfigError::IoError(_) => ErrorKind::Io,
            ConfigError::ParseError { .. } | ConfigError::SerializeError(_) => ErrorKind::Format,
            ConfigError::ValidationError(_) => ErrorKind::Constraint,
            ConfigError::NotInitialized => ErrorKind::NotInitialized,
            ConfigError::BadInput(_) => ErrorKind::BadInput,
            ConfigError::MissingFile { .. } => ErrorKind::MissingFile,
        }
    }

    /// Returns the validation errors carried by this error, if any
    pub fn validation_errors(&self) -> &[ValidationError] {
        match self {
            ConfigError::ValidationError(errors) => errors,
            _ => &[],
        }
    }
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Validation error for a specific config field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Path to the field (e.g., "app.maxPageSize")
    pub field: String,

    /// Human-readable error message
    pub message: String,

    /// The invalid value, if available
    pub value: Option<String>,
}

impl ValidationError {
    /// Creates a new validation error
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            value: None,
        }
    }

    /// Creates a validation error with the invalid value
    pub fn with_value(
        field: impl Into<String>,
        message: impl Into<String>,
        value: impl ToString,
    ) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            value: Some(value.to_string()),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Field '{}': {}", self.field, self.message)?;
        if let Some(ref value) = self.value {
            write!(f, " (got: {})", value)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}
