//! Error types for the task store and list controller.

use std::path::PathBuf;

use thiserror::Error;
use uuid::Uuid;

/// Error type for all store, gateway and controller operations.
#[derive(Error, Debug)]
pub enum OwlError {
    /// Database connection or query errors
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// Task not found for the given ID
    #[error("Task with ID {id} not found")]
    TaskNotFound { id: Uuid },
    /// Task list not found for the given ID
    #[error("Task list with ID {id} not found")]
    TasklistNotFound { id: Uuid },
    /// A task with this ID is already stored
    #[error("Task with ID {id} already exists")]
    TaskExists { id: Uuid },
    /// A task list with this ID is already stored
    #[error("Task list with ID {id} already exists")]
    TasklistExists { id: Uuid },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// Configuration and runtime errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Builder for creating database errors with optional context.
pub struct DatabaseErrorBuilder {
    message: String,
}

impl DatabaseErrorBuilder {
    /// Create a new database error builder with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Build the error with the given source.
    pub fn with_source(self, source: rusqlite::Error) -> OwlError {
        OwlError::Database {
            message: self.message,
            source,
        }
    }
}

/// Builder for creating input validation errors.
pub struct InvalidInputBuilder {
    field: String,
}

impl InvalidInputBuilder {
    /// Create a new invalid input error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> OwlError {
        OwlError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl OwlError {
    /// Creates a builder for database errors.
    pub fn database(message: impl Into<String>) -> DatabaseErrorBuilder {
        DatabaseErrorBuilder::new(message)
    }

    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }

    /// Wraps a failed join of a blocking or spawned task.
    pub(crate) fn join(source: tokio::task::JoinError) -> Self {
        OwlError::Configuration {
            message: format!("Task join error: {source}"),
        }
    }

    /// Returns true for the not-found variants.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            OwlError::TaskNotFound { .. } | OwlError::TasklistNotFound { .. }
        )
    }
}

/// Specialized extension trait for database-related Results.
pub trait DatabaseResultExt<T> {
    /// Map database errors with a message.
    fn db_context(self, message: &str) -> Result<T>;
}

impl<T> DatabaseResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn db_context(self, message: &str) -> Result<T> {
        self.map_err(|e| OwlError::database(message).with_source(e))
    }
}

/// Result type alias for store and controller operations
pub type Result<T> = std::result::Result<T, OwlError>;
