//! Shared error type for shelfsync
//!
//! Errors are classified by severity so callers can decide between retrying,
//! reporting per-account, and aborting:
//! - **Recoverable**: safe to retry (network hiccups, locked database)
//! - **Degraded**: the operation failed but the application continues
//! - **Fatal**: requires operator intervention (corrupted store, bad config)

use std::fmt;
use std::io;
use thiserror::Error;

/// Error severity classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    /// Error can be automatically recovered from
    Recoverable,
    /// Operation failed but the application can continue
    Degraded,
    /// Critical error requiring operator action
    Fatal,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Recoverable => write!(f, "Recoverable"),
            Self::Degraded => write!(f, "Degraded"),
            Self::Fatal => write!(f, "Fatal"),
        }
    }
}

/// Main error type for shelfsync
#[derive(Error, Debug)]
pub enum AppError {
    /// Network request failed
    #[error("Network error: {message}")]
    Network {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Database operation failed
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Record not found in the local store
    #[error("Record not found: {entity} with {identifier}")]
    RecordNotFound { entity: String, identifier: String },

    /// General I/O error
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: io::Error,
    },

    /// Operation cancelled by the caller
    #[error("Operation cancelled: {operation}")]
    Cancelled { operation: String },

    /// Invalid argument provided
    #[error("Invalid argument: {argument} - {reason}")]
    InvalidArgument { argument: String, reason: String },

    /// Generic internal error
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl AppError {
    /// Returns the severity level of this error
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Network { .. } => ErrorSeverity::Recoverable,
            Self::Database { .. } | Self::Io { .. } => ErrorSeverity::Fatal,
            Self::RecordNotFound { .. }
            | Self::Cancelled { .. }
            | Self::InvalidArgument { .. }
            | Self::Internal { .. } => ErrorSeverity::Degraded,
        }
    }

    /// Returns true if this error can be automatically retried
    pub fn is_retryable(&self) -> bool {
        self.severity() == ErrorSeverity::Recoverable
    }

    /// Helper to create a network error from any error type
    pub fn network<E: std::error::Error + Send + Sync + 'static>(
        message: impl Into<String>,
        source: E,
    ) -> Self {
        Self::Network {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Helper to create a database error from any error type
    pub fn database<E: std::error::Error + Send + Sync + 'static>(
        message: impl Into<String>,
        source: E,
    ) -> Self {
        Self::Database {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Helper to create a not-found error for a library book
    pub fn book_not_found(identifier: impl Into<String>) -> Self {
        Self::RecordNotFound {
            entity: "LibraryBook".to_string(),
            identifier: identifier.into(),
        }
    }
}

/// Convenience type alias for Results using AppError
pub type Result<T> = std::result::Result<T, AppError>;

impl From<io::Error> for AppError {
    fn from(err: io::Error) -> Self {
        Self::Io {
            message: err.to_string(),
            source: err,
        }
    }
}
