//! Unified error handling for tablesmith-core.
//!
//! Wraps domain and application errors behind one type that carries
//! user-actionable suggestions and a display category.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::{self, DomainError};

/// Root error type for tablesmith-core operations.
#[derive(Debug, Error, Clone)]
pub enum TableSmithError {
    /// Errors from the domain layer (schema and layout violations).
    #[error("{0}")]
    Domain(#[from] DomainError),

    /// Errors from the application layer (ports and orchestration).
    #[error("{0}")]
    Application(#[from] ApplicationError),

    /// Configuration or setup errors.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl TableSmithError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Configuration { .. } => vec![
                "Check tablesmith.toml and the TABLESMITH_* environment variables".into(),
                "Run: tablesmith config list".into(),
            ],
            Self::Internal { .. } => vec![
                "This appears to be a bug in tablesmith".into(),
                "Please report this issue at: https://github.com/cosecruz/tablesmith/issues".into(),
            ],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                domain::ErrorCategory::Validation => ErrorCategory::Validation,
                domain::ErrorCategory::Schema => ErrorCategory::Schema,
                domain::ErrorCategory::NotFound => ErrorCategory::NotFound,
                domain::ErrorCategory::Internal => ErrorCategory::Internal,
            },
            Self::Application(e) => e.category(),
            Self::Configuration { .. } => ErrorCategory::Configuration,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Schema,
    NotFound,
    Connectivity,
    Configuration,
    Internal,
}

/// Convenient result type alias.
pub type TsResult<T> = Result<T, TableSmithError>;

/// Extension trait for adding context to errors.
pub trait Context<T> {
    /// Turn any error into an internal error prefixed with `msg`.
    fn context(self, msg: impl Into<String>) -> TsResult<T>;
}

impl<T, E> Context<T> for Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn context(self, msg: impl Into<String>) -> TsResult<T> {
        self.map_err(|e| TableSmithError::Internal {
            message: format!("{}: {}", msg.into(), e),
        })
    }
}
