//! Application layer errors.
//!
//! Failures of orchestration and of the ports (metadata provider, filesystem).
//! Schema and layout violations are `DomainError` from `crate::domain`.

use std::error::Error as StdError;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur while talking to the outside world.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// The metadata source could not be reached.
    #[error("Cannot connect to {target}: {source}")]
    Connectivity {
        target: String,
        #[source]
        source: Arc<dyn StdError + Send + Sync>,
    },

    /// No metadata driver is available for the requested source.
    #[error("No metadata driver available for '{driver}'")]
    DriverUnavailable { driver: String },

    /// A metadata query failed after the connection was established.
    #[error("Metadata query failed{}: {reason}", for_table(.table))]
    MetadataQuery { table: Option<String>, reason: String },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// Shared adapter state was poisoned by a panicking thread.
    #[error("Adapter state lock poisoned")]
    LockPoisoned,

    /// Validation failed (application-level, not domain).
    #[error("Validation failed: {0}")]
    ValidationFailed(String),
}

impl ApplicationError {
    /// Wrap a driver error as a connectivity failure.
    pub fn connectivity(
        target: impl Into<String>,
        source: impl StdError + Send + Sync + 'static,
    ) -> Self {
        Self::Connectivity {
            target: target.into(),
            source: Arc::new(source),
        }
    }

    pub fn metadata_query(table: Option<&str>, reason: impl ToString) -> Self {
        Self::MetadataQuery {
            table: table.map(str::to_string),
            reason: reason.to_string(),
        }
    }

    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Connectivity { target, .. } => vec![
                format!("Check that the database at {target} is running and reachable"),
                "Verify the user name and password (TABLESMITH_DATABASE__PASSWORD)".into(),
                "Or generate offline from a snapshot with --schema-file".into(),
            ],
            Self::DriverUnavailable { driver } => vec![
                format!("'{driver}' is not a supported metadata source"),
                "Use a mysql:// URL or a JSON snapshot via --schema-file".into(),
            ],
            Self::MetadataQuery { .. } => vec![
                "Check that the user may read information_schema".into(),
                "Check the --catalog value".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
            ],
            Self::LockPoisoned => vec!["Retry the command".into()],
            Self::ValidationFailed(_) => vec!["Check the command arguments".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Connectivity { .. } | Self::MetadataQuery { .. } => ErrorCategory::Connectivity,
            Self::DriverUnavailable { .. } => ErrorCategory::Configuration,
            Self::FilesystemError { .. } | Self::LockPoisoned => ErrorCategory::Internal,
            Self::ValidationFailed(_) => ErrorCategory::Validation,
        }
    }
}

fn for_table(table: &Option<String>) -> String {
    table
        .as_deref()
        .map(|t| format!(" for table '{t}'"))
        .unwrap_or_default()
}
