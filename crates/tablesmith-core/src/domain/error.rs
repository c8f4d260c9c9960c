// ============================================================================
// domain/error.rs - schema and layout violations
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (they travel inside `TableSmithError`)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Malformed schema metadata
    // ========================================================================
    #[error("table '{table}': primary key column '{column}' is not among the table's columns")]
    UnresolvedPrimaryKey { table: String, column: String },

    #[error("table '{table}' has no primary key")]
    MissingPrimaryKey { table: String },

    #[error(
        "table '{table}': columns '{first}' and '{second}' both map to member name '{member}'"
    )]
    DuplicateMemberName {
        table: String,
        member: String,
        first: String,
        second: String,
    },

    #[error("invalid identifier '{identifier}': {reason}")]
    InvalidIdentifier { identifier: String, reason: String },

    #[error("tables '{first}' and '{second}' both map to type name '{entity}'")]
    DuplicateEntityName {
        entity: String,
        first: String,
        second: String,
    },

    #[error("table '{table}' maps to type name '{entity}', which generated code already uses")]
    ReservedTypeName { table: String, entity: String },

    // ========================================================================
    // Layout and request validation
    // ========================================================================
    #[error("invalid package namespace '{namespace}': {reason}")]
    InvalidNamespace { namespace: String, reason: String },

    #[error("invalid page request (page {page}, size {size}): page must be >= 1 and size > 0")]
    InvalidPage { page: i64, size: i64 },

    #[error("Duplicate path in artifact set: {path}")]
    DuplicatePath { path: String },

    #[error("Absolute paths not allowed: {path}")]
    AbsolutePathNotAllowed { path: String },

    #[error("Path leaves the output root: {path}")]
    PathEscapesRoot { path: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::UnresolvedPrimaryKey { table, column } => vec![
                format!("The metadata for '{}' lists '{}' as a key column", table, column),
                "Check that the column still exists and that the catalog is correct".into(),
            ],
            Self::MissingPrimaryKey { table } => vec![
                format!("Add a primary key to '{}'", table),
                "Or exclude it with --table / skip it with --skip-keyless".into(),
            ],
            Self::DuplicateMemberName { first, second, .. } => vec![
                format!("Rename '{}' or '{}' in the database", first, second),
                "Or exclude the table from generation".into(),
            ],
            Self::InvalidIdentifier { identifier, .. } => vec![
                format!("Rename '{}' so it starts with a letter and uses only letters, digits and '_'", identifier),
                "Or exclude the table from generation with --table".into(),
            ],
            Self::DuplicateEntityName { first, second, .. } => vec![
                format!("Generate '{}' and '{}' in separate runs with --table", first, second),
                "Or rename one of them in the database".into(),
            ],
            Self::ReservedTypeName { table, .. } => vec![
                format!("Rename '{}' in the database", table),
                "Or exclude it with --table".into(),
            ],
            Self::InvalidNamespace { .. } => vec![
                "Use a dotted Java package such as com.example.shop".into(),
                "Each segment must start with a letter or underscore".into(),
            ],
            Self::InvalidPage { .. } => vec!["Page numbers start at 1; sizes must be positive".into()],
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::UnresolvedPrimaryKey { .. }
            | Self::MissingPrimaryKey { .. }
            | Self::DuplicateMemberName { .. }
            | Self::DuplicateEntityName { .. }
            | Self::ReservedTypeName { .. } => ErrorCategory::Schema,
            Self::InvalidIdentifier { .. }
            | Self::InvalidNamespace { .. }
            | Self::InvalidPage { .. } => ErrorCategory::Validation,
            Self::DuplicatePath { .. }
            | Self::AbsolutePathNotAllowed { .. }
            | Self::PathEscapesRoot { .. } => ErrorCategory::Internal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Schema,
    NotFound,
    Internal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_errors_are_categorized() {
        let err = DomainError::MissingPrimaryKey {
            table: "audit_log".into(),
        };
        assert_eq!(err.category(), ErrorCategory::Schema);
        assert!(err.to_string().contains("audit_log"));
        assert!(err.suggestions().iter().any(|s| s.contains("--skip-keyless")));
    }

    #[test]
    fn duplicate_member_message_names_both_columns() {
        let err = DomainError::DuplicateMemberName {
            table: "t".into(),
            member: "userName".into(),
            first: "user_name".into(),
            second: "user__name".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("user_name") && msg.contains("user__name"));
    }
}
