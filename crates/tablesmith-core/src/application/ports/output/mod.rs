//! Driven (output) ports - implemented by infrastructure.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::domain::SqlTypeCode;
use crate::error::TsResult;

/// One table as reported by the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableEntry {
    pub name: String,
    #[serde(default)]
    pub comment: String,
}

/// One column as reported by the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnEntry {
    pub name: String,
    pub type_code: SqlTypeCode,
    pub comment: String,
}

/// Port for database metadata.
///
/// Implemented by:
/// - `tablesmith_adapters::metadata::MySqlMetadataProvider` (live database)
/// - `tablesmith_adapters::metadata::SnapshotMetadataProvider` (JSON snapshot, test fixtures)
///
/// Every list comes back in provider order; callers rely on it.
pub trait MetadataProvider: Send + Sync {
    /// Catalog used when the caller does not name one.
    fn current_catalog(&self) -> TsResult<Option<String>>;

    /// Base tables of `catalog`.
    fn tables(&self, catalog: Option<&str>) -> TsResult<Vec<TableEntry>>;

    /// Columns of `table`, in ordinal order.
    fn columns(&self, catalog: Option<&str>, table: &str) -> TsResult<Vec<ColumnEntry>>;

    /// Primary-key column names of `table`, in key ordinal order.
    fn primary_keys(&self, catalog: Option<&str>, table: &str) -> TsResult<Vec<String>>;

    /// Release the underlying connection.
    fn close(&self) -> TsResult<()> {
        Ok(())
    }
}

/// Port for filesystem operations.
///
/// Implemented by:
/// - `tablesmith_adapters::filesystem::LocalFilesystem` (production)
/// - `tablesmith_adapters::filesystem::MemoryFilesystem` (testing)
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> TsResult<()>;

    /// Write content to a file, replacing any previous content.
    fn write_file(&self, path: &Path, content: &str) -> TsResult<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;
}
