//! JSON schema snapshots.
//!
//! A snapshot is the catalog metadata captured as a file, so generation can
//! run without a database:
//!
//! ```json
//! {
//!   "catalog": "shop",
//!   "tables": [
//!     {
//!       "name": "user",
//!       "comment": "application users",
//!       "columns": [
//!         { "name": "id", "type": "bigint" },
//!         { "name": "user_name", "type": 12, "comment": "login name" }
//!       ],
//!       "primary_key": ["id"]
//!     }
//!   ]
//! }
//! ```
//!
//! Column types are either JDBC type numbers or dialect type names.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, instrument};

use tablesmith_core::{
    application::ports::{ColumnEntry, MetadataProvider, TableEntry},
    domain::SqlTypeCode,
    error::{TableSmithError, TsResult},
};

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("cannot read schema snapshot {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed schema snapshot: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("schema snapshot lists table '{0}' twice")]
    DuplicateTable(String),
}

impl From<SnapshotError> for TableSmithError {
    fn from(e: SnapshotError) -> Self {
        TableSmithError::configuration(e.to_string())
    }
}

/// Column type as written in a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TypeRef {
    Jdbc(i32),
    Name(String),
}

impl TypeRef {
    pub fn resolve(&self) -> SqlTypeCode {
        match self {
            Self::Jdbc(code) => SqlTypeCode::from_jdbc(*code),
            Self::Name(name) => SqlTypeCode::from_type_name(name),
        }
    }
}

impl From<&SqlTypeCode> for TypeRef {
    fn from(code: &SqlTypeCode) -> Self {
        match code {
            SqlTypeCode::Other(raw) => Self::Name(raw.clone()),
            known => known
                .jdbc()
                .map_or_else(|| Self::Name(known.to_string()), Self::Jdbc),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSnapshot {
    pub name: String,
    #[serde(rename = "type")]
    pub type_ref: TypeRef,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub comment: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSnapshot {
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub comment: String,
    pub columns: Vec<ColumnSnapshot>,
    #[serde(default)]
    pub primary_key: Vec<String>,
}

impl TableSnapshot {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            comment: String::new(),
            columns: Vec::new(),
            primary_key: Vec::new(),
        }
    }

    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    pub fn column(mut self, name: impl Into<String>, type_name: impl Into<String>) -> Self {
        self.columns.push(ColumnSnapshot {
            name: name.into(),
            type_ref: TypeRef::Name(type_name.into()),
            comment: String::new(),
        });
        self
    }

    pub fn primary_key<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.primary_key = columns.into_iter().map(Into::into).collect();
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog: Option<String>,
    pub tables: Vec<TableSnapshot>,
}

impl Snapshot {
    pub fn new(catalog: Option<&str>) -> Self {
        Self {
            catalog: catalog.map(str::to_string),
            tables: Vec::new(),
        }
    }

    pub fn table(mut self, table: TableSnapshot) -> Self {
        self.tables.push(table);
        self
    }

    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let snapshot: Self = serde_json::from_str(json)?;
        for (i, table) in snapshot.tables.iter().enumerate() {
            if snapshot.tables[..i].iter().any(|t| t.name == table.name) {
                return Err(SnapshotError::DuplicateTable(table.name.clone()));
            }
        }
        Ok(snapshot)
    }

    pub fn from_path(path: &Path) -> Result<Self, SnapshotError> {
        let json = std::fs::read_to_string(path).map_err(|source| SnapshotError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Read everything `provider` reports for `catalog` into a snapshot.
    #[instrument(skip_all, fields(catalog = ?catalog))]
    pub fn capture(provider: &dyn MetadataProvider, catalog: Option<&str>) -> TsResult<Self> {
        let catalog = match catalog {
            Some(c) => Some(c.to_string()),
            None => provider.current_catalog()?,
        };
        let mut snapshot = Self::new(catalog.as_deref());
        for entry in provider.tables(catalog.as_deref())? {
            let columns = provider
                .columns(catalog.as_deref(), &entry.name)?
                .into_iter()
                .map(|c| ColumnSnapshot {
                    name: c.name,
                    type_ref: TypeRef::from(&c.type_code),
                    comment: c.comment,
                })
                .collect();
            let primary_key = provider.primary_keys(catalog.as_deref(), &entry.name)?;
            snapshot.tables.push(TableSnapshot {
                name: entry.name,
                comment: entry.comment,
                columns,
                primary_key,
            });
        }
        debug!(tables = snapshot.tables.len(), "Captured snapshot");
        Ok(snapshot)
    }

    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    fn find(&self, table: &str) -> Option<&TableSnapshot> {
        self.tables.iter().find(|t| t.name == table)
    }
}

/// Metadata provider backed by a [`Snapshot`].
///
/// The snapshot holds a single catalog; whatever catalog the caller passes is
/// answered from it.
#[derive(Debug, Clone)]
pub struct SnapshotMetadataProvider {
    snapshot: Snapshot,
}

impl SnapshotMetadataProvider {
    pub fn new(snapshot: Snapshot) -> Self {
        Self { snapshot }
    }

    pub fn from_path(path: &Path) -> TsResult<Self> {
        let snapshot = Snapshot::from_path(path)?;
        debug!(path = %path.display(), tables = snapshot.tables.len(), "Loaded schema snapshot");
        Ok(Self::new(snapshot))
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }
}

impl MetadataProvider for SnapshotMetadataProvider {
    fn current_catalog(&self) -> TsResult<Option<String>> {
        Ok(self.snapshot.catalog.clone())
    }

    fn tables(&self, _catalog: Option<&str>) -> TsResult<Vec<TableEntry>> {
        Ok(self
            .snapshot
            .tables
            .iter()
            .map(|t| TableEntry {
                name: t.name.clone(),
                comment: t.comment.clone(),
            })
            .collect())
    }

    fn columns(&self, _catalog: Option<&str>, table: &str) -> TsResult<Vec<ColumnEntry>> {
        Ok(self
            .snapshot
            .find(table)
            .map(|t| {
                t.columns
                    .iter()
                    .map(|c| ColumnEntry {
                        name: c.name.clone(),
                        type_code: c.type_ref.resolve(),
                        comment: c.comment.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default())
    }

    fn primary_keys(&self, _catalog: Option<&str>, table: &str) -> TsResult<Vec<String>> {
        Ok(self
            .snapshot
            .find(table)
            .map(|t| t.primary_key.clone())
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tablesmith_core::error::ErrorCategory;

    const SHOP: &str = r#"{
        "catalog": "shop",
        "tables": [
            {
                "name": "user",
                "comment": "application users",
                "columns": [
                    { "name": "id", "type": "bigint unsigned" },
                    { "name": "user_name", "type": 12, "comment": "login name" },
                    { "name": "location", "type": "geometry" }
                ],
                "primary_key": ["id"]
            },
            { "name": "audit_log", "columns": [{ "name": "message", "type": "text" }] }
        ]
    }"#;

    #[test]
    fn parses_numbers_and_names() {
        let provider = SnapshotMetadataProvider::new(Snapshot::from_json(SHOP).unwrap());
        let columns = provider.columns(None, "user").unwrap();
        assert_eq!(columns[0].type_code, SqlTypeCode::BigInt);
        assert_eq!(columns[1].type_code, SqlTypeCode::Varchar);
        assert_eq!(columns[1].comment, "login name");
        assert_eq!(columns[2].type_code, SqlTypeCode::Other("geometry".into()));
        assert_eq!(provider.primary_keys(None, "user").unwrap(), ["id"]);
        assert!(provider.primary_keys(None, "audit_log").unwrap().is_empty());
        assert_eq!(provider.current_catalog().unwrap().as_deref(), Some("shop"));
    }

    #[test]
    fn duplicate_tables_are_rejected() {
        let json = r#"{ "tables": [
            { "name": "t", "columns": [] },
            { "name": "t", "columns": [] }
        ] }"#;
        assert!(matches!(
            Snapshot::from_json(json),
            Err(SnapshotError::DuplicateTable(name)) if name == "t"
        ));
    }

    #[test]
    fn malformed_snapshot_is_a_configuration_error() {
        let err: TableSmithError = Snapshot::from_json("{ \"tables\": 3 }").unwrap_err().into();
        assert_eq!(err.category(), ErrorCategory::Configuration);
    }

    #[test]
    fn capture_preserves_types_and_keys() {
        let original = SnapshotMetadataProvider::new(Snapshot::from_json(SHOP).unwrap());
        let captured = Snapshot::capture(&original, None).unwrap();
        let reparsed =
            SnapshotMetadataProvider::new(Snapshot::from_json(&captured.to_json().unwrap()).unwrap());

        for table in ["user", "audit_log"] {
            assert_eq!(
                original.columns(None, table).unwrap(),
                reparsed.columns(None, table).unwrap()
            );
        }
        assert_eq!(captured.tables[0].columns[0].type_ref, TypeRef::Jdbc(-5));
    }

    #[test]
    fn reads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schema.json");
        std::fs::write(&path, SHOP).unwrap();
        let provider = SnapshotMetadataProvider::from_path(&path).unwrap();
        assert_eq!(provider.tables(None).unwrap().len(), 2);

        let missing = SnapshotMetadataProvider::from_path(&dir.path().join("nope.json"));
        assert!(missing.is_err());
    }
}
