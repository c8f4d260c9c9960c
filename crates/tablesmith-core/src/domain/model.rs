//! Normalized table model.
//!
//! A [`TableModel`] is assembled in two passes by [`TableModelBuilder`]:
//! every column first, then the primary key, which is resolved by lookup
//! against the columns already added. `build()` freezes the result.

use serde::Serialize;
use std::collections::HashMap;

use super::error::DomainError;
use super::naming::{
    derive_member_name, derive_pascal_name, derive_route_segment, is_java_identifier, java_safe,
};
use super::types::{SemanticType, SqlTypeCode, map_semantic_type};

/// One column of a table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnModel {
    pub source_name: String,
    pub member_name: String,
    pub sql_type: SqlTypeCode,
    pub semantic_type: SemanticType,
    pub comment: String,
}

impl ColumnModel {
    pub fn new(source_name: impl Into<String>, sql_type: SqlTypeCode, comment: Option<&str>) -> Self {
        let source_name = source_name.into();
        Self {
            member_name: java_safe(derive_member_name(&source_name)),
            semantic_type: map_semantic_type(&sql_type),
            sql_type,
            source_name,
            comment: normalize_comment(comment),
        }
    }
}

/// The resolved primary-key column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrimaryKey {
    pub column_name: String,
    pub member_name: String,
    pub semantic_type: SemanticType,
}

/// Immutable model of one table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableModel {
    source_name: String,
    comment: String,
    entity_name: String,
    instance_name: String,
    route_path: String,
    columns: Vec<ColumnModel>,
    primary_key: Option<PrimaryKey>,
}

impl TableModel {
    pub fn builder(source_name: impl Into<String>, comment: Option<&str>) -> TableModelBuilder {
        TableModelBuilder::new(source_name, comment)
    }

    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }

    /// Table comment, or the raw table name when there is none.
    pub fn description(&self) -> &str {
        if self.comment.is_empty() {
            &self.source_name
        } else {
            &self.comment
        }
    }

    pub fn entity_name(&self) -> &str {
        &self.entity_name
    }

    pub fn instance_name(&self) -> &str {
        &self.instance_name
    }

    pub fn route_path(&self) -> &str {
        &self.route_path
    }

    pub fn columns(&self) -> &[ColumnModel] {
        &self.columns
    }

    pub fn primary_key(&self) -> Option<&PrimaryKey> {
        self.primary_key.as_ref()
    }

    /// The key, or `MissingPrimaryKey` for tables without one.
    pub fn require_primary_key(&self) -> Result<&PrimaryKey, DomainError> {
        self.primary_key.as_ref().ok_or_else(|| DomainError::MissingPrimaryKey {
            table: self.source_name.clone(),
        })
    }

    pub fn column(&self, source_name: &str) -> Option<&ColumnModel> {
        self.columns.iter().find(|c| c.source_name == source_name)
    }

    /// Columns other than the primary key, in table order.
    pub fn non_key_columns(&self) -> impl Iterator<Item = &ColumnModel> {
        let key = self.primary_key.as_ref().map(|pk| pk.column_name.as_str());
        self.columns
            .iter()
            .filter(move |c| Some(c.source_name.as_str()) != key)
    }
}

/// Two-pass builder for [`TableModel`].
#[derive(Debug, Clone)]
pub struct TableModelBuilder {
    source_name: String,
    comment: String,
    columns: Vec<ColumnModel>,
    members: HashMap<String, usize>,
    primary_key: Option<String>,
}

impl TableModelBuilder {
    pub fn new(source_name: impl Into<String>, comment: Option<&str>) -> Self {
        Self {
            source_name: source_name.into(),
            comment: normalize_comment(comment),
            columns: Vec::new(),
            members: HashMap::new(),
            primary_key: None,
        }
    }

    /// Append a column; order of calls is the column order.
    ///
    /// Rejects a column whose derived member name is not a Java identifier
    /// or is already taken.
    pub fn add_column(&mut self, column: ColumnModel) -> Result<&mut Self, DomainError> {
        if !is_java_identifier(&column.member_name) {
            return Err(DomainError::InvalidIdentifier {
                identifier: column.source_name,
                reason: format!(
                    "column of table '{}' maps to member name '{}', which is not a Java identifier",
                    self.source_name, column.member_name
                ),
            });
        }
        if let Some(&idx) = self.members.get(&column.member_name) {
            return Err(DomainError::DuplicateMemberName {
                table: self.source_name.clone(),
                member: column.member_name,
                first: self.columns[idx].source_name.clone(),
                second: column.source_name,
            });
        }
        self.members
            .insert(column.member_name.clone(), self.columns.len());
        self.columns.push(column);
        Ok(self)
    }

    /// Like [`add_column`](Self::add_column), building the column in place.
    pub fn column(
        &mut self,
        source_name: impl Into<String>,
        sql_type: SqlTypeCode,
        comment: Option<&str>,
    ) -> Result<&mut Self, DomainError> {
        self.add_column(ColumnModel::new(source_name, sql_type, comment))
    }

    /// Name the primary-key column. Resolved against the columns in `build()`.
    pub fn primary_key(&mut self, column_name: impl Into<String>) -> &mut Self {
        self.primary_key = Some(column_name.into());
        self
    }

    pub fn build(self) -> Result<TableModel, DomainError> {
        if self.source_name.trim().is_empty() {
            return Err(DomainError::InvalidIdentifier {
                identifier: self.source_name,
                reason: "table name is empty".into(),
            });
        }
        let entity_name = derive_pascal_name(&self.source_name);
        if !is_java_identifier(&entity_name) {
            return Err(DomainError::InvalidIdentifier {
                reason: format!("derived type name '{entity_name}' is not a Java identifier"),
                identifier: self.source_name,
            });
        }

        let primary_key = match self.primary_key {
            None => None,
            Some(name) => {
                let column = self
                    .columns
                    .iter()
                    .find(|c| c.source_name == name)
                    .ok_or_else(|| DomainError::UnresolvedPrimaryKey {
                        table: self.source_name.clone(),
                        column: name.clone(),
                    })?;
                Some(PrimaryKey {
                    column_name: column.source_name.clone(),
                    member_name: column.member_name.clone(),
                    semantic_type: column.semantic_type,
                })
            }
        };

        Ok(TableModel {
            entity_name,
            instance_name: java_safe(derive_member_name(&self.source_name)),
            route_path: derive_route_segment(&self.source_name),
            source_name: self.source_name,
            comment: self.comment,
            columns: self.columns,
            primary_key,
        })
    }
}

fn normalize_comment(comment: Option<&str>) -> String {
    comment.map(str::trim).unwrap_or_default().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_table() -> TableModel {
        let mut builder = TableModel::builder("user", Some(" application users "));
        builder
            .column("id", SqlTypeCode::BigInt, Some("primary key"))
            .unwrap()
            .column("user_name", SqlTypeCode::Varchar, None)
            .unwrap()
            .column("created_at", SqlTypeCode::Timestamp, Some(""))
            .unwrap()
            .primary_key("id");
        builder.build().unwrap()
    }

    #[test]
    fn derives_names_and_types() {
        let table = user_table();
        assert_eq!(table.entity_name(), "User");
        assert_eq!(table.instance_name(), "user");
        assert_eq!(table.route_path(), "user");
        assert_eq!(table.comment(), "application users");

        let members: Vec<_> = table
            .columns()
            .iter()
            .map(|c| (c.member_name.as_str(), c.semantic_type))
            .collect();
        assert_eq!(
            members,
            vec![
                ("id", SemanticType::Int64),
                ("userName", SemanticType::Text),
                ("createdAt", SemanticType::Timestamp),
            ]
        );
    }

    #[test]
    fn primary_key_is_resolved_from_columns() {
        let table = user_table();
        let pk = table.require_primary_key().unwrap();
        assert_eq!(pk.member_name, "id");
        assert_eq!(pk.semantic_type, SemanticType::Int64);
        assert_eq!(table.non_key_columns().count(), 2);
    }

    #[test]
    fn unresolved_primary_key_is_rejected() {
        let mut builder = TableModel::builder("user", None);
        builder
            .column("id", SqlTypeCode::BigInt, None)
            .unwrap()
            .primary_key("user_id");
        let err = builder.build().unwrap_err();
        assert_eq!(
            err,
            DomainError::UnresolvedPrimaryKey {
                table: "user".into(),
                column: "user_id".into()
            }
        );
    }

    #[test]
    fn colliding_member_names_are_rejected() {
        let mut builder = TableModel::builder("t", None);
        builder.column("user_name", SqlTypeCode::Varchar, None).unwrap();
        let err = builder
            .column("user__name", SqlTypeCode::Varchar, None)
            .unwrap_err();
        assert!(matches!(err, DomainError::DuplicateMemberName { ref member, .. } if member == "userName"));
    }

    #[test]
    fn keyless_table_builds_but_cannot_be_keyed() {
        let mut builder = TableModel::builder("audit_log", None);
        builder.column("message", SqlTypeCode::LongVarchar, None).unwrap();
        let table = builder.build().unwrap();
        assert!(table.primary_key().is_none());
        assert!(matches!(
            table.require_primary_key(),
            Err(DomainError::MissingPrimaryKey { .. })
        ));
    }

    #[test]
    fn reserved_column_names_are_escaped() {
        let column = ColumnModel::new("class", SqlTypeCode::Varchar, None);
        assert_eq!(column.member_name, "class_");
    }

    #[test]
    fn empty_table_name_is_rejected() {
        assert!(TableModel::builder("  ", None).build().is_err());
    }

    #[test]
    fn table_names_must_yield_java_type_names() {
        for name in ["___", "../../tmp/pwn", "2fa_codes", "user.info"] {
            let err = TableModel::builder(name, None).build().unwrap_err();
            assert!(
                matches!(err, DomainError::InvalidIdentifier { ref identifier, .. } if identifier == name),
                "{name}: {err:?}"
            );
        }
    }

    #[test]
    fn column_names_must_yield_java_members() {
        let mut builder = TableModel::builder("t", None);
        for name in ["--", "1st", "a/b"] {
            let err = builder.column(name, SqlTypeCode::Varchar, None).unwrap_err();
            assert!(matches!(err, DomainError::InvalidIdentifier { .. }), "{name}");
        }
        assert!(builder.column("ok", SqlTypeCode::Varchar, None).is_ok());
    }

    #[test]
    fn reserved_table_names_get_a_safe_instance_name() {
        let table = TableModel::builder("case", None).build().unwrap();
        assert_eq!(table.entity_name(), "Case");
        assert_eq!(table.instance_name(), "case_");
    }
}
