//! Schema introspection - turns raw catalog metadata into table models.
//!
//! For every table the provider reports:
//! 1. a builder shell with the table name and comment
//! 2. columns, in provider order
//! 3. primary keys, resolved against the columns once all of them exist
//! 4. `build()`, which freezes the model
//!
//! The provider is closed once every table is drained, whether or not the
//! walk succeeded.

use tracing::{debug, info, instrument, warn};

use crate::{
    application::{ApplicationError, ports::MetadataProvider},
    domain::{ColumnModel, TableModel},
    error::TsResult,
};

/// Which part of the catalog to introspect.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntrospectScope {
    /// Catalog (schema) name; `None` uses the provider's current catalog.
    pub catalog: Option<String>,
    /// Restrict to these tables. Empty means every base table.
    pub tables: Vec<String>,
}

impl IntrospectScope {
    pub fn catalog(catalog: impl Into<String>) -> Self {
        Self {
            catalog: Some(catalog.into()),
            tables: Vec::new(),
        }
    }

    pub fn with_tables<I, S>(mut self, tables: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tables = tables.into_iter().map(Into::into).collect();
        self
    }
}

pub struct SchemaIntrospector {
    provider: Box<dyn MetadataProvider>,
}

impl SchemaIntrospector {
    pub fn new(provider: Box<dyn MetadataProvider>) -> Self {
        Self { provider }
    }

    /// Read every table in `scope` into a [`TableModel`], in provider order.
    ///
    /// Consumes the introspector: the connection is released before this
    /// returns.
    #[instrument(
        skip_all,
        fields(catalog = ?scope.catalog, requested = scope.tables.len())
    )]
    pub fn introspect(self, scope: &IntrospectScope) -> TsResult<Vec<TableModel>> {
        let walked = self.walk(scope);
        let closed = self.provider.close();
        let tables = walked?;
        closed?;
        info!(tables = tables.len(), "Introspection finished");
        Ok(tables)
    }

    fn walk(&self, scope: &IntrospectScope) -> TsResult<Vec<TableModel>> {
        let catalog = match &scope.catalog {
            Some(catalog) => Some(catalog.clone()),
            None => self.provider.current_catalog()?,
        };
        let catalog = catalog.as_deref();
        debug!(catalog = ?catalog, "Resolved catalog");

        let mut entries = self.provider.tables(catalog)?;
        if !scope.tables.is_empty() {
            if let Some(missing) = scope
                .tables
                .iter()
                .find(|name| !entries.iter().any(|e| &e.name == *name))
            {
                return Err(ApplicationError::ValidationFailed(format!(
                    "table '{missing}' not found in catalog '{}'",
                    catalog.unwrap_or("<default>")
                ))
                .into());
            }
            entries.retain(|e| scope.tables.contains(&e.name));
        }

        let mut models = Vec::with_capacity(entries.len());
        for entry in entries {
            let mut builder = TableModel::builder(&entry.name, Some(entry.comment.as_str()));

            let columns = self.provider.columns(catalog, &entry.name)?;
            for column in columns {
                builder.add_column(ColumnModel::new(
                    column.name,
                    column.type_code,
                    Some(column.comment.as_str()),
                ))?;
            }

            let keys = self.provider.primary_keys(catalog, &entry.name)?;
            match keys.as_slice() {
                [] => debug!(table = %entry.name, "No primary key"),
                [key] => {
                    builder.primary_key(key);
                }
                [first, rest @ ..] => {
                    warn!(
                        table = %entry.name,
                        using = %first,
                        ignored = ?rest,
                        "Composite primary key, using the first column"
                    );
                    builder.primary_key(first);
                }
            }

            let model = builder.build()?;
            info!(
                table = model.source_name(),
                columns = model.columns().len(),
                "Introspected table"
            );
            models.push(model);
        }
        Ok(models)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{ColumnEntry, TableEntry};
    use crate::domain::{DomainError, SemanticType, SqlTypeCode};
    use crate::error::TableSmithError;
    use std::collections::HashMap;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct FakeProvider {
        catalog: Option<String>,
        tables: Vec<TableEntry>,
        columns: HashMap<String, Vec<ColumnEntry>>,
        keys: HashMap<String, Vec<String>>,
        fail_catalog: bool,
        closed: Arc<AtomicUsize>,
    }

    impl FakeProvider {
        fn table(mut self, name: &str, columns: &[(&str, SqlTypeCode)], keys: &[&str]) -> Self {
            self.tables.push(TableEntry {
                name: name.into(),
                comment: String::new(),
            });
            self.columns.insert(
                name.into(),
                columns
                    .iter()
                    .map(|(c, t)| ColumnEntry {
                        name: (*c).into(),
                        type_code: t.clone(),
                        comment: String::new(),
                    })
                    .collect(),
            );
            self.keys
                .insert(name.into(), keys.iter().map(|k| (*k).into()).collect());
            self
        }
    }

    impl MetadataProvider for FakeProvider {
        fn current_catalog(&self) -> TsResult<Option<String>> {
            if self.fail_catalog {
                return Err(ApplicationError::metadata_query(None, "access denied").into());
            }
            Ok(self.catalog.clone())
        }

        fn tables(&self, catalog: Option<&str>) -> TsResult<Vec<TableEntry>> {
            assert_eq!(catalog, Some("shop"));
            Ok(self.tables.clone())
        }

        fn columns(&self, _: Option<&str>, table: &str) -> TsResult<Vec<ColumnEntry>> {
            Ok(self.columns.get(table).cloned().unwrap_or_default())
        }

        fn primary_keys(&self, _: Option<&str>, table: &str) -> TsResult<Vec<String>> {
            Ok(self.keys.get(table).cloned().unwrap_or_default())
        }

        fn close(&self) -> TsResult<()> {
            self.closed.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    fn shop() -> FakeProvider {
        FakeProvider {
            catalog: Some("shop".into()),
            ..FakeProvider::default()
        }
        .table(
            "user",
            &[("id", SqlTypeCode::BigInt), ("user_name", SqlTypeCode::Varchar)],
            &["id"],
        )
        .table("orders", &[("order_id", SqlTypeCode::Integer)], &["order_id"])
    }

    #[test]
    fn builds_models_in_provider_order_and_closes() {
        let provider = shop();
        let closed = provider.closed.clone();

        let models = SchemaIntrospector::new(Box::new(provider))
            .introspect(&IntrospectScope::default())
            .unwrap();

        let names: Vec<_> = models.iter().map(TableModel::source_name).collect();
        assert_eq!(names, ["user", "orders"]);
        let user = &models[0];
        assert_eq!(user.columns()[1].member_name, "userName");
        assert_eq!(
            user.primary_key().unwrap().semantic_type,
            SemanticType::Int64
        );
        assert_eq!(closed.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn table_filter_keeps_only_named_tables() {
        let models = SchemaIntrospector::new(Box::new(shop()))
            .introspect(&IntrospectScope::default().with_tables(["orders"]))
            .unwrap();
        assert_eq!(models.len(), 1);
        assert_eq!(models[0].entity_name(), "Orders");
    }

    #[test]
    fn unknown_table_in_filter_is_rejected() {
        let err = SchemaIntrospector::new(Box::new(shop()))
            .introspect(&IntrospectScope::default().with_tables(["nope"]))
            .unwrap_err();
        assert!(err.to_string().contains("'nope'"));
    }

    #[test]
    fn composite_key_uses_first_column() {
        let provider = FakeProvider::default().table(
            "order_item",
            &[("order_id", SqlTypeCode::Integer), ("item_id", SqlTypeCode::Integer)],
            &["order_id", "item_id"],
        );
        let models = SchemaIntrospector::new(Box::new(provider))
            .introspect(&IntrospectScope::catalog("shop"))
            .unwrap();
        assert_eq!(models[0].primary_key().unwrap().column_name, "order_id");
    }

    #[test]
    fn unresolved_key_aborts_but_still_closes() {
        let provider = FakeProvider::default().table("t", &[("a", SqlTypeCode::Varchar)], &["id"]);
        let closed = provider.closed.clone();

        let err = SchemaIntrospector::new(Box::new(provider))
            .introspect(&IntrospectScope::catalog("shop"))
            .unwrap_err();
        assert!(matches!(
            err,
            TableSmithError::Domain(DomainError::UnresolvedPrimaryKey { .. })
        ));
        assert_eq!(closed.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn provider_failure_aborts() {
        let provider = FakeProvider {
            fail_catalog: true,
            ..shop()
        };
        let err = SchemaIntrospector::new(Box::new(provider))
            .introspect(&IntrospectScope::default())
            .unwrap_err();
        assert!(matches!(
            err,
            TableSmithError::Application(ApplicationError::MetadataQuery { .. })
        ));
    }
}
