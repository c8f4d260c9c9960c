//! MySQL metadata provider.
//!
//! Reads `information_schema` over a small `sqlx` pool. The port is
//! synchronous, so the provider owns a current-thread tokio runtime and
//! blocks on each query.

use sqlx::Row;
use sqlx::mysql::{MySqlPool, MySqlPoolOptions, MySqlRow};
use tokio::runtime::{Builder, Runtime};
use tracing::{debug, info, instrument};

use tablesmith_core::{
    application::{
        ApplicationError,
        ports::{ColumnEntry, MetadataProvider, TableEntry},
    },
    domain::SqlTypeCode,
    error::TsResult,
};

use super::ConnectionSettings;

const CURRENT_CATALOG: &str = "SELECT CAST(DATABASE() AS CHAR) AS catalog";

const TABLES: &str = r"
    SELECT CAST(TABLE_NAME AS CHAR) AS name,
           CAST(TABLE_COMMENT AS CHAR) AS comment
    FROM information_schema.tables
    WHERE TABLE_SCHEMA = COALESCE(?, DATABASE())
      AND TABLE_TYPE = 'BASE TABLE'
    ORDER BY TABLE_NAME";

const COLUMNS: &str = r"
    SELECT CAST(COLUMN_NAME AS CHAR) AS name,
           CAST(DATA_TYPE AS CHAR) AS data_type,
           CAST(COLUMN_TYPE AS CHAR) AS column_type,
           CAST(COLUMN_COMMENT AS CHAR) AS comment
    FROM information_schema.columns
    WHERE TABLE_SCHEMA = COALESCE(?, DATABASE())
      AND TABLE_NAME = ?
    ORDER BY ORDINAL_POSITION";

const PRIMARY_KEYS: &str = r"
    SELECT CAST(COLUMN_NAME AS CHAR) AS name
    FROM information_schema.key_column_usage
    WHERE TABLE_SCHEMA = COALESCE(?, DATABASE())
      AND TABLE_NAME = ?
      AND CONSTRAINT_NAME = 'PRIMARY'
    ORDER BY ORDINAL_POSITION";

pub struct MySqlMetadataProvider {
    runtime: Runtime,
    pool: MySqlPool,
    target: String,
}

impl MySqlMetadataProvider {
    /// Open a single-connection pool to the server named by `settings`.
    #[instrument(skip_all, fields(url = %settings.redacted()))]
    pub fn connect(settings: &ConnectionSettings) -> TsResult<Self> {
        let url = settings.authenticated_url()?;
        let target = settings.redacted();

        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| ApplicationError::connectivity(&target, e))?;

        let pool = runtime
            .block_on(
                MySqlPoolOptions::new()
                    .max_connections(1)
                    .acquire_timeout(settings.connect_timeout)
                    .connect(url.as_str()),
            )
            .map_err(|e| ApplicationError::connectivity(&target, e))?;

        info!(server = %target, "Connected to MySQL");
        Ok(Self {
            runtime,
            pool,
            target,
        })
    }

    /// Run `sql` with positional `params`; `table` only labels errors.
    fn fetch(
        &self,
        sql: &str,
        params: &[Option<&str>],
        table: Option<&str>,
    ) -> TsResult<Vec<MySqlRow>> {
        let query = params
            .iter()
            .fold(sqlx::query(sql), |query, param| query.bind(*param));
        self.runtime
            .block_on(query.fetch_all(&self.pool))
            .map_err(|e| ApplicationError::metadata_query(table, e).into())
    }
}

fn text(row: &MySqlRow, column: &str, table: Option<&str>) -> TsResult<String> {
    row.try_get::<Option<String>, _>(column)
        .map(Option::unwrap_or_default)
        .map_err(|e| ApplicationError::metadata_query(table, e).into())
}

/// `tinyint(1)` is MySQL's boolean; everything else resolves by `DATA_TYPE`.
fn type_code_for(data_type: &str, column_type: &str) -> SqlTypeCode {
    if column_type.trim().eq_ignore_ascii_case("tinyint(1)") {
        SqlTypeCode::Bit
    } else {
        SqlTypeCode::from_type_name(data_type)
    }
}

impl MetadataProvider for MySqlMetadataProvider {
    fn current_catalog(&self) -> TsResult<Option<String>> {
        let rows = self.fetch(CURRENT_CATALOG, &[], None)?;
        let catalog = match rows.first() {
            Some(row) => Some(text(row, "catalog", None)?).filter(|c| !c.is_empty()),
            None => None,
        };
        debug!(catalog = ?catalog, "Current catalog");
        Ok(catalog)
    }

    fn tables(&self, catalog: Option<&str>) -> TsResult<Vec<TableEntry>> {
        self.fetch(TABLES, &[catalog], None)?
            .iter()
            .map(|row| {
                Ok(TableEntry {
                    name: text(row, "name", None)?,
                    comment: text(row, "comment", None)?,
                })
            })
            .collect()
    }

    fn columns(&self, catalog: Option<&str>, table: &str) -> TsResult<Vec<ColumnEntry>> {
        self.fetch(COLUMNS, &[catalog, Some(table)], Some(table))?
            .iter()
            .map(|row| {
                let data_type = text(row, "data_type", Some(table))?;
                let column_type = text(row, "column_type", Some(table))?;
                Ok(ColumnEntry {
                    name: text(row, "name", Some(table))?,
                    type_code: type_code_for(&data_type, &column_type),
                    comment: text(row, "comment", Some(table))?,
                })
            })
            .collect()
    }

    fn primary_keys(&self, catalog: Option<&str>, table: &str) -> TsResult<Vec<String>> {
        self.fetch(PRIMARY_KEYS, &[catalog, Some(table)], Some(table))?
            .iter()
            .map(|row| text(row, "name", Some(table)))
            .collect()
    }

    fn close(&self) -> TsResult<()> {
        self.runtime.block_on(self.pool.close());
        debug!(server = %self.target, "Closed MySQL pool");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tinyint_one_is_boolean() {
        assert_eq!(type_code_for("tinyint", "tinyint(1)"), SqlTypeCode::Bit);
        assert_eq!(type_code_for("tinyint", "tinyint(4)"), SqlTypeCode::TinyInt);
        assert_eq!(type_code_for("bigint", "bigint(20) unsigned"), SqlTypeCode::BigInt);
        assert_eq!(type_code_for("json", "json"), SqlTypeCode::Other("json".into()));
    }

    #[test]
    fn unreachable_server_is_a_connectivity_error() {
        let mut settings = ConnectionSettings::new("mysql://127.0.0.1:1/shop");
        settings.connect_timeout = std::time::Duration::from_millis(200);
        let err = MySqlMetadataProvider::connect(&settings).err().unwrap();
        assert_eq!(
            err.category(),
            tablesmith_core::error::ErrorCategory::Connectivity
        );
    }
}
