//! Command handlers, one module per subcommand.

pub mod completions;
pub mod config;
pub mod generate;
pub mod init;
pub mod inspect;

use tracing::debug;

use tablesmith_adapters::{ConnectionSettings, SnapshotMetadataProvider, connect};
use tablesmith_core::{application::ports::MetadataProvider, domain::DatasourceSettings};

use crate::{
    cli::SourceArgs,
    config::AppConfig,
    error::{CliError, CliResult},
};

/// An opened metadata source and what it implies for the generated project.
pub struct MetadataSource {
    pub provider: Box<dyn MetadataProvider>,
    /// Catalog to read; `None` defers to the provider.
    pub catalog: Option<String>,
    /// Datasource written into the generated `application.yml`.
    pub datasource: DatasourceSettings,
    /// Human label for messages (password redacted).
    pub label: String,
}

/// Open the source named by flags, falling back to the `[database]` config.
pub fn open_source(args: &SourceArgs, config: &AppConfig) -> CliResult<MetadataSource> {
    let db = &config.database;
    let user = args.user.clone().or_else(|| db.user.clone());
    let password = args.password.clone().or_else(|| db.password.clone());

    // A snapshot replaces the database for reading only; a configured URL
    // still names the datasource of the generated application.
    let url = args.url.clone().or_else(|| db.url.clone());
    let settings = url.map(|url| ConnectionSettings::new(url).credentials(user.clone(), password.clone()));

    let catalog = args
        .catalog
        .clone()
        .or_else(|| db.catalog.clone())
        .or_else(|| settings.as_ref().and_then(ConnectionSettings::catalog));

    let (provider, label): (Box<dyn MetadataProvider>, String) = match (&args.schema_file, &settings) {
        (Some(path), _) => (
            Box::new(SnapshotMetadataProvider::from_path(path)?),
            path.display().to_string(),
        ),
        (None, Some(settings)) => (connect(settings)?, settings.redacted()),
        (None, None) => return Err(CliError::MissingSource),
    };

    let jdbc_url = match &settings {
        Some(settings) => settings.jdbc_url()?,
        None => placeholder_jdbc_url(catalog.as_deref()),
    };
    debug!(source = %label, catalog = ?catalog, jdbc_url = %jdbc_url, "Metadata source opened");

    Ok(MetadataSource {
        provider,
        catalog,
        datasource: DatasourceSettings {
            url: jdbc_url,
            username: user.unwrap_or_default(),
            password: password.unwrap_or_default(),
            driver_class: db.driver_class.clone(),
        },
        label,
    })
}

fn placeholder_jdbc_url(catalog: Option<&str>) -> String {
    format!("jdbc:mysql://localhost:3306/{}", catalog.unwrap_or_default())
}
