//! Metadata provider adapters.
//!
//! - [`MySqlMetadataProvider`]: live MySQL catalog over `sqlx` (feature `mysql`)
//! - [`SnapshotMetadataProvider`]: a JSON schema snapshot, or one built in code
//!
//! [`connect`] picks a provider from the URL scheme.

#[cfg(feature = "mysql")]
mod mysql;
mod snapshot;

#[cfg(feature = "mysql")]
pub use mysql::MySqlMetadataProvider;
pub use snapshot::{
    ColumnSnapshot, Snapshot, SnapshotError, SnapshotMetadataProvider, TableSnapshot, TypeRef,
};

use std::time::Duration;
use tracing::debug;
use url::Url;

use tablesmith_core::{
    application::{ApplicationError, ports::MetadataProvider},
    error::{TableSmithError, TsResult},
};

pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Where the metadata comes from and how to authenticate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionSettings {
    /// `mysql://host:port/catalog` (a `jdbc:` prefix is accepted), or
    /// `file:///path/schema.json`.
    pub url: String,
    /// Overrides any user name embedded in `url`.
    pub user: Option<String>,
    /// Overrides any password embedded in `url`.
    pub password: Option<String>,
    pub connect_timeout: Duration,
}

impl ConnectionSettings {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            user: None,
            password: None,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
        }
    }

    pub fn credentials(mut self, user: Option<String>, password: Option<String>) -> Self {
        self.user = user;
        self.password = password;
        self
    }

    /// Parsed URL with the configured credentials applied.
    pub fn authenticated_url(&self) -> TsResult<Url> {
        let mut url = self.parse()?;
        if let Some(user) = self.user.as_deref().filter(|u| !u.is_empty()) {
            url.set_username(user)
                .map_err(|()| self.invalid("URL cannot carry a user name"))?;
        }
        if let Some(password) = self.password.as_deref().filter(|p| !p.is_empty()) {
            url.set_password(Some(password))
                .map_err(|()| self.invalid("URL cannot carry a password"))?;
        }
        Ok(url)
    }

    /// The URL with any password masked, for logs and error messages.
    pub fn redacted(&self) -> String {
        match self.parse() {
            Ok(mut url) => {
                if url.password().is_some() {
                    let _ = url.set_password(Some("***"));
                }
                url.to_string()
            }
            Err(_) => "<invalid url>".to_string(),
        }
    }

    /// JDBC form of the URL, without credentials, for the generated
    /// application configuration.
    pub fn jdbc_url(&self) -> TsResult<String> {
        let mut url = self.parse()?;
        let _ = url.set_username("");
        let _ = url.set_password(None);
        Ok(format!("jdbc:{url}"))
    }

    /// Catalog named in the URL path, if any.
    pub fn catalog(&self) -> Option<String> {
        let url = self.parse().ok()?;
        if url.scheme() == "file" {
            return None;
        }
        url.path_segments()?
            .next()
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    }

    fn parse(&self) -> TsResult<Url> {
        let raw = self.url.trim();
        let raw = raw.strip_prefix("jdbc:").unwrap_or(raw);
        Url::parse(raw).map_err(|e| self.invalid(&e.to_string()))
    }

    fn invalid(&self, reason: &str) -> TableSmithError {
        TableSmithError::configuration(format!("invalid database URL: {reason}"))
    }
}

/// Open a metadata provider for `settings`, chosen by URL scheme.
pub fn connect(settings: &ConnectionSettings) -> TsResult<Box<dyn MetadataProvider>> {
    let scheme = settings.parse()?.scheme().to_string();
    debug!(scheme = %scheme, url = %settings.redacted(), "Selecting metadata driver");
    match scheme.as_str() {
        #[cfg(feature = "mysql")]
        "mysql" => Ok(Box::new(MySqlMetadataProvider::connect(settings)?)),
        "file" => {
            let path = settings
                .parse()?
                .to_file_path()
                .map_err(|()| settings.invalid("file URL does not name a local path"))?;
            Ok(Box::new(SnapshotMetadataProvider::from_path(&path)?))
        }
        other => Err(ApplicationError::DriverUnavailable {
            driver: other.to_string(),
        }
        .into()),
    }
}
