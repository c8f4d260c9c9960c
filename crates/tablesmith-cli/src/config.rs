//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value. The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables: `TABLESMITH_<SECTION>__<KEY>`, e.g.
//!    `TABLESMITH_DATABASE__PASSWORD`
//! 3. `--config FILE`, or else `./tablesmith.toml` over the user config file
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use tracing::debug;

use tablesmith_core::domain::{DEFAULT_DRIVER_CLASS, DEFAULT_PROJECT_VERSION, ModuleNames};

/// File name looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "tablesmith.toml";

const ENV_PREFIX: &str = "TABLESMITH";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Coordinates of the generated project.
    pub project: ProjectConfig,
    /// Metadata source.
    pub database: DatabaseConfig,
    /// Output settings.
    pub output: OutputConfig,
    /// Generation switches.
    pub generation: GenerationConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
    /// Root Java package; the group id when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package: Option<String>,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            group_id: "com.example".into(),
            artifact_id: "demo".into(),
            version: DEFAULT_PROJECT_VERSION.into(),
            package: None,
        }
    }
}

impl ProjectConfig {
    pub fn package(&self) -> &str {
        self.package.as_deref().unwrap_or(&self.group_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog: Option<String>,
    /// JDBC driver class written into the generated `application.yml`.
    pub driver_class: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            user: None,
            password: None,
            catalog: None,
            driver_class: DEFAULT_DRIVER_CLASS.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Parent directory of generated projects.
    pub dir: PathBuf,
    pub no_color: bool,
    /// `auto`, `human`, `plain` or `json`.
    pub format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            no_color: false,
            format: "auto".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub scaffold: bool,
    pub skip_keyless: bool,
    pub modules: ModuleNames,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            scaffold: true,
            skip_keyless: false,
            modules: ModuleNames::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from defaults, files and the environment.
    ///
    /// An explicit `config_file` must exist; the implicit locations are
    /// optional.
    pub fn load(config_file: Option<&Path>) -> anyhow::Result<Self> {
        Self::load_from(config_file, &Self::local_path(), Self::global_path().as_deref())
    }

    fn load_from(
        config_file: Option<&Path>,
        local: &Path,
        global: Option<&Path>,
    ) -> anyhow::Result<Self> {
        let mut builder = Config::builder().add_source(
            Config::try_from(&Self::default()).context("Failed to build default configuration")?,
        );

        match config_file {
            Some(path) => {
                debug!(path = %path.display(), "Using explicit config file");
                builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(true));
            }
            None => {
                if let Some(global) = global {
                    builder =
                        builder.add_source(File::from(global).format(FileFormat::Toml).required(false));
                }
                builder = builder.add_source(File::from(local).format(FileFormat::Toml).required(false));
            }
        }

        let config = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to read configuration")?;

        config
            .try_deserialize()
            .context("Configuration has invalid values")
    }

    /// `./tablesmith.toml`.
    pub fn local_path() -> PathBuf {
        PathBuf::from(LOCAL_CONFIG_FILE)
    }

    /// User configuration file, when the platform has a config directory.
    pub fn global_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("dev", "tablesmith", "tablesmith")
            .map(|d| d.config_dir().join("config.toml"))
    }

    /// The file that [`Self::load`] would read last, or the default write
    /// location when none exists.
    pub fn active_path(config_file: Option<&Path>) -> PathBuf {
        if let Some(path) = config_file {
            return path.to_path_buf();
        }
        let local = Self::local_path();
        if local.is_file() {
            return local;
        }
        Self::global_path().unwrap_or(local)
    }
}
