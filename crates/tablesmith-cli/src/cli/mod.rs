//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums. No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "tablesmith",
    bin_name = "tablesmith",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Generate a Spring/MyBatis code base from database metadata",
    long_about = "tablesmith reads table, column and key metadata from a database \
                  (or a JSON schema snapshot) and writes a multi-module Maven \
                  project with one entity, mapper, service and controller per table.",
    after_help = "EXAMPLES:\n\
        \x20 tablesmith generate --url mysql://localhost:3306/shop -u root --package com.acme.shop\n\
        \x20 tablesmith generate --schema-file schema.json --table user_info --dry-run\n\
        \x20 tablesmith inspect --url mysql://localhost:3306/shop --export schema.json\n\
        \x20 tablesmith completions bash > /usr/share/bash-completion/completions/tablesmith",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate the project from catalog metadata.
    #[command(
        visible_alias = "gen",
        about = "Generate a project from database metadata",
        after_help = "EXAMPLES:\n\
            \x20 tablesmith generate --url mysql://localhost:3306/shop -u root -p secret\n\
            \x20 tablesmith generate --schema-file schema.json -o ./shop --yes\n\
            \x20 tablesmith generate --url mysql://db/shop -t user_info -t orders --no-scaffold"
    )]
    Generate(GenerateArgs),

    /// Show what the metadata source reports.
    #[command(
        visible_alias = "ls",
        about = "Inspect tables, columns and keys",
        after_help = "EXAMPLES:\n\
            \x20 tablesmith inspect --url mysql://localhost:3306/shop\n\
            \x20 tablesmith inspect --schema-file schema.json --output-format json\n\
            \x20 tablesmith inspect --url mysql://db/shop --export schema.json"
    )]
    Inspect(InspectArgs),

    /// Write a default configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 tablesmith init           # ./tablesmith.toml\n\
            \x20 tablesmith init --global  # user configuration directory"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 tablesmith completions bash > ~/.local/share/bash-completion/completions/tablesmith\n\
            \x20 tablesmith completions zsh  > ~/.zfunc/_tablesmith\n\
            \x20 tablesmith completions fish > ~/.config/fish/completions/tablesmith.fish"
    )]
    Completions(CompletionsArgs),

    /// Read the effective configuration.
    #[command(
        about = "Configuration inspection",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 tablesmith config get project.group_id\n\
            \x20 tablesmith config list\n\
            \x20 tablesmith config path"
    )]
    Config(ConfigCommands),
}

// ── metadata source ───────────────────────────────────────────────────────────

/// Where metadata is read from. Shared by `generate` and `inspect`.
#[derive(Debug, Clone, Default, Args)]
pub struct SourceArgs {
    /// Database URL, e.g. `mysql://host:3306/catalog`.
    #[arg(long = "url", value_name = "URL", help = "Database URL")]
    pub url: Option<String>,

    #[arg(short = 'u', long = "user", value_name = "USER", help = "Database user")]
    pub user: Option<String>,

    #[arg(
        short = 'p',
        long = "password",
        value_name = "PASSWORD",
        help = "Database password"
    )]
    pub password: Option<String>,

    /// Read metadata from a JSON schema snapshot instead of a database.
    #[arg(
        long = "schema-file",
        value_name = "FILE",
        conflicts_with = "url",
        help = "JSON schema snapshot to read instead of a database"
    )]
    pub schema_file: Option<PathBuf>,

    /// Catalog (schema) to read; defaults to the one named in the URL.
    #[arg(long = "catalog", value_name = "NAME", help = "Catalog to introspect")]
    pub catalog: Option<String>,

    /// Restrict to these tables (repeatable, or comma separated).
    #[arg(
        short = 't',
        long = "table",
        value_name = "TABLE",
        value_delimiter = ',',
        help = "Only these tables"
    )]
    pub tables: Vec<String>,
}

// ── generate ──────────────────────────────────────────────────────────────────

/// Arguments for `tablesmith generate`.
#[derive(Debug, Args)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Project directory to write (default: `<output.dir>/<artifact-id>`).
    #[arg(
        short = 'o',
        long = "output",
        value_name = "DIR",
        help = "Output directory"
    )]
    pub output: Option<PathBuf>,

    /// Root Java package; defaults to the group id.
    #[arg(long = "package", value_name = "PACKAGE", help = "Root Java package")]
    pub package: Option<String>,

    #[arg(long = "group-id", value_name = "GROUP", help = "Maven group id")]
    pub group_id: Option<String>,

    #[arg(long = "artifact-id", value_name = "ARTIFACT", help = "Maven artifact id")]
    pub artifact_id: Option<String>,

    #[arg(
        long = "project-version",
        value_name = "VERSION",
        help = "Maven project version"
    )]
    pub project_version: Option<String>,

    /// Skip tables without a primary key instead of failing.
    #[arg(long = "skip-keyless", help = "Skip tables that have no primary key")]
    pub skip_keyless: bool,

    /// Only per-table sources; no poms, envelope, entry point or yml.
    #[arg(long = "no-scaffold", help = "Do not generate project scaffolding")]
    pub no_scaffold: bool,

    /// Preview what would be written without writing any files.
    #[arg(long = "dry-run", help = "Show what would be written without writing")]
    pub dry_run: bool,

    /// Skip the confirmation prompt.
    #[arg(
        short = 'y',
        long = "yes",
        help = "Overwrite an existing output directory without asking"
    )]
    pub yes: bool,
}

// ── inspect ───────────────────────────────────────────────────────────────────

/// Arguments for `tablesmith inspect`.
#[derive(Debug, Args)]
pub struct InspectArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Save what was read as a JSON schema snapshot.
    #[arg(
        long = "export",
        value_name = "FILE",
        help = "Write the metadata to a JSON schema snapshot"
    )]
    pub export: Option<PathBuf>,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `tablesmith init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Write to the user configuration directory instead of `./tablesmith.toml`.
    #[arg(long = "global", help = "Create global configuration")]
    pub global: bool,

    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `tablesmith completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `tablesmith config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `project.group_id`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path of the configuration file in use.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────
