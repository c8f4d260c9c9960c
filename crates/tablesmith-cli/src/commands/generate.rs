//! Implementation of the `tablesmith generate` command.
//!
//! Responsibility: resolve project settings from flags and config, open the
//! metadata source, drive the core generation service and display results.
//! No business logic lives here.

use std::io::IsTerminal as _;
use std::path::Path;

use serde_json::json;
use tracing::{info, instrument};

use tablesmith_adapters::LocalFilesystem;
use tablesmith_core::{
    application::{
        GenerateOptions, GenerationPlan, GenerationReport, GenerationRequest, GenerationService,
        IntrospectScope, SchemaIntrospector,
    },
    codegen::ArtifactRenderer,
    domain::{Namespace, ProjectLayout, ProjectSettings},
    error::TableSmithError,
};

use crate::{
    cli::{GenerateArgs, GlobalArgs, OutputFormat},
    commands::open_source,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Execute the `tablesmith generate` command.
///
/// 1. Resolve coordinates, package and output directory
/// 2. Introspect the catalog and render everything in memory
/// 3. Stop after listing the files if `--dry-run`
/// 4. Confirm before writing into an existing directory
/// 5. Write, with a progress bar per artifact set
#[instrument(skip_all, fields(tables = args.source.tables.len()))]
pub fn execute(
    args: GenerateArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let project = &config.project;
    let group_id = args.group_id.clone().unwrap_or_else(|| project.group_id.clone());
    let artifact_id = args
        .artifact_id
        .clone()
        .unwrap_or_else(|| project.artifact_id.clone());
    let version = args
        .project_version
        .clone()
        .unwrap_or_else(|| project.version.clone());
    let package = args
        .package
        .clone()
        .or_else(|| project.package.clone())
        .unwrap_or_else(|| group_id.clone());

    let namespace: Namespace = package.parse().map_err(TableSmithError::from)?;
    let layout = ProjectLayout::new(namespace, config.generation.modules.clone())
        .map_err(TableSmithError::from)?;
    let output_root = args
        .output
        .clone()
        .unwrap_or_else(|| config.output.dir.join(&artifact_id));

    let source = open_source(&args.source, &config)?;
    output.header(&format!("Reading metadata from {}", source.label))?;

    let request = GenerationRequest {
        output_root,
        project: ProjectSettings {
            group_id,
            artifact_id,
            version,
            datasource: source.datasource,
        },
        scope: IntrospectScope {
            catalog: source.catalog,
            tables: args.source.tables.clone(),
        },
        options: GenerateOptions {
            scaffold: config.generation.scaffold && !args.no_scaffold,
            skip_keyless: config.generation.skip_keyless || args.skip_keyless,
        },
    };

    let service = GenerationService::new(Box::new(LocalFilesystem::new()), ArtifactRenderer::new(layout));
    let tables = SchemaIntrospector::new(source.provider).introspect(&request.scope)?;
    let plan = service.plan(&tables, &request)?;

    for name in &plan.skipped {
        output.warning(&format!("Skipped '{name}': no primary key"))?;
    }

    if args.dry_run {
        return print_plan(&plan, &output);
    }

    if service.output_exists(&request) && !args.yes {
        confirm_overwrite(&request.output_root, &global)?;
    }

    info!(files = plan.file_count(), path = %request.output_root.display(), "Writing project");
    let bar = output.progress(plan.sets().count() as u64);
    bar.set_prefix("Writing");
    let report = service.write(&plan, |set| {
        bar.set_message(set.table.clone().unwrap_or_else(|| "project files".into()));
        bar.inc(1);
    })?;
    bar.finish_and_clear();

    print_report(&report, &output)
}

/// Ask before overwriting; without a terminal to ask on, `--yes` is required.
fn confirm_overwrite(path: &Path, global: &GlobalArgs) -> CliResult<()> {
    let can_prompt = !global.quiet && std::io::stdin().is_terminal();
    if !can_prompt {
        return Err(CliError::OutputExists {
            path: path.to_path_buf(),
        });
    }
    prompt_overwrite(path)
}

#[cfg(feature = "interactive")]
fn prompt_overwrite(path: &Path) -> CliResult<()> {
    let proceed = dialoguer::Confirm::new()
        .with_prompt(format!(
            "'{}' already exists. Overwrite generated files?",
            path.display()
        ))
        .default(false)
        .interact()
        .map_err(|e| CliError::IoError {
            message: "Failed to read confirmation".into(),
            source: e.into(),
        })?;
    if proceed {
        Ok(())
    } else {
        Err(CliError::Cancelled)
    }
}

#[cfg(not(feature = "interactive"))]
fn prompt_overwrite(path: &Path) -> CliResult<()> {
    Err(CliError::OutputExists {
        path: path.to_path_buf(),
    })
}

fn print_plan(plan: &GenerationPlan, output: &OutputManager) -> CliResult<()> {
    let files: Vec<String> = plan
        .sets()
        .flat_map(|set| &set.artifacts)
        .map(|artifact| artifact.path.as_path().display().to_string())
        .collect();

    if output.format() == OutputFormat::Json {
        output.json(&json!({
            "dry_run": true,
            "output_root": plan.output_root,
            "tables": plan.tables.iter().filter_map(|s| s.table.as_deref()).collect::<Vec<_>>(),
            "skipped": plan.skipped,
            "files": files,
        }))?;
        return Ok(());
    }

    output.info(&format!(
        "Dry run: would write {} files to {}",
        files.len(),
        plan.output_root.display()
    ))?;
    for file in &files {
        output.print(&format!("  {file}"))?;
    }
    Ok(())
}

fn print_report(report: &GenerationReport, output: &OutputManager) -> CliResult<()> {
    if output.format() == OutputFormat::Json {
        output.json(&json!({
            "output_root": report.output_root,
            "tables": report.tables,
            "skipped": report.skipped,
            "files_written": report.files_written,
            "overwrote_existing": report.overwrote_existing,
        }))?;
        return Ok(());
    }

    if report.overwrote_existing {
        output.info(&format!("Overwrote files in {}", report.output_root.display()))?;
    }
    output.success(&format!(
        "Generated {} table(s), {} files in {}",
        report.tables.len(),
        report.files_written,
        report.output_root.display()
    ))?;

    if !output.is_quiet() && !report.tables.is_empty() {
        output.print("")?;
        output.print("Next steps:")?;
        output.print(&format!("  cd {}", report.output_root.display()))?;
        output.print("  mvn -q package")?;
    }
    Ok(())
}
